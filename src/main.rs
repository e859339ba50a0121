//! # spl-extract CLI
//!
//! A command-line tool for flattening FDA Structured Product Labeling
//! (SPL) documents into product and ingredient records.
//!
//! ## Usage
//!
//! ```bash
//! # Extract one document to JSON
//! spl-extract extract label.xml label.json
//!
//! # Extract a directory of documents
//! spl-extract batch labels/ records/
//!
//! # Summarize a document
//! spl-extract info label.xml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use serde_json::json;

use spl_extract::spl::extract::{extract_file, Extraction};

/// spl-extract - Structured Product Labeling record extractor
#[derive(Parser)]
#[command(name = "spl-extract")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract product and ingredient records from one SPL document
    Extract {
        /// Input SPL XML file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JSON file path (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Extract every SPL document in a directory
    Batch {
        /// Directory containing SPL XML files
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Directory for the JSON outputs
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Process documents in parallel (requires the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Display header, sponsor, and record counts for an SPL document
    Info {
        /// Input SPL XML file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Extract {
            input,
            output,
            pretty,
        } => run_extract(input, output, pretty),
        Commands::Batch {
            input_dir,
            output_dir,
            parallel,
        } => run_batch(input_dir, output_dir, parallel),
        Commands::Info { file } => run_info(file),
    }
}

/// Extract one document and write the two output collections as JSON
fn run_extract(input: PathBuf, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let extraction = extract_file(&input)
        .with_context(|| format!("extraction failed for {}", input.display()))?;
    info!(
        "{}: {} product record(s), {} distinct ingredient(s)",
        input.display(),
        extraction.products.len(),
        extraction.ingredients.len()
    );

    let json = render(&extraction, pretty)?;
    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Extract every `*.xml` file in a directory
///
/// Per-document failures (parse errors, out-of-scope dosage forms) are
/// logged and skipped; the batch keeps going.
fn run_batch(input_dir: PathBuf, output_dir: PathBuf, parallel: bool) -> Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", input_dir.display());
    }
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut files: Vec<PathBuf> = fs::read_dir(&input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("xml"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    info!("Batch extraction: {} document(s)", files.len());

    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            let succeeded = files
                .par_iter()
                .filter(|path| process_one(path, &output_dir))
                .count();
            info!(
                "Batch complete: {}/{} document(s) extracted",
                succeeded,
                files.len()
            );
            return Ok(());
        }
        #[cfg(not(feature = "parallel"))]
        warn!(
            "Parallel extraction requested but the binary was built without the parallel feature; falling back to sequential."
        );
    }

    let succeeded = files
        .iter()
        .filter(|path| process_one(path, &output_dir))
        .count();
    info!(
        "Batch complete: {}/{} document(s) extracted",
        succeeded,
        files.len()
    );
    Ok(())
}

/// Extract one document of a batch; returns whether it produced output
fn process_one(path: &Path, output_dir: &Path) -> bool {
    let extraction = match extract_file(path) {
        Ok(extraction) => extraction,
        Err(e) => {
            warn!("{}: skipped ({e})", path.display());
            return false;
        }
    };

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let out_path = output_dir.join(format!("{stem}.json"));
    match render(&extraction, false).and_then(|json| Ok(fs::write(&out_path, json)?)) {
        Ok(()) => {
            info!(
                "{}: {} product record(s) -> {}",
                path.display(),
                extraction.products.len(),
                out_path.display()
            );
            true
        }
        Err(e) => {
            warn!("{}: failed to write output ({e})", path.display());
            false
        }
    }
}

/// Display header, sponsor, and record counts for one document
fn run_info(file: PathBuf) -> Result<()> {
    let extraction = extract_file(&file)
        .with_context(|| format!("extraction failed for {}", file.display()))?;
    let header = &extraction.header;

    println!("File:           {}", header.file_name);
    println!(
        "Document id:    {}",
        header.document_id.as_deref().unwrap_or("-")
    );
    println!("Set id:         {}", header.set_id.as_deref().unwrap_or("-"));
    println!(
        "Effective time: {}",
        header.effective_time.as_deref().unwrap_or("-")
    );
    println!(
        "Document type:  {}",
        header.document_type.as_deref().unwrap_or("-")
    );
    match &extraction.sponsor {
        Some(sponsor) => println!("Sponsor:        {}", sponsor.name),
        None => println!("Sponsor:        -"),
    }
    println!("Products:       {}", extraction.products.len());
    for product in &extraction.products {
        println!(
            "  {} ({} NDC code(s), {} active / {} inactive ingredient name(s))",
            product.setid_product,
            product.ndc_codes.len(),
            product.data.active_ingredient_names.len(),
            product.data.inactive_ingredient_names.len()
        );
    }
    println!("Ingredients:    {}", extraction.ingredients.len());
    Ok(())
}

/// Serialize the two flat output collections
fn render(extraction: &Extraction, pretty: bool) -> Result<String> {
    let payload = json!({
        "products": extraction.products,
        "ingredients": extraction.ingredients,
    });
    let json = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    Ok(json)
}
