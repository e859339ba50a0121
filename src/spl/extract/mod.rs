//! SPL record extraction pipeline
//!
//! This module drives the streamer over one document and assembles the two
//! output collections: product records and the document-wide deduplicated
//! ingredient list. Extraction is all-or-nothing per document: a parse
//! failure or an unrecognized dosage-form code aborts with nothing
//! emitted.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};

use super::models::{DocumentHeader, Ingredient, ProductRecord, Sponsor};
use super::streamer::{SplError, SplStreamer};

use accumulator::DocumentAccumulator;

mod accumulator;
mod characteristics;
mod ingredient;


/// Errors that can occur during record extraction
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Error parsing the input SPL document
    #[error("SPL parsing error: {0}")]
    Parse(#[from] SplError),

    /// A product carries a dosage-form code outside the recognized set;
    /// the whole document is out of scope for this pipeline
    #[error("unrecognized dosage form code: {code}")]
    UnrecognizedForm {
        /// The offending `formCode` value
        code: String,
    },

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output of one document extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Document header metadata
    pub header: DocumentHeader,

    /// Sponsor organization, if any candidate section named one
    pub sponsor: Option<Sponsor>,

    /// One record per coded product, in document order
    pub products: Vec<ProductRecord>,

    /// Document-wide deduplicated ingredient list; the same allocation is
    /// attached to every product record
    pub ingredients: Arc<Vec<Ingredient>>,
}

/// Extract product and ingredient records from an SPL file
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction, ExtractError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let streamer = SplStreamer::open(path)?;
    run(streamer, file_name)
}

/// Extract product and ingredient records from a buffered reader
///
/// `file_name` labels the document in the output records and in error
/// reports.
pub fn extract_reader<R: BufRead>(
    reader: R,
    file_name: impl Into<String>,
) -> Result<Extraction, ExtractError> {
    let streamer = SplStreamer::new(reader)?;
    run(streamer, file_name.into())
}

fn run<R: BufRead>(
    mut streamer: SplStreamer<R>,
    file_name: String,
) -> Result<Extraction, ExtractError> {
    streamer.read_header()?;

    let mut accumulator = DocumentAccumulator::default();
    while let Some(unit) = streamer.next_product()? {
        accumulator.add_unit(&unit)?;
    }

    let mut header = streamer.header().clone();
    header.file_name = file_name;
    header.date_created = Local::now().format("%d/%m/%Y").to_string();
    let sponsor = streamer.sponsor();

    let extraction = accumulator.finish(header, sponsor);
    debug!(
        "{}: {} product record(s), {} distinct ingredient(s)",
        extraction.header.file_name,
        extraction.products.len(),
        extraction.ingredients.len()
    );
    Ok(extraction)
}
