//! # spl-extract - Structured Product Labeling Extractor
//!
//! `spl-extract` streams FDA Structured Product Labeling (SPL) documents -
//! HL7 v3 XML drug labels - and flattens them into two collections: one
//! record per coded product, and one deduplicated record per ingredient.
//!
//! ## Key Features
//!
//! - **Streaming parser**: pull-based quick-xml traversal that materializes
//!   one product subtree at a time, so memory stays bounded regardless of
//!   document size.
//!
//! - **Single pass**: document header, sponsor, products, packaging codes,
//!   characteristics, and ingredients are all collected in one forward scan.
//!
//! - **Document-wide ingredient dedup**: ingredients are keyed by substance
//!   code and shared by reference across every product record.
//!
//! - **Dosage-form gate**: documents whose products carry an unrecognized
//!   dosage-form code are rejected whole, before any output is produced.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spl_extract::spl::extract::extract_file;
//!
//! let extraction = extract_file("label.xml")?;
//! for product in &extraction.products {
//!     println!("{}: {} NDC codes", product.setid_product, product.ndc_codes.len());
//! }
//! println!("{} distinct ingredients", extraction.ingredients.len());
//! # Ok::<(), spl_extract::spl::extract::ExtractError>(())
//! ```
//!
//! Lower-level access to the raw product subtrees is available through the
//! streamer:
//!
//! ```rust,no_run
//! use spl_extract::spl::streamer::SplStreamer;
//!
//! let mut streamer = SplStreamer::open("label.xml")?;
//! while let Some(unit) = streamer.next_product()? {
//!     println!("closed element: {}", unit.name());
//! }
//! # Ok::<(), spl_extract::spl::streamer::SplError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`spl::streamer`]: streaming pull parser over the SPL document
//! - [`spl::node`]: owned element subtrees yielded by the streamer
//! - [`spl::extract`]: record assembly, ingredient dedup, and the join
//! - [`spl::models`]: output data models
//! - [`dosage_forms`]: the fixed allow-list of recognized dosage-form codes
//!
//! ## Output Shape
//!
//! Each [`spl::models::ProductRecord`] carries the product key
//! (`document_id + "-" + product_code`), the packaging (NDC) codes, a flat
//! data map of scalar and characteristic fields merged with the document
//! header and sponsor name, and the shared document-wide ingredient list.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod dosage_forms;
pub mod spl;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::dosage_forms::{is_recognized_form, OSDF_FORM_CODES};
    pub use crate::spl::extract::{
        extract_file, extract_reader, ExtractError, Extraction,
    };
    pub use crate::spl::models::{
        DocumentHeader, Ingredient, IngredientType, ProductData, ProductRecord, Sponsor,
        SponsorType,
    };
    pub use crate::spl::node::XmlNode;
    pub use crate::spl::streamer::{ProductIterator, SplError, SplStreamer};
}
