//! Streaming SPL parser using quick-xml
//!
//! This module provides a pull-based streaming parser for SPL documents,
//! designed to handle arbitrarily large labels with minimal memory usage.
//! The parser makes a single forward pass: the document prologue (header
//! and sponsor sections) is consumed first, then product units are yielded
//! one owned subtree at a time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;

use super::models::{DocumentHeader, Sponsor, SponsorType};

pub use error::SplError;
pub use iterators::ProductIterator;

mod error;
mod header;
mod helpers;
mod iterators;
mod product;

#[cfg(test)]
mod tests;

/// Default input buffer size for SPL parsing (64KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Streaming parser for SPL documents
pub struct SplStreamer<R: BufRead> {
    reader: Reader<R>,
    header: DocumentHeader,
    author_org: Option<String>,
    legal_org: Option<String>,
    header_read: bool,
    in_body: bool,
}

impl SplStreamer<BufReader<File>> {
    /// Open an SPL file for streaming with default buffer size (64KB)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SplError> {
        Self::open_with_buffer_size(path, DEFAULT_INPUT_BUFFER_SIZE)
    }

    /// Open an SPL file for streaming with custom buffer size
    pub fn open_with_buffer_size<P: AsRef<Path>>(
        path: P,
        buffer_size: usize,
    ) -> Result<Self, SplError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::with_capacity(buffer_size, file);
        Self::new(reader)
    }
}

impl<R: BufRead> SplStreamer<R> {
    /// Create a new streamer from a BufRead source
    pub fn new(reader: R) -> Result<Self, SplError> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Ok(Self {
            reader: xml_reader,
            header: DocumentHeader::default(),
            author_org: None,
            legal_org: None,
            header_read: false,
            in_body: false,
        })
    }

    /// Get the document header fields captured so far
    ///
    /// Call after [`read_header`](Self::read_header) (or the first
    /// [`next_product`](Self::next_product), which reads the header
    /// implicitly) for the complete set.
    pub fn header(&self) -> &DocumentHeader {
        &self.header
    }

    /// The sponsor organization, legal authenticator winning over author
    pub fn sponsor(&self) -> Option<Sponsor> {
        if let Some(name) = &self.legal_org {
            Some(Sponsor {
                name: name.clone(),
                sponsor_type: SponsorType::Legal,
            })
        } else {
            self.author_org.as_ref().map(|name| Sponsor {
                name: name.clone(),
                sponsor_type: SponsorType::Labeler,
            })
        }
    }

    /// Iterate over all product units
    pub fn products(self) -> ProductIterator<R> {
        ProductIterator { streamer: self }
    }
}
