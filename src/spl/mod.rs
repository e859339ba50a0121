//! SPL document processing
//!
//! This module contains the streaming parser for Structured Product
//! Labeling documents and the extraction pipeline that flattens them into
//! product and ingredient records.

pub mod extract;
pub mod models;
pub mod node;
pub mod streamer;
