/// Errors that can occur during SPL parsing
#[derive(Debug, thiserror::Error)]
pub enum SplError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error in markup content
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Invalid SPL document structure
    #[error("invalid SPL structure: {0}")]
    InvalidStructure(String),
}
