/// Error types for slide rendering operations.
use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pitaya operations.
///
/// Both core transforms (text cascade, chart translation) are total over
/// well-formed node trees; errors only arise while materializing a node
/// tree from raw part bytes.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Malformed UTF-8 in a text node or attribute
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
