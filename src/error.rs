//! Error types for ipsearch.

use thiserror::Error;

/// Error type for ipsearch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Remote source answered with a non-success status
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Remote source could not be reached
    #[error("transport error: {0}")]
    Transport(String),

    /// Geo CSV line without the three `start,end,country` fields
    #[error("malformed range line: {0}")]
    MalformedLine(String),

    /// Invalid range type
    #[error("invalid range type: {0}")]
    InvalidRangeType(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for ipsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Error::HttpStatus(code),
            ureq::Error::Transport(t) => Error::Transport(t.to_string()),
        }
    }
}
