//! Error types for wavdec

use thiserror::Error;

/// Result type alias for wavdec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavdec
///
/// Errors are only produced while opening a decoder. Once a decoder
/// exists, reads surface end-of-stream and I/O problems as short counts
/// and seeks report a plain boolean, so playback paths stay error-free.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Format error
    #[error("Format error: {0}")]
    Format(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

impl Error {
    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }
}
