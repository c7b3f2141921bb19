//! Crate error type.
//!
//! Pointer handling never fails, so these only surface from the I/O edges:
//! saving and loading map files, decoding uploaded images, and reading
//! configuration.

/// Errors returned by the fallible parts of the engine.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The requested save name is empty once trimmed.
    #[error("please enter a file name for saving")]
    InvalidFileName,
    /// The persisted map file is not valid JSON or has the wrong shape.
    #[error("malformed map document: {0}")]
    MalformedMapDocument(#[from] serde_json::Error),
    /// An uploaded image (or data URI) could not be decoded.
    #[error("image decode failed: {0}")]
    ImageDecodeFailure(String),
    /// Reading or writing a map file failed.
    #[error("map file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration values are inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl MapError {
    /// Stable machine-readable code for the error kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFileName => "E_INVALID_FILE_NAME",
            Self::MalformedMapDocument(_) => "E_MALFORMED_MAP",
            Self::ImageDecodeFailure(_) => "E_IMAGE_DECODE",
            Self::Io(_) => "E_IO",
            Self::InvalidConfig(_) => "E_CONFIG",
        }
    }
}
