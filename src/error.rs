//! Error types for the skypack conversion pipeline.

/// Top-level error type for conversion and packaging.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The source file does not declare an image content type.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The source bytes could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Packaging was attempted without a complete set of faces.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A face could not be encoded, or a face payload is not an encoded image.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Archive serialization failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A blocking conversion task panicked or was aborted.
    #[error("task error: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PackError>;
