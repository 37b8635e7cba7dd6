//! Error types for JSON-to-CSV conversion

use thiserror::Error;

/// Errors that terminate a conversion. All of them are fatal: the first one
/// encountered aborts the remaining pipeline steps, and output already
/// flushed to the sink is not retracted.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source is not a well-formed top-level JSON array of objects:
    /// missing brackets, a non-array document, a non-object element, or a
    /// decode failure mid-stream.
    #[error("malformed JSON: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// I/O failure while reading or repositioning the source.
    #[error("source read failure: {0}")]
    SourceFailure(#[source] std::io::Error),

    /// I/O failure while writing CSV output.
    #[error("sink write failure: {0}")]
    SinkFailure(#[source] std::io::Error),
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
