use serde::Serialize;
use thiserror::Error;

/// Why a single document produced no usable text.
///
/// Every variant is recoverable at batch level: the document is dropped from
/// the corpus and reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExtractionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction engine failed: {0}")]
    EngineFailure(String),

    #[error("Text is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("No extractable text")]
    EmptyExtraction,

    #[error("I/O error: {0}")]
    Io(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
