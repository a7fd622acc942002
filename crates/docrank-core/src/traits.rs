use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractionError;
use crate::types::{Document, ExtractedText};

/// Black-box optical character recognition: image in, text out.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &Path) -> Result<String, ExtractionError>;
}

/// Turns a document of any supported kind into trimmed, non-empty text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError>;
}
