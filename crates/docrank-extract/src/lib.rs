//! docrank-extract
//!
//! Turns document references into trimmed text: PDFs through `lopdf`, images
//! through an [`OcrEngine`](docrank_core::traits::OcrEngine), plain text as
//! UTF-8. Batches run concurrently and come back in input order.
pub mod batch;
pub mod ocr;
pub mod pdf;
pub mod plain;

use std::sync::Arc;

use async_trait::async_trait;
use docrank_core::config::OcrSettings;
use docrank_core::traits::{OcrEngine, TextExtractor};
use docrank_core::types::{Document, DocumentKind, ExtractedText};
use docrank_core::ExtractionError;

pub use batch::{extract_documents, extract_paths};
pub use ocr::TesseractOcr;

/// Dispatches each document to the handler for its kind.
#[derive(Clone)]
pub struct DocumentExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl DocumentExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self { Self { ocr } }

    /// Extractor backed by the Tesseract command-line engine.
    pub fn with_tesseract(settings: &OcrSettings) -> Self { Self::new(Arc::new(TesseractOcr::new(settings))) }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError> {
        let raw = match document.kind {
            DocumentKind::StructuredDocument => pdf::extract_pdf_text(&document.path).await?,
            DocumentKind::Image => self.ocr.recognize(&document.path).await?,
            DocumentKind::PlainText => plain::read_plain_text(&document.path).await?,
        };
        ExtractedText::new(raw)
    }
}
