use std::path::PathBuf;
use std::sync::Arc;

use docrank_core::config::Settings;
use docrank_core::traits::TextExtractor;
use docrank_core::types::ExtractionOutcome;
use docrank_extract::{extract_paths, DocumentExtractor};

use crate::ranker::Ranker;
use crate::report::RankingReport;

/// Extract a batch of files, then rank whatever produced text.
pub struct Pipeline<E>
where
    E: TextExtractor + 'static,
{
    extractor: Arc<E>,
    ranker: Ranker,
    concurrency: usize,
}

impl<E> Pipeline<E>
where
    E: TextExtractor + 'static,
{
    pub fn new(extractor: E, ranker: Ranker, concurrency: usize) -> Self {
        Self { extractor: Arc::new(extractor), ranker, concurrency }
    }

    pub async fn run(&self, paths: Vec<PathBuf>) -> RankingReport { self.run_with_progress(paths, |_| {}).await }

    /// Same as [`run`](Self::run), calling `on_extracted` once per document.
    pub async fn run_with_progress<F>(&self, paths: Vec<PathBuf>, on_extracted: F) -> RankingReport
    where
        F: FnMut(&ExtractionOutcome),
    {
        let outcomes = extract_paths(Arc::clone(&self.extractor), paths, self.concurrency, on_extracted).await;
        let report = self.ranker.rank_outcomes(outcomes);
        tracing::info!("ranked batch, {} skipped", report.skipped.len());
        report
    }
}

impl Pipeline<DocumentExtractor> {
    /// Production pipeline: Tesseract OCR, settings-driven ranking.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            DocumentExtractor::with_tesseract(&settings.ocr),
            Ranker::new(&settings.ranking),
            settings.extraction.concurrency,
        )
    }
}
