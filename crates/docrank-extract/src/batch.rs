//! Ordered, bounded-concurrency batch extraction.
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use docrank_core::traits::TextExtractor;
use docrank_core::types::{Document, DocumentId, ExtractionOutcome};
use docrank_core::ExtractionError;
use futures::stream::{self, StreamExt};
use tokio::task::{JoinError, JoinHandle};

/// Spawned extraction that is aborted when its batch is dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> { Pin::new(&mut self.0).poll(cx) }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) { self.0.abort(); }
}

/// Extract every document, at most `concurrency` at a time.
///
/// Outcomes come back in input order. Each document runs on its own task, so
/// a failure or panic in one never affects the others. Dropping the returned
/// future aborts extractions still in flight. `on_complete` is called once per
/// outcome as it is yielded.
pub async fn extract_documents<E, F>(
    extractor: Arc<E>,
    documents: Vec<Document>,
    concurrency: usize,
    mut on_complete: F,
) -> Vec<ExtractionOutcome>
where
    E: TextExtractor + 'static,
    F: FnMut(&ExtractionOutcome),
{
    let total = documents.len();
    tracing::info!("extracting {} documents (concurrency {})", total, concurrency.max(1));

    let tasks = documents.into_iter().map(|doc| {
        let extractor = Arc::clone(&extractor);
        async move {
            let id = doc.id.clone();
            let handle = AbortOnDrop(tokio::spawn(async move { extractor.extract(&doc).await }));
            let result = match handle.await {
                Ok(res) => res,
                Err(e) => Err(ExtractionError::EngineFailure(format!("extraction task failed: {e}"))),
            };
            ExtractionOutcome { id, result }
        }
    });

    let mut outcomes = Vec::with_capacity(total);
    let mut stream = stream::iter(tasks).buffered(concurrency.max(1));
    while let Some(outcome) = stream.next().await {
        if let Err(err) = &outcome.result {
            tracing::warn!("skipping {}: {}", outcome.id, err);
        }
        on_complete(&outcome);
        outcomes.push(outcome);
    }
    outcomes
}

/// Like [`extract_documents`], inferring each kind from the file extension.
/// Unsupported paths become `UnsupportedFormat` outcomes in place.
pub async fn extract_paths<E, F>(
    extractor: Arc<E>,
    paths: Vec<PathBuf>,
    concurrency: usize,
    mut on_complete: F,
) -> Vec<ExtractionOutcome>
where
    E: TextExtractor + 'static,
    F: FnMut(&ExtractionOutcome),
{
    let mut slots: Vec<Option<ExtractionOutcome>> = Vec::with_capacity(paths.len());
    let mut documents = Vec::new();
    for path in paths {
        match Document::from_path(path.clone()) {
            Ok(doc) => {
                documents.push(doc);
                slots.push(None);
            }
            Err(err) => {
                tracing::warn!("skipping {}: {}", path.display(), err);
                let outcome = ExtractionOutcome::failed(DocumentId::from_path(&path), err);
                on_complete(&outcome);
                slots.push(Some(outcome));
            }
        }
    }

    let mut extracted = extract_documents(extractor, documents, concurrency, &mut on_complete)
        .await
        .into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| extracted.next()))
        .collect()
}
