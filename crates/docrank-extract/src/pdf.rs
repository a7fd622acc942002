use std::path::{Path, PathBuf};

use docrank_core::ExtractionError;
use lopdf::Document;

/// Text of every page in page order, one line break between pages.
///
/// Pages whose content cannot be decoded are skipped. A file that does not
/// parse as PDF is an engine failure.
pub async fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_blocking(&path))
        .await
        .map_err(|e| ExtractionError::EngineFailure(format!("pdf worker failed: {e}")))?
}

fn extract_blocking(path: &Path) -> Result<String, ExtractionError> {
    let doc = Document::load(path)
        .map_err(|e| ExtractionError::EngineFailure(format!("lopdf: failed to load {}: {e}", path.display())))?;

    let mut pages = Vec::new();
    for page_no in doc.get_pages().keys() {
        match doc.extract_text(&[*page_no]) {
            Ok(text) => pages.push(text),
            Err(e) => tracing::debug!("skipping page {} of {}: {}", page_no, path.display(), e),
        }
    }
    Ok(pages.join("\n"))
}
