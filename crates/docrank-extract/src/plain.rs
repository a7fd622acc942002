use std::path::Path;

use docrank_core::ExtractionError;

const BOM: char = '\u{feff}';

pub async fn read_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractionError::Io(format!("{}: {e}", path.display())))?;
    let text = String::from_utf8(bytes).map_err(|e| ExtractionError::Encoding(format!("{}: {}", path.display(), e.utf8_error())))?;
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}
