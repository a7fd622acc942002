//! Directory scanning for rankable documents.
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::SUPPORTED_EXTENSIONS;

#[derive(Debug, Clone, Default)]
pub struct DocumentCollector {
    limit: Option<usize>,
}

impl DocumentCollector {
    pub fn new() -> Self { Self::default() }

    pub fn with_limit(limit: usize) -> Self { Self { limit: Some(limit) } }

    /// Every supported file under `root`, sorted by path, truncated to the limit.
    pub fn collect(&self, root: &Path) -> crate::Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(Error::NotFound(format!("directory {}", root.display())));
        }
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_supported(p))
            .collect();
        files.sort();
        if let Some(limit) = self.limit { files.truncate(limit); }
        Ok(files)
    }
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
