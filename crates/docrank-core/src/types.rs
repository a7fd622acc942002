//! Domain types shared by the extractor and the ranker.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ExtractionError;

/// Extensions accepted by kind inference, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "txt"];

/// Caller-supplied stable identity of a document (usually its path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path component, or the whole id when it has none.
    pub fn display_name(&self) -> &str {
        Path::new(&self.0)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Declared kind of a document. Closed set; one extraction handler per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Image,
    StructuredDocument,
    PlainText,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Result<Self, ExtractionError> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::StructuredDocument),
            "png" | "jpg" | "jpeg" => Ok(Self::Image),
            "txt" => Ok(Self::PlainText),
            other => Err(ExtractionError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => Err(ExtractionError::UnsupportedFormat(format!(
                "no extension: {}",
                path.display()
            ))),
        }
    }
}

/// A document reference. Owned by the caller; extraction never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(id: DocumentId, path: impl Into<PathBuf>, kind: DocumentKind) -> Self {
        Self { id, path: path.into(), kind }
    }

    /// Build a document whose id is its path and whose kind comes from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ExtractionError> {
        let path = path.into();
        let kind = DocumentKind::from_path(&path)?;
        Ok(Self { id: DocumentId::from_path(&path), path, kind })
    }
}

/// Trimmed, non-empty text extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Trims `raw`; blank input is `EmptyExtraction`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ExtractionError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::EmptyExtraction);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

/// Result of running one document through the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub id: DocumentId,
    pub result: Result<ExtractedText, ExtractionError>,
}

impl ExtractionOutcome {
    pub fn ok(id: DocumentId, text: ExtractedText) -> Self {
        Self { id, result: Ok(text) }
    }

    pub fn failed(id: DocumentId, err: ExtractionError) -> Self {
        Self { id, result: Err(err) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", content = "error", rename_all = "snake_case")]
pub enum SkipReason {
    Failed(ExtractionError),
    DuplicateId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "{err}"),
            Self::DuplicateId => f.write_str("duplicate document id"),
        }
    }
}

/// A document that did not make it into the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub id: DocumentId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusEntry {
    pub id: DocumentId,
    pub text: ExtractedText,
}

/// Documents eligible for ranking, in caller input order, ids unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    skipped: Vec<SkippedDocument>,
}

impl Corpus {
    /// Keep successful extractions in input order; record everything else.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ExtractionOutcome>,
    {
        let mut seen = HashSet::new();
        let mut corpus = Self::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(text) => {
                    if seen.insert(outcome.id.clone()) {
                        corpus.entries.push(CorpusEntry { id: outcome.id, text });
                    } else {
                        corpus.skipped.push(SkippedDocument {
                            id: outcome.id,
                            reason: SkipReason::DuplicateId,
                        });
                    }
                }
                Err(err) => corpus.skipped.push(SkippedDocument {
                    id: outcome.id,
                    reason: SkipReason::Failed(err),
                }),
            }
        }
        corpus
    }

    /// Build from raw `(id, text)` pairs, applying the same blank-text filter.
    pub fn from_texts<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (DocumentId, S)>,
        S: AsRef<str>,
    {
        Self::from_outcomes(pairs.into_iter().map(|(id, raw)| ExtractionOutcome {
            id,
            result: ExtractedText::new(raw),
        }))
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
