//! docrank-text
//!
//! Term analysis, batch-local TF-IDF vectors and the pairwise cosine
//! similarity matrix consumed by the ranker.
pub mod tantivy_utils;
pub mod similarity;
pub mod vectorize;

pub use similarity::SimilarityMatrix;
pub use tantivy_utils::TermAnalyzer;
pub use vectorize::{TermVector, TfIdfVectorizer};
