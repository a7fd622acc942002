//! docrank-rank
//!
//! Similarity ranking over an extracted corpus, the human-readable report and
//! the extract-then-rank pipeline.
pub mod pipeline;
pub mod ranker;
pub mod report;

pub use pipeline::Pipeline;
pub use ranker::{Normalization, Ranker, Ranking, RankingEntry, RankingResult};
pub use report::RankingReport;
