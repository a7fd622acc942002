use std::fmt;

use serde::Serialize;

use docrank_core::types::SkippedDocument;

use crate::ranker::RankingResult;

/// Ranking outcome plus the documents that were left out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub result: RankingResult,
    pub skipped: Vec<SkippedDocument>,
}

impl fmt::Display for RankingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            RankingResult::NoRankableDocuments => {
                write!(f, "No readable documents found. Make sure they are clear and text-based.")?;
            }
            RankingResult::SingleDocument { id, word_count } => {
                write!(
                    f,
                    "Only one document uploaded:\n\n {}\n Text length: {} words\n Tip: Upload multiple documents for ranking.",
                    id.display_name(),
                    word_count
                )?;
            }
            RankingResult::Pair { first, second, similarity } => {
                write!(
                    f,
                    "Document Ranking (2 documents only):\n\n1. {}\n2. {}\n\nSimilarity Score: {:.2} (0 = different, 1 = identical)",
                    first.display_name(),
                    second.display_name(),
                    similarity
                )?;
            }
            RankingResult::Ranked(ranking) => {
                write!(f, "Document Ranking Results:")?;
                for (i, entry) in ranking.entries.iter().enumerate() {
                    write!(
                        f,
                        "\n{}. {}\n    Score: {}/100\n    Similarity Avg: {:.2}\n",
                        i + 1,
                        entry.document_id.display_name(),
                        entry.normalized_score.trunc() as u32,
                        entry.raw_average_similarity
                    )?;
                }
            }
        }

        if !self.skipped.is_empty() {
            write!(f, "\n\nSkipped:")?;
            for skipped in &self.skipped {
                write!(f, "\n - {}: {}", skipped.id.display_name(), skipped.reason)?;
            }
        }
        Ok(())
    }
}
