//! Corpus-size dependent similarity ranking.
//!
//! | corpus size | result |
//! |---|---|
//! | 0 | [`RankingResult::NoRankableDocuments`] |
//! | 1 | [`RankingResult::SingleDocument`] with its word count |
//! | 2 | [`RankingResult::Pair`] with the raw cosine similarity |
//! | 3+ | [`RankingResult::Ranked`]: per-document average similarity, min-max normalized to 0..100 |
use serde::Serialize;

use docrank_core::config::{FlatCohortPolicy, RankingSettings};
use docrank_core::types::{Corpus, DocumentId, ExtractionOutcome};
use docrank_text::similarity::cosine;
use docrank_text::{SimilarityMatrix, TfIdfVectorizer};

use crate::report::RankingReport;

/// Spread below which every average is considered equal.
pub const FLAT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub document_id: DocumentId,
    /// Mean cosine similarity to every other document, in `[0, 1]`.
    pub raw_average_similarity: f64,
    /// Position of the average within the cohort, in `[0, 100]`.
    pub normalized_score: f64,
}

/// How raw averages were mapped onto the 0..100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Normalization {
    MinMax { min: f64, max: f64 },
    Flat { policy: FlatCohortPolicy },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// Descending by score; ties keep corpus order.
    pub entries: Vec<RankingEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_matrix: Option<SimilarityMatrix>,
    pub corpus_size: usize,
    pub normalization: Normalization,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RankingResult {
    NoRankableDocuments,
    SingleDocument { id: DocumentId, word_count: usize },
    Pair { first: DocumentId, second: DocumentId, similarity: f64 },
    Ranked(Ranking),
}

/// Stateless ranker; one call per corpus.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    settings: RankingSettings,
}

impl Ranker {
    pub fn new(settings: &RankingSettings) -> Self { Self { settings: settings.clone() } }

    pub fn rank(&self, corpus: &Corpus) -> RankingResult {
        let entries = corpus.entries();
        tracing::debug!("ranking corpus of {} documents", entries.len());
        match entries {
            [] => RankingResult::NoRankableDocuments,
            [only] => RankingResult::SingleDocument { id: only.id.clone(), word_count: only.text.word_count() },
            [first, second] => {
                let similarity = if first.text == second.text {
                    1.0
                } else {
                    let vectors = self.vectorizer().fit_transform(&[first.text.as_str(), second.text.as_str()]);
                    cosine(&vectors[0], &vectors[1])
                };
                RankingResult::Pair { first: first.id.clone(), second: second.id.clone(), similarity }
            }
            _ => RankingResult::Ranked(self.rank_cohort(corpus)),
        }
    }

    /// Build the corpus from extraction outcomes and rank it, keeping the
    /// list of documents that were left out.
    pub fn rank_outcomes<I>(&self, outcomes: I) -> RankingReport
    where
        I: IntoIterator<Item = ExtractionOutcome>,
    {
        let corpus = Corpus::from_outcomes(outcomes);
        let result = self.rank(&corpus);
        RankingReport { result, skipped: corpus.skipped().to_vec() }
    }

    fn vectorizer(&self) -> TfIdfVectorizer { TfIdfVectorizer::new(&self.settings) }

    fn rank_cohort(&self, corpus: &Corpus) -> Ranking {
        let texts: Vec<&str> = corpus.entries().iter().map(|e| e.text.as_str()).collect();
        let vectors = self.vectorizer().fit_transform(&texts);
        let matrix = SimilarityMatrix::from_vectors_with(&vectors, |i, j| texts[i] == texts[j]);
        let averages: Vec<f64> = (0..matrix.size()).map(|i| matrix.average_excluding_diagonal(i)).collect();

        let min = averages.iter().copied().fold(f64::INFINITY, f64::min);
        let max = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let normalization = if (max - min).abs() <= FLAT_EPSILON {
            tracing::debug!("flat cohort (avg {:.4}), applying {:?}", min, self.settings.flat_cohort);
            Normalization::Flat { policy: self.settings.flat_cohort }
        } else {
            Normalization::MinMax { min, max }
        };

        let mut entries: Vec<RankingEntry> = corpus
            .entries()
            .iter()
            .zip(&averages)
            .map(|(entry, &avg)| RankingEntry {
                document_id: entry.id.clone(),
                raw_average_similarity: avg,
                normalized_score: normalize(avg, normalization),
            })
            .collect();
        entries.sort_by(|a, b| b.normalized_score.total_cmp(&a.normalized_score));

        Ranking {
            entries,
            similarity_matrix: self.settings.include_matrix.then_some(matrix),
            corpus_size: corpus.len(),
            normalization,
        }
    }
}

fn normalize(avg: f64, normalization: Normalization) -> f64 {
    let score = match normalization {
        Normalization::MinMax { min, max } => (avg - min) / (max - min) * 100.0,
        Normalization::Flat { policy: FlatCohortPolicy::RawSimilarity } => avg * 100.0,
        Normalization::Flat { policy: FlatCohortPolicy::Zero } => 0.0,
        Normalization::Flat { policy: FlatCohortPolicy::Midpoint } => 50.0,
    };
    score.clamp(0.0, 100.0)
}
