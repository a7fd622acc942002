//! Batch-local TF-IDF.
//!
//! Raw term counts weighted by the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, then L2-normalized. The vocabulary is built
//! from the batch alone and term ids follow lexicographic order, so the same
//! input always yields the same vectors.
use std::collections::{BTreeMap, BTreeSet};

use docrank_core::config::RankingSettings;

use crate::tantivy_utils::TermAnalyzer;

/// Sparse, L2-normalized vector; entries sorted by term id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TermVector {
    entries: Vec<(u32, f64)>,
}

impl TermVector {
    pub fn entries(&self) -> &[(u32, f64)] { &self.entries }

    /// True when no term of the document survived analysis.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

pub struct TfIdfVectorizer {
    settings: RankingSettings,
}

impl TfIdfVectorizer {
    pub fn new(settings: &RankingSettings) -> Self { Self { settings: settings.clone() } }

    /// One vector per input text, same order.
    pub fn fit_transform(&self, texts: &[&str]) -> Vec<TermVector> {
        let mut analyzer = TermAnalyzer::from_settings(&self.settings);
        let counts: Vec<BTreeMap<String, u32>> = texts
            .iter()
            .map(|text| {
                let mut tf = BTreeMap::new();
                for term in analyzer.terms(text) {
                    *tf.entry(term).or_insert(0u32) += 1;
                }
                tf
            })
            .collect();

        let vocabulary: BTreeSet<&str> = counts.iter().flat_map(|tf| tf.keys().map(String::as_str)).collect();
        let term_ids: BTreeMap<&str, u32> = vocabulary.iter().enumerate().map(|(id, t)| (*t, id as u32)).collect();

        let mut df: BTreeMap<&str, u32> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = texts.len() as f64;
        counts
            .iter()
            .map(|tf| {
                let mut entries: Vec<(u32, f64)> = tf
                    .iter()
                    .filter_map(|(term, &count)| {
                        let id = *term_ids.get(term.as_str())?;
                        let d = f64::from(*df.get(term.as_str())?);
                        let idf = ((1.0 + n) / (1.0 + d)).ln() + 1.0;
                        Some((id, f64::from(count) * idf))
                    })
                    .collect();
                entries.sort_by_key(|(id, _)| *id);
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in &mut entries {
                        *w /= norm;
                    }
                }
                TermVector { entries }
            })
            .collect()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self { Self::new(&RankingSettings::default()) }
}
