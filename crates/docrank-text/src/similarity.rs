use serde::Serialize;

use crate::vectorize::TermVector;

/// Cosine similarity of two L2-normalized vectors, clamped to `[0, 1]`.
///
/// Identical non-empty vectors score exactly 1.0; an empty vector scores 0
/// against everything.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    a.dot(b).clamp(0.0, 1.0)
}

/// Square, symmetric matrix of pairwise cosine similarities with unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn from_vectors(vectors: &[TermVector]) -> Self { Self::from_vectors_with(vectors, |_, _| false) }

    /// Like [`from_vectors`](Self::from_vectors), scoring 1.0 for every pair
    /// `identical(i, j)` accepts, even when analysis left no terms.
    pub fn from_vectors_with<F>(vectors: &[TermVector], identical: F) -> Self
    where
        F: Fn(usize, usize) -> bool,
    {
        let size = vectors.len();
        let mut values = vec![vec![0.0; size]; size];
        for i in 0..size {
            values[i][i] = 1.0;
            for j in (i + 1)..size {
                let s = if identical(i, j) { 1.0 } else { cosine(&vectors[i], &vectors[j]) };
                values[i][j] = s;
                values[j][i] = s;
            }
        }
        Self { size, values }
    }

    pub fn size(&self) -> usize { self.size }

    pub fn get(&self, i: usize, j: usize) -> f64 { self.values[i][j] }

    /// Mean similarity of document `i` to every other document; 0 for a 1x1 matrix.
    pub fn average_excluding_diagonal(&self, i: usize) -> f64 {
        if self.size < 2 {
            return 0.0;
        }
        let sum: f64 = self.values[i]
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, v)| *v)
            .sum();
        sum / (self.size - 1) as f64
    }
}
