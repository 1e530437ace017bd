//! Exact flat L2 nearest-neighbor index
//!
//! A brute-force linear scan over all stored vectors. No approximation and no
//! pruning, so the true top-k by Euclidean distance is always returned; with
//! knowledge bases of tens to low thousands of documents, the O(n·d) scan per
//! query is cheap and not worth an ANN structure.

use crate::error::{Result, RetrieverError};
use half::f16;

/// One nearest-neighbor match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Position of the matched vector in insertion order
    pub index: usize,
    /// Euclidean distance between the query and the matched vector
    pub distance: f32,
}

/// An immutable-after-build collection of fixed-dimension vectors supporting
/// exact L2 top-k search.
///
/// Vectors are addressed by insertion order; callers pair positions with
/// whatever payload the vectors were derived from.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f16>>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// The dimensionality every stored vector must have.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors in the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns `true` if the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append vectors to the index, preserving order.
    ///
    /// Every vector must match the index dimensionality; a mismatch is a
    /// defect and fails the whole batch before anything is inserted.
    pub fn add(&mut self, vectors: Vec<Vec<f16>>) -> Result<()> {
        for vector in &vectors {
            if vector.len() != self.dimension {
                return Err(RetrieverError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
        }
        self.vectors.extend(vectors);
        Ok(())
    }

    /// Return the `k` stored vectors closest to `query` by L2 distance.
    ///
    /// Results are sorted ascending by distance; equal distances resolve to
    /// the lower insertion index, so repeated searches are fully
    /// deterministic. `k` larger than the index size clamps to returning
    /// everything.
    pub fn search(&self, query: &[f16], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimension {
            return Err(RetrieverError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| SearchHit {
                index,
                distance: l2_distance(query, vector),
            })
            .collect();

        hits.sort_unstable_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        hits.truncate(k);
        Ok(hits)
    }
}

/// Euclidean distance between two equal-length f16 vectors, accumulated in f32.
fn l2_distance(a: &[f16], b: &[f16]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = f32::from(*x) - f32::from(*y);
            diff * diff
        })
        .sum::<f32>()
        .sqrt()
}
