use super::{EditWeights, similarity};

/// Dense `left × right` table of pairwise similarities between normalised
/// keys, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Scores every pair of `left` and `right`, which must already be
    /// normalised.
    #[must_use]
    pub fn compute<L, R>(left: &[L], right: &[R], weights: &EditWeights) -> Self
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let values = left
            .iter()
            .flat_map(|a| {
                right
                    .iter()
                    .map(move |b| similarity(a.as_ref(), b.as_ref(), weights))
            })
            .collect();

        Self {
            rows: left.len(),
            columns: right.len(),
            values,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize { self.rows }

    #[must_use]
    pub const fn columns(&self) -> usize { self.columns }

    /// Similarity of the `x`-th left key and the `y`-th right key.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.rows && y < self.columns, "({x}, {y}) is outside the matrix");
        self.values[x * self.columns + y]
    }
}
