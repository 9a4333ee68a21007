//! Recursive similarity merge of rows the exact aligner left unmatched.
//!
//! The best scoring pair of a pool becomes a pivot that splits the pool into
//! the rows before and after it, which are solved the same way. Each split is
//! a greedy local choice; the result is not a globally optimal assignment.
//!
//! Sub-problems are kept on an explicit stack, so deep splits of long pools
//! never grow the call stack.

use std::ops::Range;

use log::trace;

use super::layout::Layout;
use crate::{
    row::{MergedRow, Row},
    similarity::{EditWeights, SimilarityMatrix, normalize},
    utils::side::Side,
};

/// Rows of both buffers awaiting alignment, as indices into the buffers in
/// ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

impl Pool {
    #[must_use]
    pub fn is_empty(&self) -> bool { self.left.is_empty() && self.right.is_empty() }

    pub fn push(&mut self, side: Side, index: usize) {
        match side {
            Side::Left => self.left.push(index),
            Side::Right => self.right.push(index),
        }
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    /// Pairwise similarity of the pooled rows' normalised comparison keys.
    #[must_use]
    pub fn similarity_matrix(
        &self,
        buffers: [&[Row]; 2],
        layout: &Layout,
        weights: &EditWeights,
    ) -> SimilarityMatrix {
        let keys = |side: Side, indices: &[usize]| -> Vec<String> {
            indices
                .iter()
                .map(|&index| normalize(&buffers[side.index()][index].key(layout.column(side))))
                .collect()
        };

        SimilarityMatrix::compute(
            &keys(Side::Left, &self.left),
            &keys(Side::Right, &self.right),
            weights,
        )
    }
}

/// Settings shared by every step of one pool alignment.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateAligner<'a> {
    pub buffers: [&'a [Row]; 2],
    pub layout: &'a Layout,
    pub weights: &'a EditWeights,
    pub fold_insertions: bool,
}

#[derive(Debug)]
enum Task {
    Solve {
        left: Range<usize>,
        right: Range<usize>,
    },
    Pair {
        x: usize,
        y: usize,
    },
}

impl ApproximateAligner<'_> {
    /// Appends merged rows covering every pooled row to `out`, in buffer
    /// order. `matrix` is computed from the pool when not given and is shared
    /// by all sub-problems of this pool.
    pub fn align(&self, pool: &Pool, matrix: Option<&SimilarityMatrix>, out: &mut Vec<MergedRow>) {
        let computed;
        let matrix = match matrix {
            Some(matrix) => Some(matrix),
            None if pool.left.is_empty() || pool.right.is_empty() => None,
            None => {
                computed = pool.similarity_matrix(self.buffers, self.layout, self.weights);
                Some(&computed)
            }
        };

        if let Some(matrix) = matrix {
            debug_assert_eq!(
                (matrix.rows(), matrix.columns()),
                (pool.left.len(), pool.right.len()),
                "Similarity matrix does not match the pool"
            );
        }

        let [left_rows, right_rows] = self.buffers;
        let mut stack = vec![Task::Solve {
            left: 0..pool.left.len(),
            right: 0..pool.right.len(),
        }];

        while let Some(task) = stack.pop() {
            match task {
                Task::Pair { x, y } => {
                    out.push(self.layout.pair(
                        &left_rows[pool.left[x]],
                        &right_rows[pool.right[y]],
                    ));
                }
                Task::Solve { left, right } if left.is_empty() => {
                    for y in right {
                        self.layout.push_unmatched_right(
                            &right_rows[pool.right[y]],
                            self.fold_insertions,
                            out,
                        );
                    }
                }
                Task::Solve { left, right } if right.is_empty() => {
                    out.extend(
                        left.map(|x| self.layout.unmatched_left(&left_rows[pool.left[x]])),
                    );
                }
                Task::Solve { left, right } => {
                    let Some(matrix) = matrix else {
                        unreachable!("a matrix exists whenever both sides are non-empty");
                    };
                    let eligible = |x: usize, y: usize| {
                        !left_rows[pool.left[x]].is_gap() && !right_rows[pool.right[y]].is_gap()
                    };

                    match find_pivot(matrix, left.clone(), right.clone(), eligible) {
                        Some((x, y)) => {
                            trace!("Pivot ({x}, {y}) in {left:?} x {right:?}");

                            stack.push(Task::Solve {
                                left: x + 1..left.end,
                                right: y + 1..right.end,
                            });
                            stack.push(Task::Pair { x, y });
                            stack.push(Task::Solve {
                                left: left.start..x,
                                right: right.start..y,
                            });
                        }
                        // One side holds nothing but gaps.
                        None => {
                            let (left_end, right_end) = (left.end, right.end);
                            stack.push(Task::Solve {
                                left: left_end..left_end,
                                right,
                            });
                            stack.push(Task::Solve {
                                left,
                                right: right_end..right_end,
                            });
                        }
                    }
                }
            }
        }
    }
}

/// The most similar pair within `left × right` that `eligible` accepts. Ties
/// go to the pair whose relative positions in the two ranges are closest,
/// then to the first one found.
#[allow(clippy::float_cmp)]
fn find_pivot(
    matrix: &SimilarityMatrix,
    left: Range<usize>,
    right: Range<usize>,
    eligible: impl Fn(usize, usize) -> bool,
) -> Option<(usize, usize)> {
    let (n, m) = (left.len() as f64, right.len() as f64);
    let mut best: Option<((usize, usize), f64, f64)> = None;

    for (i, x) in left.enumerate() {
        for (j, y) in right.clone().enumerate() {
            if !eligible(x, y) {
                continue;
            }

            let similarity = matrix.get(x, y);
            let distance = (i as f64 / n - j as f64 / m).abs();

            let better = best.is_none_or(|(_, best_similarity, best_distance)| {
                similarity > best_similarity
                    || (similarity == best_similarity && distance < best_distance)
            });
            if better {
                best = Some(((x, y), similarity, distance));
            }
        }
    }

    best.map(|(pivot, ..)| pivot)
}
