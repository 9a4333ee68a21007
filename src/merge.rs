use std::borrow::Cow;

use log::debug;

use crate::{
    alignment_code::AlignmentCode,
    config::MergeMode,
    row::{MergedRow, Row},
    similarity::EditWeights,
    utils::side::Side,
};

pub mod approximate;
pub mod layout;

pub use approximate::{ApproximateAligner, Pool};
pub use layout::Layout;

/// How much of the buffered window a merge pass may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassScope {
    /// Stop after an exact match once `commit_depth` left rows are
    /// committed, or after the last exact match, leaving the rest for a later
    /// pass with more lookahead.
    Partial { commit_depth: usize },
    /// Resolve everything that is buffered.
    Full,
}

/// Rows produced by one merge pass together with how many rows of each buffer
/// they consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePass {
    pub rows: Vec<MergedRow>,
    pub consumed: [usize; 2],
}

impl MergePass {
    /// Nothing was consumed, so repeating the same pass cannot help. A pass
    /// that only consumed dropped rows still counts as progress.
    #[must_use]
    pub fn is_no_progress(&self) -> bool { self.consumed == [0, 0] }
}

/// Aligns the buffered rows of both inputs and merges them into output rows.
#[derive(Debug, Clone, Copy)]
pub struct Merger<'a> {
    pub layout: &'a Layout,
    pub mode: MergeMode,
    pub weights: &'a EditWeights,
}

impl Merger<'_> {
    /// Runs the exact aligner over the comparison keys of `buffers`, merges
    /// matched rows directly and resolves the unmatched runs in between
    /// according to the merge mode.
    #[must_use]
    pub fn merge(&self, buffers: [&[Row]; 2], scope: PassScope) -> MergePass {
        let [left, right] = buffers;
        let keys = Side::BOTH.map(|side| {
            buffers[side.index()]
                .iter()
                .map(|row| row.key(self.layout.column(side)))
                .collect::<Vec<Cow<'_, str>>>()
        });

        let script = AlignmentCode::script(&keys[0], &keys[1]);
        let last_keep = script.iter().rposition(|code| *code == AlignmentCode::Keep);

        let aligner = ApproximateAligner {
            buffers,
            layout: self.layout,
            weights: self.weights,
            fold_insertions: self.mode.folds_insertions(),
        };

        let mut rows = Vec::with_capacity(script.len());
        let mut offsets = [0, 0];
        let mut pool = Pool::default();

        for (position, code) in script.iter().enumerate() {
            match code {
                AlignmentCode::Insert => {
                    let index = offsets[Side::Right.index()];
                    if self.mode.uses_similarity() {
                        pool.push(Side::Right, index);
                    } else {
                        self.layout.push_unmatched_right(
                            &right[index],
                            self.mode.folds_insertions(),
                            &mut rows,
                        );
                    }
                    offsets[Side::Right.index()] += 1;
                }
                AlignmentCode::Remove => {
                    let index = offsets[Side::Left.index()];
                    if self.mode.uses_similarity() {
                        pool.push(Side::Left, index);
                    } else {
                        rows.push(self.layout.unmatched_left(&left[index]));
                    }
                    offsets[Side::Left.index()] += 1;
                }
                AlignmentCode::Keep => {
                    if !pool.is_empty() {
                        aligner.align(&pool, None, &mut rows);
                        pool.clear();
                    }

                    let [x, y] = offsets;
                    rows.push(self.layout.pair(&left[x], &right[y]));
                    offsets = [x + 1, y + 1];

                    if let PassScope::Partial { commit_depth } = scope {
                        if Some(position) == last_keep || offsets[0] >= commit_depth {
                            break;
                        }
                    }
                }
            }
        }

        // Pending rows only remain here if the whole window is being resolved
        // or no exact match was found at all.
        if !pool.is_empty() {
            aligner.align(&pool, None, &mut rows);
        }

        debug!(
            "Merge pass ({scope:?}) committed {:?} of {:?} rows as {} merged rows",
            offsets,
            [left.len(), right.len()],
            rows.len()
        );

        MergePass {
            rows,
            consumed: offsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> { lines.iter().map(|line| Row::parse(line)).collect() }

    fn merge(
        left: &[Row],
        right: &[Row],
        mode: MergeMode,
        scope: PassScope,
    ) -> (Vec<String>, [usize; 2]) {
        let layout = Layout::measure([left, right], [0, 0]);
        let weights = EditWeights::default();
        let merger = Merger {
            layout: &layout,
            mode,
            weights: &weights,
        };

        let pass = merger.merge([left, right], scope);
        assert!(pass.consumed[0] <= left.len() && pass.consumed[1] <= right.len());

        (
            pass.rows.iter().map(ToString::to_string).collect(),
            pass.consumed,
        )
    }

    #[test]
    fn test_identical_windows() {
        let left = rows(&["The\tDT", "cat\tNN", "sat\tVBD"]);
        let right = rows(&["The\tdet", "cat\tnoun", "sat\tverb"]);

        let (merged, consumed) = merge(&left, &right, MergeMode::Similarity, PassScope::Full);
        assert_eq!(
            merged,
            ["The\tDT\tThe\tdet", "cat\tNN\tcat\tnoun", "sat\tVBD\tsat\tverb"]
        );
        assert_eq!(consumed, [3, 3]);
    }

    #[test]
    fn test_placeholder_mode() {
        let left = rows(&["I", "can", "not", "go"]);
        let right = rows(&["I", "cannot", "go", "home"]);

        let (merged, _) = merge(&left, &right, MergeMode::Placeholder, PassScope::Full);
        assert_eq!(
            merged,
            ["I\tI", "can\t?", "not\t?", "*cannot*\tcannot", "go\tgo", "*home*\thome"]
        );
    }

    #[test]
    fn test_force_mode_folds_into_previous_row() {
        let left = rows(&["I", "cannot", "go"]);
        let right = rows(&["I", "can", "not", "go"]);

        let (merged, _) = merge(&left, &right, MergeMode::Force, PassScope::Full);
        assert_eq!(merged, ["I\tI", "cannot\tcan+not", "go\tgo"]);

        let (merged, _) = merge(&left, &right, MergeMode::SimilarityForce, PassScope::Full);
        assert_eq!(merged, ["I\tI", "cannot\tcan+not", "go\tgo"]);

        let (merged, _) = merge(&left, &right, MergeMode::Similarity, PassScope::Full);
        assert_eq!(merged, ["I\tI", "cannot\tcan", "*not*\tnot", "go\tgo"]);
    }

    #[test]
    fn test_similarity_mode_pairs_unmatched_runs() {
        let left = rows(&["Thou", "shalt", "not", "kill"]);
        let right = rows(&["Thou", "shallt", "nott", "kill"]);

        let (merged, _) = merge(&left, &right, MergeMode::Similarity, PassScope::Full);
        assert_eq!(
            merged,
            ["Thou\tThou", "shalt\tshallt", "not\tnott", "kill\tkill"]
        );
    }

    #[test]
    fn test_partial_pass_stops_at_last_exact_match() {
        let left = rows(&["a", "b", "c", "x"]);
        let right = rows(&["a", "b", "c", "y", "z"]);

        let (merged, consumed) = merge(
            &left,
            &right,
            MergeMode::Similarity,
            PassScope::Partial { commit_depth: 10 },
        );
        assert_eq!(merged, ["a\ta", "b\tb", "c\tc"]);
        assert_eq!(consumed, [3, 3]);
    }

    #[test]
    fn test_partial_pass_stops_at_commit_depth() {
        let left = rows(&["a", "b", "c", "d", "e"]);
        let right = rows(&["a", "b", "c", "d", "e"]);

        let (merged, consumed) = merge(
            &left,
            &right,
            MergeMode::Similarity,
            PassScope::Partial { commit_depth: 2 },
        );
        assert_eq!(merged, ["a\ta", "b\tb"]);
        assert_eq!(consumed, [2, 2]);
    }

    #[test]
    fn test_partial_pass_without_exact_match_resolves_window() {
        let left = rows(&["colour", "grey"]);
        let right = rows(&["color", "gray"]);

        let (merged, consumed) = merge(
            &left,
            &right,
            MergeMode::Similarity,
            PassScope::Partial { commit_depth: 1 },
        );
        assert_eq!(merged, ["colour\tcolor", "grey\tgray"]);
        assert_eq!(consumed, [2, 2]);
    }

    #[test]
    fn test_gaps() {
        let left = rows(&["a", "", "b", ""]);
        let right = rows(&["a", "b", ""]);

        let (merged, _) = merge(&left, &right, MergeMode::Similarity, PassScope::Full);
        assert_eq!(merged, ["a\ta", "", "b\tb", ""]);
    }

    #[test]
    fn test_left_gap_stays_a_sentence_boundary() {
        let left = rows(&["a", "", "b"]);
        let right = rows(&["a", "x", "b"]);

        let (merged, _) = merge(&left, &right, MergeMode::Similarity, PassScope::Full);
        assert_eq!(merged, ["a\ta", "", "*x*\tx", "b\tb"]);
    }

    #[test]
    fn test_right_gap_does_not_take_a_partner() {
        let left = rows(&["a", "x", "b"]);
        let right = rows(&["a", "", "y", "b"]);

        let (merged, consumed) = merge(&left, &right, MergeMode::Similarity, PassScope::Full);
        assert_eq!(merged, ["a\ta", "x\ty", "b\tb"]);
        assert_eq!(consumed, [3, 4]);
    }

    #[test]
    fn test_right_gap_is_not_folded() {
        let left = rows(&["a\tX", "b\tY"]);
        let right = rows(&["a\tN", "", "b\tV"]);

        for mode in [MergeMode::Force, MergeMode::SimilarityForce] {
            let (merged, _) = merge(&left, &right, mode, PassScope::Full);
            assert_eq!(merged, ["a\tX\ta\tN", "b\tY\tb\tV"], "{mode}");
        }
    }

    #[test]
    fn test_empty_right_buffer() {
        let left = rows(&["a", "b"]);

        let (merged, consumed) = merge(
            &left,
            &[],
            MergeMode::Similarity,
            PassScope::Partial { commit_depth: 1 },
        );
        assert_eq!(merged, ["a\t?", "b\t?"]);
        assert_eq!(consumed, [2, 0]);
    }

    #[test]
    fn test_dropped_rows_still_count_as_progress() {
        let right = rows(&["", ""]);
        let layout = Layout::measure([&[], right.as_slice()], [0, 0]);
        let weights = EditWeights::default();
        let merger = Merger {
            layout: &layout,
            mode: MergeMode::Similarity,
            weights: &weights,
        };

        let pass = merger.merge([&[], right.as_slice()], PassScope::Full);
        assert!(pass.rows.is_empty());
        assert_eq!(pass.consumed, [0, 2]);
        assert!(!pass.is_no_progress());

        assert!(merger.merge([&[], &[]], PassScope::Full).is_no_progress());
    }
}
