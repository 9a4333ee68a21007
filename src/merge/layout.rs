use std::sync::LazyLock;

use regex::Regex;

use crate::{
    row::{MergedRow, Row},
    utils::side::Side,
};

/// Cell used wherever one side has nothing to contribute.
pub const PLACEHOLDER: &str = "?";

/// A `+` join next to a lone alignment marker, which is dropped so that
/// folding a placeholder into a value keeps just the value.
static MARKER_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[?_*]\+)?(.*?)(?:\+[?_*])?$").expect("marker join pattern is valid")
});

/// Shape of the merged output, fixed once from the first filled window: the
/// widest row seen on each side, the comparison column of each side and the
/// right-hand columns that are left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    widths: [usize; 2],
    columns: [usize; 2],
    dropped: Vec<usize>,
}

impl Layout {
    #[must_use]
    pub const fn new(widths: [usize; 2], columns: [usize; 2]) -> Self {
        Self {
            widths,
            columns,
            dropped: Vec::new(),
        }
    }

    /// Measures the widest row of each buffer. An empty buffer counts as one
    /// cell wide.
    #[must_use]
    pub fn measure(buffers: [&[Row]; 2], columns: [usize; 2]) -> Self {
        let widths = buffers.map(|rows| rows.iter().map(Row::width).max().unwrap_or(1));
        Self::new(widths, columns)
    }

    /// Leaves these columns of the right input out of every merged row. The
    /// right comparison column still shows up as `*key*` in placeholder rows.
    #[must_use]
    pub fn with_dropped(mut self, dropped: &[usize]) -> Self {
        self.dropped = dropped.to_vec();
        self
    }

    #[must_use]
    pub const fn width(&self, side: Side) -> usize { self.widths[side.index()] }

    #[must_use]
    pub const fn column(&self, side: Side) -> usize { self.columns[side.index()] }

    fn kept_right_width(&self) -> usize {
        (0..self.width(Side::Right))
            .filter(|column| !self.dropped.contains(column))
            .count()
    }

    fn kept_right_cells(&self, row: &Row) -> Vec<String> {
        row.cells()
            .iter()
            .enumerate()
            .filter(|(column, _)| !self.dropped.contains(column))
            .map(|(_, cell)| cell.clone())
            .collect()
    }

    /// Rows matched with each other, side by side. Two gaps stay one gap.
    #[must_use]
    pub fn pair(&self, left: &Row, right: &Row) -> MergedRow {
        if left.is_gap() && right.is_gap() {
            return MergedRow::gap();
        }

        MergedRow::new(left.cells().to_vec(), self.kept_right_cells(right))
    }

    /// A left row without counterpart, followed by placeholders for the whole
    /// right side. Gaps are kept as they are.
    #[must_use]
    pub fn unmatched_left(&self, row: &Row) -> MergedRow {
        if row.is_gap() {
            return MergedRow::gap();
        }

        MergedRow::new(
            row.cells().to_vec(),
            placeholders(self.kept_right_width()).collect(),
        )
    }

    /// A right row without counterpart, behind placeholder left cells whose
    /// comparison column shows the right key as `*key*`.
    ///
    /// Gaps and rows too narrow to have a comparison column produce nothing.
    #[must_use]
    pub fn unmatched_right(&self, row: &Row) -> Option<MergedRow> {
        if row.is_gap() {
            return None;
        }
        let key = row.cell(self.column(Side::Right))?;

        let column = self.column(Side::Left);
        let trailing = self.width(Side::Left).saturating_sub(column + 1);

        let left = placeholders(column)
            .chain(std::iter::once(format!("*{key}*")))
            .chain(placeholders(trailing))
            .collect();

        Some(MergedRow::new(left, self.kept_right_cells(row)))
    }

    /// Emits an unmatched right row. With `fold`, its cells are joined into
    /// the right half of the last row of `out` instead, as long as there is
    /// one that is not a gap.
    ///
    /// Gaps and rows too narrow to have a comparison column are dropped in
    /// either case.
    pub fn push_unmatched_right(&self, row: &Row, fold: bool, out: &mut Vec<MergedRow>) {
        if row.is_gap() || row.cell(self.column(Side::Right)).is_none() {
            return;
        }

        if fold {
            if let Some(previous) = out.last_mut().filter(|previous| !previous.is_gap()) {
                self.fold_into(previous, row);
                return;
            }
        }

        out.extend(self.unmatched_right(row));
    }

    fn fold_into(&self, previous: &mut MergedRow, row: &Row) {
        let added = self.kept_right_cells(row);
        let existing = std::mem::take(previous.right_mut());

        let count = existing.len().max(added.len());
        *previous.right_mut() = (0..count)
            .filter_map(|i| match (existing.get(i), added.get(i)) {
                (Some(existing), Some(added)) => Some(join_cells(existing, added)),
                (Some(only), None) | (None, Some(only)) => Some(only.clone()),
                (None, None) => None,
            })
            .collect();
    }
}

fn placeholders(count: usize) -> impl Iterator<Item = String> {
    std::iter::repeat_n(PLACEHOLDER.to_owned(), count)
}

/// Joins two cell values with `+`, dropping a lone `?`, `_` or `*` marker on
/// either side.
#[must_use]
pub fn join_cells(existing: &str, added: &str) -> String {
    let joined = format!("{existing}+{added}");
    MARKER_JOIN.replace(&joined, "${1}").into_owned()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn cells(row: &MergedRow) -> Vec<&str> { row.cells().collect() }

    #[test_case("NN", "VB" => "NN+VB"; "plain values")]
    #[test_case("?", "VB" => "VB"; "leading placeholder")]
    #[test_case("NN", "_" => "NN"; "trailing underscore")]
    #[test_case("*", "*" => "*"; "two markers")]
    #[test_case("(NP*", "*)" => "(NP*+*)"; "bracketed spans")]
    fn test_join_cells(existing: &str, added: &str) -> String { join_cells(existing, added) }

    #[test]
    fn test_measure() {
        let left = [Row::parse("a\tb"), Row::gap(), Row::parse("a\tb\tc")];
        let layout = Layout::measure([left.as_slice(), &[]], [0, 0]);
        assert_eq!(layout, Layout::new([3, 1], [0, 0]));
    }

    #[test]
    fn test_pair() {
        let layout = Layout::new([2, 2], [0, 0]);
        assert_eq!(
            cells(&layout.pair(&Row::parse("cat\tNN"), &Row::parse("cat\tN"))),
            ["cat", "NN", "cat", "N"]
        );
        assert!(layout.pair(&Row::gap(), &Row::gap()).is_gap());
    }

    #[test]
    fn test_unmatched_left() {
        let layout = Layout::new([2, 3], [0, 0]);
        assert_eq!(
            cells(&layout.unmatched_left(&Row::parse("cat\tNN"))),
            ["cat", "NN", "?", "?", "?"]
        );
        assert!(layout.unmatched_left(&Row::gap()).is_gap());
    }

    #[test]
    fn test_unmatched_right() {
        let layout = Layout::new([3, 2], [1, 0]);
        let row = layout.unmatched_right(&Row::parse("down\tRP")).unwrap();
        assert_eq!(cells(&row), ["?", "*down*", "?", "down", "RP"]);

        assert_eq!(layout.unmatched_right(&Row::gap()), None);
        let narrow = Layout::new([3, 2], [1, 1]);
        assert_eq!(narrow.unmatched_right(&Row::parse("down")), None);
    }

    #[test]
    fn test_fold_into_previous_row() {
        let layout = Layout::new([1, 2], [0, 0]);
        let mut out = vec![layout.pair(&Row::parse("cannot"), &Row::parse("can\tMD"))];

        layout.push_unmatched_right(&Row::parse("not\tRB"), true, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(cells(&out[0]), ["cannot", "can+not", "MD+RB"]);
    }

    #[test]
    fn test_fold_replaces_placeholders() {
        let layout = Layout::new([1, 2], [0, 0]);
        let mut out = vec![layout.unmatched_left(&Row::parse("cannot"))];

        layout.push_unmatched_right(&Row::parse("not\tRB"), true, &mut out);

        assert_eq!(cells(&out[0]), ["cannot", "not", "RB"]);
    }

    #[test]
    fn test_fold_without_previous_row_emits_placeholder() {
        let layout = Layout::new([1, 1], [0, 0]);
        let mut out = vec![MergedRow::gap()];

        layout.push_unmatched_right(&Row::parse("down"), true, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(cells(&out[1]), ["*down*", "down"]);
    }

    #[test]
    fn test_fold_into_row_narrower_than_the_left_side() {
        let layout = Layout::new([2, 1], [0, 0]);
        let mut out = vec![layout.pair(&Row::parse("can"), &Row::parse("can"))];

        layout.push_unmatched_right(&Row::parse("not"), true, &mut out);

        assert_eq!(cells(&out[0]), ["can", "can+not"]);
    }

    #[test]
    fn test_unmatched_right_gaps_are_dropped() {
        let layout = Layout::new([2, 2], [0, 0]);
        let previous = layout.pair(&Row::parse("a\tX"), &Row::parse("a\tN"));

        for fold in [true, false] {
            let mut out = vec![previous.clone()];
            layout.push_unmatched_right(&Row::gap(), fold, &mut out);
            assert_eq!(out, [previous.clone()], "fold: {fold}");
        }
    }

    #[test]
    fn test_narrow_right_rows_are_not_folded() {
        let layout = Layout::new([1, 2], [0, 1]);
        let previous = layout.pair(&Row::parse("a"), &Row::parse("a\tN"));

        let mut out = vec![previous.clone()];
        layout.push_unmatched_right(&Row::parse("b"), true, &mut out);

        assert_eq!(out, [previous]);
    }

    #[test]
    fn test_dropped_right_columns() {
        let layout = Layout::new([2, 3], [0, 0]).with_dropped(&[0, 2]);

        assert_eq!(
            cells(&layout.pair(&Row::parse("cat\tNN"), &Row::parse("cat\tN\tx"))),
            ["cat", "NN", "N"]
        );
        assert_eq!(
            cells(&layout.unmatched_left(&Row::parse("cat\tNN"))),
            ["cat", "NN", "?"]
        );
        assert_eq!(
            cells(&layout.unmatched_right(&Row::parse("down\tRP\ty")).unwrap()),
            ["*down*", "?", "RP"]
        );

        let mut out = vec![layout.pair(&Row::parse("cannot\tMD"), &Row::parse("can\tMD\tx"))];
        layout.push_unmatched_right(&Row::parse("not\tRB\ty"), true, &mut out);
        assert_eq!(cells(&out[0]), ["cannot", "MD", "MD+RB"]);
    }
}
