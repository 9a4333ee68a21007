use std::{borrow::Cow, fmt::Display};

pub mod comment_rule;

/// A parsed input line: its tab-separated cells in order.
///
/// The single empty cell `[""]` is the gap sentinel standing for a blank line,
/// i.e. a sentence or record boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    #[must_use]
    pub fn gap() -> Self {
        Self {
            cells: vec![String::new()],
        }
    }

    /// Splits a line (without its line terminator) on tabs. An empty line
    /// becomes the gap sentinel.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self {
            cells: line.split('\t').map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn is_gap(&self) -> bool { matches!(self.cells.as_slice(), [only] if only.is_empty()) }

    #[must_use]
    pub fn width(&self) -> usize { self.cells.len() }

    #[must_use]
    pub fn cells(&self) -> &[String] { &self.cells }

    #[must_use]
    pub fn cell(&self, column: usize) -> Option<&str> { self.cells.get(column).map(String::as_str) }

    /// The value this row is compared by. Rows too narrow to have `column`
    /// are compared by their whole content instead.
    #[must_use]
    pub fn key(&self, column: usize) -> Cow<'_, str> {
        match self.cell(column) {
            Some(cell) => Cow::Borrowed(cell),
            None => Cow::Owned(self.cells.join("\t")),
        }
    }
}

/// One output line: the cells contributed by the left input followed by
/// those of the right input, either of which may be placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    left: Vec<String>,
    right: Vec<String>,
}

impl MergedRow {
    #[must_use]
    pub fn new(left: Vec<String>, right: Vec<String>) -> Self { Self { left, right } }

    #[must_use]
    pub fn gap() -> Self { Self::new(vec![String::new()], Vec::new()) }

    #[must_use]
    pub fn is_gap(&self) -> bool {
        self.right.is_empty() && matches!(self.left.as_slice(), [only] if only.is_empty())
    }

    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.left.iter().chain(&self.right).map(String::as_str)
    }

    /// The cells of the right input, which folding rewrites in place.
    pub fn right_mut(&mut self) -> &mut Vec<String> { &mut self.right }
}

impl Display for MergedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<&str> = self.cells().collect();
        write!(f, "{}", cells.join("\t"))
    }
}
