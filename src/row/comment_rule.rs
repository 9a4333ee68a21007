use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use super::Row;

/// An unescaped `#` and everything after it, as long as it is not the first
/// character of the line.
static INLINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\\])#.*").expect("inline comment pattern is valid"));

/// How comments and blank lines of one input are treated, depending on the
/// input's position among all merged inputs.
///
/// Full-line comments survive only in the first input and inline comments
/// only in the last one, so that each appears exactly once in the merged
/// output. Blank lines are structure in the first input; elsewhere a line
/// emptied by comment removal is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRule {
    drop_comment_lines: bool,
    strip_inline_comments: bool,
    keep_emptied_lines: bool,
}

impl CommentRule {
    #[must_use]
    pub const fn for_input(index: usize, count: usize) -> Self {
        Self {
            drop_comment_lines: index > 0,
            strip_inline_comments: index + 1 < count,
            keep_emptied_lines: index == 0,
        }
    }

    /// Turns a raw line (without its terminator) into a row, or `None` if the
    /// line contributes nothing to this input's buffer.
    #[must_use]
    pub fn apply(&self, line: &str) -> Option<Row> {
        if line.is_empty() {
            return Some(Row::gap());
        }

        let mut text = line;
        if self.drop_comment_lines && text.trim().starts_with('#') {
            text = "";
        }

        let text = if self.strip_inline_comments {
            INLINE_COMMENT.replace(text, "${1}")
        } else {
            Cow::Borrowed(text)
        };

        if text.is_empty() && !self.keep_emptied_lines {
            return None;
        }

        Some(Row::parse(&text))
    }
}
