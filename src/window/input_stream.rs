use std::{fmt, io::BufRead};

use log::trace;

use crate::{
    errors::AlignError,
    row::{Row, comment_rule::CommentRule},
};

/// One input of the merge, read line by line into rows.
pub struct InputStream {
    reader: Box<dyn BufRead>,
    rule: CommentRule,
    index: usize,
    exhausted: bool,
    line: Vec<u8>,
}

impl fmt::Debug for InputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStream")
            .field("index", &self.index)
            .field("rule", &self.rule)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

impl InputStream {
    /// `index` is the input's position among `count` merged inputs, which
    /// decides how its comments are treated.
    #[must_use]
    pub fn new(reader: Box<dyn BufRead>, index: usize, count: usize) -> Self {
        Self {
            reader,
            rule: CommentRule::for_input(index, count),
            index,
            exhausted: false,
            line: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool { self.exhausted }

    /// Reads the next row, skipping lines the comment rule drops. Returns
    /// `None` once the underlying reader is at its end.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; both `\n` and `\r\n`
    /// terminate a line.
    ///
    /// # Errors
    ///
    /// Fails if the underlying reader does.
    pub fn next_row(&mut self) -> Result<Option<Row>, AlignError> {
        while !self.exhausted {
            self.line.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(|source| AlignError::Read {
                    index: self.index,
                    source,
                })?;

            if read == 0 {
                trace!("Input #{} is exhausted", self.index);
                self.exhausted = true;
                break;
            }

            let text = String::from_utf8_lossy(&self.line);
            let text = match text.strip_suffix('\n') {
                Some(text) => text.strip_suffix('\r').unwrap_or(text),
                None => text.as_ref(),
            };

            if let Some(row) = self.rule.apply(text) {
                return Ok(Some(row));
            }
        }

        Ok(None)
    }
}
