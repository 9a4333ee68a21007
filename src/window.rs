use std::io::BufRead;

use log::trace;

use crate::{errors::AlignError, row::Row, utils::side::Side};

pub mod input_stream;

pub use input_stream::InputStream;

/// Result of topping up the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// This many rows were appended across all buffers. Zero is possible
    /// when the buffers that can still grow are already full.
    Filled(usize),
    /// Nothing was appended and every input is at its end.
    Exhausted,
}

/// Rows read ahead from both inputs that are not merged yet.
#[derive(Debug)]
pub struct WindowBuffers {
    inputs: [InputStream; 2],
    rows: [Vec<Row>; 2],
}

impl WindowBuffers {
    #[must_use]
    pub fn new(readers: [Box<dyn BufRead>; 2]) -> Self {
        let [left, right] = readers;
        let count = Side::BOTH.len();

        Self {
            inputs: [
                InputStream::new(left, Side::Left.index(), count),
                InputStream::new(right, Side::Right.index(), count),
            ],
            rows: [Vec::new(), Vec::new()],
        }
    }

    /// Reads from every input until its buffer holds `window` rows or the
    /// input ends.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be read.
    pub fn fill(&mut self, window: usize) -> Result<FillOutcome, AlignError> {
        let mut appended = 0;

        for (input, rows) in self.inputs.iter_mut().zip(&mut self.rows) {
            while rows.len() < window {
                let Some(row) = input.next_row()? else {
                    break;
                };
                rows.push(row);
                appended += 1;
            }
        }

        trace!(
            "Appended {appended} rows, buffered {:?}",
            self.rows.each_ref().map(Vec::len)
        );

        if appended == 0 && self.inputs.iter().all(InputStream::is_exhausted) {
            return Ok(FillOutcome::Exhausted);
        }

        Ok(FillOutcome::Filled(appended))
    }

    /// Drops the first `consumed[i]` rows of buffer `i`.
    pub fn consume(&mut self, consumed: [usize; 2]) {
        for (rows, count) in self.rows.iter_mut().zip(consumed) {
            debug_assert!(count <= rows.len(), "Cannot consume more rows than buffered");
            rows.drain(..count.min(rows.len()));
        }
    }

    #[must_use]
    pub fn rows(&self, side: Side) -> &[Row] { &self.rows[side.index()] }

    #[must_use]
    pub fn slices(&self) -> [&[Row]; 2] { self.rows.each_ref().map(Vec::as_slice) }
}
