//! Streaming alignment of independently tokenised CoNLL/TSV annotation
//! layers.
//!
//! Two inputs describing the same text are read through a bounded window.
//! Rows with identical comparison keys are matched by an exact diff, the rest
//! are paired by string similarity or padded with `?` placeholders, and every
//! merged row is written as soon as it can no longer change.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod alignment_code;
pub mod config;
pub mod errors;
pub mod merge;
pub mod row;
pub mod similarity;
pub mod stream_merger;
pub mod utils;
pub mod window;

pub use alignment_code::AlignmentCode;
pub use config::{AlignConfig, MergeMode, Settings};
pub use errors::AlignError;
pub use merge::{Layout, MergePass, PassScope};
pub use row::{MergedRow, Row};
pub use similarity::EditWeights;
pub use stream_merger::StreamMerger;
pub use utils::side::Side;
pub use window::{FillOutcome, WindowBuffers};
