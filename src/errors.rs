use std::io;

use thiserror::Error;

/// Errors surfaced by the alignment engine.
///
/// Running out of input or a merge pass that commits nothing are not errors;
/// those are reported through [`crate::FillOutcome`] and
/// [`crate::MergePass`] and handled by the driver.
#[derive(Error, Debug)]
pub enum AlignError {
    /// Alignment needs an anchor and at least one other input
    #[error("Alignment requires at least two inputs, but {found} were given")]
    TooFewInputs {
        /// Number of inputs that were provided
        found: usize,
    },

    /// Chained alignment of more than two inputs has no defined merge order
    #[error(
        "Merging {found} inputs is not supported: streams can only be merged pairwise, please \
         merge two files at a time"
    )]
    TooManyInputs {
        /// Number of inputs that were provided
        found: usize,
    },

    #[error("Failed to read from input #{index}")]
    Read {
        /// Position of the input on the command line, starting at 0
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write merged rows")]
    Write(#[source] io::Error),
}
