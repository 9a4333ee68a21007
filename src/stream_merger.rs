use std::io::{BufRead, Write};

use log::{debug, info};

use crate::{
    config::AlignConfig,
    errors::AlignError,
    merge::{Layout, MergePass, Merger, PassScope},
    window::{FillOutcome, WindowBuffers},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Refill the window and commit what is safe to commit.
    Run,
    /// The last partial pass committed nothing: resolve the whole window.
    ///
    /// A partial pass over a non-empty window always consumes a row, so runs
    /// only get here if that stops holding; the full pass then either
    /// unblocks the run or ends it.
    RetrySimilarity,
    /// All inputs are exhausted: resolve whatever is left, then stop.
    Drain,
    Done,
}

/// Streams two inputs through a bounded window, writing merged rows as tab
/// separated lines to `sink`.
#[derive(Debug)]
pub struct StreamMerger<W> {
    config: AlignConfig,
    buffers: WindowBuffers,
    layout: Option<Layout>,
    sink: W,
    written: usize,
    passes: usize,
}

impl<W: Write> StreamMerger<W> {
    #[must_use]
    pub fn new(config: AlignConfig, readers: [Box<dyn BufRead>; 2], sink: W) -> Self {
        Self {
            config,
            buffers: WindowBuffers::new(readers),
            layout: None,
            sink,
            written: 0,
            passes: 0,
        }
    }

    /// Merges both inputs to the end and returns the flushed sink.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be read or the sink cannot be written.
    pub fn run(mut self) -> Result<W, AlignError> {
        let mut state = State::Run;

        while state != State::Done {
            let next = self.step(state)?;
            if next != state {
                debug!("{state:?} -> {next:?}");
            }
            state = next;
        }

        self.sink.flush().map_err(AlignError::Write)?;
        info!(
            "Wrote {} merged rows in {} merge passes",
            self.written, self.passes
        );

        Ok(self.sink)
    }

    fn step(&mut self, state: State) -> Result<State, AlignError> {
        Ok(match state {
            State::Run => match self.buffers.fill(self.config.window())? {
                FillOutcome::Exhausted => State::Drain,
                FillOutcome::Filled(_) => {
                    let commit_depth = self.config.commit_depth();
                    if self.merge_and_commit(PassScope::Partial { commit_depth })? {
                        State::Run
                    } else {
                        State::RetrySimilarity
                    }
                }
            },
            State::RetrySimilarity => {
                if self.merge_and_commit(PassScope::Full)? {
                    State::Run
                } else {
                    State::Done
                }
            }
            State::Drain => {
                self.merge_and_commit(PassScope::Full)?;
                State::Done
            }
            State::Done => State::Done,
        })
    }

    /// Runs one merge pass and commits its result. Returns whether the pass
    /// made progress.
    fn merge_and_commit(&mut self, scope: PassScope) -> Result<bool, AlignError> {
        let columns = self.config.columns();
        let dropped = self.config.dropped_columns();
        let buffers = &self.buffers;
        let layout = &*self.layout.get_or_insert_with(|| {
            Layout::measure(buffers.slices(), columns).with_dropped(dropped)
        });

        let merger = Merger {
            layout,
            mode: self.config.mode(),
            weights: self.config.weights(),
        };
        let pass = merger.merge(self.buffers.slices(), scope);
        self.passes += 1;

        if pass.is_no_progress() {
            return Ok(false);
        }

        self.commit(pass)?;
        Ok(true)
    }

    fn commit(&mut self, pass: MergePass) -> Result<(), AlignError> {
        for row in &pass.rows {
            writeln!(self.sink, "{row}").map_err(AlignError::Write)?;
        }

        self.written += pass.rows.len();
        self.buffers.consume(pass.consumed);
        Ok(())
    }
}
