use std::{io::Cursor, num::NonZeroUsize};

use conll_align::{AlignConfig, MergeMode, Settings, StreamMerger};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// One end-to-end merge described in a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeCase {
    name: String,
    window: usize,
    #[serde(default)]
    mode: MergeMode,
    #[serde(default)]
    columns: [usize; 2],
    #[serde(default)]
    drop: Vec<usize>,
    left: String,
    right: String,
    expected: String,
}

impl MergeCase {
    pub fn assert_merged(&self) {
        let settings = Settings {
            mode: self.mode,
            drop: self.drop.clone(),
            ..Settings::default()
        };

        assert_eq!(
            merge_with(self.window, self.columns, settings, &self.left, &self.right),
            self.expected,
            "{}",
            self.name
        );
    }
}

pub fn merge(
    window: usize,
    columns: [usize; 2],
    mode: MergeMode,
    left: &str,
    right: &str,
) -> String {
    let settings = Settings {
        mode,
        ..Settings::default()
    };
    merge_with(window, columns, settings, left, right)
}

pub fn merge_with(
    window: usize,
    columns: [usize; 2],
    settings: Settings,
    left: &str,
    right: &str,
) -> String {
    let config = AlignConfig::new(
        NonZeroUsize::new(window).expect("window must be positive"),
        &columns,
        settings,
    )
    .expect("two inputs are given");

    let sink = StreamMerger::new(
        config,
        [
            Box::new(Cursor::new(left.to_owned().into_bytes())),
            Box::new(Cursor::new(right.to_owned().into_bytes())),
        ],
        Vec::new(),
    )
    .run()
    .expect("in-memory streams cannot fail");

    String::from_utf8(sink).expect("merged rows are valid UTF-8")
}
