use std::{
    env,
    io::{self, IsTerminal as _},
};

use clap::ValueEnum;

/// When the log lines on standard error carry ANSI colours. Standard output
/// holds the merged rows and is never coloured.
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LogColor {
    Always,
    #[default]
    Auto,
    Never,
}

impl LogColor {
    /// Resolves `Auto` against the environment: colours only go to a
    /// terminal, and only while `NO_COLOR` is unset or empty.
    pub fn enabled(self) -> bool {
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        self.resolve(no_color, io::stderr().is_terminal())
    }

    const fn resolve(self, no_color: bool, stderr_is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Auto => stderr_is_terminal && !no_color,
            Self::Never => false,
        }
    }
}
