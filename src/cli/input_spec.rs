use std::{
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    num::ParseIntError,
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context as _, Result};

/// Where an input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// An input given on the command line as `FILE[=COL]`.
///
/// `-` (or `--`) stands for standard input. A trailing `=COL` of decimal
/// digits selects the 0-based comparison column; any other `=` is part of the
/// file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub source: InputSource,
    pub column: usize,
}

impl FromStr for InputSpec {
    type Err = ParseIntError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (path, column) = match spec.rsplit_once('=') {
            Some((path, column))
                if !column.is_empty() && column.bytes().all(|byte| byte.is_ascii_digit()) =>
            {
                (path, column.parse()?)
            }
            _ => (spec, 0),
        };

        let source = if path == "-" || path == "--" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(path))
        };

        Ok(Self { source, column })
    }
}

impl Display for InputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            InputSource::Stdin => write!(f, "<stdin>")?,
            InputSource::File(path) => write!(f, "{}", path.display())?,
        }
        write!(f, " (column {})", self.column)
    }
}

impl InputSpec {
    #[must_use]
    pub fn is_stdin(&self) -> bool { self.source == InputSource::Stdin }

    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match &self.source {
            InputSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            InputSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Cannot open input {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}
