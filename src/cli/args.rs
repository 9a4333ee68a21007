use std::{
    num::{NonZeroUsize, ParseIntError},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use conll_align::{MergeMode, Settings};

use crate::cli::{input_spec::InputSpec, log_color::LogColor};

/// Merge two CoNLL/TSV files annotating the same text into one, row by row
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of rows buffered per input as alignment context
    #[arg(index = 1, value_name = "WINDOW")]
    pub window: NonZeroUsize,

    /// Inputs to merge; `-` reads standard input and `=COL` selects the
    /// 0-based column rows are compared by
    #[arg(index = 2, value_name = "FILE[=COL]", required = true)]
    pub inputs: Vec<InputSpec>,

    /// How rows without an exact counterpart are merged [default: similarity]
    #[arg(long, value_enum)]
    pub mode: Option<MergeMode>,

    /// Cost of substituting one character in the similarity measure
    #[arg(long, value_name = "WEIGHT", value_parser = parse_weight)]
    pub substitution: Option<f64>,

    /// Cost of inserting one character in the similarity measure
    #[arg(long, value_name = "WEIGHT", value_parser = parse_weight)]
    pub insertion: Option<f64>,

    /// Cost of deleting one character in the similarity measure
    #[arg(long, value_name = "WEIGHT", value_parser = parse_weight)]
    pub deletion: Option<f64>,

    /// Columns of the second input to leave out of the output, as a comma
    /// separated list of 0-based indices, or `none`
    #[arg(long, value_name = "COL,...|none")]
    pub drop: Option<DroppedColumns>,

    /// YAML file with merge settings; flags take precedence over it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    /// Colouring of the log lines written to standard error
    #[arg(
            long,
            value_name = "WHEN",
            default_value_t = LogColor::Auto,
            default_missing_value = "always",
            num_args = 0..=1,
            require_equals = true,
            value_enum
        )]
    pub color: LogColor,
}

impl Args {
    /// Settings from `--config` (or the defaults), overridden by any flag
    /// given explicitly.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::default(),
        };

        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(weight) = self.substitution {
            settings.weights.substitution = weight;
        }
        if let Some(weight) = self.insertion {
            settings.weights.insertion = weight;
        }
        if let Some(weight) = self.deletion {
            settings.weights.deletion = weight;
        }
        if let Some(DroppedColumns(columns)) = &self.drop {
            settings.drop.clone_from(columns);
        }

        Ok(settings)
    }
}

/// Value of `--drop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedColumns(pub Vec<usize>);

impl FromStr for DroppedColumns {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("none") {
            return Ok(Self(Vec::new()));
        }

        value
            .split(',')
            .map(|column| column.trim().parse())
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

fn parse_weight(value: &str) -> Result<f64, String> {
    let weight: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;

    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(format!("weight must be finite and non-negative, got {value}"))
    }
}
