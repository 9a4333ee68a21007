use std::{fs, num::NonZeroUsize, path::Path};

use anyhow::{Context as _, Result, ensure};
use log::{debug, info};
use serde::Deserialize;

use crate::{errors::AlignError, similarity::EditWeights};

pub mod merge_mode;

pub use merge_mode::MergeMode;

/// Tunable behaviour of a merge run that can be kept in a YAML file.
///
/// ```yaml
/// mode: similarity-force
/// weights:
///   substitution: 1.5
/// drop: [0]
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_mode")]
    pub mode: MergeMode,

    #[serde(default)]
    pub weights: EditWeights,

    /// Columns of the second input left out of the merged rows.
    #[serde(default)]
    pub drop: Vec<usize>,
}

fn default_mode() -> MergeMode {
    let mode = MergeMode::default();
    debug!("Using default merge mode: {mode}");
    mode
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            weights: EditWeights::default(),
            drop: Vec::new(),
        }
    }
}

impl Settings {
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid YAML settings, or holds
    /// unusable edit weights.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading settings from '{}'", path.display());

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Cannot load settings from {}", path.display()))?;

        let settings: Self = serde_yaml::from_str(&contents).context("Failed to parse settings")?;
        ensure!(
            settings.weights.is_valid(),
            "Edit weights must be finite and non-negative, got {:?}",
            settings.weights
        );

        Ok(settings)
    }
}

/// Validated configuration of one streaming merge.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignConfig {
    window: NonZeroUsize,
    columns: [usize; 2],
    settings: Settings,
}

impl AlignConfig {
    /// `columns` holds the comparison column of every input, in input order.
    ///
    /// # Errors
    ///
    /// Only two inputs can be merged; any other count is a configuration
    /// error.
    pub fn new(
        window: NonZeroUsize,
        columns: &[usize],
        settings: Settings,
    ) -> Result<Self, AlignError> {
        let columns = match columns {
            [left, right] => [*left, *right],
            [] | [_] => {
                return Err(AlignError::TooFewInputs {
                    found: columns.len(),
                });
            }
            _ => {
                return Err(AlignError::TooManyInputs {
                    found: columns.len(),
                });
            }
        };

        Ok(Self {
            window,
            columns,
            settings,
        })
    }

    #[must_use]
    pub const fn window(&self) -> usize { self.window.get() }

    #[must_use]
    pub const fn columns(&self) -> [usize; 2] { self.columns }

    #[must_use]
    pub const fn mode(&self) -> MergeMode { self.settings.mode }

    #[must_use]
    pub const fn weights(&self) -> &EditWeights { &self.settings.weights }

    #[must_use]
    pub fn dropped_columns(&self) -> &[usize] { &self.settings.drop }

    /// How many anchor rows a partial pass aims to commit before stopping at
    /// the next exact match: two thirds of the window, rounded up.
    #[must_use]
    pub const fn commit_depth(&self) -> usize { (self.window.get() * 2).div_ceil(3) }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn window(size: usize) -> NonZeroUsize { NonZeroUsize::new(size).unwrap() }

    #[test]
    fn test_two_inputs() {
        let config = AlignConfig::new(window(5), &[0, 2], Settings::default()).unwrap();
        assert_eq!(config.columns(), [0, 2]);
        assert_eq!(config.window(), 5);
        assert_eq!(config.mode(), MergeMode::Similarity);
    }

    #[test]
    fn test_input_count_is_checked() {
        assert!(matches!(
            AlignConfig::new(window(5), &[0], Settings::default()),
            Err(AlignError::TooFewInputs { found: 1 })
        ));
        assert!(matches!(
            AlignConfig::new(window(5), &[0, 0, 0], Settings::default()),
            Err(AlignError::TooManyInputs { found: 3 })
        ));
    }

    #[test_case(1 => 1)]
    #[test_case(3 => 2)]
    #[test_case(5 => 4)]
    #[test_case(30 => 20)]
    fn test_commit_depth(size: usize) -> usize {
        AlignConfig::new(window(size), &[0, 0], Settings::default())
            .unwrap()
            .commit_depth()
    }

    #[test]
    fn test_settings_from_yaml() {
        let settings: Settings =
            serde_yaml::from_str("mode: force\nweights:\n  insertion: 0.5\n").unwrap();

        assert_eq!(settings.mode, MergeMode::Force);
        assert_eq!(settings.weights.insertion, 0.5);
        assert_eq!(settings.weights.deletion, 1.0);
        assert!(settings.drop.is_empty());
        assert_eq!(serde_yaml::from_str::<Settings>("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_dropped_columns_from_yaml() {
        let settings: Settings = serde_yaml::from_str("drop: [0, 3]\n").unwrap();
        let config = AlignConfig::new(window(5), &[0, 0], settings).unwrap();

        assert_eq!(config.dropped_columns(), [0, 3]);
    }
}
