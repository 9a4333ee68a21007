use log::debug;
use serde::Deserialize;

/// Costs of the three edit operations of a generalised Levenshtein distance.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EditWeights {
    #[serde(default = "default_substitution")]
    pub substitution: f64,

    #[serde(default = "default_insertion")]
    pub insertion: f64,

    #[serde(default = "default_deletion")]
    pub deletion: f64,
}

const UNIT_WEIGHT: f64 = 1.0;

fn default_substitution() -> f64 {
    debug!("Using default substitution weight: {UNIT_WEIGHT}");
    UNIT_WEIGHT
}

fn default_insertion() -> f64 {
    debug!("Using default insertion weight: {UNIT_WEIGHT}");
    UNIT_WEIGHT
}

fn default_deletion() -> f64 {
    debug!("Using default deletion weight: {UNIT_WEIGHT}");
    UNIT_WEIGHT
}

impl Default for EditWeights {
    fn default() -> Self {
        Self {
            substitution: default_substitution(),
            insertion: default_insertion(),
            deletion: default_deletion(),
        }
    }
}

impl EditWeights {
    /// Whether every weight is a finite, non-negative cost.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.substitution, self.insertion, self.deletion]
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0)
    }
}

/// Minimal total cost of turning `source` into `target`, where inserting a
/// character of `target`, deleting a character of `source` and substituting
/// one character for another are priced by `weights`.
///
/// Runs in `O(|source| * |target|)` time with two rows of memory.
#[must_use]
pub fn weighted_levenshtein(source: &str, target: &str, weights: &EditWeights) -> f64 {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    if source.is_empty() {
        return target.len() as f64 * weights.insertion;
    }
    if target.is_empty() {
        return source.len() as f64 * weights.deletion;
    }

    let mut previous: Vec<f64> = (0..=target.len())
        .map(|j| j as f64 * weights.insertion)
        .collect();
    let mut current = vec![0.0; target.len() + 1];

    for (i, source_char) in source.iter().enumerate() {
        current[0] = (i + 1) as f64 * weights.deletion;
        for (j, target_char) in target.iter().enumerate() {
            let substitution = if source_char == target_char {
                0.0
            } else {
                weights.substitution
            };
            current[j + 1] = (current[j] + weights.insertion)
                .min(previous[j + 1] + weights.deletion)
                .min(previous[j] + substitution);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}
