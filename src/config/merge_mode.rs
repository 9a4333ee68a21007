use clap::ValueEnum;
use serde::Deserialize;

/// What happens to rows the exact aligner could not pair up.
#[derive(ValueEnum, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// Unmatched rows are emitted next to `?` placeholder cells.
    Placeholder,
    /// Unmatched right-hand rows are folded into the previous merged row with
    /// `+`, keeping the left tokenisation intact.
    Force,
    /// Unmatched rows are paired up by string similarity, the rest get
    /// placeholders.
    #[default]
    Similarity,
    /// Like `similarity`, but leftover right-hand rows are folded as in
    /// `force`.
    SimilarityForce,
}

impl MergeMode {
    /// Whether unmatched runs are pooled for the approximate aligner.
    #[must_use]
    pub const fn uses_similarity(self) -> bool {
        matches!(self, Self::Similarity | Self::SimilarityForce)
    }

    /// Whether unmatched right-hand rows are folded into the previous row.
    #[must_use]
    pub const fn folds_insertions(self) -> bool {
        matches!(self, Self::Force | Self::SimilarityForce)
    }
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(MergeMode::SimilarityForce.to_string(), "similarity-force");
        assert_eq!(
            serde_yaml::from_str::<MergeMode>("similarity-force").unwrap(),
            MergeMode::SimilarityForce
        );
        assert_eq!(MergeMode::from_str("force", true), Ok(MergeMode::Force));
    }

    #[test]
    fn test_flags() {
        assert!(!MergeMode::Placeholder.uses_similarity());
        assert!(!MergeMode::Placeholder.folds_insertions());
        assert!(MergeMode::Force.folds_insertions());
        assert!(MergeMode::SimilarityForce.uses_similarity());
        assert!(MergeMode::SimilarityForce.folds_insertions());
    }
}
