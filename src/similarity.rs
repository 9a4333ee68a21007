use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub mod similarity_matrix;
pub mod weighted_levenshtein;

pub use similarity_matrix::SimilarityMatrix;
pub use weighted_levenshtein::{EditWeights, weighted_levenshtein};

/// Reduces a token to a comparable ASCII baseline: compatibility
/// decomposition, combining marks dropped, remaining non-ASCII characters
/// dropped, lower-cased.
///
/// ```
/// use conll_align::similarity::normalize;
///
/// assert_eq!(normalize("Ærøskøbing"), "rskbing");
/// assert_eq!(normalize("Über"), "uber");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Similarity in `[0, 1]` of two normalised strings, derived from their
/// weighted edit distance relative to the longer one. Two empty strings are
/// identical.
#[must_use]
pub fn similarity(a: &str, b: &str, weights: &EditWeights) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }

    let distance = weighted_levenshtein(a, b, weights);
    (1.0 - distance / longest as f64).clamp(0.0, 1.0)
}
