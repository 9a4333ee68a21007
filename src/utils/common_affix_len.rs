use std::ops::Range;

/// Length of the common prefix of `old[old_range]` and `new[new_range]`.
/// Adapted from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/utils.rs>
pub fn common_prefix_len<K>(
    old: &[K],
    old_range: Range<usize>,
    new: &[K],
    new_range: Range<usize>,
) -> usize
where
    K: PartialEq,
{
    if old_range.is_empty() || new_range.is_empty() {
        return 0;
    }

    old[old_range]
        .iter()
        .zip(&new[new_range])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Length of the common suffix of `old[old_range]` and `new[new_range]`.
pub fn common_suffix_len<K>(
    old: &[K],
    old_range: Range<usize>,
    new: &[K],
    new_range: Range<usize>,
) -> usize
where
    K: PartialEq,
{
    if old_range.is_empty() || new_range.is_empty() {
        return 0;
    }

    old[old_range]
        .iter()
        .rev()
        .zip(new[new_range].iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}
