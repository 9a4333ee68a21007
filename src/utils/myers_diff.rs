//! Adapted from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/myers.rs>
//!
//! Myers' diff algorithm over comparison keys.
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! Within every run of edits between two kept keys, removals are emitted
//! before insertions so that equally short scripts come out the same way.

use std::ops::{Index, IndexMut, Range};

use crate::{
    alignment_code::AlignmentCode,
    utils::common_affix_len::{common_prefix_len, common_suffix_len},
};

/// Computes a shortest edit script turning `old` into `new`.
///
/// Every element of either sequence is covered by exactly one code:
/// `Keep` consumes one key from both, `Remove` one from `old` and
/// `Insert` one from `new`.
pub fn myers_diff<K>(old: &[K], new: &[K]) -> Vec<AlignmentCode>
where
    K: PartialEq,
{
    let max_d = (old.len() + new.len()).div_ceil(2) + 1;
    let mut vb = V::new(max_d);
    let mut vf = V::new(max_d);
    let mut result = Vec::with_capacity(old.len().max(new.len()));

    conquer(
        old,
        0..old.len(),
        new,
        0..new.len(),
        &mut vf,
        &mut vb,
        &mut result,
    );

    for edits in result.split_mut(|code| *code == AlignmentCode::Keep) {
        edits.sort_unstable_by_key(|code| *code == AlignmentCode::Insert);
    }

    debug_assert_eq!(
        result.iter().filter(|code| code.consumes_left()).count(),
        old.len(),
        "Every left key must be covered exactly once"
    );
    debug_assert_eq!(
        result.iter().filter(|code| code.consumes_right()).count(),
        new.len(),
        "Every right key must be covered exactly once"
    );

    result
}

/// `V` contains the endpoints of the furthest reaching `D-paths`. For each
/// recorded endpoint `(x,y)` in diagonal `k`, we only need to retain `x`
/// because `y` can be computed from `x - k`.
///
/// `k` can be negative, so `V` is a `Vec` plus an `offset` mapping the
/// smallest diagonal back to index zero.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: isize::try_from(max_d).unwrap_or(isize::MAX),
            v: vec![0; 2 * max_d],
        }
    }

    fn len(&self) -> usize { self.v.len() }

    fn slot(&self, index: isize) -> usize {
        usize::try_from(index + self.offset).unwrap_or(0)
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output { &self.v[self.slot(index)] }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        let slot = self.slot(index);
        &mut self.v[slot]
    }
}

fn split_at(range: Range<usize>, at: usize) -> (Range<usize>, Range<usize>) {
    (range.start..at, at..range.end)
}

fn signed(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

/// Finds the start of the middle snake of an optimal D-path by running the
/// greedy search forwards from `(0, 0)` and backwards from `(N, M)` until the
/// two frontiers overlap.
fn find_middle_snake<K>(
    old: &[K],
    old_range: Range<usize>,
    new: &[K],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)>
where
    K: PartialEq,
{
    let n = old_range.len();
    let m = new_range.len();

    // By Lemma 1 in the paper, the optimal edit script length is odd or even as
    // `delta` is odd or even.
    let delta = signed(n) - signed(m);
    let odd = delta & 1 == 1;

    // The initial point at (0, -1)
    vf[1] = 0;
    // The initial point at (N, M+1)
    vb[1] = 0;

    let d_max = (n + m).div_ceil(2) + 1;
    debug_assert!(vf.len() >= d_max);
    debug_assert!(vb.len() >= d_max);

    for d in 0..signed(d_max) {
        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = usize::try_from(signed(x) - k).unwrap_or(0);

            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    old,
                    old_range.start + x..old_range.end,
                    new,
                    new_range.start + y..new_range.end,
                );
            }

            vf[k] = x;

            // Overlap with the reverse search is only possible when delta is
            // odd and a reciprocal diagonal exists.
            if odd && (k - delta).abs() <= (d - 1) && vf[k] + vb[-(k - delta)] >= n {
                return Some((x0 + old_range.start, y0 + new_range.start));
            }
        }

        // Backward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = usize::try_from(signed(x) - k).unwrap_or(0);

            if x < n && y < m {
                let advance = common_suffix_len(
                    old,
                    old_range.start..old_range.start + n - x,
                    new,
                    new_range.start..new_range.start + m - y,
                );
                x += advance;
                y += advance;
            }

            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((n - x + old_range.start, m - y + new_range.start));
            }
        }
    }

    None
}

fn conquer<K>(
    old: &[K],
    mut old_range: Range<usize>,
    new: &[K],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    result: &mut Vec<AlignmentCode>,
) where
    K: PartialEq,
{
    let prefix = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    result.extend(std::iter::repeat_n(AlignmentCode::Keep, prefix));
    old_range.start += prefix;
    new_range.start += prefix;

    let suffix = common_suffix_len(old, old_range.clone(), new, new_range.clone());
    old_range.end -= suffix;
    new_range.end -= suffix;

    if old_range.is_empty() && new_range.is_empty() {
        // nothing left between prefix and suffix
    } else if new_range.is_empty() {
        result.extend(std::iter::repeat_n(AlignmentCode::Remove, old_range.len()));
    } else if old_range.is_empty() {
        result.extend(std::iter::repeat_n(AlignmentCode::Insert, new_range.len()));
    } else if let Some((x_start, y_start)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        let (old_a, old_b) = split_at(old_range, x_start);
        let (new_a, new_b) = split_at(new_range, y_start);
        conquer(old, old_a, new, new_a, vf, vb, result);
        conquer(old, old_b, new, new_b, vf, vb, result);
    } else {
        result.extend(std::iter::repeat_n(AlignmentCode::Remove, old_range.len()));
        result.extend(std::iter::repeat_n(AlignmentCode::Insert, new_range.len()));
    }

    result.extend(std::iter::repeat_n(AlignmentCode::Keep, suffix));
}
