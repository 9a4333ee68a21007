use crate::{errors::AlignError, utils::myers_diff::myers_diff};

/// One step of an edit script turning the anchor buffer's key sequence into
/// another buffer's key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentCode {
    /// Both rows carry identical keys and are merged side by side.
    Keep,
    /// A row of the right-hand buffer has no counterpart on the left.
    Insert,
    /// A row of the left-hand buffer has no counterpart on the right.
    Remove,
}

impl AlignmentCode {
    /// Shortest edit script from `left` to `right`.
    pub fn script<K>(left: &[K], right: &[K]) -> Vec<Self>
    where
        K: PartialEq,
    {
        myers_diff(left, right)
    }

    /// Aligns every non-anchor key sequence against the first one, returning
    /// one script per pair `(keys[0], keys[i])` in input order.
    ///
    /// # Errors
    ///
    /// Fails with [`AlignError::TooFewInputs`] when fewer than two sequences
    /// are given.
    pub fn chain<K>(keys: &[Vec<K>]) -> Result<Vec<Vec<Self>>, AlignError>
    where
        K: PartialEq,
    {
        match keys {
            [anchor, rest @ ..] if !rest.is_empty() => Ok(rest
                .iter()
                .map(|other| Self::script(anchor, other))
                .collect()),
            _ => Err(AlignError::TooFewInputs { found: keys.len() }),
        }
    }

    #[must_use]
    pub const fn consumes_left(self) -> bool { matches!(self, Self::Keep | Self::Remove) }

    #[must_use]
    pub const fn consumes_right(self) -> bool { matches!(self, Self::Keep | Self::Insert) }
}
