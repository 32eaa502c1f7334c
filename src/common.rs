use std::fmt;

/// Outcome of a single [`feed`] call.
///
/// [`feed`]: crate::ParseContext::feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedResult {
    /// Bytes are not sufficient for parsing, more IO read is required.
    Pending,
    /// Parsing reached a terminal state, either done or failed.
    Complete,
}

impl FeedResult {
    /// Returns `true` if the feed result is [`Pending`].
    ///
    /// [`Pending`]: FeedResult::Pending
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if the feed result is [`Complete`].
    ///
    /// [`Complete`]: FeedResult::Complete
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// The byte accumulator failed to grow.
///
/// Distinct from any parse error: the input is not at fault, and the
/// connection should be torn down rather than answered with a 4xx.
#[derive(Debug)]
pub struct OutOfMemory;

impl std::error::Error for OutOfMemory {}

impl fmt::Display for OutOfMemory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("out of memory")
    }
}

impl From<std::collections::TryReserveError> for OutOfMemory {
    fn from(_: std::collections::TryReserveError) -> Self {
        OutOfMemory
    }
}
