//! Address scan cursor.
//!
//! The wallet memoizes its scan progress through the seed's address space
//! as a small state machine instead of a pair of ad hoc integers, so the
//! staleness rules live in one place.
//!
//! Transitions:
//! - a receive-address search run with internal cursor management caches
//!   the unspent address it found (`cache_unspent`);
//! - a successful spend invalidates the cached unspent address — it may
//!   have just received change and will be re-checked — while everything
//!   confirmed spent below it stays known (`invalidate_after_spend`);
//! - searches run with caller-supplied start indices never touch the
//!   cursor; those callers manage their own resumption state.

/// Memoized scan progress through the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanCursor {
    /// Nothing known yet; scans start at index 0.
    Unknown,
    /// Lowest-index address known to be unspent. A receive-address request
    /// can return it without a network round trip.
    CachedUnspent(u32),
    /// Highest index confirmed spent; no unspent address is cached. Scans
    /// resume one past it.
    KnownSpentUpTo(u32),
}

impl ScanCursor {
    /// Index the next internal scan should start from.
    pub fn resume_index(&self) -> u32 {
        match *self {
            ScanCursor::Unknown => 0,
            ScanCursor::CachedUnspent(index) => index,
            ScanCursor::KnownSpentUpTo(index) => index + 1,
        }
    }

    /// The cached unspent address index, if any.
    pub fn cached_unspent(&self) -> Option<u32> {
        match *self {
            ScanCursor::CachedUnspent(index) => Some(index),
            _ => None,
        }
    }

    /// Cache an unspent address found by an internal search.
    pub fn cache_unspent(&mut self, index: u32) {
        *self = ScanCursor::CachedUnspent(index);
    }

    /// Apply the effect of a successful spend.
    ///
    /// `highest_input` is the highest key index spent as an input, known
    /// only when the transfer ran with internal cursor management.
    pub fn invalidate_after_spend(&mut self, highest_input: Option<u32>) {
        let spent_floor = match *self {
            ScanCursor::CachedUnspent(0) | ScanCursor::Unknown => None,
            ScanCursor::CachedUnspent(index) => Some(index - 1),
            ScanCursor::KnownSpentUpTo(index) => Some(index),
        };
        *self = match (spent_floor, highest_input) {
            (Some(floor), Some(input)) => ScanCursor::KnownSpentUpTo(floor.max(input)),
            (Some(floor), None) => ScanCursor::KnownSpentUpTo(floor),
            (None, Some(input)) => ScanCursor::KnownSpentUpTo(input),
            (None, None) => ScanCursor::Unknown,
        };
    }
}

impl Default for ScanCursor {
    fn default() -> Self {
        ScanCursor::Unknown
    }
}
