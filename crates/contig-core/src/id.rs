//! Strongly-typed arena identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ArenaId`] allocation.
static ARENA_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one arena instance for the lifetime of the process.
///
/// Allocated from a monotonic atomic counter via [`ArenaId::next`]. Chunk
/// headers and handles carry the id of the arena they were carved from;
/// it is a lookup key, never an owning reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(pub u64);

impl ArenaId {
    /// Allocate a fresh, unique arena ID.
    ///
    /// Each call returns an ID that has never been returned before within
    /// this process. Thread-safe.
    pub fn next() -> Self {
        Self(ARENA_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ArenaId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
