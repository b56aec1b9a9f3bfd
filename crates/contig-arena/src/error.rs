//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use contig_core::ArenaId;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested buffer cannot hold the arena header.
    TooSmall {
        /// Number of bytes requested.
        requested: usize,
        /// Smallest acceptable buffer size.
        minimum: usize,
    },
    /// A configuration value is outside the supported range.
    InvalidConfig {
        /// Description of the rejected value.
        reason: String,
    },
    /// No gap is large enough for the requested chunk. The arena is
    /// unchanged.
    NoSpace {
        /// Payload bytes requested.
        requested: usize,
        /// Largest gap currently available, header space included.
        largest_gap: usize,
    },
    /// The handle was issued by a different arena.
    ForeignHandle {
        /// Arena encoded in the handle.
        handle_arena: ArenaId,
        /// Arena the handle was presented to.
        arena: ArenaId,
    },
    /// The handle's offset cannot name a payload inside this buffer.
    InvalidHandle {
        /// Payload offset encoded in the handle.
        offset: usize,
    },
    /// The handle does not name a live chunk (already released, or never
    /// allocated at that offset).
    NotLive {
        /// Payload offset encoded in the handle.
        offset: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { requested, minimum } => {
                write!(
                    f,
                    "arena too small: requested {requested} bytes, header needs {minimum} bytes"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::NoSpace {
                requested,
                largest_gap,
            } => {
                write!(
                    f,
                    "no space: requested {requested} payload bytes, largest gap {largest_gap} bytes"
                )
            }
            Self::ForeignHandle {
                handle_arena,
                arena,
            } => {
                write!(
                    f,
                    "handle belongs to arena {handle_arena}, not arena {arena}"
                )
            }
            Self::InvalidHandle { offset } => {
                write!(f, "invalid handle: offset {offset} is outside the arena")
            }
            Self::NotLive { offset } => {
                write!(f, "no live chunk at payload offset {offset}")
            }
        }
    }
}

impl Error for ArenaError {}
