//! Chunk handles.
//!
//! A [`ChunkHandle`] names a payload region as `(arena, offset)`. It is
//! the safe stand-in for a raw payload pointer: the header is found at a
//! fixed backward offset, and every use is validated against the arena's
//! bounds and list state.

use std::fmt;

use contig_core::{ArenaId, CHUNK_HEADER_SIZE};

/// Opaque reference to a chunk's payload region.
///
/// A handle has no generation. Once its chunk is released, a later
/// allocation placed at the same address makes the old handle valid
/// again, naming the new chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct ChunkHandle {
    /// Arena that issued this handle.
    pub(crate) arena: ArenaId,
    /// Byte offset of the first payload byte from the arena base.
    pub(crate) offset: u32,
}

impl ChunkHandle {
    /// Create a new handle. `offset` fits in `u32` because arena sizes are
    /// capped at `ArenaConfig::MAX_TOTAL_SIZE`.
    pub(crate) fn new(arena: ArenaId, offset: usize) -> Self {
        Self {
            arena,
            offset: offset as u32,
        }
    }

    /// The arena this handle belongs to.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Offset of the payload from the arena base.
    pub fn offset(&self) -> usize {
        self.offset as usize
    }

    /// Offset of the chunk header, if the payload offset leaves room for one.
    pub fn header_offset(&self) -> Option<usize> {
        self.offset().checked_sub(CHUNK_HEADER_SIZE)
    }
}

impl fmt::Display for ChunkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkHandle(arena={}, off={})", self.arena, self.offset)
    }
}
