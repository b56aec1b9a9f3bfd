//! Header geometry and read-only descriptors of arena contents.
//!
//! All addresses are byte offsets from the arena base. The arena header
//! occupies `[0, ARENA_HEADER_SIZE)`; each chunk is a `CHUNK_HEADER_SIZE`
//! header immediately followed by its payload bytes.

use std::fmt;

use crate::id::ArenaId;

/// Size in bytes of the arena header at offset 0 (`first`, `bound`).
pub const ARENA_HEADER_SIZE: usize = 16;

/// Size in bytes of a chunk header (`payload_size`, `prev`, `next`, `owner`).
pub const CHUNK_HEADER_SIZE: usize = 32;

/// Snapshot of one live chunk header, decoded from the arena buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Offset of the chunk header.
    pub offset: usize,
    /// Size of the payload region in bytes.
    pub payload_size: usize,
    /// Offset of the previous chunk header, `None` for the list head.
    pub prev: Option<usize>,
    /// Offset of the next chunk header, `None` for the list tail.
    pub next: Option<usize>,
    /// Arena this chunk was carved from.
    pub owner: ArenaId,
}

impl ChunkInfo {
    /// Offset of the first payload byte.
    pub fn payload_offset(&self) -> usize {
        self.offset + CHUNK_HEADER_SIZE
    }

    /// One past the last payload byte.
    pub fn end(&self) -> usize {
        self.payload_offset() + self.payload_size
    }

    /// Total footprint of the chunk, header included.
    pub fn footprint(&self) -> usize {
        CHUNK_HEADER_SIZE + self.payload_size
    }
}

/// Where a gap sits relative to the chunk list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GapKind {
    /// Between the end of the arena header and the first chunk, or the
    /// whole data area when the arena is empty.
    Leading,
    /// Between two adjacent chunks.
    Interior,
    /// Between the last chunk and the buffer bound.
    Trailing,
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading => write!(f, "leading"),
            Self::Interior => write!(f, "interior"),
            Self::Trailing => write!(f, "trailing"),
        }
    }
}

/// A free byte range derived from neighbouring chunk geometry.
///
/// Gaps are never stored. They are recomputed on demand from the chunk
/// list, so a released chunk's bytes fold into the surrounding gap with
/// no merge step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GapInfo {
    /// First free byte.
    pub start: usize,
    /// Number of free bytes (may be zero).
    pub len: usize,
    /// Header offset of the chunk preceding the gap.
    pub before: Option<usize>,
    /// Header offset of the chunk following the gap.
    pub after: Option<usize>,
}

impl GapInfo {
    /// Classify the gap by its neighbours.
    pub fn kind(&self) -> GapKind {
        match (self.before, self.after) {
            (None, _) => GapKind::Leading,
            (Some(_), Some(_)) => GapKind::Interior,
            (Some(_), None) => GapKind::Trailing,
        }
    }

    /// One past the last free byte.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Whether a chunk with `payload_size` payload bytes fits in this gap.
    pub fn fits(&self, payload_size: usize) -> bool {
        CHUNK_HEADER_SIZE
            .checked_add(payload_size)
            .is_some_and(|needed| needed <= self.len)
    }
}
