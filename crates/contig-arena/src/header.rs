//! In-buffer header records.
//!
//! Both headers are `#[repr(C)]` plain-old-data copied in and out of the
//! arena's byte buffer with `bytemuck`. Links are stored as `u64` offsets
//! from the arena base, with [`NIL`] standing for "none".

use bytemuck::{Pod, Zeroable};
use contig_core::{ArenaId, ChunkInfo, ARENA_HEADER_SIZE, CHUNK_HEADER_SIZE};

/// Encoded "no chunk" link.
pub(crate) const NIL: u64 = u64::MAX;

const _: () = assert!(std::mem::size_of::<ArenaHeader>() == ARENA_HEADER_SIZE);
const _: () = assert!(std::mem::size_of::<ChunkHeader>() == CHUNK_HEADER_SIZE);

/// Arena header stored at offset 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub(crate) struct ArenaHeader {
    /// Offset of the head chunk header, or [`NIL`].
    pub first: u64,
    /// One past the last buffer byte.
    pub bound: u64,
}

/// Chunk header stored immediately before each payload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub(crate) struct ChunkHeader {
    pub payload_size: u64,
    pub prev: u64,
    pub next: u64,
    /// Raw [`ArenaId`] of the owning arena.
    pub owner: u64,
}

impl ChunkHeader {
    pub(crate) fn new(
        payload_size: usize,
        prev: Option<usize>,
        next: Option<usize>,
        owner: ArenaId,
    ) -> Self {
        Self {
            payload_size: payload_size as u64,
            prev: encode_link(prev),
            next: encode_link(next),
            owner: owner.0,
        }
    }

    pub(crate) fn payload_len(&self) -> usize {
        self.payload_size as usize
    }

    /// Decode into the public descriptor for a header found at `offset`.
    pub(crate) fn describe(&self, offset: usize) -> ChunkInfo {
        ChunkInfo {
            offset,
            payload_size: self.payload_len(),
            prev: decode_link(self.prev),
            next: decode_link(self.next),
            owner: ArenaId(self.owner),
        }
    }
}

pub(crate) fn encode_link(link: Option<usize>) -> u64 {
    link.map_or(NIL, |offset| offset as u64)
}

pub(crate) fn decode_link(raw: u64) -> Option<usize> {
    (raw != NIL).then_some(raw as usize)
}

/// Read a `T` from `buf[offset..offset + size_of::<T>()]`.
///
/// # Panics
///
/// Panics if the range exceeds `buf`.
pub(crate) fn read<T: Pod>(buf: &[u8], offset: usize) -> T {
    bytemuck::pod_read_unaligned(&buf[offset..offset + std::mem::size_of::<T>()])
}

/// Write `value` into `buf[offset..offset + size_of::<T>()]`.
///
/// # Panics
///
/// Panics if the range exceeds `buf`.
pub(crate) fn write<T: Pod>(buf: &mut [u8], offset: usize, value: &T) {
    buf[offset..offset + std::mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(value));
}
