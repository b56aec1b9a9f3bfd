//! Read-only inspection of arena state.

use crate::geometry::Gaps;
use crate::id::ArenaId;
use crate::layout::{ChunkInfo, GapInfo};

/// Read-only access to an arena's chunk list and payload bytes.
///
/// This trait decouples diagnostic tooling (dumps, invariant checkers)
/// from the allocator implementation. Nothing reachable through it can
/// mutate the arena.
pub trait ArenaInspect {
    /// Identity of the inspected arena.
    fn arena_id(&self) -> ArenaId;

    /// Size of the backing buffer in bytes (the buffer bound).
    fn total_size(&self) -> usize;

    /// All live chunks in ascending address order.
    fn chunk_list(&self) -> Vec<ChunkInfo>;

    /// Payload bytes of a chunk previously returned by [`chunk_list`].
    ///
    /// Returns `None` if the chunk's payload does not lie inside the buffer.
    ///
    /// [`chunk_list`]: ArenaInspect::chunk_list
    fn payload_of(&self, chunk: &ChunkInfo) -> Option<&[u8]>;

    /// Offset of the head chunk header, if any.
    fn first_chunk(&self) -> Option<usize> {
        self.chunk_list().first().map(|c| c.offset)
    }

    /// All gaps in ascending address order, derived from [`chunk_list`].
    ///
    /// [`chunk_list`]: ArenaInspect::chunk_list
    fn gap_list(&self) -> Vec<GapInfo> {
        Gaps::new(self.chunk_list().into_iter(), self.total_size()).collect()
    }
}

/// Allocation surface shared by arena implementations.
///
/// Lets drivers and test harnesses replay the same allocate/release
/// sequence against any allocator.
pub trait ChunkAllocator {
    /// Opaque reference to an allocated payload.
    type Handle: Copy;
    /// Failure reported by `allocate` or `release`.
    type Error;

    /// Allocate a chunk with `payload_size` payload bytes.
    fn allocate(&mut self, payload_size: usize) -> Result<Self::Handle, Self::Error>;

    /// Release a chunk previously returned by [`allocate`].
    ///
    /// [`allocate`]: ChunkAllocator::allocate
    fn release(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;

    /// Byte offset of the handle's payload from the arena base.
    fn payload_offset(handle: &Self::Handle) -> usize;
}
