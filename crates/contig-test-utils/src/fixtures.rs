//! Reusable allocate/release scenarios.
//!
//! - [`Op`] / [`replay`]: drive any [`ChunkAllocator`] through a fixed
//!   operation sequence and record where each chunk landed.
//! - [`PUBLIC_SCENARIO_SIZE`]: the reference walk-through of
//!   a 150-byte arena.

use contig_core::ChunkAllocator;

/// Buffer size of the reference scenario.
pub const PUBLIC_SCENARIO_SIZE: usize = 150;

/// The reference greeting, NUL-terminated to fill a 12-byte payload.
pub const HELLO: &[u8; 12] = b"Hello World\0";

/// One step of an allocation scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Allocate a chunk with this many payload bytes.
    Alloc(usize),
    /// Release the live chunk at this index (modulo the live count) in
    /// allocation order. Ignored when nothing is live.
    Free(usize),
}

/// Run `ops` against `alloc`, returning one entry per op: the payload
/// offset of a successful `Alloc`, `None` for failed allocations and
/// for every `Free`.
///
/// # Panics
///
/// Panics if the allocator rejects the release of a handle it issued.
pub fn replay<A>(alloc: &mut A, ops: &[Op]) -> Vec<Option<usize>>
where
    A: ChunkAllocator,
{
    let mut live: Vec<A::Handle> = Vec::new();
    let mut placements = Vec::with_capacity(ops.len());
    for op in ops {
        match *op {
            Op::Alloc(size) => {
                let placed = alloc.allocate(size).ok();
                if let Some(handle) = placed {
                    live.push(handle);
                }
                placements.push(placed.as_ref().map(A::payload_offset));
            }
            Op::Free(index) => {
                if !live.is_empty() {
                    let handle = live.remove(index % live.len());
                    assert!(
                        alloc.release(handle).is_ok(),
                        "allocator rejected a handle it issued"
                    );
                }
                placements.push(None);
            }
        }
    }
    placements
}
