//! The arena: lifecycle, first-fit placement and release.
//!
//! [`Arena`] owns a single `Box<[u8]>`. The arena header and every chunk
//! header are encoded into that buffer, so the buffer bytes are the only
//! source of truth for the chunk list. Gaps are derived from the list with
//! [`contig_core::Gaps`] on every placement and never cached.

use std::fmt;

use contig_core::{
    ArenaId, ArenaInspect, ChunkAllocator, ChunkInfo, GapInfo, Gaps, ARENA_HEADER_SIZE,
    CHUNK_HEADER_SIZE,
};
use tracing::{debug, trace, warn};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::ChunkHandle;
use crate::header::{self, decode_link, encode_link, ArenaHeader, ChunkHeader};
use crate::stats::ArenaStats;

/// A fixed-size buffer carved into variable-sized chunks.
///
/// Placement is first-fit in ascending address order: the leading gap,
/// then each gap between adjacent chunks, then the trailing gap. The new
/// chunk always starts at the beginning of the chosen gap.
///
/// # Thread Safety
///
/// Not synchronised. Mutation takes `&mut self`; callers sharing an arena
/// across threads must wrap it in their own lock.
///
/// # Example
///
/// ```
/// use contig_arena::{Arena, ARENA_HEADER_SIZE, CHUNK_HEADER_SIZE};
///
/// let mut arena = Arena::new(150).unwrap();
/// let hello = arena.allocate(12).unwrap();
/// assert_eq!(hello.offset(), ARENA_HEADER_SIZE + CHUNK_HEADER_SIZE);
///
/// arena.payload_mut(hello).unwrap().copy_from_slice(b"Hello World\0");
/// arena.release(hello).unwrap();
/// assert!(arena.is_empty());
/// ```
pub struct Arena {
    id: ArenaId,
    /// Backing storage; `[0, ARENA_HEADER_SIZE)` holds the arena header.
    buffer: Box<[u8]>,
}

impl Arena {
    /// Create an arena over a fresh buffer of `total_size` bytes.
    ///
    /// Returns [`ArenaError::TooSmall`] if the buffer cannot hold the arena
    /// header.
    pub fn new(total_size: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(total_size))
    }

    /// Create an arena from an explicit configuration.
    ///
    /// Every byte after the arena header is set to `config.fill_byte`.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let mut buffer = vec![config.fill_byte; config.total_size].into_boxed_slice();
        header::write(
            &mut buffer,
            0,
            &ArenaHeader {
                first: header::NIL,
                bound: config.total_size as u64,
            },
        );

        let id = ArenaId::next();
        debug!(arena = %id, total_size = config.total_size, "arena created");
        Ok(Self { id, buffer })
    }

    /// Destroy the arena, releasing the whole buffer at once.
    ///
    /// Live chunks are permitted; an advisory warning is logged if any
    /// remain. Returns the number of chunks that were still live. Dropping
    /// the arena without calling `destroy` behaves the same way.
    pub fn destroy(self) -> usize {
        self.live_chunks()
    }

    /// Identity of this arena.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Size of the backing buffer in bytes.
    pub fn total_size(&self) -> usize {
        self.bound()
    }

    /// Whether no chunks are live.
    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    /// Number of live chunks. Walks the list.
    pub fn live_chunks(&self) -> usize {
        self.chunks().count()
    }

    /// Allocate a chunk with `payload_size` payload bytes.
    ///
    /// Scans gaps lowest address first and places the chunk at the start
    /// of the first gap that can hold `CHUNK_HEADER_SIZE + payload_size`
    /// bytes. A zero-sized payload is legal and needs a gap of exactly
    /// one header.
    ///
    /// The payload is not initialised: it holds whatever bytes the buffer
    /// already contained (the fill byte, or a released chunk's leftovers).
    ///
    /// Returns [`ArenaError::NoSpace`] without touching the arena if no
    /// gap is large enough.
    pub fn allocate(&mut self, payload_size: usize) -> Result<ChunkHandle, ArenaError> {
        let Some(gap) = self.gaps().find(|gap| gap.fits(payload_size)) else {
            let largest_gap = self.gaps().map(|gap| gap.len).max().unwrap_or(0);
            trace!(arena = %self.id, payload_size, largest_gap, "no space");
            return Err(ArenaError::NoSpace {
                requested: payload_size,
                largest_gap,
            });
        };

        let offset = gap.start;
        self.write_chunk(
            offset,
            &ChunkHeader::new(payload_size, gap.before, gap.after, self.id),
        );
        match gap.before {
            Some(prev) => self.set_next(prev, Some(offset)),
            None => self.set_first(Some(offset)),
        }
        if let Some(next) = gap.after {
            self.set_prev(next, Some(offset));
        }

        trace!(
            arena = %self.id,
            offset,
            payload_size,
            gap = %gap.kind(),
            "chunk placed"
        );
        Ok(ChunkHandle::new(self.id, offset + CHUNK_HEADER_SIZE))
    }

    /// Release a chunk, unlinking its header in O(1).
    ///
    /// The header's former bytes are left as they are; the freed region
    /// becomes part of whatever gap now surrounds the neighbouring chunks.
    ///
    /// Returns an error, and changes nothing, if the handle was issued by
    /// another arena or no longer names a live chunk.
    ///
    /// Handles carry no generation. A stale handle whose offset matches a
    /// chunk allocated later at the same address resolves to that newer
    /// chunk, and releasing it frees the newer chunk.
    pub fn release(&mut self, handle: ChunkHandle) -> Result<(), ArenaError> {
        let (offset, chunk) = self.resolve(handle)?;
        let prev = decode_link(chunk.prev);
        let next = decode_link(chunk.next);

        match prev {
            Some(prev) => self.set_next(prev, next),
            None => self.set_first(next),
        }
        if let Some(next) = next {
            self.set_prev(next, prev);
        }

        trace!(arena = %self.id, offset, payload_size = chunk.payload_size, "chunk released");
        Ok(())
    }

    /// Read-only view of a chunk's payload.
    pub fn payload(&self, handle: ChunkHandle) -> Result<&[u8], ArenaError> {
        let (offset, chunk) = self.resolve(handle)?;
        let start = offset + CHUNK_HEADER_SIZE;
        Ok(&self.buffer[start..start + chunk.payload_len()])
    }

    /// Mutable view of a chunk's payload.
    pub fn payload_mut(&mut self, handle: ChunkHandle) -> Result<&mut [u8], ArenaError> {
        let (offset, chunk) = self.resolve(handle)?;
        let start = offset + CHUNK_HEADER_SIZE;
        Ok(&mut self.buffer[start..start + chunk.payload_len()])
    }

    /// Describe the chunk a handle refers to.
    pub fn chunk(&self, handle: ChunkHandle) -> Result<ChunkInfo, ArenaError> {
        let (offset, chunk) = self.resolve(handle)?;
        Ok(chunk.describe(offset))
    }

    /// Live chunks in ascending address order.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks {
            arena: self,
            cursor: self.first(),
        }
    }

    /// Gaps in ascending address order, zero-length ones included.
    pub fn gaps(&self) -> Gaps<Chunks<'_>> {
        Gaps::new(self.chunks(), self.bound())
    }

    /// Occupancy summary.
    pub fn stats(&self) -> ArenaStats {
        let mut stats = ArenaStats {
            total_size: self.bound(),
            used_bytes: ARENA_HEADER_SIZE,
            ..ArenaStats::default()
        };
        for chunk in self.chunks() {
            stats.live_chunks += 1;
            stats.used_bytes += chunk.footprint();
        }
        for gap in self.gaps() {
            stats.free_bytes += gap.len;
            stats.largest_gap = stats.largest_gap.max(gap.len);
        }
        stats
    }

    /// The whole backing buffer, headers and gaps included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    fn arena_header(&self) -> ArenaHeader {
        header::read(&self.buffer, 0)
    }

    fn bound(&self) -> usize {
        self.arena_header().bound as usize
    }

    fn first(&self) -> Option<usize> {
        decode_link(self.arena_header().first)
    }

    fn set_first(&mut self, first: Option<usize>) {
        let mut arena_header = self.arena_header();
        arena_header.first = encode_link(first);
        header::write(&mut self.buffer, 0, &arena_header);
    }

    fn read_chunk(&self, offset: usize) -> ChunkHeader {
        header::read(&self.buffer, offset)
    }

    fn write_chunk(&mut self, offset: usize, chunk: &ChunkHeader) {
        header::write(&mut self.buffer, offset, chunk);
    }

    fn set_prev(&mut self, offset: usize, prev: Option<usize>) {
        let mut chunk = self.read_chunk(offset);
        chunk.prev = encode_link(prev);
        self.write_chunk(offset, &chunk);
    }

    fn set_next(&mut self, offset: usize, next: Option<usize>) {
        let mut chunk = self.read_chunk(offset);
        chunk.next = encode_link(next);
        self.write_chunk(offset, &chunk);
    }

    /// Whether a whole chunk header fits at `offset` inside the data area.
    fn header_in_bounds(&self, offset: usize) -> bool {
        offset >= ARENA_HEADER_SIZE
            && offset
                .checked_add(CHUNK_HEADER_SIZE)
                .is_some_and(|end| end <= self.bound())
    }

    /// Locate and validate the live chunk named by `handle`.
    ///
    /// All checks are O(1): arena identity, bounds of the header and the
    /// payload, the header's owner field, and that both neighbours (or the
    /// arena header) link back to this chunk.
    fn resolve(&self, handle: ChunkHandle) -> Result<(usize, ChunkHeader), ArenaError> {
        if handle.arena() != self.id {
            return Err(ArenaError::ForeignHandle {
                handle_arena: handle.arena(),
                arena: self.id,
            });
        }

        let payload = handle.offset();
        let offset = handle
            .header_offset()
            .filter(|&offset| self.header_in_bounds(offset))
            .ok_or(ArenaError::InvalidHandle { offset: payload })?;

        let not_live = ArenaError::NotLive { offset: payload };
        let chunk = self.read_chunk(offset);
        if chunk.owner != self.id.0 {
            return Err(not_live);
        }
        let end = payload.checked_add(chunk.payload_len());
        if !end.is_some_and(|end| end <= self.bound()) {
            return Err(ArenaError::InvalidHandle { offset: payload });
        }

        let linked_from_prev = match decode_link(chunk.prev) {
            Some(prev) => {
                self.header_in_bounds(prev)
                    && decode_link(self.read_chunk(prev).next) == Some(offset)
            }
            None => self.first() == Some(offset),
        };
        let linked_from_next = match decode_link(chunk.next) {
            Some(next) => {
                self.header_in_bounds(next)
                    && decode_link(self.read_chunk(next).prev) == Some(offset)
            }
            None => true,
        };
        if !(linked_from_prev && linked_from_next) {
            return Err(not_live);
        }

        Ok((offset, chunk))
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        let live_chunks = self.live_chunks();
        if live_chunks > 0 {
            warn!(
                arena = %self.id,
                live_chunks,
                "destroying non-empty arena"
            );
        } else {
            debug!(arena = %self.id, "arena destroyed");
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("total_size", &self.bound())
            .field("first", &self.first())
            .field("live_chunks", &self.live_chunks())
            .finish()
    }
}

impl ArenaInspect for Arena {
    fn arena_id(&self) -> ArenaId {
        self.id
    }

    fn total_size(&self) -> usize {
        self.bound()
    }

    fn chunk_list(&self) -> Vec<ChunkInfo> {
        self.chunks().collect()
    }

    fn payload_of(&self, chunk: &ChunkInfo) -> Option<&[u8]> {
        self.buffer.get(chunk.payload_offset()..chunk.end())
    }

    fn first_chunk(&self) -> Option<usize> {
        self.first()
    }

    fn gap_list(&self) -> Vec<GapInfo> {
        self.gaps().collect()
    }
}

impl ChunkAllocator for Arena {
    type Handle = ChunkHandle;
    type Error = ArenaError;

    fn allocate(&mut self, payload_size: usize) -> Result<ChunkHandle, ArenaError> {
        Arena::allocate(self, payload_size)
    }

    fn release(&mut self, handle: ChunkHandle) -> Result<(), ArenaError> {
        Arena::release(self, handle)
    }

    fn payload_offset(handle: &ChunkHandle) -> usize {
        handle.offset()
    }
}

/// Iterator over an arena's live chunks, following `next` links.
pub struct Chunks<'a> {
    arena: &'a Arena,
    cursor: Option<usize>,
}

impl Iterator for Chunks<'_> {
    type Item = ChunkInfo;

    fn next(&mut self) -> Option<ChunkInfo> {
        let offset = self.cursor?;
        let chunk = self.arena.read_chunk(offset);
        self.cursor = decode_link(chunk.next);
        Some(chunk.describe(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_core::GapKind;
    use contig_test_utils::check_well_formed;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;

    const PAYLOAD_BASE: usize = ARENA_HEADER_SIZE + CHUNK_HEADER_SIZE;

    #[test]
    fn new_arena_is_empty_and_filled() {
        let arena = Arena::new(150).unwrap();
        assert!(arena.is_empty());
        assert_eq!(arena.total_size(), 150);
        assert!(arena.as_bytes()[ARENA_HEADER_SIZE..]
            .iter()
            .all(|&b| b == b'$'));
        let gaps: Vec<_> = arena.gaps().collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].kind(), GapKind::Leading);
        assert_eq!(gaps[0].len, 150 - ARENA_HEADER_SIZE);
    }

    #[test]
    fn header_only_arena_is_valid_but_full() {
        let mut arena = Arena::new(ARENA_HEADER_SIZE).unwrap();
        assert!(matches!(
            arena.allocate(0),
            Err(ArenaError::NoSpace {
                requested: 0,
                largest_gap: 0
            })
        ));
    }

    #[test]
    fn too_small_arena_rejected() {
        let err = Arena::new(ARENA_HEADER_SIZE - 1).unwrap_err();
        assert!(matches!(err, ArenaError::TooSmall { .. }));
    }

    #[test]
    fn custom_fill_byte() {
        let arena = Arena::with_config(ArenaConfig::new(64).with_fill_byte(0)).unwrap();
        assert!(arena.as_bytes()[ARENA_HEADER_SIZE..]
            .iter()
            .all(|&b| b == 0));
    }

    #[test]
    fn first_allocation_sits_after_arena_header() {
        let mut arena = Arena::new(150).unwrap();
        let h = arena.allocate(12).unwrap();
        assert_eq!(h.offset(), PAYLOAD_BASE);
        assert_eq!(h.arena(), arena.id());
        assert_eq!(arena.payload(h).unwrap().len(), 12);
    }

    #[test]
    fn sequential_allocations_are_adjacent() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(12).unwrap();
        let b = arena.allocate(20).unwrap();
        let c = arena.allocate(0).unwrap();
        assert_eq!(b.offset(), a.offset() + 12 + CHUNK_HEADER_SIZE);
        assert_eq!(c.offset(), b.offset() + 20 + CHUNK_HEADER_SIZE);
        check_well_formed(&arena).unwrap();
    }

    #[test]
    fn exact_fit_fills_arena() {
        let mut arena = Arena::new(ARENA_HEADER_SIZE + CHUNK_HEADER_SIZE + 10).unwrap();
        arena.allocate(10).unwrap();
        assert_eq!(arena.stats().free_bytes, 0);
        assert!(arena.allocate(0).is_err());
    }

    #[test]
    fn no_space_leaves_arena_untouched() {
        let mut arena = Arena::new(100).unwrap();
        arena.allocate(10).unwrap();
        let before = arena.as_bytes().to_vec();
        let err = arena.allocate(1000).unwrap_err();
        assert_eq!(
            err,
            ArenaError::NoSpace {
                requested: 1000,
                largest_gap: 100 - PAYLOAD_BASE - 10,
            }
        );
        assert_eq!(arena.as_bytes(), &before[..]);
    }

    #[test]
    fn overflowing_request_is_no_space() {
        let mut arena = Arena::new(100).unwrap();
        assert!(matches!(
            arena.allocate(usize::MAX),
            Err(ArenaError::NoSpace { .. })
        ));
    }

    #[test]
    fn release_head_updates_first() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let b = arena.allocate(8).unwrap();
        arena.release(a).unwrap();
        let chunks: Vec<_> = arena.chunks().collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].payload_offset(), b.offset());
        assert_eq!(chunks[0].prev, None);
        check_well_formed(&arena).unwrap();
    }

    #[test]
    fn release_middle_relinks_neighbours() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let b = arena.allocate(8).unwrap();
        let c = arena.allocate(8).unwrap();
        arena.release(b).unwrap();
        let ca = arena.chunk(a).unwrap();
        let cc = arena.chunk(c).unwrap();
        assert_eq!(ca.next, Some(cc.offset));
        assert_eq!(cc.prev, Some(ca.offset));
        check_well_formed(&arena).unwrap();
    }

    #[test]
    fn release_tail_clears_next() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let b = arena.allocate(8).unwrap();
        arena.release(b).unwrap();
        assert_eq!(arena.chunk(a).unwrap().next, None);
        assert_eq!(arena.live_chunks(), 1);
    }

    #[test]
    fn released_header_bytes_are_not_touched() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let _b = arena.allocate(8).unwrap();
        let header_range = ARENA_HEADER_SIZE..a.offset();
        let before = arena.as_bytes()[header_range.clone()].to_vec();
        arena.release(a).unwrap();
        assert_eq!(&arena.as_bytes()[header_range], &before[..]);
    }

    #[test]
    fn freed_neighbours_merge_without_bookkeeping() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let b = arena.allocate(8).unwrap();
        let _c = arena.allocate(8).unwrap();
        arena.release(a).unwrap();
        arena.release(b).unwrap();
        // Leading gap now spans both former chunks.
        let leading = arena.gaps().next().unwrap();
        assert_eq!(leading.len, 2 * (CHUNK_HEADER_SIZE + 8));
        let big = arena.allocate(CHUNK_HEADER_SIZE + 16).unwrap();
        assert_eq!(big.offset(), PAYLOAD_BASE);
    }

    #[test]
    fn freed_slot_reused_by_exact_fit() {
        let mut arena = Arena::new(256).unwrap();
        let _a = arena.allocate(8).unwrap();
        let b = arena.allocate(24).unwrap();
        let _c = arena.allocate(8).unwrap();
        arena.release(b).unwrap();
        let again = arena.allocate(24).unwrap();
        assert_eq!(again.offset(), b.offset());
    }

    #[test]
    fn first_fit_prefers_lowest_address_not_best_fit() {
        let mut arena = Arena::new(512).unwrap();
        let a = arena.allocate(40).unwrap();
        let _b = arena.allocate(8).unwrap();
        let c = arena.allocate(4).unwrap();
        let _d = arena.allocate(8).unwrap();
        arena.release(a).unwrap(); // 72-byte gap at the front
        arena.release(c).unwrap(); // 36-byte gap further on
        let e = arena.allocate(4).unwrap();
        assert_eq!(e.offset(), a.offset());
    }

    #[test]
    fn double_release_is_rejected() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let _b = arena.allocate(8).unwrap();
        arena.release(a).unwrap();
        assert_eq!(
            arena.release(a),
            Err(ArenaError::NotLive { offset: a.offset() })
        );
        check_well_formed(&arena).unwrap();
    }

    #[test]
    fn release_of_last_chunk_twice_is_rejected() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        arena.release(a).unwrap();
        assert!(arena.is_empty());
        assert!(matches!(arena.release(a), Err(ArenaError::NotLive { .. })));
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut one = Arena::new(128).unwrap();
        let mut two = Arena::new(128).unwrap();
        let h = one.allocate(4).unwrap();
        assert!(matches!(
            two.release(h),
            Err(ArenaError::ForeignHandle { .. })
        ));
        assert!(two.payload(h).is_err());
        one.release(h).unwrap();
    }

    #[test]
    fn out_of_bounds_handle_is_rejected() {
        let arena = Arena::new(128).unwrap();
        let low = ChunkHandle::new(arena.id(), 4);
        let high = ChunkHandle::new(arena.id(), 4096);
        assert_eq!(
            arena.payload(low),
            Err(ArenaError::InvalidHandle { offset: 4 })
        );
        assert_eq!(
            arena.payload(high),
            Err(ArenaError::InvalidHandle { offset: 4096 })
        );
    }

    #[test]
    fn forged_handle_into_canary_is_not_live() {
        let mut arena = Arena::new(256).unwrap();
        let _a = arena.allocate(8).unwrap();
        let forged = ChunkHandle::new(arena.id(), 200);
        assert_eq!(
            arena.release(forged),
            Err(ArenaError::NotLive { offset: 200 })
        );
    }

    #[test]
    fn payload_running_past_bound_is_invalid() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(8).unwrap();
        let offset = a.offset() - CHUNK_HEADER_SIZE;
        let mut chunk = arena.read_chunk(offset);
        chunk.payload_size = 1000;
        arena.write_chunk(offset, &chunk);
        assert_eq!(
            arena.payload(a),
            Err(ArenaError::InvalidHandle { offset: a.offset() })
        );
    }

    #[test]
    fn stale_handle_names_chunk_reusing_its_address() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(4).unwrap();
        let _b = arena.allocate(4).unwrap();
        arena.release(a).unwrap();
        let c = arena.allocate(4).unwrap();
        assert_eq!(c, a);
        arena.release(a).unwrap();
        assert_eq!(arena.release(c), Err(ArenaError::NotLive { offset: c.offset() }));
        assert_eq!(arena.live_chunks(), 1);
    }

    #[test]
    fn empty_chunk_fills_header_sized_interior_gap() {
        let mut arena = Arena::new(256).unwrap();
        let _a = arena.allocate(8).unwrap();
        let b = arena.allocate(0).unwrap();
        let _c = arena.allocate(8).unwrap();
        arena.release(b).unwrap();
        let gap = arena.gaps().nth(1).unwrap();
        assert_eq!(gap.kind(), GapKind::Interior);
        assert_eq!(gap.len, CHUNK_HEADER_SIZE);

        let again = arena.allocate(0).unwrap();
        assert_eq!(again.offset(), b.offset());
        check_well_formed(&arena).unwrap();
    }

    #[test]
    fn gap_one_short_of_a_header_rejects_empty_chunk() {
        // a: 16..56, b: 56..128, c: 128..168, trailing gap 12 bytes.
        let mut arena = Arena::new(180).unwrap();
        let _a = arena.allocate(8).unwrap();
        let b = arena.allocate(40).unwrap();
        let _c = arena.allocate(8).unwrap();
        arena.release(b).unwrap();
        // Refill the 72-byte hole, leaving 31 bytes in front of c.
        let d = arena.allocate(9).unwrap();
        assert_eq!(d.offset(), b.offset());
        assert_eq!(arena.gaps().nth(2).unwrap().len, CHUNK_HEADER_SIZE - 1);

        let before = arena.as_bytes().to_vec();
        assert_eq!(
            arena.allocate(0),
            Err(ArenaError::NoSpace {
                requested: 0,
                largest_gap: CHUNK_HEADER_SIZE - 1,
            })
        );
        assert_eq!(arena.as_bytes(), &before[..]);
    }

    #[test]
    fn payload_writes_do_not_leak_into_neighbours() {
        let mut arena = Arena::new(256).unwrap();
        let a = arena.allocate(4).unwrap();
        let b = arena.allocate(4).unwrap();
        arena.payload_mut(a).unwrap().fill(0xAA);
        arena.payload_mut(b).unwrap().fill(0xBB);
        assert_eq!(arena.payload(a).unwrap(), &[0xAA; 4]);
        assert_eq!(arena.payload(b).unwrap(), &[0xBB; 4]);
        arena.release(a).unwrap();
        assert_eq!(arena.payload(b).unwrap(), &[0xBB; 4]);
    }

    #[test]
    fn stats_account_for_every_byte() {
        let mut arena = Arena::new(300).unwrap();
        let a = arena.allocate(10).unwrap();
        let _b = arena.allocate(20).unwrap();
        arena.release(a).unwrap();
        let stats = arena.stats();
        assert_eq!(stats.live_chunks, 1);
        assert_eq!(stats.used_bytes, ARENA_HEADER_SIZE + CHUNK_HEADER_SIZE + 20);
        assert_eq!(stats.used_bytes + stats.free_bytes, 300);
        assert_eq!(stats.largest_gap, 300 - (ARENA_HEADER_SIZE + 2 * CHUNK_HEADER_SIZE + 30));
    }

    #[test]
    fn destroy_reports_live_chunks() {
        let mut arena = Arena::new(128).unwrap();
        let _ = arena.allocate(4).unwrap();
        let _ = arena.allocate(4).unwrap();
        assert_eq!(arena.destroy(), 2);

        let empty = Arena::new(128).unwrap();
        assert_eq!(empty.destroy(), 0);
    }

    /// Counts WARN events and remembers the last `live_chunks` field.
    #[derive(Clone, Default)]
    struct WarnCapture {
        warnings: Arc<AtomicUsize>,
        live_chunks: Arc<AtomicU64>,
    }

    impl tracing::field::Visit for &WarnCapture {
        fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
            if field.name() == "live_chunks" {
                self.live_chunks.store(value, Ordering::SeqCst);
            }
        }

        fn record_debug(&mut self, _: &tracing::field::Field, _: &dyn fmt::Debug) {}
    }

    impl tracing::Subscriber for WarnCapture {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.warnings.fetch_add(1, Ordering::SeqCst);
                event.record(&mut &*self);
            }
        }

        fn enter(&self, _: &tracing::span::Id) {}

        fn exit(&self, _: &tracing::span::Id) {}
    }

    #[test]
    fn dropping_non_empty_arena_warns_once() {
        let capture = WarnCapture::default();
        tracing::subscriber::with_default(capture.clone(), || {
            let mut arena = Arena::new(128).unwrap();
            let _ = arena.allocate(4).unwrap();
            let _ = arena.allocate(4).unwrap();
            drop(arena);
        });
        assert_eq!(capture.warnings.load(Ordering::SeqCst), 1);
        assert_eq!(capture.live_chunks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn destroying_empty_arena_is_silent() {
        let capture = WarnCapture::default();
        tracing::subscriber::with_default(capture.clone(), || {
            let mut arena = Arena::new(128).unwrap();
            let a = arena.allocate(4).unwrap();
            arena.release(a).unwrap();
            assert_eq!(arena.destroy(), 0);
        });
        assert_eq!(capture.warnings.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn inspect_matches_inherent_views() {
        let mut arena = Arena::new(200).unwrap();
        let a = arena.allocate(3).unwrap();
        arena.payload_mut(a).unwrap().copy_from_slice(b"abc");
        let chunks = arena.chunk_list();
        assert_eq!(chunks.len(), 1);
        assert_eq!(arena.payload_of(&chunks[0]), Some(&b"abc"[..]));
        assert_eq!(arena.first_chunk(), Some(ARENA_HEADER_SIZE));
        assert_eq!(arena.gap_list(), arena.gaps().collect::<Vec<_>>());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use contig_test_utils::{replay, Op};
        use proptest::prelude::*;

        fn ops() -> impl Strategy<Value = Vec<Op>> {
            proptest::collection::vec(
                prop_oneof![
                    (0usize..48).prop_map(Op::Alloc),
                    (0usize..16).prop_map(Op::Free),
                ],
                1..64,
            )
        }

        proptest! {
            #[test]
            fn list_stays_well_formed(ops in ops()) {
                let mut arena = Arena::new(512).unwrap();
                let mut live = Vec::new();
                for op in ops {
                    match op {
                        Op::Alloc(size) => {
                            if let Ok(h) = arena.allocate(size) {
                                live.push(h);
                            }
                        }
                        Op::Free(i) if !live.is_empty() => {
                            let h = live.remove(i % live.len());
                            prop_assert!(arena.release(h).is_ok());
                        }
                        Op::Free(_) => {}
                    }
                    prop_assert!(check_well_formed(&arena).is_ok());
                    prop_assert_eq!(arena.live_chunks(), live.len());
                }
            }

            #[test]
            fn placement_is_deterministic(ops in ops()) {
                let first = replay(&mut Arena::new(400).unwrap(), &ops);
                let second = replay(&mut Arena::new(400).unwrap(), &ops);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn allocation_lands_in_first_sufficient_gap(
                ops in ops(),
                size in 0usize..64,
            ) {
                let mut arena = Arena::new(512).unwrap();
                replay(&mut arena, &ops);
                let expected = arena
                    .gaps()
                    .find(|g| g.len >= CHUNK_HEADER_SIZE + size)
                    .map(|g| g.start + CHUNK_HEADER_SIZE);
                let got = arena.allocate(size).ok().map(|h| h.offset());
                prop_assert_eq!(got, expected);
            }

            #[test]
            fn used_plus_free_is_total(ops in ops()) {
                let mut arena = Arena::new(512).unwrap();
                replay(&mut arena, &ops);
                let stats = arena.stats();
                prop_assert_eq!(stats.used_bytes + stats.free_bytes, stats.total_size);
            }
        }
    }
}
