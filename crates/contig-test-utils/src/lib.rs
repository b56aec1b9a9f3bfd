//! Test utilities and mock types for contig development.
//!
//! Provides [`MockLayout`], a hand-built implementation of [`ArenaInspect`]
//! for exercising diagnostics without an allocator, the
//! [`check_well_formed`] invariant checker, and the [`Op`]/[`replay`]
//! scenario driver.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod invariants;

pub use fixtures::{replay, Op, HELLO, PUBLIC_SCENARIO_SIZE};
pub use invariants::{check_well_formed, LayoutViolation};

use contig_core::{ArenaId, ArenaInspect, ChunkInfo};
use indexmap::IndexMap;

/// Hand-assembled arena layout implementing [`ArenaInspect`].
///
/// Chunks are keyed by header offset and kept sorted. Chunks added with
/// [`with_chunk`](MockLayout::with_chunk) get their `prev`/`next` links
/// derived from address order; [`with_raw_chunk`](MockLayout::with_raw_chunk)
/// stores a descriptor verbatim so checkers can be fed broken layouts.
pub struct MockLayout {
    id: ArenaId,
    total_size: usize,
    chunks: IndexMap<usize, (ChunkInfo, Vec<u8>)>,
}

impl MockLayout {
    pub fn new(total_size: usize) -> Self {
        Self {
            id: ArenaId(0),
            total_size,
            chunks: IndexMap::new(),
        }
    }

    /// Add a well-linked chunk whose payload is `payload`.
    pub fn with_chunk(mut self, offset: usize, payload: &[u8]) -> Self {
        let info = ChunkInfo {
            offset,
            payload_size: payload.len(),
            prev: None,
            next: None,
            owner: self.id,
        };
        self.chunks.insert(offset, (info, payload.to_vec()));
        self.chunks.sort_keys();
        self.relink();
        self
    }

    /// Add a chunk descriptor exactly as given. Add raw chunks last: a
    /// later [`with_chunk`](MockLayout::with_chunk) relinks everything.
    pub fn with_raw_chunk(mut self, info: ChunkInfo, payload: &[u8]) -> Self {
        self.chunks.insert(info.offset, (info, payload.to_vec()));
        self.chunks.sort_keys();
        self
    }

    fn relink(&mut self) {
        let offsets: Vec<usize> = self.chunks.keys().copied().collect();
        for (i, (info, _)) in self.chunks.values_mut().enumerate() {
            info.prev = i.checked_sub(1).map(|p| offsets[p]);
            info.next = offsets.get(i + 1).copied();
        }
    }
}

impl ArenaInspect for MockLayout {
    fn arena_id(&self) -> ArenaId {
        self.id
    }

    fn total_size(&self) -> usize {
        self.total_size
    }

    fn chunk_list(&self) -> Vec<ChunkInfo> {
        self.chunks.values().map(|(info, _)| *info).collect()
    }

    fn payload_of(&self, chunk: &ChunkInfo) -> Option<&[u8]> {
        self.chunks
            .get(&chunk.offset)
            .map(|(_, payload)| payload.as_slice())
    }
}
