//! First-fit sub-allocator over a single fixed-size buffer.
//!
//! An [`Arena`] owns one contiguous byte buffer. Callers carve
//! variable-sized chunks out of it with [`Arena::allocate`] and hand them
//! back with [`Arena::release`]; the system allocator is touched once, at
//! creation.
//!
//! # Layout
//!
//! ```text
//! offset 0                                                  bound
//! ├─ arena header ─┤ gap ├─ chunk hdr ─┤ payload ┤ gap ├─ ... ─┤
//!    first, bound          size/prev/next/owner
//! ```
//!
//! Chunk headers live inside the buffer and form a doubly linked list in
//! ascending address order, rooted at the arena header. Free space is
//! never tracked: every gap is recomputed from neighbouring headers, so
//! releasing a chunk needs no merge step.
//!
//! # Safety
//!
//! No `unsafe`. Headers are `bytemuck::Pod` records copied in and out of
//! the byte buffer, and callers reach payloads only through validated
//! [`ChunkHandle`]s.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
mod header;
pub mod stats;

// Public re-exports for the primary API surface.
pub use arena::{Arena, Chunks};
pub use config::ArenaConfig;
pub use contig_core::{
    ArenaId, ArenaInspect, ChunkAllocator, ChunkInfo, GapInfo, GapKind, ARENA_HEADER_SIZE,
    CHUNK_HEADER_SIZE,
};
pub use error::ArenaError;
pub use handle::ChunkHandle;
pub use stats::ArenaStats;
