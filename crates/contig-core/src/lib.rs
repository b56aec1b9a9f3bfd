//! Core types and traits for the contig sub-allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the allocator and its diagnostic collaborators:
//! arena identifiers, header geometry, chunk and gap descriptors, and the
//! read-only [`ArenaInspect`] trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod geometry;
pub mod id;
pub mod layout;
pub mod traits;

pub use geometry::{gap_size, Gaps};
pub use id::ArenaId;
pub use layout::{ChunkInfo, GapInfo, GapKind, ARENA_HEADER_SIZE, CHUNK_HEADER_SIZE};
pub use traits::{ArenaInspect, ChunkAllocator};
