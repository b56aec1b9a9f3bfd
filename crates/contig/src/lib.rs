//! Contig: a first-fit sub-allocator over a single contiguous buffer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the contig sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! let mut arena = Arena::new(150).unwrap();
//! let greeting = arena.allocate(12).unwrap();
//! arena.payload_mut(greeting).unwrap().copy_from_slice(b"Hello World\0");
//!
//! let scratch = arena.allocate(20).unwrap();
//! arena.release(greeting).unwrap();
//!
//! // The freed leading gap is reused by the next request that fits.
//! let small = arena.allocate(4).unwrap();
//! assert_eq!(small.offset(), greeting.offset());
//!
//! print!("{}", contig::dump::render(&arena));
//! # arena.release(small).unwrap();
//! # arena.release(scratch).unwrap();
//! assert_eq!(arena.destroy(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `contig-arena` | `Arena`, handles, config, stats |
//! | [`types`] | `contig-core` | IDs, layout records, gap geometry, traits |
//! | [`dump`] | `contig-dump` | Human-readable layout dumps |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The allocator itself (`contig-arena`).
pub use contig_arena as arena;

/// Layout records, gap geometry and inspection traits (`contig-core`).
pub use contig_core as types;

/// Diagnostic dumps (`contig-dump`).
///
/// [`dump::render`] works on anything implementing
/// [`types::ArenaInspect`].
pub use contig_dump as dump;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    pub use contig_arena::{Arena, ArenaConfig, ArenaError, ArenaStats, ChunkHandle};
    pub use contig_core::{ArenaInspect, ChunkAllocator, ChunkInfo, GapInfo, GapKind};
    pub use contig_dump::Dump;
}
