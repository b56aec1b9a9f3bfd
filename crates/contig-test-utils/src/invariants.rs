//! Structural invariant checks for any [`ArenaInspect`] implementation.

use std::fmt;

use contig_core::{ArenaId, ArenaInspect, ARENA_HEADER_SIZE};

/// The first broken invariant found by [`check_well_formed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutViolation {
    /// The head chunk starts inside the arena header.
    HeadOverlapsArenaHeader { offset: usize },
    /// A chunk starts before its predecessor ends.
    Overlap { prev_end: usize, offset: usize },
    /// A chunk ends past the buffer bound.
    PastBound { end: usize, bound: usize },
    /// A chunk's `prev` does not name its predecessor.
    BrokenPrev {
        offset: usize,
        expected: Option<usize>,
        found: Option<usize>,
    },
    /// A chunk's `next` does not name its successor.
    BrokenNext {
        offset: usize,
        expected: Option<usize>,
        found: Option<usize>,
    },
    /// A chunk claims a different owning arena.
    WrongOwner { offset: usize, owner: ArenaId },
    /// The arena's head pointer disagrees with the chunk list.
    WrongFirst {
        expected: Option<usize>,
        found: Option<usize>,
    },
    /// The payload bytes are unavailable or of the wrong length.
    PayloadMismatch { offset: usize },
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeadOverlapsArenaHeader { offset } => {
                write!(f, "head chunk at {offset} overlaps the arena header")
            }
            Self::Overlap { prev_end, offset } => {
                write!(f, "chunk at {offset} starts before predecessor end {prev_end}")
            }
            Self::PastBound { end, bound } => {
                write!(f, "chunk ends at {end}, past buffer bound {bound}")
            }
            Self::BrokenPrev {
                offset,
                expected,
                found,
            } => write!(
                f,
                "chunk at {offset}: prev is {found:?}, expected {expected:?}"
            ),
            Self::BrokenNext {
                offset,
                expected,
                found,
            } => write!(
                f,
                "chunk at {offset}: next is {found:?}, expected {expected:?}"
            ),
            Self::WrongOwner { offset, owner } => {
                write!(f, "chunk at {offset} owned by foreign arena {owner}")
            }
            Self::WrongFirst { expected, found } => {
                write!(f, "arena first is {found:?}, expected {expected:?}")
            }
            Self::PayloadMismatch { offset } => {
                write!(f, "payload of chunk at {offset} is missing or mis-sized")
            }
        }
    }
}

impl std::error::Error for LayoutViolation {}

/// Verify ordering, linkage, ownership and bounds of every live chunk.
pub fn check_well_formed<A>(arena: &A) -> Result<(), LayoutViolation>
where
    A: ArenaInspect + ?Sized,
{
    let chunks = arena.chunk_list();
    let bound = arena.total_size();
    let id = arena.arena_id();

    let head = chunks.first().map(|c| c.offset);
    if arena.first_chunk() != head {
        return Err(LayoutViolation::WrongFirst {
            expected: head,
            found: arena.first_chunk(),
        });
    }

    let mut prev_end = ARENA_HEADER_SIZE;
    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.owner != id {
            return Err(LayoutViolation::WrongOwner {
                offset: chunk.offset,
                owner: chunk.owner,
            });
        }
        if chunk.offset < prev_end {
            return Err(if i == 0 {
                LayoutViolation::HeadOverlapsArenaHeader {
                    offset: chunk.offset,
                }
            } else {
                LayoutViolation::Overlap {
                    prev_end,
                    offset: chunk.offset,
                }
            });
        }

        let expected_prev = i.checked_sub(1).map(|p| chunks[p].offset);
        if chunk.prev != expected_prev {
            return Err(LayoutViolation::BrokenPrev {
                offset: chunk.offset,
                expected: expected_prev,
                found: chunk.prev,
            });
        }
        let expected_next = chunks.get(i + 1).map(|n| n.offset);
        if chunk.next != expected_next {
            return Err(LayoutViolation::BrokenNext {
                offset: chunk.offset,
                expected: expected_next,
                found: chunk.next,
            });
        }

        if chunk.end() > bound {
            return Err(LayoutViolation::PastBound {
                end: chunk.end(),
                bound,
            });
        }
        if arena.payload_of(chunk).map(<[u8]>::len) != Some(chunk.payload_size) {
            return Err(LayoutViolation::PayloadMismatch {
                offset: chunk.offset,
            });
        }
        prev_end = chunk.end();
    }
    Ok(())
}
