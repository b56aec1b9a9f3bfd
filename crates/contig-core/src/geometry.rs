//! Gap computation as a pure function of chunk geometry.
//!
//! [`Gaps`] walks an address-ordered sequence of [`ChunkInfo`]s and yields
//! every gap in ascending address order: the leading gap, one interior gap
//! per adjacent pair, and the trailing gap. Zero-length gaps are yielded
//! too; callers filter by size.

use crate::layout::{ChunkInfo, GapInfo, ARENA_HEADER_SIZE};

/// Number of free bytes between `start` and `end`.
///
/// Returns zero when `end` precedes `start`, which a well-formed chunk list
/// never produces.
pub fn gap_size(start: usize, end: usize) -> usize {
    end.saturating_sub(start)
}

/// Iterator over the gaps of an arena, lowest address first.
pub struct Gaps<I> {
    chunks: I,
    /// Start of the next gap to yield.
    cursor: usize,
    /// Header offset of the chunk that ends at `cursor`.
    before: Option<usize>,
    bound: usize,
    done: bool,
}

impl<I> Gaps<I>
where
    I: Iterator<Item = ChunkInfo>,
{
    /// Walk the gaps around `chunks` inside an arena whose buffer ends at
    /// `bound`. `chunks` must be in ascending address order.
    pub fn new(chunks: I, bound: usize) -> Self {
        Self {
            chunks,
            cursor: ARENA_HEADER_SIZE,
            before: None,
            bound,
            done: false,
        }
    }
}

impl<I> Iterator for Gaps<I>
where
    I: Iterator<Item = ChunkInfo>,
{
    type Item = GapInfo;

    fn next(&mut self) -> Option<GapInfo> {
        if self.done {
            return None;
        }
        match self.chunks.next() {
            Some(chunk) => {
                let gap = GapInfo {
                    start: self.cursor,
                    len: gap_size(self.cursor, chunk.offset),
                    before: self.before,
                    after: Some(chunk.offset),
                };
                self.cursor = chunk.end();
                self.before = Some(chunk.offset);
                Some(gap)
            }
            None => {
                self.done = true;
                Some(GapInfo {
                    start: self.cursor,
                    len: gap_size(self.cursor, self.bound),
                    before: self.before,
                    after: None,
                })
            }
        }
    }
}
