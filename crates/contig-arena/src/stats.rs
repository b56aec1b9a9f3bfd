//! Occupancy summary of an arena.

use std::fmt;

/// Point-in-time occupancy of an [`Arena`](crate::Arena).
///
/// `used_bytes + free_bytes == total_size` always holds: every byte is
/// either arena header, chunk header, payload, or gap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Size of the backing buffer.
    pub total_size: usize,
    /// Number of live chunks.
    pub live_chunks: usize,
    /// Arena header plus every live chunk's header and payload.
    pub used_bytes: usize,
    /// Sum of all gap sizes.
    pub free_bytes: usize,
    /// Size of the largest single gap.
    pub largest_gap: usize,
}

impl ArenaStats {
    /// Largest payload a single `allocate` call could currently satisfy.
    pub fn largest_payload(&self) -> Option<usize> {
        self.largest_gap.checked_sub(contig_core::CHUNK_HEADER_SIZE)
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chunks, {}/{} bytes used, {} free (largest gap {})",
            self.live_chunks, self.used_bytes, self.total_size, self.free_bytes, self.largest_gap
        )
    }
}
