//! Arena configuration parameters.

use contig_core::ARENA_HEADER_SIZE;

use crate::error::ArenaError;

/// Configuration for a single arena.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing buffer in bytes, arena header included.
    ///
    /// Must be at least [`ARENA_HEADER_SIZE`] and at most
    /// [`ArenaConfig::MAX_TOTAL_SIZE`].
    pub total_size: usize,

    /// Byte written into every unused byte of the buffer at creation.
    ///
    /// Default: `b'$'`. Diagnostic only; the allocator never reads it back.
    pub fill_byte: u8,
}

impl ArenaConfig {
    /// Default canary byte.
    pub const DEFAULT_FILL_BYTE: u8 = b'$';

    /// Largest supported buffer. Offsets must fit the `u32` carried by a
    /// [`ChunkHandle`](crate::ChunkHandle).
    pub const MAX_TOTAL_SIZE: usize = u32::MAX as usize;

    /// Create a config for a buffer of `total_size` bytes.
    ///
    /// Uses default values for all other parameters.
    pub fn new(total_size: usize) -> Self {
        Self {
            total_size,
            fill_byte: Self::DEFAULT_FILL_BYTE,
        }
    }

    /// Override the canary byte.
    pub fn with_fill_byte(mut self, fill_byte: u8) -> Self {
        self.fill_byte = fill_byte;
        self
    }

    /// Check the config against the arena's hard limits.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.total_size < ARENA_HEADER_SIZE {
            return Err(ArenaError::TooSmall {
                requested: self.total_size,
                minimum: ARENA_HEADER_SIZE,
            });
        }
        if self.total_size > Self::MAX_TOTAL_SIZE {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "total_size must be <= {} (got {})",
                    Self::MAX_TOTAL_SIZE,
                    self.total_size,
                ),
            });
        }
        Ok(())
    }

    /// Bytes available to chunks (headers and payloads).
    pub fn data_bytes(&self) -> usize {
        self.total_size.saturating_sub(ARENA_HEADER_SIZE)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(4096)
    }
}
