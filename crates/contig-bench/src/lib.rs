//! Workload profiles for benchmarking and examples.
//!
//! - [`churn_profile`]: seeded mix of allocations and releases
//! - [`fill_profile`]: allocate-only ramp until the arena is full

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_test_utils::Op;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Build a deterministic allocate/release mix.
///
/// Roughly three allocations per release, payload sizes uniform in
/// `0..max_payload`. The same seed always yields the same sequence.
pub fn churn_profile(seed: u64, len: usize, max_payload: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.random_bool(0.75) {
                Op::Alloc(rng.random_range(0..max_payload.max(1)))
            } else {
                Op::Free(rng.random_range(0..usize::from(u16::MAX)))
            }
        })
        .collect()
}

/// `count` allocations of `payload` bytes each, no releases.
pub fn fill_profile(count: usize, payload: usize) -> Vec<Op> {
    vec![Op::Alloc(payload); count]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_profile_is_deterministic() {
        assert_eq!(churn_profile(42, 200, 64), churn_profile(42, 200, 64));
        assert_ne!(churn_profile(42, 200, 64), churn_profile(43, 200, 64));
    }

    #[test]
    fn churn_profile_respects_bounds() {
        let ops = churn_profile(7, 500, 32);
        assert_eq!(ops.len(), 500);
        assert!(ops.iter().any(|op| matches!(op, Op::Free(_))));
        assert!(ops
            .iter()
            .all(|op| !matches!(op, Op::Alloc(size) if *size >= 32)));
    }

    #[test]
    fn fill_profile_only_allocates() {
        let ops = fill_profile(3, 8);
        assert_eq!(ops, vec![Op::Alloc(8); 3]);
    }
}
