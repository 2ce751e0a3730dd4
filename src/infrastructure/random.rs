//! Uniform index selection.
//!
//! The jar needs randomness in two places: drawing a stored note for the
//! "random" action and picking a fallback affirmation. Both go through
//! [`RandomSource`] so tests can pin the choice.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Picks an index in `0..len`.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `0..len`. `len` is never zero.
    fn index(&self, len: usize) -> usize;
}

/// Randomness seeded from the process hasher keys and the clock.
///
/// Each call mixes in a counter so consecutive draws within the same clock
/// tick still differ.
#[derive(Debug, Default)]
pub struct SystemRandom {
    counter: AtomicU64,
}

impl SystemRandom {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    fn next_u64(&self) -> u64 {
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(self.counter.fetch_add(1, Ordering::Relaxed));
        hasher.write_u128(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
        );
        hasher.finish()
    }
}

impl RandomSource for SystemRandom {
    fn index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        // usize fits in u64 on every supported target
        (self.next_u64() % len as u64) as usize
    }
}
