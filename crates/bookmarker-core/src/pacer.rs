//! Pause between fetches, optionally scaled by a random factor.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Something that waits between fetches.
pub trait Pause {
    fn pause(&mut self);
}

/// Sleeps `base × r` between fetches, where `r` is uniform in [0, 1) when
/// randomized and 1 otherwise. A zero base disables pausing.
#[derive(Debug)]
pub struct Pacer {
    base: Duration,
    randomize: bool,
    rng: StdRng,
}

impl Pacer {
    pub fn new(sleep_ms: u64, randomize: bool) -> Self {
        Self::with_rng(sleep_ms, randomize, StdRng::from_os_rng())
    }

    /// Deterministic pacer for tests.
    pub fn seeded(sleep_ms: u64, randomize: bool, seed: u64) -> Self {
        Self::with_rng(sleep_ms, randomize, StdRng::seed_from_u64(seed))
    }

    fn with_rng(sleep_ms: u64, randomize: bool, rng: StdRng) -> Self {
        Self {
            base: Duration::from_millis(sleep_ms),
            randomize,
            rng,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.base.is_zero()
    }

    /// The next pause length (consumes randomness when randomized).
    pub fn next_delay(&mut self) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }
        if self.randomize {
            self.base.mul_f64(self.rng.random::<f64>())
        } else {
            self.base
        }
    }

}

impl Pause for Pacer {
    /// Sleeps for the next pause length.
    fn pause(&mut self) {
        let d = self.next_delay();
        if !d.is_zero() {
            tracing::debug!("sleeping {:?}", d);
            std::thread::sleep(d);
        }
    }
}
