//! Injectable randomness for the simulated result count

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the bounded jitter added to the simulated result count
pub trait JitterSource: Send {
    /// A value in `[0, upper_exclusive)`, or 0 when the bound is 0
    fn sample(&mut self, upper_exclusive: u32) -> u32;
}

/// Uniform jitter from a seeded or OS-seeded RNG
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    /// Deterministic jitter for reproducible runs
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl JitterSource for RandomJitter {
    fn sample(&mut self, upper_exclusive: u32) -> u32 {
        if upper_exclusive == 0 {
            0
        } else {
            self.rng.random_range(0..upper_exclusive)
        }
    }
}

/// Always returns the same value, capped below the bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedJitter(pub u32);

impl JitterSource for FixedJitter {
    fn sample(&mut self, upper_exclusive: u32) -> u32 {
        self.0.min(upper_exclusive.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_jitter_stays_in_bounds() {
        let mut jitter = RandomJitter::seeded(7);
        for _ in 0..1000 {
            assert!(jitter.sample(5) < 5);
        }
        assert_eq!(jitter.sample(0), 0);
    }

    #[test]
    fn fixed_jitter_is_capped() {
        assert_eq!(FixedJitter(3).sample(5), 3);
        assert_eq!(FixedJitter(9).sample(5), 4);
        assert_eq!(FixedJitter(9).sample(0), 0);
    }
}
