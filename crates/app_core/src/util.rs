//! Small shared utilities

use std::time::{Duration, Instant};

/// Leading-edge rate limiter: the first call passes, further calls are
/// swallowed until the interval has elapsed.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true if the caller may proceed now
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Small deterministic PRNG, enough for visual jitter.
/// Simple LCG implementation without external dependencies.
#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        self.state
    }

    /// Uniform value in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits give a clean mantissa
        (self.next() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform value in [lo, hi)
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_leading_edge() {
        let mut throttle = Throttle::new(Duration::from_secs(60));
        assert!(throttle.ready());
        assert!(!throttle.ready());
        assert!(!throttle.ready());

        throttle.reset();
        assert!(throttle.ready());
    }

    #[test]
    fn test_throttle_elapsed_interval() {
        let mut throttle = Throttle::new(Duration::from_millis(0));
        assert!(throttle.ready());
        assert!(throttle.ready());
    }

    #[test]
    fn test_prng_deterministic() {
        let mut a = Prng::new(42);
        let mut b = Prng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_prng_range_bounds() {
        let mut prng = Prng::new(7);
        for _ in 0..256 {
            let v = prng.range(0.0, 200.0);
            assert!((0.0..200.0).contains(&v));
        }
    }

    #[test]
    fn test_prng_seeds_differ() {
        let mut a = Prng::new(1);
        let mut b = Prng::new(2);
        let same = (0..8).all(|_| a.next_f32() == b.next_f32());
        assert!(!same);
    }
}
