//! Clock and random implementations.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn uniform(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }

    fn gen_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Seeded random for deterministic generation tests.
#[cfg(test)]
pub struct SeededRandom(pub std::sync::Mutex<rand::rngs::StdRng>);

#[cfg(test)]
impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(std::sync::Mutex::new(rand::rngs::StdRng::seed_from_u64(
            seed,
        )))
    }
}

#[cfg(test)]
impl RandomPort for SeededRandom {
    fn uniform(&self) -> f64 {
        self.0.lock().expect("rng poisoned").gen_range(0.0..1.0)
    }

    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.lock().expect("rng poisoned").gen_range(min..=max)
    }
}

/// Fixed random for tests that need exact draws: `uniform` yields the
/// configured float, `gen_range` the configured integer (clamped into
/// range).
#[cfg(test)]
pub struct FixedRandom {
    pub float: f64,
    pub int: i32,
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn uniform(&self) -> f64 {
        self.float
    }

    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.int.clamp(min, max)
    }
}
