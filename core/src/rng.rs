//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SimRng instances derived
//! from the single master seed handed to the session.
//!
//! Each concern gets its own RNG stream, seeded deterministically
//! from (master_seed XOR slot_index * golden ratio). This means:
//!   - Adding a new stream never changes existing streams.
//!   - Chicken behavior rolls do not shift when egg tiers are drawn.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform float in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Hands out the per-concern streams for one session.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_slot(&self, slot: RngSlot) -> SimRng {
        SimRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Flock = 0,    // spawn positions, initial headings and timers
    Behavior = 1, // per-tick wander rolls and egg rescheduling
    Eggs = 2,     // hatch delays and golden tier
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flock => "flock",
            Self::Behavior => "behavior",
            Self::Eggs => "eggs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank_a = RngBank::new(12345);
        let bank_b = RngBank::new(12345);
        let mut a = bank_a.for_slot(RngSlot::Behavior);
        let mut b = bank_b.for_slot(RngSlot::Behavior);

        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn slots_are_independent_streams() {
        let bank = RngBank::new(12345);
        let mut flock = bank.for_slot(RngSlot::Flock);
        let mut eggs = bank.for_slot(RngSlot::Eggs);

        let a: Vec<u64> = (0..8).map(|_| flock.next_u64_below(1_000_000)).collect();
        let b: Vec<u64> = (0..8).map(|_| eggs.next_u64_below(1_000_000)).collect();
        assert_ne!(a, b, "Distinct slots should not share a stream");
    }

    #[test]
    fn range_stays_in_half_open_interval() {
        let mut rng = RngBank::new(7).for_slot(RngSlot::Eggs);
        for _ in 0..10_000 {
            let v = rng.range(15.0, 30.0);
            assert!((15.0..30.0).contains(&v), "range() produced {v}");
        }
    }
}
