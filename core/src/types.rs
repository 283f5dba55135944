//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation time in seconds since the session started.
pub type Timestamp = f64;

/// A frame counter. One frame = one call to `Farm::tick`.
pub type Frame = u64;

/// Opaque handle for a chicken. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChickenId(pub u64);

/// Opaque handle for an egg. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EggId(pub u64);

impl fmt::Display for ChickenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chicken-{}", self.0)
    }
}

impl fmt::Display for EggId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "egg-{}", self.0)
    }
}
