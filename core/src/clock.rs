//! Simulation clock — the now-source for every timestamp in a session.
//!
//! Time only moves when the driver ticks the farm. Egg schedules and
//! hatch times are stamped against this clock, never the OS clock.

use crate::types::{Frame, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub now:    Timestamp,
    pub frame:  Frame,
    pub paused: bool,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Returns the new time.
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self, dt: f64) -> Timestamp {
        assert!(!self.paused, "advance() called on paused clock");
        debug_assert!(dt >= 0.0, "negative frame delta: {dt}");
        self.now += dt;
        self.frame += 1;
        self.now
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }
}
