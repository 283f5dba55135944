//! A laid egg. Hatching and harvesting are independent one-way flags:
//! hatching is time-driven, harvesting is the player collecting it.

use crate::{
    config::EggConfig,
    event::Signal,
    math::Vec3,
    rng::SimRng,
    types::{EggId, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    id:           EggId,
    position:     Vec3,
    is_golden:    bool,
    hatched:      bool,
    is_harvested: bool,
    hatch_time:   Timestamp,
}

impl Egg {
    pub fn new(id: EggId, position: Vec3, is_golden: bool, hatch_time: Timestamp) -> Self {
        Self {
            id,
            position,
            is_golden,
            hatched: false,
            is_harvested: false,
            hatch_time,
        }
    }

    /// Lay an egg at `position`, drawing its tier and incubation time.
    pub fn lay(id: EggId, position: Vec3, now: Timestamp, config: &EggConfig, rng: &mut SimRng) -> Self {
        let is_golden = rng.chance(config.golden_chance);
        let (lo, hi) = config.hatch_delay_range;
        Self::new(id, position, is_golden, now + rng.range(lo, hi))
    }

    /// Returns `Signal::Hatch` on the first tick at or after the hatch
    /// time, and `Signal::None` on every tick after that.
    pub fn tick(&mut self, now: Timestamp) -> Signal {
        if self.hatched {
            return Signal::None;
        }
        if now >= self.hatch_time {
            self.hatched = true;
            return Signal::Hatch;
        }
        Signal::None
    }

    /// Mark collected. True only on the first call.
    pub fn harvest(&mut self) -> bool {
        if self.is_harvested {
            return false;
        }
        self.is_harvested = true;
        true
    }

    pub fn id(&self) -> EggId { self.id }
    pub fn position(&self) -> Vec3 { self.position }
    pub fn is_golden(&self) -> bool { self.is_golden }
    pub fn is_hatched(&self) -> bool { self.hatched }
    pub fn is_harvested(&self) -> bool { self.is_harvested }
    pub fn hatch_time(&self) -> Timestamp { self.hatch_time }
}
