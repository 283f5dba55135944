//! Snapshot — the read-only view handed to rendering and UI.
//!
//! Carries position plus the minimal visual state per entity:
//! alive/dead for chickens, golden/hatched for eggs.

use crate::{
    chicken::Chicken,
    egg::Egg,
    math::Vec3,
    types::{ChickenId, EggId, Frame, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChickenView {
    pub id:       ChickenId,
    pub position: Vec3,
    pub alive:    bool,
    pub hunger:   f64,
}

impl From<&Chicken> for ChickenView {
    fn from(c: &Chicken) -> Self {
        Self {
            id:       c.id(),
            position: c.position(),
            alive:    c.is_alive(),
            hunger:   c.hunger(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggView {
    pub id:       EggId,
    pub position: Vec3,
    pub golden:   bool,
    pub hatched:  bool,
}

impl From<&Egg> for EggView {
    fn from(e: &Egg) -> Self {
        Self {
            id:       e.id(),
            position: e.position(),
            golden:   e.is_golden(),
            hatched:  e.is_hatched(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmSnapshot {
    pub frame:          Frame,
    pub now:            Timestamp,
    pub paused:         bool,
    pub money:          u64,
    pub time_remaining: f64,
    pub game_over:      bool,
    pub chickens:       Vec<ChickenView>,
    pub eggs:           Vec<EggView>,
}
