//! Signals and events.
//!
//! RULE: Entities never reach into the farm. A chicken or egg reports
//! what happened to it through a `Signal`; the farm turns signals into
//! `FarmEvent`s for the UI collaborator and the runner log.

use crate::types::{ChickenId, EggId, Frame};
use serde::{Deserialize, Serialize};

/// Outcome of ticking one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    None,
    LayEgg,
    Hatch,
}

/// Every event surfaced by a farm frame or a player action.
/// Variants are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FarmEvent {
    // ── Flock ──────────────────────────────────────
    ChickenDied {
        frame: Frame,
        chicken_id: ChickenId,
    },
    ChickenFed {
        chicken_id: ChickenId,
        hunger: f64,
        cost: u64,
    },
    ChickenRemoved {
        chicken_id: ChickenId,
    },

    // ── Eggs ───────────────────────────────────────
    EggLaid {
        frame: Frame,
        egg_id: EggId,
        chicken_id: ChickenId,
        golden: bool,
    },
    EggHatched {
        frame: Frame,
        egg_id: EggId,
    },
    EggHarvested {
        egg_id: EggId,
        golden: bool,
        reward: u64,
    },

    // ── Warnings for the UI collaborator ───────────
    FeedRejected {
        chicken_id: ChickenId,
        reason: FeedRejection,
    },

    // ── Session ────────────────────────────────────
    SessionEnded {
        frame: Frame,
        survivors: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedRejection {
    InsufficientFunds,
    ChickenDead,
    UnknownChicken,
}

impl FarmEvent {
    /// Stable snake_case name of the variant, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChickenDied { .. }    => "chicken_died",
            Self::ChickenFed { .. }     => "chicken_fed",
            Self::ChickenRemoved { .. } => "chicken_removed",
            Self::EggLaid { .. }        => "egg_laid",
            Self::EggHatched { .. }     => "egg_hatched",
            Self::EggHarvested { .. }   => "egg_harvested",
            Self::FeedRejected { .. }   => "feed_rejected",
            Self::SessionEnded { .. }   => "session_ended",
        }
    }
}
