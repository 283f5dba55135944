//! Tunables for a farm session.
//!
//! Every field has a default matching the shipped game. A JSON file can
//! override any subset of fields; missing keys fall back to the defaults.

use crate::error::{CoopError, CoopResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChickenConfig {
    pub max_hunger: f64,
    /// Hunger lost per second.
    pub hunger_decay_rate: f64,
    /// Hunger restored by one feeding, capped at `max_hunger`.
    pub feed_amount: f64,
    /// Units per second while walking.
    pub move_speed: f64,
    /// Probability of walking after each behavior roll.
    pub move_probability: f64,
    /// Cooldown between behavior rolls, seconds, `[lo, hi)`.
    pub move_cooldown_range: (f64, f64),
    /// Cooldown before the very first roll.
    pub initial_move_cooldown_range: (f64, f64),
    /// Per-tick blend factor from heading toward target heading.
    pub turn_rate: f64,
    /// Separation radius between chickens.
    pub min_distance: f64,
    /// Distances at or below this contribute no separation force.
    pub distance_epsilon: f64,
    pub separation_strength: f64,
    /// Delay between eggs, seconds, `[lo, hi)`.
    pub egg_delay_range: (f64, f64),
}

impl Default for ChickenConfig {
    fn default() -> Self {
        Self {
            max_hunger:                  100.0,
            hunger_decay_rate:           5.0,
            feed_amount:                 30.0,
            move_speed:                  0.5,
            move_probability:            0.7,
            move_cooldown_range:         (2.0, 5.0),
            initial_move_cooldown_range: (2.0, 4.0),
            turn_rate:                   0.05,
            min_distance:                0.6,
            distance_epsilon:            1e-4,
            separation_strength:         1.5,
            egg_delay_range:             (5.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EggConfig {
    /// Incubation time, seconds, `[lo, hi)`.
    pub hatch_delay_range: (f64, f64),
    /// Probability that a newly laid egg is golden.
    pub golden_chance: f64,
}

impl Default for EggConfig {
    fn default() -> Self {
        Self {
            hatch_delay_range: (15.0, 30.0),
            golden_chance:     0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_money: u64,
    /// Session length in seconds.
    pub session_length: f64,
    pub feed_cost: u64,
    pub normal_egg_reward: u64,
    pub golden_egg_reward: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money:    0,
            session_length:    300.0,
            feed_cost:         5,
            normal_egg_reward: 5,
            golden_egg_reward: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square farm plane.
    pub plane_size: f64,
    pub initial_chickens: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            plane_size:       10.0,
            initial_chickens: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub world:   WorldConfig,
    pub chicken: ChickenConfig,
    pub egg:     EggConfig,
    pub economy: EconomyConfig,
}

impl FarmConfig {
    /// Load a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> CoopResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: FarmConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded farm config from {}", path.display());
        Ok(config)
    }

    /// Config tuned for tests: no starting flock, everything else default.
    pub fn default_test() -> Self {
        let mut config = Self::default();
        config.world.initial_chickens = 0;
        config
    }

    pub fn validate(&self) -> CoopResult<()> {
        let w = &self.world;
        let c = &self.chicken;
        let e = &self.egg;

        check(w.plane_size > 0.0, "world.plane_size must be > 0")?;
        check(c.max_hunger > 0.0, "chicken.max_hunger must be > 0")?;
        check(c.hunger_decay_rate >= 0.0, "chicken.hunger_decay_rate must be >= 0")?;
        check(c.feed_amount >= 0.0, "chicken.feed_amount must be >= 0")?;
        check(c.move_speed >= 0.0, "chicken.move_speed must be >= 0")?;
        check(unit_interval(c.move_probability), "chicken.move_probability must be in [0, 1]")?;
        check(unit_interval(c.turn_rate), "chicken.turn_rate must be in [0, 1]")?;
        check(c.min_distance > c.distance_epsilon, "chicken.min_distance must exceed distance_epsilon")?;
        check(c.distance_epsilon >= 0.0, "chicken.distance_epsilon must be >= 0")?;
        check(positive_range(c.move_cooldown_range), "chicken.move_cooldown_range must satisfy 0 < lo <= hi")?;
        check(
            positive_range(c.initial_move_cooldown_range),
            "chicken.initial_move_cooldown_range must satisfy 0 < lo <= hi",
        )?;
        check(positive_range(c.egg_delay_range), "chicken.egg_delay_range must satisfy 0 < lo <= hi")?;
        check(positive_range(e.hatch_delay_range), "egg.hatch_delay_range must satisfy 0 < lo <= hi")?;
        check(unit_interval(e.golden_chance), "egg.golden_chance must be in [0, 1]")?;
        check(self.economy.session_length >= 0.0, "economy.session_length must be >= 0")?;
        Ok(())
    }
}

fn check(ok: bool, reason: &str) -> CoopResult<()> {
    if ok {
        Ok(())
    } else {
        Err(CoopError::InvalidConfig { reason: reason.to_string() })
    }
}

fn unit_interval(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

fn positive_range((lo, hi): (f64, f64)) -> bool {
    lo > 0.0 && lo <= hi
}
