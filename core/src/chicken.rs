//! A single chicken: hunger, wandering, separation and egg-laying.
//!
//! Per-tick order (fixed):
//!   1. Hunger decay. Starvation ends the tick with no signal.
//!   2. Behavior roll when the move cooldown expires.
//!   3. Heading blend toward the target heading (always).
//!   4. Translation plus separation, only while walking.
//!   5. Egg check against the sim clock.

use crate::{
    config::ChickenConfig,
    event::Signal,
    math::{random_direction, PlaneBounds, Vec3},
    rng::SimRng,
    types::{ChickenId, Timestamp},
};
use serde::{Deserialize, Serialize};

/// What a chicken can see of another chicken during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id:       ChickenId,
    pub position: Vec3,
    pub alive:    bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chicken {
    id:               ChickenId,
    hunger:           f64,
    alive:            bool,
    position:         Vec3,
    direction:        Vec3,
    target_direction: Vec3,
    is_moving:        bool,
    /// Seconds until the next behavior roll.
    move_cooldown:    f64,
    next_egg_time:    Timestamp,
}

impl Chicken {
    /// A fresh, fully fed chicken with a random heading and timers.
    pub fn spawn(
        id: ChickenId,
        position: Vec3,
        now: Timestamp,
        config: &ChickenConfig,
        rng: &mut SimRng,
    ) -> Self {
        let direction = random_direction(rng);
        let (egg_lo, egg_hi) = config.egg_delay_range;
        let (cd_lo, cd_hi) = config.initial_move_cooldown_range;
        Self {
            id,
            hunger: config.max_hunger,
            alive: true,
            position,
            direction,
            target_direction: direction,
            is_moving: true,
            move_cooldown: rng.range(cd_lo, cd_hi),
            next_egg_time: now + rng.range(egg_lo, egg_hi),
        }
    }

    /// Point both the current and target heading at `heading`.
    pub fn with_heading(mut self, heading: Vec3) -> Self {
        let heading = heading.try_normalize(f64::EPSILON).unwrap_or(self.direction);
        self.direction = heading;
        self.target_direction = heading;
        self
    }

    /// Set only the heading the chicken is turning toward.
    pub fn with_target_heading(mut self, heading: Vec3) -> Self {
        if let Some(heading) = heading.try_normalize(f64::EPSILON) {
            self.target_direction = heading;
        }
        self
    }

    pub fn with_next_egg_time(mut self, at: Timestamp) -> Self {
        self.next_egg_time = at;
        self
    }

    pub fn with_moving(mut self, moving: bool) -> Self {
        self.is_moving = moving;
        self
    }

    /// Advance one frame. Dead chickens are untouched.
    pub fn tick(
        &mut self,
        dt: f64,
        now: Timestamp,
        bounds: &PlaneBounds,
        neighbors: &[Neighbor],
        config: &ChickenConfig,
        rng: &mut SimRng,
    ) -> Signal {
        if !self.alive {
            return Signal::None;
        }
        debug_assert!(dt >= 0.0, "negative frame delta: {dt}");

        self.hunger -= dt * config.hunger_decay_rate;
        if self.hunger <= 0.0 {
            self.hunger = 0.0;
            self.alive = false;
            return Signal::None;
        }

        self.move_cooldown -= dt;
        if self.move_cooldown <= 0.0 {
            self.roll_behavior(config, rng);
        }

        self.walk(dt, bounds, neighbors, config);

        if now >= self.next_egg_time {
            let (lo, hi) = config.egg_delay_range;
            self.next_egg_time = now + rng.range(lo, hi);
            return Signal::LayEgg;
        }
        Signal::None
    }

    fn roll_behavior(&mut self, config: &ChickenConfig, rng: &mut SimRng) {
        self.is_moving = rng.chance(config.move_probability);
        self.target_direction = random_direction(rng);
        let (lo, hi) = config.move_cooldown_range;
        self.move_cooldown = rng.range(lo, hi);
    }

    fn walk(&mut self, dt: f64, bounds: &PlaneBounds, neighbors: &[Neighbor], config: &ChickenConfig) {
        // Blend even while standing so turns stay smooth.
        let blended = self.direction.lerp(self.target_direction, config.turn_rate);
        self.direction = blended.try_normalize(f64::EPSILON).unwrap_or(self.target_direction);

        if !self.is_moving {
            return;
        }

        let mut move_delta = self.direction * (config.move_speed * dt);
        move_delta += self.separation(neighbors, config) * (dt * config.separation_strength);

        self.position = bounds.clamp(self.position + move_delta);
    }

    /// Sum of repulsion away from every live neighbor inside
    /// `min_distance`, with linear falloff to zero at the radius.
    pub fn separation(&self, neighbors: &[Neighbor], config: &ChickenConfig) -> Vec3 {
        let min_dist = config.min_distance;
        let mut push = Vec3::ZERO;
        for other in neighbors {
            if other.id == self.id || !other.alive {
                continue;
            }
            let offset = self.position - other.position;
            let dist = offset.length();
            if dist >= min_dist || dist <= config.distance_epsilon {
                continue;
            }
            if let Some(away) = offset.try_normalize(config.distance_epsilon) {
                push += away * ((min_dist - dist) / min_dist);
            }
        }
        push
    }

    /// Restore `amount` hunger, capped at `max_hunger`. Returns false
    /// (and does nothing) for a dead chicken.
    pub fn feed(&mut self, amount: f64, max_hunger: f64) -> bool {
        if !self.alive {
            return false;
        }
        self.hunger = (self.hunger + amount).min(max_hunger);
        true
    }

    /// Forced, irreversible death.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn id(&self) -> ChickenId { self.id }
    pub fn hunger(&self) -> f64 { self.hunger }
    pub fn is_alive(&self) -> bool { self.alive }
    pub fn position(&self) -> Vec3 { self.position }
    pub fn direction(&self) -> Vec3 { self.direction }
    pub fn target_direction(&self) -> Vec3 { self.target_direction }
    pub fn is_moving(&self) -> bool { self.is_moving }
    pub fn move_cooldown(&self) -> f64 { self.move_cooldown }
    pub fn next_egg_time(&self) -> Timestamp { self.next_egg_time }

    pub fn is_hungry(&self, threshold: f64) -> bool {
        self.alive && self.hunger < threshold
    }

    pub fn as_neighbor(&self) -> Neighbor {
        Neighbor {
            id:       self.id,
            position: self.position,
            alive:    self.alive,
        }
    }
}
