//! The farm — owns the flock and the eggs and advances them each frame.
//!
//! EXECUTION ORDER per frame (fixed):
//!   1. Advance the sim clock by Δt.
//!   2. Snapshot every chicken's position and rebuild the neighbor index.
//!   3. Tick every chicken in insertion order. Dead chickens are no-ops.
//!      Each LayEgg signal lays an egg at that chicken's position.
//!   4. Tick every egg. Hatched eggs stay in play.
//!
//! RULES:
//!   - Separation reads pre-frame positions, so insertion order never
//!     changes where a chicken ends up. A chicken that starves earlier
//!     in the frame stops pushing the ones ticked after it.
//!   - Dead chickens stay in the collection until explicitly removed.
//!   - Harvested eggs leave the collection immediately.
//!   - All randomness flows through the RngBank streams.

use crate::{
    chicken::{Chicken, Neighbor},
    clock::SimClock,
    config::FarmConfig,
    economy::Economy,
    egg::Egg,
    error::{CoopError, CoopResult},
    event::{FarmEvent, Signal},
    math::{PlaneBounds, Vec3},
    rng::{RngBank, RngSlot, SimRng},
    spatial::SpatialIndex,
    types::{ChickenId, EggId, Frame, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HarvestOutcome {
    Harvested { egg_id: EggId, golden: bool, reward: u64 },
    AlreadyHarvested { egg_id: EggId },
    UnknownEgg { egg_id: EggId },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FeedOutcome {
    Fed { chicken_id: ChickenId, hunger: f64, cost: u64 },
    InsufficientFunds { chicken_id: ChickenId },
    ChickenDead { chicken_id: ChickenId },
    UnknownChicken { chicken_id: ChickenId },
}

pub struct Farm {
    config:          FarmConfig,
    bounds:          PlaneBounds,
    clock:           SimClock,
    chickens:        Vec<Chicken>,
    eggs:            Vec<Egg>,
    flock_rng:       SimRng,
    behavior_rng:    SimRng,
    egg_rng:         SimRng,
    neighbors:       SpatialIndex,
    next_chicken_id: u64,
    next_egg_id:     u64,
    /// Last remaining-time value handed in by the driver.
    time_left:       f64,
}

impl Farm {
    /// Empty farm: no chickens, no eggs.
    pub fn new(config: FarmConfig, seed: u64) -> CoopResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(seed);
        Ok(Self {
            bounds:          PlaneBounds::from_size(config.world.plane_size),
            clock:           SimClock::new(),
            chickens:        Vec::new(),
            eggs:            Vec::new(),
            flock_rng:       rng_bank.for_slot(RngSlot::Flock),
            behavior_rng:    rng_bank.for_slot(RngSlot::Behavior),
            egg_rng:         rng_bank.for_slot(RngSlot::Eggs),
            neighbors:       SpatialIndex::new(config.chicken.min_distance),
            next_chicken_id: 0,
            next_egg_id:     0,
            time_left:       config.economy.session_length,
            config,
        })
    }

    /// Farm with the configured starting flock scattered over the plane.
    pub fn build(config: FarmConfig, seed: u64) -> CoopResult<Self> {
        let mut farm = Self::new(config, seed)?;
        for _ in 0..farm.config.world.initial_chickens {
            farm.spawn_random_chicken();
        }
        log::debug!(
            "Farm built: seed={seed} chickens={} plane={}",
            farm.chickens.len(),
            farm.config.world.plane_size
        );
        Ok(farm)
    }

    // ── Frame ──────────────────────────────────────────────────

    /// Advance one frame. `time_left` is the economy's remaining time,
    /// read for the game-over check only.
    pub fn tick(&mut self, dt: f64, time_left: f64) -> Vec<FarmEvent> {
        self.time_left = time_left;
        if self.clock.paused {
            return vec![];
        }

        let now = self.clock.advance(dt);
        let frame = self.clock.frame;
        let mut events = Vec::new();

        let mut snapshot: Vec<Neighbor> = self.chickens.iter().map(Chicken::as_neighbor).collect();
        self.neighbors.rebuild(snapshot.iter().map(|n| n.position));

        let mut candidates = Vec::new();
        let mut nearby = Vec::new();
        for (index, chicken) in self.chickens.iter_mut().enumerate() {
            if !chicken.is_alive() {
                continue;
            }

            self.neighbors.candidates(snapshot[index].position, &mut candidates);
            nearby.clear();
            nearby.extend(candidates.iter().map(|&j| snapshot[j]));

            let signal = chicken.tick(
                dt,
                now,
                &self.bounds,
                &nearby,
                &self.config.chicken,
                &mut self.behavior_rng,
            );
            // Positions stay pre-frame; deaths count at once.
            snapshot[index].alive = chicken.is_alive();

            if !chicken.is_alive() {
                log::debug!("frame={frame} {} starved", chicken.id());
                events.push(FarmEvent::ChickenDied { frame, chicken_id: chicken.id() });
                continue;
            }

            if signal == Signal::LayEgg {
                let egg_id = EggId(self.next_egg_id);
                self.next_egg_id += 1;
                let egg = Egg::lay(egg_id, chicken.position(), now, &self.config.egg, &mut self.egg_rng);
                log::debug!(
                    "frame={frame} {} laid {egg_id} golden={}",
                    chicken.id(),
                    egg.is_golden()
                );
                events.push(FarmEvent::EggLaid {
                    frame,
                    egg_id,
                    chicken_id: chicken.id(),
                    golden: egg.is_golden(),
                });
                self.eggs.push(egg);
            }
        }

        for egg in &mut self.eggs {
            if egg.tick(now) == Signal::Hatch {
                log::debug!("frame={frame} {} hatched", egg.id());
                events.push(FarmEvent::EggHatched { frame, egg_id: egg.id() });
            }
        }

        events
    }

    pub fn is_game_over(&self) -> bool {
        self.time_left <= 0.0
    }

    // ── Player actions ─────────────────────────────────────────

    /// Collect an egg, credit its reward and take it out of play.
    pub fn harvest(&mut self, egg_id: EggId, economy: &mut Economy) -> HarvestOutcome {
        let Some(index) = self.eggs.iter().position(|e| e.id() == egg_id) else {
            // Ids are never reused, so a known id that is gone was harvested.
            return if egg_id.0 < self.next_egg_id {
                HarvestOutcome::AlreadyHarvested { egg_id }
            } else {
                HarvestOutcome::UnknownEgg { egg_id }
            };
        };

        let mut egg = self.eggs.remove(index);
        if !egg.harvest() {
            return HarvestOutcome::AlreadyHarvested { egg_id };
        }

        let golden = egg.is_golden();
        let reward = if golden {
            self.config.economy.golden_egg_reward
        } else {
            self.config.economy.normal_egg_reward
        };
        economy.credit(reward);
        log::debug!("{egg_id} harvested golden={golden} reward={reward}");
        HarvestOutcome::Harvested { egg_id, golden, reward }
    }

    /// Pay `cost` and feed a living chicken. Dead or missing chickens
    /// cost nothing.
    pub fn feed_chicken(&mut self, chicken_id: ChickenId, cost: u64, economy: &mut Economy) -> FeedOutcome {
        let max_hunger = self.config.chicken.max_hunger;
        let feed_amount = self.config.chicken.feed_amount;

        let Some(chicken) = self.chickens.iter_mut().find(|c| c.id() == chicken_id) else {
            return FeedOutcome::UnknownChicken { chicken_id };
        };
        if !chicken.is_alive() {
            return FeedOutcome::ChickenDead { chicken_id };
        }
        if !economy.spend(cost) {
            return FeedOutcome::InsufficientFunds { chicken_id };
        }

        chicken.feed(feed_amount, max_hunger);
        log::debug!("{chicken_id} fed to {:.1}", chicken.hunger());
        FeedOutcome::Fed { chicken_id, hunger: chicken.hunger(), cost }
    }

    // ── Flock management ───────────────────────────────────────

    /// Add a chicken at `position` (clamped into the plane).
    pub fn spawn_chicken(&mut self, position: Vec3) -> ChickenId {
        let id = ChickenId(self.next_chicken_id);
        self.next_chicken_id += 1;
        let position = self.bounds.clamp(position);
        let chicken = Chicken::spawn(
            id,
            position,
            self.clock.now,
            &self.config.chicken,
            &mut self.flock_rng,
        );
        self.chickens.push(chicken);
        id
    }

    pub fn spawn_random_chicken(&mut self) -> ChickenId {
        let position = self.bounds.random_point(&mut self.flock_rng);
        self.spawn_chicken(position)
    }

    /// Insert a chicken built by the caller. Its id must come from
    /// `allocate_chicken_id` and must not already be in the flock.
    pub fn insert_chicken(&mut self, chicken: Chicken) -> CoopResult<()> {
        let id = chicken.id();
        if id.0 >= self.next_chicken_id {
            return Err(CoopError::ForeignChicken { id });
        }
        if self.chickens.iter().any(|c| c.id() == id) {
            return Err(CoopError::DuplicateChicken { id });
        }
        self.chickens.push(chicken);
        Ok(())
    }

    pub fn allocate_chicken_id(&mut self) -> ChickenId {
        let id = ChickenId(self.next_chicken_id);
        self.next_chicken_id += 1;
        id
    }

    pub fn kill_chicken(&mut self, chicken_id: ChickenId) -> bool {
        match self.chickens.iter_mut().find(|c| c.id() == chicken_id) {
            Some(chicken) if chicken.is_alive() => {
                chicken.kill();
                true
            }
            _ => false,
        }
    }

    /// Take one chicken out of the simulation for good.
    pub fn remove_chicken(&mut self, chicken_id: ChickenId) -> Option<Chicken> {
        let index = self.chickens.iter().position(|c| c.id() == chicken_id)?;
        Some(self.chickens.remove(index))
    }

    /// Opt-in cleanup of every dead chicken. Returns the removed ids.
    pub fn dispose_dead(&mut self) -> Vec<ChickenId> {
        let removed: Vec<ChickenId> = self
            .chickens
            .iter()
            .filter(|c| !c.is_alive())
            .map(Chicken::id)
            .collect();
        self.chickens.retain(Chicken::is_alive);
        if !removed.is_empty() {
            log::debug!("Disposed {} dead chickens", removed.len());
        }
        removed
    }

    // ── Clock control ──────────────────────────────────────────

    pub fn pause(&mut self)  { self.clock.pause();  }
    pub fn resume(&mut self) { self.clock.resume(); }

    // ── Reads ──────────────────────────────────────────────────

    pub fn chickens(&self) -> &[Chicken] { &self.chickens }
    pub fn eggs(&self) -> &[Egg] { &self.eggs }

    pub fn chicken(&self, chicken_id: ChickenId) -> Option<&Chicken> {
        self.chickens.iter().find(|c| c.id() == chicken_id)
    }

    pub fn egg(&self, egg_id: EggId) -> Option<&Egg> {
        self.eggs.iter().find(|e| e.id() == egg_id)
    }

    pub fn live_count(&self) -> usize {
        self.chickens.iter().filter(|c| c.is_alive()).count()
    }

    pub fn hatched_count(&self) -> usize {
        self.eggs.iter().filter(|e| e.is_hatched()).count()
    }

    pub fn now(&self) -> Timestamp { self.clock.now }
    pub fn frame(&self) -> Frame { self.clock.frame }
    pub fn is_paused(&self) -> bool { self.clock.paused }
    pub fn bounds(&self) -> &PlaneBounds { &self.bounds }
    pub fn config(&self) -> &FarmConfig { &self.config }
}
