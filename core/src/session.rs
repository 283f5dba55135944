//! The session — one playthrough, owned by the frame driver.
//!
//! FRAME ORDER (fixed):
//!   1. Economy countdown by Δt.
//!   2. Farm tick with the economy's remaining time.
//!   3. Game-over latch: the first frame that observes zero time
//!      emits SessionEnded with the survivor count. Later frames
//!      change nothing.
//!
//! Player actions (clicks, commands) queue their events; the next
//! frame report carries them to the UI collaborator.

use crate::{
    command::{Hover, PlayerCommand},
    config::FarmConfig,
    economy::Economy,
    error::CoopResult,
    event::{FarmEvent, FeedRejection},
    farm::{Farm, FeedOutcome, HarvestOutcome},
    snapshot::{ChickenView, EggView, FarmSnapshot},
    types::{ChickenId, EggId, Frame},
};
use serde::{Deserialize, Serialize};

/// Everything the UI collaborator needs after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame:          Frame,
    pub money:          u64,
    pub time_remaining: f64,
    pub hover_hunger:   Option<f64>,
    pub game_over:      bool,
    pub events:         Vec<FarmEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionOutcome {
    Harvest(HarvestOutcome),
    Feed(FeedOutcome),
    Nothing,
}

pub struct Session {
    pub farm:    Farm,
    pub economy: Economy,
    seed:        u64,
    hover:       Hover,
    ended:       bool,
    pending:     Vec<FarmEvent>,
}

impl Session {
    /// Build a session with the configured starting flock.
    pub fn new(config: FarmConfig, seed: u64) -> CoopResult<Self> {
        let economy = Economy::from_config(&config.economy);
        let farm = Farm::build(config, seed)?;
        log::info!(
            "Session started: seed={seed} chickens={} time={:.0}s",
            farm.live_count(),
            economy.time_remaining()
        );
        Ok(Self {
            farm,
            economy,
            seed,
            hover: Hover::none(),
            ended: false,
            pending: Vec::new(),
        })
    }

    /// Session with default tunables and no starting flock.
    pub fn build_test(seed: u64) -> CoopResult<Self> {
        Self::new(FarmConfig::default_test(), seed)
    }

    /// Run one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        let mut events = std::mem::take(&mut self.pending);

        if !self.ended && !self.farm.is_paused() {
            self.economy.update(dt);
            events.extend(self.farm.tick(dt, self.economy.time_remaining()));

            if self.farm.is_game_over() {
                self.ended = true;
                let survivors = self.farm.live_count();
                log::info!(
                    "Session over at frame {}: {survivors} chickens survived, money={}",
                    self.farm.frame(),
                    self.economy.money()
                );
                events.push(FarmEvent::SessionEnded { frame: self.farm.frame(), survivors });
            }
        }

        FrameReport {
            frame:          self.farm.frame(),
            money:          self.economy.money(),
            time_remaining: self.economy.time_remaining(),
            hover_hunger:   self.hover_hunger(),
            game_over:      self.ended,
            events,
        }
    }

    /// Advance `count` frames of `dt` each, stopping early at game over.
    /// Returns every event in order.
    pub fn run_frames(&mut self, count: u64, dt: f64) -> Vec<FarmEvent> {
        let mut events = Vec::new();
        for _ in 0..count {
            let report = self.frame(dt);
            events.extend(report.events);
            if self.ended {
                break;
            }
        }
        events
    }

    // ── Pointer ────────────────────────────────────────────────

    pub fn set_hover(&mut self, hover: Hover) {
        self.hover = hover;
    }

    pub fn hover(&self) -> Hover {
        self.hover
    }

    /// Hunger of the hovered chicken, if any.
    pub fn hover_hunger(&self) -> Option<f64> {
        self.hover
            .chicken
            .and_then(|id| self.farm.chicken(id))
            .map(|c| c.hunger())
    }

    /// Resolve a click on whatever is hovered. A live egg wins over a
    /// chicken; a stale egg falls through to the chicken.
    pub fn click(&mut self) -> ActionOutcome {
        if self.ended {
            return ActionOutcome::Nothing;
        }
        if let Some(egg_id) = self.hover.egg {
            if self.farm.egg(egg_id).is_some() {
                self.hover.egg = None;
                return self.harvest(egg_id);
            }
        }
        match self.hover.chicken {
            Some(chicken_id) => self.feed(chicken_id),
            None => ActionOutcome::Nothing,
        }
    }

    // ── Actions ────────────────────────────────────────────────

    /// Inert once the session has ended.
    pub fn harvest(&mut self, egg_id: EggId) -> ActionOutcome {
        if self.ended {
            return ActionOutcome::Nothing;
        }
        let outcome = self.farm.harvest(egg_id, &mut self.economy);
        if let HarvestOutcome::Harvested { egg_id, golden, reward } = outcome {
            self.pending.push(FarmEvent::EggHarvested { egg_id, golden, reward });
        }
        ActionOutcome::Harvest(outcome)
    }

    /// Inert once the session has ended.
    pub fn feed(&mut self, chicken_id: ChickenId) -> ActionOutcome {
        if self.ended {
            return ActionOutcome::Nothing;
        }
        let cost = self.farm.config().economy.feed_cost;
        let outcome = self.farm.feed_chicken(chicken_id, cost, &mut self.economy);
        let event = match outcome {
            FeedOutcome::Fed { chicken_id, hunger, cost } => {
                FarmEvent::ChickenFed { chicken_id, hunger, cost }
            }
            FeedOutcome::InsufficientFunds { chicken_id } => FarmEvent::FeedRejected {
                chicken_id,
                reason: FeedRejection::InsufficientFunds,
            },
            FeedOutcome::ChickenDead { chicken_id } => FarmEvent::FeedRejected {
                chicken_id,
                reason: FeedRejection::ChickenDead,
            },
            FeedOutcome::UnknownChicken { chicken_id } => FarmEvent::FeedRejected {
                chicken_id,
                reason: FeedRejection::UnknownChicken,
            },
        };
        self.pending.push(event);
        ActionOutcome::Feed(outcome)
    }

    /// Route a player command.
    pub fn apply(&mut self, command: PlayerCommand) -> ActionOutcome {
        match command {
            PlayerCommand::Pause => self.farm.pause(),
            PlayerCommand::Resume => self.farm.resume(),
            PlayerCommand::SetHover { hover } => self.set_hover(hover),
            PlayerCommand::Click => return self.click(),
            PlayerCommand::Harvest { egg_id } => return self.harvest(egg_id),
            PlayerCommand::Feed { chicken_id } => return self.feed(chicken_id),
            PlayerCommand::DisposeDead => {
                for chicken_id in self.farm.dispose_dead() {
                    self.pending.push(FarmEvent::ChickenRemoved { chicken_id });
                }
            }
        }
        ActionOutcome::Nothing
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn is_game_over(&self) -> bool {
        self.ended
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> FarmSnapshot {
        FarmSnapshot {
            frame:          self.farm.frame(),
            now:            self.farm.now(),
            paused:         self.farm.is_paused(),
            money:          self.economy.money(),
            time_remaining: self.economy.time_remaining(),
            game_over:      self.ended,
            chickens:       self.farm.chickens().iter().map(ChickenView::from).collect(),
            eggs:           self.farm.eggs().iter().map(EggView::from).collect(),
        }
    }
}
