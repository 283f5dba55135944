//! Economy clock — the player's wallet and the session countdown.
//!
//! The countdown is driven purely by frame deltas. The economy never
//! declares the game over; it only reports time remaining.

use crate::config::EconomyConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    money:          u64,
    time_remaining: f64,
}

impl Economy {
    pub fn new(starting_money: u64, session_length: f64) -> Self {
        Self {
            money: starting_money,
            time_remaining: session_length.max(0.0),
        }
    }

    pub fn from_config(config: &EconomyConfig) -> Self {
        Self::new(config.starting_money, config.session_length)
    }

    /// Count down by `dt` seconds, stopping at zero.
    pub fn update(&mut self, dt: f64) {
        debug_assert!(dt >= 0.0, "negative frame delta: {dt}");
        self.time_remaining = (self.time_remaining - dt).max(0.0);
    }

    /// Deduct `amount` if affordable. No partial spend.
    pub fn spend(&mut self, amount: u64) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }

    pub fn credit(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    pub fn money(&self) -> u64 {
        self.money
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn is_expired(&self) -> bool {
        self.time_remaining <= 0.0
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::from_config(&EconomyConfig::default())
    }
}
