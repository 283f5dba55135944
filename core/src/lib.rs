//! Coop — chicken farm simulation and economy engine.
//!
//! Rendering, picking and UI live outside this crate. A driver owns a
//! [`session::Session`], calls `frame(dt)` once per rendered frame and
//! forwards pointer clicks; everything else happens here.

pub mod chicken;
pub mod clock;
pub mod command;
pub mod config;
pub mod economy;
pub mod egg;
pub mod error;
pub mod event;
pub mod farm;
pub mod math;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod spatial;
pub mod types;
