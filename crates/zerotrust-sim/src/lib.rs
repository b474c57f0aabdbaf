//! Real-time defense simulation engine for ZeroTrust.
//!
//! Generates threat waves from bot configurations, advances round state on a
//! fixed tick, applies defender assignments, and scores and verifies rounds.
//! Completely headless: time comes in as caller-supplied timestamps.

pub mod engine;
pub mod generator;
pub mod rng;
pub mod roster;
pub mod systems;
pub mod verify;

pub use engine::RoundEngine;
pub use zerotrust_core as core;
