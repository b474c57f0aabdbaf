//! ZEROTRUST application.
//!
//! This crate wires the round engine to the outside world: configuration,
//! bot storage, seed derivation, the real-time round loop and result sinks.

pub mod autopilot;
pub mod bot_source;
pub mod config;
pub mod error;
pub mod journal;
pub mod round_loop;
pub mod seed;
pub mod sink;
pub mod state;

pub use zerotrust_core as core;
