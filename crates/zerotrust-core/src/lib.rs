//! Core types and definitions for the ZeroTrust defense round.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the skill/target catalog, bot configurations, threats, responders,
//! round state, commands, events, constants and tuning.
//! It has no dependency on any runtime or UI framework.

pub mod action_log;
pub mod bot;
pub mod catalog;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
