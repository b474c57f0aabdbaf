//! State shared between the round loop thread and its callers.

use std::sync::{Arc, Mutex};

use zerotrust_core::commands::RoundCommand;
use zerotrust_core::state::RoundState;

/// Commands sent from callers to the round loop thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopCommand {
    /// A round command to forward to the engine.
    Round(RoundCommand),
    /// Stop the loop without finishing the round.
    Shutdown,
}

/// Latest round state, published by the loop after every tick or command
/// for synchronous polling.
#[derive(Debug, Clone, Default)]
pub struct SharedRound {
    latest: Arc<Mutex<Option<RoundState>>>,
}

impl SharedRound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, state: &RoundState) {
        if let Ok(mut lock) = self.latest.lock() {
            *lock = Some(state.clone());
        }
    }

    /// Clone of the most recently published state.
    pub fn latest(&self) -> Option<RoundState> {
        self.latest.lock().ok().and_then(|lock| lock.clone())
    }
}
