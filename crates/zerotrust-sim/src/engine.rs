//! Round engine, the core of the game.
//!
//! `RoundEngine` owns the round state, serializes commands against ticks and
//! produces the outcome once the round is decided. Completely headless: the
//! caller supplies every timestamp, enabling deterministic testing.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::info;

use zerotrust_core::bot::BotConfiguration;
use zerotrust_core::commands::RoundCommand;
use zerotrust_core::components::AssignmentInterval;
use zerotrust_core::config::EngineConfig;
use zerotrust_core::enums::RoundPhase;
use zerotrust_core::error::{BotConfigError, ConfigError};
use zerotrust_core::events::RoundEvent;
use zerotrust_core::state::{RoundOutcome, RoundState};
use zerotrust_core::types::{ResponderId, ThreatId};

use crate::generator;
use crate::roster;
use crate::systems;
use crate::systems::assignment::AssignRejection;
use crate::systems::scoring::accuracy_bps;

/// Round setup failed before the first tick.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid bot configuration: {0}")]
    Bot(#[from] BotConfigError),

    #[error("invalid engine tuning: {0}")]
    Config(#[from] ConfigError),
}

/// The round engine. Owns the round state and all pending input.
pub struct RoundEngine {
    state: RoundState,
    config: EngineConfig,
    command_queue: VecDeque<RoundCommand>,
    events: Vec<RoundEvent>,
}

impl RoundEngine {
    /// Start a round for `bot` at wall-clock time `started_at_ms`.
    ///
    /// Generates the wave from `seed`, builds the roster, and fails fast on
    /// a malformed configuration or tuning.
    pub fn new(
        bot: &BotConfiguration,
        seed: &[u8],
        config: EngineConfig,
        started_at_ms: u64,
    ) -> Result<Self, SetupError> {
        let threats = generator::generate_with(bot, seed, &config)?;
        let responders = roster::generate();

        info!(
            bot = %bot.bot_name,
            threats = threats.len(),
            condition = bot.victory_condition.label(),
            "round started"
        );

        let state = RoundState::new(
            threats,
            responders,
            bot.victory_condition,
            config.round_duration_ms,
            started_at_ms,
        );
        Ok(Self {
            state,
            config,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: RoundCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = RoundCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, then advance the round to `now_ms`.
    ///
    /// Returns `true` once the round is terminal.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.process_commands(now_ms);
        systems::tick::run(&mut self.state, now_ms, &self.config, &mut self.events);
        self.state.is_terminal()
    }

    /// Apply one command immediately, between ticks.
    pub fn handle_command(&mut self, command: RoundCommand, now_ms: u64) {
        match command {
            RoundCommand::Assign { responder, threat } => {
                // Rejections are logged by the controller and otherwise ignored.
                let _ = self.assign(responder, threat, now_ms);
            }
            RoundCommand::Pause => self.pause(now_ms),
            RoundCommand::Resume => self.resume(now_ms),
        }
    }

    /// Request that `responder` start committing to `threat`.
    pub fn assign(
        &mut self,
        responder: ResponderId,
        threat: ThreatId,
        now_ms: u64,
    ) -> Result<(), AssignRejection> {
        let elapsed_ms = self.state.clock.elapsed_at(now_ms);
        systems::assignment::request_assign(
            &mut self.state,
            responder,
            threat,
            elapsed_ms,
            &mut self.events,
        )
    }

    /// Freeze tick progress. Remaining time stops draining until resumed.
    pub fn pause(&mut self, now_ms: u64) {
        if self.state.phase == RoundPhase::Active {
            self.state.clock.pause(now_ms);
            self.state.phase = RoundPhase::Paused;
            info!(elapsed_ms = self.state.clock.elapsed_at(now_ms), "round paused");
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if self.state.phase == RoundPhase::Paused {
            self.state.clock.resume(now_ms);
            self.state.phase = RoundPhase::Active;
            info!(elapsed_ms = self.state.clock.elapsed_at(now_ms), "round resumed");
        }
    }

    /// Get the current round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Closed action-log entries so far.
    pub fn action_log(&self) -> &[AssignmentInterval] {
        self.state.action_log.entries()
    }

    /// The round outcome, once the round is terminal.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        let defender_won = self.state.defender_won?;
        let end_reason = self
            .state
            .end_reason
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let threats_total = self.state.threats_total();

        Some(RoundOutcome {
            defender_won,
            end_reason,
            threats_cured: self.state.threats_cured,
            threats_total,
            systems_destroyed: self.state.systems_destroyed,
            data_leaked: self.state.data_leaked,
            score: self.state.score,
            duration_ms: self.state.elapsed_ms(),
            accuracy_bps: accuracy_bps(self.state.threats_cured, threats_total),
        })
    }

    /// Process all queued commands.
    fn process_commands(&mut self, now_ms: u64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now_ms);
        }
    }
}
