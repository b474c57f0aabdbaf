//! Round state: the single authoritative value the engine mutates, and the
//! outcome handed to result sinks once it is frozen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action_log::ActionLog;
use crate::components::{Responder, Threat};
use crate::enums::{RoundPhase, VictoryCondition};
use crate::types::{ResponderId, RoundClock, ThreatId};

/// Why a round ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EndReason {
    /// Time survival: the clock ran out with threats unresolved.
    BotSurvived { duration_secs: u64 },
    /// Time survival: every threat resolved in time.
    AllNeutralised,
    /// System destruction: threshold reached.
    SystemsDestroyed { destroyed: u32 },
    /// System destruction: round over below threshold.
    DestructionHeld { destroyed: u32, threshold: u32 },
    /// Data exfiltration: threshold reached.
    DataExfiltrated { leaked: u32 },
    /// Data exfiltration: round over below threshold.
    ExfiltrationStopped { leaked: u32, threshold: u32 },
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::BotSurvived { duration_secs } => {
                write!(f, "The bot survived all {duration_secs}s, bot wins")
            }
            EndReason::AllNeutralised => write!(f, "All threats neutralised before time ran out"),
            EndReason::SystemsDestroyed { destroyed } => {
                write!(f, "{destroyed} systems destroyed, bot wins")
            }
            EndReason::DestructionHeld {
                destroyed,
                threshold,
            } => write!(f, "Round over, held to {destroyed}/{threshold} destructions"),
            EndReason::DataExfiltrated { leaked } => {
                write!(f, "Data fully exfiltrated ({leaked} leaks), bot wins")
            }
            EndReason::ExfiltrationStopped { leaked, threshold } => {
                write!(f, "Round over, exfiltration stopped at {leaked}/{threshold} leaks")
            }
        }
    }
}

/// Complete state of one defense round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub clock: RoundClock,
    /// Round length in milliseconds.
    pub duration_ms: u64,
    pub victory_condition: VictoryCondition,
    pub threats: Vec<Threat>,
    pub responders: Vec<Responder>,
    pub threats_cured: u32,
    pub systems_destroyed: u32,
    /// Cumulative leaked-data units (data exfiltration only).
    pub data_leaked: u32,
    /// Running score, recomputed every tick.
    pub score: u32,
    pub action_log: ActionLog,
    /// `None` until the round is terminal.
    pub defender_won: Option<bool>,
    pub end_reason: Option<EndReason>,
}

impl RoundState {
    pub fn new(
        threats: Vec<Threat>,
        responders: Vec<Responder>,
        victory_condition: VictoryCondition,
        duration_ms: u64,
        started_at_ms: u64,
    ) -> Self {
        Self {
            phase: RoundPhase::Active,
            clock: RoundClock::new(started_at_ms),
            duration_ms,
            victory_condition,
            threats,
            responders,
            threats_cured: 0,
            systems_destroyed: 0,
            data_leaked: 0,
            score: 0,
            action_log: ActionLog::new(),
            defender_won: None,
            end_reason: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RoundPhase::Paused
    }

    pub fn is_terminal(&self) -> bool {
        self.defender_won.is_some()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.clock.elapsed_ms)
    }

    pub fn threat(&self, id: ThreatId) -> Option<&Threat> {
        self.threats.get(id.index())
    }

    pub fn responder(&self, id: ResponderId) -> Option<&Responder> {
        self.responders.get(id.index())
    }

    pub fn all_resolved(&self) -> bool {
        self.threats.iter().all(Threat::is_terminal)
    }

    pub fn threats_total(&self) -> u32 {
        self.threats.len() as u32
    }
}

/// Final result of a round, handed to result sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub defender_won: bool,
    pub end_reason: String,
    pub threats_cured: u32,
    pub threats_total: u32,
    pub systems_destroyed: u32,
    pub data_leaked: u32,
    pub score: u32,
    pub duration_ms: u64,
    pub accuracy_bps: u32,
}
