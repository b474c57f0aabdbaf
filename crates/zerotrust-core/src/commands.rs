//! Defender commands sent to a running round.
//!
//! Commands are queued and applied strictly between ticks.

use serde::{Deserialize, Serialize};

use crate::types::{ResponderId, ThreatId};

/// All possible defender actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundCommand {
    /// Drop a responder onto a threat. Starts a commit if accepted.
    Assign {
        responder: ResponderId,
        threat: ThreatId,
    },
    /// Freeze the round clock.
    Pause,
    /// Resume from pause; paused time does not count against the round.
    Resume,
}
