//! Events emitted by the engine for UI feedback.

use serde::{Deserialize, Serialize};

use crate::types::{ResponderId, ThreatId};

/// Something noteworthy that happened during a tick or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundEvent {
    /// A dormant threat reached its spawn time.
    ThreatActivated { threat: ThreatId },
    /// An assignment was accepted and the lock-in window started.
    CommitStarted {
        responder: ResponderId,
        threat: ThreatId,
    },
    /// The lock-in window elapsed; curing begins.
    LockedIn {
        responder: ResponderId,
        threat: ThreatId,
        at_ms: u64,
    },
    /// A responder left a threat (reassignment, cure or round end).
    Released {
        responder: ResponderId,
        threat: ThreatId,
        at_ms: u64,
    },
    ThreatCured { threat: ThreatId },
    ThreatFailed { threat: ThreatId },
    /// An unattended failure leaked data.
    DataLeaked { threat: ThreatId, total: u32 },
    RoundEnded { defender_won: bool },
}
