//! Round entities: threats, responders and assignment intervals.
//!
//! Mostly plain data. The state machine that mutates them lives in the
//! sim crate.

use serde::{Deserialize, Serialize};

use crate::catalog::{SkillId, TargetDescriptor};
use crate::enums::ThreatStatus;
use crate::types::{ResponderId, ThreatId};

/// One simulated incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: ThreatId,
    /// Milliseconds from round start at which the threat activates.
    pub spawn_time_ms: u64,
    pub target: TargetDescriptor,
    pub required_skills: Vec<SkillId>,
    /// Damage rate in percent per second.
    pub damage_rate: f64,

    // --- Mutable ---
    /// Damage dealt, 0-100.
    pub current_damage: f64,
    /// Cure progress, 0-100.
    pub cure_progress: f64,
    /// Responder locked in and curing.
    pub assigned_responder: Option<ResponderId>,
    /// Responder inside the lock-in window.
    pub committing_responder: Option<ResponderId>,
    /// Lock-in progress, 0-100.
    pub commit_progress: f64,
    /// Ticks spent in the current commit.
    pub commit_ticks: u32,
    /// Whether any responder ever committed to this threat.
    pub ever_engaged: bool,
    pub is_cured: bool,
    pub is_failed: bool,
}

impl Threat {
    pub fn is_terminal(&self) -> bool {
        self.is_cured || self.is_failed
    }

    pub fn is_dormant(&self, elapsed_ms: u64) -> bool {
        self.spawn_time_ms > elapsed_ms
    }

    /// Responder currently linked, whether committing or locked.
    pub fn linked_responder(&self) -> Option<ResponderId> {
        self.assigned_responder.or(self.committing_responder)
    }

    pub fn status(&self, elapsed_ms: u64) -> ThreatStatus {
        if self.is_cured {
            ThreatStatus::Cured
        } else if self.is_failed {
            ThreatStatus::Failed
        } else if self.is_dormant(elapsed_ms) {
            ThreatStatus::Dormant
        } else if self.assigned_responder.is_some() {
            ThreatStatus::Locked
        } else if self.committing_responder.is_some() {
            ThreatStatus::Committing
        } else {
            ThreatStatus::Unassigned
        }
    }
}

/// A defending unit with a fixed skill set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responder {
    pub id: ResponderId,
    pub name: String,
    pub avatar: String,
    /// Fixed at roster construction.
    pub skills: Vec<SkillId>,
    pub is_assigned: bool,
    /// Reverse link to the threat this responder is committing to or locked on.
    pub assigned_to_threat: Option<ThreatId>,
}

impl Responder {
    pub fn has_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }
}

/// One closed lock-in-to-release span, as recorded in the action log.
///
/// Serialized with the field names external verifiers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInterval {
    #[serde(rename = "dev_index", alias = "responder_index")]
    pub responder_index: u32,
    pub threat_index: u32,
    pub assigned_at_ms: u64,
    pub unassigned_at_ms: u64,
}

impl AssignmentInterval {
    /// Whether this interval drives curing at grid tick `tick_ms`.
    ///
    /// The lock-in tick itself belongs to the commit window, the release
    /// tick still cures.
    pub fn covers(&self, tick_ms: u64) -> bool {
        self.assigned_at_ms < tick_ms && tick_ms <= self.unassigned_at_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.unassigned_at_ms.saturating_sub(self.assigned_at_ms)
    }
}
