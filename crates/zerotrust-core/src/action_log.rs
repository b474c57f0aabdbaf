//! Action log accumulator: the ordered record of assignment intervals.
//!
//! An entry is opened when a commit locks in and closed when that lock is
//! broken. Closed entries are never touched again.

use serde::{Deserialize, Serialize};

use crate::components::AssignmentInterval;
use crate::types::{ResponderId, ThreatId};

/// A lock that has not been broken yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenInterval {
    pub responder: ResponderId,
    pub threat: ThreatId,
    pub assigned_at_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    /// Open entries in lock-in order.
    open: Vec<OpenInterval>,
    closed: Vec<AssignmentInterval>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an entry, replacing any stale one for the same pair.
    pub fn open(&mut self, responder: ResponderId, threat: ThreatId, at_ms: u64) {
        self.open
            .retain(|o| !(o.responder == responder && o.threat == threat));
        self.open.push(OpenInterval {
            responder,
            threat,
            assigned_at_ms: at_ms,
        });
    }

    pub fn is_open(&self, responder: ResponderId, threat: ThreatId) -> bool {
        self.open
            .iter()
            .any(|o| o.responder == responder && o.threat == threat)
    }

    pub fn open_entries(&self) -> &[OpenInterval] {
        &self.open
    }

    /// Close the open entry for `(responder, threat)`.
    ///
    /// Returns the closed interval, or `None` if nothing was open or the
    /// span was empty (an empty span covers no tick and is dropped).
    pub fn close(
        &mut self,
        responder: ResponderId,
        threat: ThreatId,
        at_ms: u64,
    ) -> Option<AssignmentInterval> {
        let pos = self
            .open
            .iter()
            .position(|o| o.responder == responder && o.threat == threat)?;
        let entry = self.open.remove(pos);
        if at_ms <= entry.assigned_at_ms {
            return None;
        }
        let interval = AssignmentInterval {
            responder_index: responder.0,
            threat_index: threat.0,
            assigned_at_ms: entry.assigned_at_ms,
            unassigned_at_ms: at_ms,
        };
        self.closed.push(interval);
        Some(interval)
    }

    /// Close every open entry at `at_ms`, in lock-in order.
    pub fn close_all(&mut self, at_ms: u64) -> Vec<AssignmentInterval> {
        let pending: Vec<_> = self.open.iter().map(|o| (o.responder, o.threat)).collect();
        pending
            .into_iter()
            .filter_map(|(responder, threat)| self.close(responder, threat, at_ms))
            .collect()
    }

    /// Closed entries in the order they were closed.
    pub fn entries(&self) -> &[AssignmentInterval] {
        &self.closed
    }
}
