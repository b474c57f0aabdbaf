//! Identifiers and round timing types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable threat identity: the threat's index in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatId(pub u32);

/// Stable responder identity: the responder's index in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponderId(pub u32);

impl ThreatId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ResponderId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ThreatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "threat-{}", self.0)
    }
}

impl fmt::Display for ResponderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dev-{}", self.0)
    }
}

/// Wall-clock bookkeeping for a round.
///
/// Timestamps are caller-supplied milliseconds from any monotonic origin.
/// Paused spans are accumulated so remaining time does not drain while
/// the round is paused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    /// Timestamp at which the round started.
    pub started_at_ms: u64,
    /// Total time spent paused so far.
    pub paused_total_ms: u64,
    /// Timestamp of the current pause, if paused.
    pub paused_at_ms: Option<u64>,
    /// Ticks processed so far.
    pub tick: u64,
    /// Elapsed round time as of the last tick or command.
    pub elapsed_ms: u64,
}

impl RoundClock {
    pub fn new(started_at_ms: u64) -> Self {
        Self {
            started_at_ms,
            ..Default::default()
        }
    }

    /// Round time elapsed at `now_ms`, excluding paused spans.
    ///
    /// While paused the clock reads as frozen at the moment of pausing.
    pub fn elapsed_at(&self, now_ms: u64) -> u64 {
        let now = self.paused_at_ms.map_or(now_ms, |p| p.min(now_ms));
        now.saturating_sub(self.started_at_ms)
            .saturating_sub(self.paused_total_ms)
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.paused_at_ms.is_none() {
            self.paused_at_ms = Some(now_ms);
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if let Some(paused_at) = self.paused_at_ms.take() {
            self.paused_total_ms += now_ms.saturating_sub(paused_at);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at_ms.is_some()
    }
}
