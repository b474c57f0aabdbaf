//! Action-log verification and replay.
//!
//! A verifier holding the bot configuration, the seed and a round's action
//! log can check the log is well formed and re-simulate the round on the
//! fixed tick grid to recompute its counters and score.

use serde::Serialize;
use thiserror::Error;

use zerotrust_core::bot::BotConfiguration;
use zerotrust_core::components::AssignmentInterval;
use zerotrust_core::config::EngineConfig;
use zerotrust_core::enums::VictoryCondition;
use zerotrust_core::state::{EndReason, RoundOutcome, RoundState};
use zerotrust_core::types::ResponderId;

use crate::engine::SetupError;
use crate::generator;
use crate::roster;
use crate::systems::assignment::calculate_cure_speed;
use crate::systems::scoring::{accuracy_bps, calculate_score};
use crate::systems::threat_update::{self, Transition};
use crate::systems::victory::{self, RoundTally};

/// Why an action log was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("entry {entry}: responder index {index} outside roster of {roster_len}")]
    ResponderOutOfBounds {
        entry: usize,
        index: u32,
        roster_len: usize,
    },

    #[error("entry {entry}: threat index {index} outside wave of {threat_count}")]
    ThreatOutOfBounds {
        entry: usize,
        index: u32,
        threat_count: usize,
    },

    #[error("entry {entry}: window {assigned_at_ms}..{unassigned_at_ms} ms is empty")]
    EmptyWindow {
        entry: usize,
        assigned_at_ms: u64,
        unassigned_at_ms: u64,
    },

    #[error("entry {entry}: assigned at {assigned_at_ms} ms, after the {round_duration_ms} ms round ended")]
    AssignedAfterRoundEnd {
        entry: usize,
        assigned_at_ms: u64,
        round_duration_ms: u64,
    },

    #[error("responder {responder} is double-booked by entries {first} and {second}")]
    ResponderDoubleBooked {
        responder: u32,
        first: usize,
        second: usize,
    },

    #[error("threat {threat} is cured by overlapping entries {first} and {second}")]
    ThreatDoubleBooked {
        threat: u32,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("round setup rejected: {0}")]
    Setup(#[from] SetupError),

    #[error("action log rejected: {0}")]
    Log(#[from] VerifyError),
}

/// Counters recomputed by [`replay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub defender_won: bool,
    pub end_reason: EndReason,
    pub threats_cured: u32,
    pub threats_total: u32,
    pub systems_destroyed: u32,
    pub data_leaked: u32,
    pub duration_ms: u64,
    pub score: u32,
    pub accuracy_bps: u32,
}

impl ReplaySummary {
    /// Whether a claimed outcome agrees with the replayed counters.
    pub fn matches(&self, outcome: &RoundOutcome) -> bool {
        self.defender_won == outcome.defender_won
            && self.threats_cured == outcome.threats_cured
            && self.threats_total == outcome.threats_total
            && self.systems_destroyed == outcome.systems_destroyed
            && self.data_leaked == outcome.data_leaked
            && self.score == outcome.score
    }
}

fn overlaps(a: &AssignmentInterval, b: &AssignmentInterval) -> bool {
    a.assigned_at_ms < b.unassigned_at_ms && b.assigned_at_ms < a.unassigned_at_ms
}

/// Check an action log is structurally legitimate.
pub fn verify_action_log(
    log: &[AssignmentInterval],
    threat_count: usize,
    roster_len: usize,
    round_duration_ms: u64,
) -> Result<(), VerifyError> {
    for (entry, interval) in log.iter().enumerate() {
        if interval.responder_index as usize >= roster_len {
            return Err(VerifyError::ResponderOutOfBounds {
                entry,
                index: interval.responder_index,
                roster_len,
            });
        }
        if interval.threat_index as usize >= threat_count {
            return Err(VerifyError::ThreatOutOfBounds {
                entry,
                index: interval.threat_index,
                threat_count,
            });
        }
        if interval.unassigned_at_ms <= interval.assigned_at_ms {
            return Err(VerifyError::EmptyWindow {
                entry,
                assigned_at_ms: interval.assigned_at_ms,
                unassigned_at_ms: interval.unassigned_at_ms,
            });
        }
        if interval.assigned_at_ms > round_duration_ms {
            return Err(VerifyError::AssignedAfterRoundEnd {
                entry,
                assigned_at_ms: interval.assigned_at_ms,
                round_duration_ms,
            });
        }
    }

    for (first, a) in log.iter().enumerate() {
        for (offset, b) in log[first + 1..].iter().enumerate() {
            if !overlaps(a, b) {
                continue;
            }
            let second = first + 1 + offset;
            if a.responder_index == b.responder_index {
                return Err(VerifyError::ResponderDoubleBooked {
                    responder: a.responder_index,
                    first,
                    second,
                });
            }
            if a.threat_index == b.threat_index {
                return Err(VerifyError::ThreatDoubleBooked {
                    threat: a.threat_index,
                    first,
                    second,
                });
            }
        }
    }

    Ok(())
}

/// Re-simulate a round from its inputs and action log.
///
/// The bot and tuning are validated first, so a bad configuration comes back
/// as [`ReplayError::Setup`].
///
/// Runs on the fixed tick grid starting from a clean wave. A threat cures at
/// tick `t` exactly when some log entry covers `t`, otherwise it takes
/// damage. A commit that never locked in leaves no entry, so a later
/// unattended failure of that threat counts as a leak here.
pub fn replay(
    bot: &BotConfiguration,
    seed: &[u8],
    log: &[AssignmentInterval],
    config: &EngineConfig,
) -> Result<ReplaySummary, ReplayError> {
    let threats = generator::generate_with(bot, seed, config)?;
    let responders = roster::generate();
    verify_action_log(
        log,
        threats.len(),
        responders.len(),
        config.round_duration_ms,
    )?;

    let mut state = RoundState::new(
        threats,
        responders,
        bot.victory_condition,
        config.round_duration_ms,
        0,
    );
    let exfiltration = bot.victory_condition == VictoryCondition::DataExfiltration;

    loop {
        let t = state.clock.elapsed_ms + config.tick_ms;
        state.clock.elapsed_ms = t;
        state.clock.tick += 1;

        for threat in state.threats.iter_mut() {
            if threat.is_terminal() || threat.is_dormant(t) {
                continue;
            }

            let curing = log
                .iter()
                .find(|e| e.threat_index == threat.id.0 && e.covers(t));
            threat.assigned_responder = curing.map(|e| ResponderId(e.responder_index));
            let cure_speed = match curing.and_then(|e| state.responders.get(e.responder_index as usize)) {
                Some(dev) => calculate_cure_speed(threat, dev, &config.cure),
                None => 0.0,
            };

            if threat_update::advance(threat, cure_speed, config) == Transition::Failed {
                let engaged = log
                    .iter()
                    .any(|e| e.threat_index == threat.id.0 && e.assigned_at_ms < t);
                if exfiltration && !engaged {
                    state.data_leaked += 1;
                }
            }
        }

        let cured = state.threats.iter().filter(|t| t.is_cured).count() as u32;
        let destroyed = state.threats.iter().filter(|t| t.is_failed).count() as u32;
        let total = state.threats_total();
        let tally = RoundTally {
            systems_destroyed: destroyed,
            data_leaked: state.data_leaked,
            all_resolved: state.all_resolved(),
            remaining_ms: state.remaining_ms(),
            duration_ms: state.duration_ms,
        };

        if let Some((defender_won, end_reason)) =
            victory::evaluate(state.victory_condition, &tally, config)
        {
            return Ok(ReplaySummary {
                defender_won,
                end_reason,
                threats_cured: cured,
                threats_total: total,
                systems_destroyed: destroyed,
                data_leaked: state.data_leaked,
                duration_ms: t,
                score: calculate_score(cured, total, destroyed, t, &config.score),
                accuracy_bps: accuracy_bps(cured, total),
            });
        }
    }
}
