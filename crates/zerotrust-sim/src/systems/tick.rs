//! The per-tick round update.
//!
//! One call advances every active threat, refreshes the counters and the
//! running score, then evaluates the victory condition. A decided round is
//! frozen: open intervals are closed and later calls are no-ops.

use tracing::{debug, info};

use zerotrust_core::config::EngineConfig;
use zerotrust_core::enums::{RoundPhase, VictoryCondition};
use zerotrust_core::events::RoundEvent;
use zerotrust_core::state::{EndReason, RoundState};
use zerotrust_core::types::{ResponderId, ThreatId};

use super::assignment::{calculate_cure_speed, release_responder};
use super::scoring::calculate_score;
use super::threat_update::{self, Transition};
use super::victory::{self, RoundTally};

/// Advance the round to wall-clock time `now_ms`.
///
/// Elapsed time is recomputed from the clock rather than counted, so late or
/// skipped calls do not drift. Does nothing while paused or once terminal.
pub fn run(state: &mut RoundState, now_ms: u64, config: &EngineConfig, events: &mut Vec<RoundEvent>) {
    if state.is_terminal() || state.is_paused() {
        return;
    }

    let previous_ms = state.clock.elapsed_ms;
    let first_tick = state.clock.tick == 0;
    let elapsed_ms = state.clock.elapsed_at(now_ms);
    state.clock.elapsed_ms = elapsed_ms;
    state.clock.tick += 1;

    for index in 0..state.threats.len() {
        let threat = &state.threats[index];
        if threat.is_terminal() || threat.is_dormant(elapsed_ms) {
            continue;
        }

        let id = threat.id;
        if first_tick || threat.spawn_time_ms > previous_ms {
            debug!(threat = %id, elapsed_ms, "threat activated");
            events.push(RoundEvent::ThreatActivated { threat: id });
        }

        let linked = threat.linked_responder();
        let cure_speed = threat
            .assigned_responder
            .and_then(|r| state.responders.get(r.index()))
            .map_or(0.0, |dev| calculate_cure_speed(threat, dev, &config.cure));

        let transition = threat_update::advance(&mut state.threats[index], cure_speed, config);
        match transition {
            Transition::None => {}
            Transition::LockedIn(responder) => {
                state.action_log.open(responder, id, elapsed_ms);
                debug!(%responder, threat = %id, elapsed_ms, "locked in");
                events.push(RoundEvent::LockedIn {
                    responder,
                    threat: id,
                    at_ms: elapsed_ms,
                });
            }
            Transition::Cured => {
                detach(state, linked, id, elapsed_ms, events);
                info!(threat = %id, elapsed_ms, "threat cured");
                events.push(RoundEvent::ThreatCured { threat: id });
            }
            Transition::Failed => {
                detach(state, linked, id, elapsed_ms, events);
                info!(threat = %id, elapsed_ms, "threat failed");
                events.push(RoundEvent::ThreatFailed { threat: id });

                let unattended = !state.threats[index].ever_engaged;
                if state.victory_condition == VictoryCondition::DataExfiltration && unattended {
                    state.data_leaked += 1;
                    events.push(RoundEvent::DataLeaked {
                        threat: id,
                        total: state.data_leaked,
                    });
                }
            }
        }
    }

    state.threats_cured = state.threats.iter().filter(|t| t.is_cured).count() as u32;
    state.systems_destroyed = state.threats.iter().filter(|t| t.is_failed).count() as u32;
    state.score = calculate_score(
        state.threats_cured,
        state.threats_total(),
        state.systems_destroyed,
        elapsed_ms,
        &config.score,
    );

    let tally = RoundTally {
        systems_destroyed: state.systems_destroyed,
        data_leaked: state.data_leaked,
        all_resolved: state.all_resolved(),
        remaining_ms: state.remaining_ms(),
        duration_ms: state.duration_ms,
    };
    if let Some((defender_won, reason)) = victory::evaluate(state.victory_condition, &tally, config) {
        finish(state, defender_won, reason, events);
    }
}

/// Freeze a decided round at the current elapsed time.
pub fn finish(
    state: &mut RoundState,
    defender_won: bool,
    reason: EndReason,
    events: &mut Vec<RoundEvent>,
) {
    let at_ms = state.clock.elapsed_ms;
    for interval in state.action_log.close_all(at_ms) {
        events.push(RoundEvent::Released {
            responder: ResponderId(interval.responder_index),
            threat: ThreatId(interval.threat_index),
            at_ms,
        });
    }

    state.phase = RoundPhase::Complete;
    state.defender_won = Some(defender_won);
    info!(
        defender_won,
        score = state.score,
        elapsed_ms = at_ms,
        reason = %reason,
        "round ended"
    );
    state.end_reason = Some(reason);
    events.push(RoundEvent::RoundEnded { defender_won });
}

/// Release the responder linked to a threat that just resolved.
fn detach(
    state: &mut RoundState,
    linked: Option<ResponderId>,
    threat: ThreatId,
    elapsed_ms: u64,
    events: &mut Vec<RoundEvent>,
) {
    let Some(responder) = linked else {
        return;
    };
    state.action_log.close(responder, threat, elapsed_ms);
    release_responder(state, responder);
    events.push(RoundEvent::Released {
        responder,
        threat,
        at_ms: elapsed_ms,
    });
}
