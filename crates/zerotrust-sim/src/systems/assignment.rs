//! Assignment controller: responder -> threat (re)assignment requests,
//! cure-speed and match-quality calculation.

use std::fmt;

use tracing::debug;

use zerotrust_core::components::{Responder, Threat};
use zerotrust_core::config::CureTuning;
use zerotrust_core::enums::MatchQuality;
use zerotrust_core::events::RoundEvent;
use zerotrust_core::state::RoundState;
use zerotrust_core::types::{ResponderId, ThreatId};

/// Why an assignment request was ignored.
///
/// Rejections are values, not errors: the round state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignRejection {
    RoundOver,
    UnknownThreat,
    UnknownResponder,
    ThreatDormant,
    ThreatResolved,
    /// The threat already has a committing or locked-in responder.
    ThreatEngaged,
}

impl fmt::Display for AssignRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AssignRejection::RoundOver => "round is over",
            AssignRejection::UnknownThreat => "unknown threat",
            AssignRejection::UnknownResponder => "unknown responder",
            AssignRejection::ThreatDormant => "threat has not spawned yet",
            AssignRejection::ThreatResolved => "threat already resolved",
            AssignRejection::ThreatEngaged => "threat already has a responder",
        };
        f.write_str(text)
    }
}

/// Fraction of the threat's required skills the responder covers.
pub fn match_ratio(threat: &Threat, responder: &Responder) -> f64 {
    if threat.required_skills.is_empty() {
        return 1.0;
    }
    let matched = threat
        .required_skills
        .iter()
        .filter(|skill| responder.has_skill(**skill))
        .count();
    matched as f64 / threat.required_skills.len() as f64
}

pub fn match_quality(threat: &Threat, responder: &Responder, tuning: &CureTuning) -> MatchQuality {
    let ratio = match_ratio(threat, responder);
    if ratio >= 1.0 {
        MatchQuality::Perfect
    } else if ratio >= tuning.good_ratio {
        MatchQuality::Good
    } else if ratio >= tuning.partial_ratio {
        MatchQuality::Partial
    } else {
        MatchQuality::Poor
    }
}

/// Cure speed in percent per second: a step function of the match ratio.
pub fn calculate_cure_speed(threat: &Threat, responder: &Responder, tuning: &CureTuning) -> f64 {
    match match_quality(threat, responder, tuning) {
        MatchQuality::Perfect => tuning.perfect,
        MatchQuality::Good => tuning.good,
        MatchQuality::Partial => tuning.partial,
        MatchQuality::Poor => tuning.poor,
    }
}

/// Apply an assignment request at elapsed round time `elapsed_ms`.
///
/// On success the responder's previous link is broken (closing its action-log
/// interval if it had locked in) and a fresh commit starts on the target.
/// On rejection nothing is modified.
pub fn request_assign(
    state: &mut RoundState,
    responder: ResponderId,
    threat: ThreatId,
    elapsed_ms: u64,
    events: &mut Vec<RoundEvent>,
) -> Result<(), AssignRejection> {
    if let Err(rejection) = check_request(state, responder, threat, elapsed_ms) {
        debug!(%responder, %threat, %rejection, "assignment ignored");
        return Err(rejection);
    }

    if let Some(previous) = state.responders[responder.index()].assigned_to_threat {
        break_link(state, responder, previous, elapsed_ms, events);
    }

    let target = &mut state.threats[threat.index()];
    target.committing_responder = Some(responder);
    target.commit_progress = 0.0;
    target.commit_ticks = 0;
    target.ever_engaged = true;

    let dev = &mut state.responders[responder.index()];
    dev.is_assigned = true;
    dev.assigned_to_threat = Some(threat);

    debug!(%responder, %threat, elapsed_ms, "commit started");
    events.push(RoundEvent::CommitStarted { responder, threat });
    Ok(())
}

fn check_request(
    state: &RoundState,
    responder: ResponderId,
    threat: ThreatId,
    elapsed_ms: u64,
) -> Result<(), AssignRejection> {
    if state.is_terminal() {
        return Err(AssignRejection::RoundOver);
    }
    let target = state.threat(threat).ok_or(AssignRejection::UnknownThreat)?;
    state
        .responder(responder)
        .ok_or(AssignRejection::UnknownResponder)?;
    if target.is_terminal() {
        return Err(AssignRejection::ThreatResolved);
    }
    if target.is_dormant(elapsed_ms) {
        return Err(AssignRejection::ThreatDormant);
    }
    if target.linked_responder().is_some() {
        return Err(AssignRejection::ThreatEngaged);
    }
    Ok(())
}

/// Detach `responder` from `threat`, closing the interval of a completed
/// lock. A commit that never locked in leaves no trace in the log.
fn break_link(
    state: &mut RoundState,
    responder: ResponderId,
    threat: ThreatId,
    elapsed_ms: u64,
    events: &mut Vec<RoundEvent>,
) {
    if let Some(prior) = state.threats.get_mut(threat.index()) {
        if prior.assigned_responder == Some(responder) {
            prior.assigned_responder = None;
            state.action_log.close(responder, threat, elapsed_ms);
            events.push(RoundEvent::Released {
                responder,
                threat,
                at_ms: elapsed_ms,
            });
        } else if prior.committing_responder == Some(responder) {
            prior.committing_responder = None;
            prior.commit_progress = 0.0;
            prior.commit_ticks = 0;
        }
    }
    release_responder(state, responder);
}

/// Clear a responder's reverse link.
pub fn release_responder(state: &mut RoundState, responder: ResponderId) {
    if let Some(dev) = state.responders.get_mut(responder.index()) {
        dev.is_assigned = false;
        dev.assigned_to_threat = None;
        debug!(%responder, "responder released");
    }
}
