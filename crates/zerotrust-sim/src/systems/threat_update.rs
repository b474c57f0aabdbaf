//! Per-threat tick update: commit, cure and damage accrual.
//!
//! Shared by the live tick and by action-log replay so both accrue with
//! the exact same floating-point operations.

use zerotrust_core::components::Threat;
use zerotrust_core::config::EngineConfig;
use zerotrust_core::constants::PROGRESS_MAX;
use zerotrust_core::types::ResponderId;

/// What happened to a threat during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// The commit window elapsed and the responder is now curing.
    LockedIn(ResponderId),
    Cured,
    Failed,
}

/// Advance one active threat by a single tick.
///
/// `cure_speed` is the locked-in responder's cure speed in percent per
/// second and is ignored unless a responder is locked in. Callers skip
/// terminal and dormant threats.
pub fn advance(threat: &mut Threat, cure_speed: f64, config: &EngineConfig) -> Transition {
    let ticks_per_sec = config.ticks_per_sec();

    if let Some(responder) = threat.committing_responder {
        accrue_damage(threat, ticks_per_sec);
        if threat.current_damage >= PROGRESS_MAX {
            fail(threat);
            return Transition::Failed;
        }

        threat.commit_ticks += 1;
        if threat.commit_ticks >= config.commit_ticks {
            threat.assigned_responder = Some(responder);
            clear_commit(threat);
            return Transition::LockedIn(responder);
        }
        threat.commit_progress =
            f64::from(threat.commit_ticks) * PROGRESS_MAX / f64::from(config.commit_ticks);
        return Transition::None;
    }

    if threat.assigned_responder.is_some() {
        threat.cure_progress =
            (threat.cure_progress + cure_speed / ticks_per_sec).clamp(0.0, PROGRESS_MAX);
    } else {
        accrue_damage(threat, ticks_per_sec);
    }

    // Cure first: a threat that completes both in one update is cured.
    if threat.cure_progress >= PROGRESS_MAX {
        threat.cure_progress = PROGRESS_MAX;
        threat.is_cured = true;
        threat.assigned_responder = None;
        Transition::Cured
    } else if threat.current_damage >= PROGRESS_MAX {
        fail(threat);
        Transition::Failed
    } else {
        Transition::None
    }
}

fn accrue_damage(threat: &mut Threat, ticks_per_sec: f64) {
    threat.current_damage =
        (threat.current_damage + threat.damage_rate / ticks_per_sec).clamp(0.0, PROGRESS_MAX);
}

fn fail(threat: &mut Threat) {
    threat.current_damage = PROGRESS_MAX;
    threat.is_failed = true;
    threat.assigned_responder = None;
    clear_commit(threat);
}

fn clear_commit(threat: &mut Threat) {
    threat.committing_responder = None;
    threat.commit_progress = 0.0;
    threat.commit_ticks = 0;
}
