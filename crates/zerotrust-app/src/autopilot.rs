//! Greedy headless defender.

use zerotrust_core::components::{Responder, Threat};
use zerotrust_core::config::CureTuning;
use zerotrust_core::state::RoundState;
use zerotrust_core::types::{ResponderId, ThreatId};
use zerotrust_sim::systems::assignment::calculate_cure_speed;

/// Pick the next assignment: the most-damaged active threat nobody is on,
/// paired with the free responder that cures it fastest. Ties go to the
/// lowest index.
pub fn next_assignment(
    state: &RoundState,
    elapsed_ms: u64,
    tuning: &CureTuning,
) -> Option<(ResponderId, ThreatId)> {
    if state.is_terminal() {
        return None;
    }

    let threat = state
        .threats
        .iter()
        .filter(|t| !t.is_terminal() && !t.is_dormant(elapsed_ms) && t.linked_responder().is_none())
        .fold(None, |best: Option<&Threat>, t| match best {
            Some(b) if b.current_damage >= t.current_damage => Some(b),
            _ => Some(t),
        })?;

    let responder = state
        .responders
        .iter()
        .filter(|r| !r.is_assigned)
        .fold(None, |best: Option<(&Responder, f64)>, r| {
            let speed = calculate_cure_speed(threat, r, tuning);
            match best {
                Some((b, s)) if s >= speed => Some((b, s)),
                _ => Some((r, speed)),
            }
        })?
        .0;

    Some((responder.id, threat.id))
}
