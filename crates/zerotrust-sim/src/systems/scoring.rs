//! Score calculation.

use zerotrust_core::config::ScoreTuning;
use zerotrust_core::constants::ACCURACY_BPS_SCALE;

/// Cured share of the wave in basis points (0-10000).
pub fn accuracy_bps(threats_cured: u32, threats_total: u32) -> u32 {
    if threats_total == 0 {
        return 0;
    }
    let bps = u64::from(threats_cured) * u64::from(ACCURACY_BPS_SCALE) / u64::from(threats_total);
    bps.min(u64::from(ACCURACY_BPS_SCALE)) as u32
}

/// Accuracy plus a capped time bonus minus a flat penalty per destroyed
/// system, floored at zero.
///
/// The time bonus is `baseline * 100 / duration`, where the baseline grants a
/// fixed budget per threat; a zero duration earns the full cap.
pub fn calculate_score(
    threats_cured: u32,
    threats_total: u32,
    systems_destroyed: u32,
    duration_ms: u64,
    tuning: &ScoreTuning,
) -> u32 {
    let accuracy = u64::from(accuracy_bps(threats_cured, threats_total));

    let cap = u64::from(tuning.time_factor_cap);
    let time_factor = if duration_ms == 0 {
        cap
    } else {
        let baseline_ms = u64::from(threats_total) * tuning.baseline_ms_per_threat;
        (baseline_ms * 100 / duration_ms).min(cap)
    };

    let penalty = u64::from(systems_destroyed) * u64::from(tuning.destroyed_penalty);
    let score = (accuracy + time_factor).saturating_sub(penalty);
    score.min(u64::from(u32::MAX)) as u32
}
