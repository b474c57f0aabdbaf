//! Victory evaluation, run on post-tick counters.
//!
//! The bot-wins check always runs before the defender-wins fallback, so a
//! threshold reached on the same tick as "all resolved" goes to the bot.

use zerotrust_core::config::EngineConfig;
use zerotrust_core::enums::VictoryCondition;
use zerotrust_core::state::EndReason;

/// Post-tick counters the evaluation looks at.
#[derive(Debug, Clone, Copy)]
pub struct RoundTally {
    pub systems_destroyed: u32,
    pub data_leaked: u32,
    pub all_resolved: bool,
    pub remaining_ms: u64,
    pub duration_ms: u64,
}

/// Returns `Some((defender_won, reason))` once the round is decided.
pub fn evaluate(
    condition: VictoryCondition,
    tally: &RoundTally,
    config: &EngineConfig,
) -> Option<(bool, EndReason)> {
    let time_up = tally.remaining_ms == 0;

    match condition {
        VictoryCondition::TimeSurvival => {
            if time_up {
                Some((
                    false,
                    EndReason::BotSurvived {
                        duration_secs: tally.duration_ms / 1_000,
                    },
                ))
            } else if tally.all_resolved {
                Some((true, EndReason::AllNeutralised))
            } else {
                None
            }
        }
        VictoryCondition::SystemDestruction => {
            let threshold = config.destruction_threshold;
            if tally.systems_destroyed >= threshold {
                Some((
                    false,
                    EndReason::SystemsDestroyed {
                        destroyed: tally.systems_destroyed,
                    },
                ))
            } else if time_up || tally.all_resolved {
                Some((
                    true,
                    EndReason::DestructionHeld {
                        destroyed: tally.systems_destroyed,
                        threshold,
                    },
                ))
            } else {
                None
            }
        }
        VictoryCondition::DataExfiltration => {
            let threshold = config.exfiltration_threshold;
            if tally.data_leaked >= threshold {
                Some((
                    false,
                    EndReason::DataExfiltrated {
                        leaked: tally.data_leaked,
                    },
                ))
            } else if time_up || tally.all_resolved {
                Some((
                    true,
                    EndReason::ExfiltrationStopped {
                        leaked: tally.data_leaked,
                        threshold,
                    },
                ))
            } else {
                None
            }
        }
    }
}
