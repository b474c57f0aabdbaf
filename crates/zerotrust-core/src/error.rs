use thiserror::Error;

use crate::catalog::SystemTargetId;

/// A bot configuration that cannot drive a consistent round.
#[derive(Debug, Error, PartialEq)]
pub enum BotConfigError {
    #[error("threat count {0} outside allowed range {min}..={max}", min = crate::constants::MIN_THREAT_COUNT, max = crate::constants::MAX_THREAT_COUNT)]
    ThreatCountOutOfRange(u32),

    #[error("damage multiplier {0} outside allowed range {min}..={max}", min = crate::constants::MIN_DAMAGE_MULTIPLIER, max = crate::constants::MAX_DAMAGE_MULTIPLIER)]
    DamageMultiplierOutOfRange(f64),

    #[error("{0} secondary targets given, at most {max} allowed", max = crate::constants::MAX_SECONDARY_TARGETS)]
    TooManySecondaryTargets(usize),

    #[error("secondary target {0:?} duplicates the primary target")]
    SecondaryOverlapsPrimary(SystemTargetId),

    #[error("secondary target {0:?} listed more than once")]
    DuplicateSecondaryTarget(SystemTargetId),

    #[error("{0} special abilities given, at most {max} allowed", max = crate::constants::MAX_ABILITIES)]
    TooManyAbilities(usize),
}

/// Engine tuning that cannot be loaded or makes no sense.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
