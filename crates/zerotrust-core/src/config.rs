//! Engine tuning. Defaults reproduce the standard balance; a TOML file can
//! override any subset of keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Cure-speed step function parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CureTuning {
    /// Percent per second at a full skill match.
    pub perfect: f64,
    pub good: f64,
    pub partial: f64,
    pub poor: f64,
    /// Ratio at or above which a match is good.
    pub good_ratio: f64,
    /// Ratio at or above which a match is partial.
    pub partial_ratio: f64,
}

impl Default for CureTuning {
    fn default() -> Self {
        Self {
            perfect: CURE_SPEED_PERFECT,
            good: CURE_SPEED_GOOD,
            partial: CURE_SPEED_PARTIAL,
            poor: CURE_SPEED_POOR,
            good_ratio: GOOD_MATCH_RATIO,
            partial_ratio: PARTIAL_MATCH_RATIO,
        }
    }
}

/// Score weighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub baseline_ms_per_threat: u64,
    pub time_factor_cap: u32,
    pub destroyed_penalty: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            baseline_ms_per_threat: SCORE_BASELINE_MS_PER_THREAT,
            time_factor_cap: SCORE_TIME_FACTOR_CAP,
            destroyed_penalty: SCORE_DESTROYED_PENALTY,
        }
    }
}

/// Complete engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_ms: u64,
    pub round_duration_ms: u64,
    pub commit_ticks: u32,
    /// Percent per second before the bot's damage multiplier.
    pub base_damage_rate: f64,
    pub primary_target_probability: f64,
    pub steady_interval_ms: u64,
    pub burst_interval_ms: u64,
    pub crescendo_interval_ms: u64,
    pub crescendo_acceleration: f64,
    pub destruction_threshold: u32,
    pub exfiltration_threshold: u32,
    pub cure: CureTuning,
    pub score: ScoreTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            round_duration_ms: ROUND_DURATION_MS,
            commit_ticks: COMMIT_TICKS,
            base_damage_rate: BASE_DAMAGE_RATE,
            primary_target_probability: PRIMARY_TARGET_PROBABILITY,
            steady_interval_ms: STEADY_INTERVAL_MS,
            burst_interval_ms: BURST_INTERVAL_MS,
            crescendo_interval_ms: CRESCENDO_INTERVAL_MS,
            crescendo_acceleration: CRESCENDO_ACCELERATION,
            destruction_threshold: SYSTEM_DESTRUCTION_THRESHOLD,
            exfiltration_threshold: DATA_EXFIL_THRESHOLD,
            cure: CureTuning::default(),
            score: ScoreTuning::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Ticks per second at the configured tick period.
    pub fn ticks_per_sec(&self) -> f64 {
        1_000.0 / self.tick_ms as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be positive"));
        }
        if self.round_duration_ms == 0 {
            return Err(invalid("round_duration_ms", "must be positive"));
        }
        if self.commit_ticks == 0 {
            return Err(invalid("commit_ticks", "must be positive"));
        }
        if !(self.base_damage_rate.is_finite() && self.base_damage_rate > 0.0) {
            return Err(invalid("base_damage_rate", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&self.primary_target_probability) {
            return Err(invalid("primary_target_probability", "must lie in [0, 1]"));
        }
        if !(self.crescendo_acceleration.is_finite() && self.crescendo_acceleration >= 0.0) {
            return Err(invalid("crescendo_acceleration", "must be non-negative"));
        }
        if self.destruction_threshold == 0 {
            return Err(invalid("destruction_threshold", "must be positive"));
        }
        if self.exfiltration_threshold == 0 {
            return Err(invalid("exfiltration_threshold", "must be positive"));
        }
        let speeds = [
            self.cure.perfect,
            self.cure.good,
            self.cure.partial,
            self.cure.poor,
        ];
        if speeds.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(invalid("cure", "speeds must be positive numbers"));
        }
        if !(0.0..=1.0).contains(&self.cure.partial_ratio)
            || !(self.cure.partial_ratio..=1.0).contains(&self.cure.good_ratio)
        {
            return Err(invalid(
                "cure",
                "ratios must satisfy 0 <= partial_ratio <= good_ratio <= 1",
            ));
        }
        Ok(())
    }
}
