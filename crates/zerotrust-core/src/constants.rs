//! Round constants and balance parameters.
//!
//! These are the defaults behind [`crate::config::EngineConfig`]; the engine
//! reads the config, never these constants directly.

/// Tick period in milliseconds.
pub const TICK_MS: u64 = 100;

/// Round length in milliseconds (90 seconds).
pub const ROUND_DURATION_MS: u64 = 90_000;

/// Ticks a commit must last before the responder locks in (1.5 s).
pub const COMMIT_TICKS: u32 = 15;

// --- Threat generation ---

/// Base damage rate in percent per second, before the bot's multiplier.
pub const BASE_DAMAGE_RATE: f64 = 1.2;

/// Probability that a threat hits the primary target.
pub const PRIMARY_TARGET_PROBABILITY: f64 = 0.7;

/// Spawn spacing for the `steady` pattern (ms).
pub const STEADY_INTERVAL_MS: u64 = 8_000;

/// Spawn spacing for the `burst` pattern (ms).
pub const BURST_INTERVAL_MS: u64 = 3_000;

/// Base spacing for the `crescendo` pattern (ms).
pub const CRESCENDO_INTERVAL_MS: u64 = 12_000;

/// Crescendo acceleration: spawn(i) = base * i / (1 + i * factor).
pub const CRESCENDO_ACCELERATION: f64 = 0.15;

/// Allowed range for `BotConfiguration::threat_count`.
pub const MIN_THREAT_COUNT: u32 = 3;
pub const MAX_THREAT_COUNT: u32 = 8;

/// Allowed range for `BotConfiguration::damage_multiplier`.
pub const MIN_DAMAGE_MULTIPLIER: f64 = 0.5;
pub const MAX_DAMAGE_MULTIPLIER: f64 = 2.0;

/// Maximum number of secondary targets.
pub const MAX_SECONDARY_TARGETS: usize = 2;

/// Maximum number of special abilities.
pub const MAX_ABILITIES: usize = 5;

// --- Cure speeds (percent per second) ---

pub const CURE_SPEED_PERFECT: f64 = 3.0;
pub const CURE_SPEED_GOOD: f64 = 2.0;
pub const CURE_SPEED_PARTIAL: f64 = 1.0;
pub const CURE_SPEED_POOR: f64 = 0.5;

/// Match ratio at or above which a match counts as "good".
pub const GOOD_MATCH_RATIO: f64 = 0.66;

/// Match ratio at or above which a match counts as "partial".
pub const PARTIAL_MATCH_RATIO: f64 = 0.33;

// --- Victory ---

/// Destroyed systems at which the bot wins a `system_destruction` round.
pub const SYSTEM_DESTRUCTION_THRESHOLD: u32 = 3;

/// Leaked data units at which the bot wins a `data_exfiltration` round.
pub const DATA_EXFIL_THRESHOLD: u32 = 3;

// --- Scoring ---

/// Baseline time budget per threat for the time bonus (ms).
pub const SCORE_BASELINE_MS_PER_THREAT: u64 = 8_000;

/// Cap on the time factor (2x baseline-to-actual, in hundredths).
pub const SCORE_TIME_FACTOR_CAP: u32 = 200;

/// Points subtracted per destroyed system.
pub const SCORE_DESTROYED_PENALTY: u32 = 50;

/// Accuracy scale: cured/total expressed in basis points.
pub const ACCURACY_BPS_SCALE: u32 = 10_000;

/// Upper bound on damage and cure progress.
pub const PROGRESS_MAX: f64 = 100.0;
