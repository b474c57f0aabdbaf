//! Threat generator: `(bot configuration, seed) -> threats`.
//!
//! Pure and deterministic. Every random draw comes from the seeded stream in
//! a fixed order (target draw, then skill shuffle, per threat in index
//! order), so the same inputs always produce the same wave.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use zerotrust_core::bot::BotConfiguration;
use zerotrust_core::catalog::{SystemTargetId, SKILL_POOL};
use zerotrust_core::components::Threat;
use zerotrust_core::config::EngineConfig;
use zerotrust_core::enums::SpawnPattern;
use zerotrust_core::error::BotConfigError;
use zerotrust_core::types::ThreatId;

use crate::engine::SetupError;
use crate::rng::seeded_rng;

/// Generate the threat wave with default tuning.
pub fn generate(bot: &BotConfiguration, seed: &[u8]) -> Result<Vec<Threat>, BotConfigError> {
    bot.validate()?;
    Ok(build(bot, seed, &EngineConfig::default()))
}

/// Generate the threat wave with explicit tuning.
///
/// Fails fast on a malformed configuration or tuning instead of producing
/// an inconsistent wave.
pub fn generate_with(
    bot: &BotConfiguration,
    seed: &[u8],
    config: &EngineConfig,
) -> Result<Vec<Threat>, SetupError> {
    config.validate()?;
    bot.validate()?;
    Ok(build(bot, seed, config))
}

fn build(bot: &BotConfiguration, seed: &[u8], config: &EngineConfig) -> Vec<Threat> {
    let mut rng = seeded_rng(seed);
    let skill_count = bot.skill_diversity.skill_count();
    let damage_rate = config.base_damage_rate * bot.damage_multiplier;

    (0..bot.threat_count)
        .map(|i| {
            let target = pick_target(&mut rng, bot, config.primary_target_probability);
            let mut pool = SKILL_POOL;
            pool.shuffle(&mut rng);

            Threat {
                id: ThreatId(i),
                spawn_time_ms: spawn_time_ms(bot.spawn_pattern, i, config),
                target: target.descriptor(),
                required_skills: pool[..skill_count].to_vec(),
                damage_rate,
                current_damage: 0.0,
                cure_progress: 0.0,
                assigned_responder: None,
                committing_responder: None,
                commit_progress: 0.0,
                commit_ticks: 0,
                ever_engaged: false,
                is_cured: false,
                is_failed: false,
            }
        })
        .collect()
}

/// Spawn offset of threat `index` under `pattern`.
///
/// Steady and burst space threats evenly. Crescendo divides by a growing
/// factor so successive gaps shrink; the sequence stays non-decreasing.
pub fn spawn_time_ms(pattern: SpawnPattern, index: u32, config: &EngineConfig) -> u64 {
    let i = u64::from(index);
    match pattern {
        SpawnPattern::Steady => config.steady_interval_ms * i,
        SpawnPattern::Burst => config.burst_interval_ms * i,
        SpawnPattern::Crescendo => {
            let base = (config.crescendo_interval_ms * i) as f64;
            (base / (1.0 + i as f64 * config.crescendo_acceleration)) as u64
        }
    }
}

fn pick_target(
    rng: &mut ChaCha8Rng,
    bot: &BotConfiguration,
    primary_probability: f64,
) -> SystemTargetId {
    if rng.gen_bool(primary_probability) {
        return bot.primary_target;
    }
    bot.secondary_targets
        .choose(rng)
        .copied()
        .unwrap_or(bot.primary_target)
}
