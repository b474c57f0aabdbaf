use std::time::Duration;

use tracing::{debug, error, info, warn};

use zerotrust_app::autopilot;
use zerotrust_app::bot_source::{BotSource, JsonBotStore};
use zerotrust_app::config::AppConfig;
use zerotrust_app::error::AppError;
use zerotrust_app::journal;
use zerotrust_app::round_loop::spawn_round_loop;
use zerotrust_app::seed;
use zerotrust_app::sink::{JsonFileSink, ResultSink, TracingSink};
use zerotrust_core::bot::BotConfiguration;
use zerotrust_core::state::RoundOutcome;
use zerotrust_sim::systems::assignment::match_quality;
use zerotrust_sim::RoundEngine;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run(AppConfig::load()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: AppConfig) -> Result<(), AppError> {
    let store = JsonBotStore::new(&config.bots_path);
    let bot = pick_bot(&store, config.bot_id.as_deref())?;
    let tuning = config.engine_config()?;
    let cure = tuning.cure.clone();

    let seed_hex = seed::derive_seed(config.player_key.as_deref(), bot.bot_type);
    info!(bot = %bot.bot_name, seed = %seed_hex, "starting round");

    let mut sinks: Vec<Box<dyn ResultSink + Send>> = vec![Box::new(TracingSink)];
    if let Some(path) = &config.outcome_path {
        sinks.push(Box::new(JsonFileSink::new(path)));
    }

    let engine = RoundEngine::new(&bot, seed_hex.as_bytes(), tuning, 0)?;
    let handle = spawn_round_loop(engine, Box::new(sinks))?;

    while !handle.is_finished() {
        std::thread::sleep(POLL_INTERVAL);
        let Some(state) = handle.latest() else {
            continue;
        };
        let elapsed_ms = state.clock.elapsed_at(handle.now_ms());
        if let Some((responder, threat)) = autopilot::next_assignment(&state, elapsed_ms, &cure) {
            let quality = match_quality(
                &state.threats[threat.index()],
                &state.responders[responder.index()],
                &cure,
            );
            debug!(%responder, %threat, quality = quality.label(), "autopilot assignment");
            // The loop may have finished since the last check.
            if handle.assign(responder, threat).is_err() {
                break;
            }
        }
    }

    let final_state = handle.latest();
    let Some(outcome) = handle.join()? else {
        warn!("round ended without an outcome");
        return Ok(());
    };

    if let (Some(id), Some(state)) = (bot.id.as_deref(), final_state) {
        let threats = state.threats.len().max(1) as f64;
        let damage = state.threats.iter().map(|t| t.current_damage).sum::<f64>() / threats;
        store.record_play(id, damage)?;
    }

    log_journal(&config, &bot, &seed_hex, &outcome);
    Ok(())
}

/// The configured bot, or the first stored one.
fn pick_bot(store: &JsonBotStore, bot_id: Option<&str>) -> Result<BotConfiguration, AppError> {
    match bot_id {
        Some(id) => store.get(id),
        None => store.list()?.into_iter().next().ok_or(AppError::NoBots),
    }
}

/// Journal bytes need a 32-byte hex player key and a numeric bot id.
fn log_journal(config: &AppConfig, bot: &BotConfiguration, seed_hex: &str, outcome: &RoundOutcome) {
    let player_key = config
        .player_key
        .as_deref()
        .and_then(|key| hex::decode(key).ok())
        .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok());
    let bot_id = bot
        .id
        .as_deref()
        .and_then(|id| id.strip_prefix("bot_").unwrap_or(id).parse::<u32>().ok());
    let challenge_id = seed::challenge_id(seed_hex);

    if let (Some(player_key), Some(bot_id), Some(challenge_id)) = (player_key, bot_id, challenge_id) {
        let bytes = journal::encode(challenge_id, player_key, bot_id, outcome);
        info!(journal = %hex::encode(bytes), "round journal");
    }
}
