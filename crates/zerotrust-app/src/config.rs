//! Application configuration, loaded from environment variables and CLI flags.

use std::path::PathBuf;

use zerotrust_core::config::EngineConfig;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON file holding saved bot configurations.
    pub bots_path: PathBuf,
    /// Bot to play against. Defaults to the first stored bot.
    pub bot_id: Option<String>,
    /// Player key used to derive the round seed.
    pub player_key: Option<String>,
    /// Optional TOML file overriding engine tuning.
    pub tuning_path: Option<PathBuf>,
    /// Where to write the outcome and action log as JSON.
    pub outcome_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `ZEROTRUST_BOTS` - bot store path (default: `bots.json`)
    /// - `ZEROTRUST_BOT_ID` - bot id to play
    /// - `ZEROTRUST_PLAYER` - player key for seed derivation
    /// - `ZEROTRUST_TUNING` - engine tuning TOML file
    /// - `ZEROTRUST_OUTCOME` - outcome JSON output path
    ///
    /// CLI flags `--bots`, `--bot`, `--player`, `--tuning` and `--outcome`
    /// take precedence over the matching variables.
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from explicit arguments and an env lookup.
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let value = |flag: &str, key: &str| Self::parse_cli_value(args, flag).or_else(|| env(key));

        AppConfig {
            bots_path: value("--bots", "ZEROTRUST_BOTS")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("bots.json")),
            bot_id: value("--bot", "ZEROTRUST_BOT_ID"),
            player_key: value("--player", "ZEROTRUST_PLAYER"),
            tuning_path: value("--tuning", "ZEROTRUST_TUNING").map(PathBuf::from),
            outcome_path: value("--outcome", "ZEROTRUST_OUTCOME").map(PathBuf::from),
        }
    }

    /// Engine tuning: the tuning file if configured, defaults otherwise.
    pub fn engine_config(&self) -> Result<EngineConfig, AppError> {
        match &self.tuning_path {
            Some(path) => Ok(EngineConfig::load(path)?),
            None => Ok(EngineConfig::default()),
        }
    }

    /// Parse a CLI flag value like `--bot bot_3`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_sources(&args(&["zerotrust"]), |_| None);
        assert_eq!(config.bots_path, PathBuf::from("bots.json"));
        assert_eq!(config.bot_id, None);
        assert_eq!(config.tuning_path, None);
        assert_eq!(config.engine_config().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_cli_overrides_env() {
        let env: HashMap<&str, &str> = [
            ("ZEROTRUST_BOT_ID", "bot_1"),
            ("ZEROTRUST_PLAYER", "env-player"),
            ("ZEROTRUST_OUTCOME", "out.json"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_sources(
            &args(&["zerotrust", "--bot", "bot_7", "--bots", "/tmp/store.json"]),
            |key| env.get(key).map(|v| v.to_string()),
        );
        assert_eq!(config.bot_id.as_deref(), Some("bot_7"));
        assert_eq!(config.player_key.as_deref(), Some("env-player"));
        assert_eq!(config.bots_path, PathBuf::from("/tmp/store.json"));
        assert_eq!(config.outcome_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_missing_tuning_file_errors() {
        let config = AppConfig::from_sources(
            &args(&["zerotrust", "--tuning", "/nonexistent/zerotrust-tuning.toml"]),
            |_| None,
        );
        assert!(matches!(config.engine_config(), Err(AppError::Tuning(_))));
    }
}
