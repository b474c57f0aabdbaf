//! Bot configuration sources.
//!
//! The engine only needs immutable configurations with stable ids; where they
//! come from is up to the source. `JsonBotStore` keeps saved bots in a JSON
//! file, `MemoryBotSource` serves a fixed list.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use zerotrust_core::bot::BotConfiguration;

use crate::error::AppError;

/// Supplies bot configurations by id.
pub trait BotSource {
    /// Every available configuration, each carrying its id.
    fn list(&self) -> Result<Vec<BotConfiguration>, AppError>;

    fn get(&self, id: &str) -> Result<BotConfiguration, AppError> {
        self.list()?
            .into_iter()
            .find(|bot| bot.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::UnknownBot(id.to_string()))
    }
}

/// A stored bot plus its play statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBot {
    #[serde(flatten)]
    pub config: BotConfiguration,
    #[serde(default = "default_creator")]
    pub creator_name: String,
    #[serde(default)]
    pub times_played: u32,
    /// Running mean of damage dealt per round.
    #[serde(default)]
    pub avg_damage_dealt: f64,
}

fn default_creator() -> String {
    "Anonymous".to_string()
}

/// Saved bots in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonBotStore {
    path: PathBuf,
}

impl JsonBotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored record. An unreadable store is logged and read as empty.
    pub fn records(&self) -> Vec<SavedBot> {
        self.try_records().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "failed to read bot store: {e}");
            Vec::new()
        })
    }

    /// Every stored record. A missing file is an empty store; anything else
    /// that fails to load is an error, so writes never clobber a store they
    /// could not parse.
    pub fn try_records(&self) -> Result<Vec<SavedBot>, AppError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Insert or replace a bot, keyed by id. A bot without an id gets one.
    ///
    /// Replacing keeps the stored play statistics.
    pub fn save(&self, mut config: BotConfiguration) -> Result<SavedBot, AppError> {
        config.validate().map_err(|e| AppError::Setup(e.into()))?;
        let mut records = self.try_records()?;

        let id = match config.id.clone() {
            Some(id) => id,
            None => next_id(&records),
        };
        config.id = Some(id.clone());

        let saved = match records.iter_mut().find(|r| r.config.id.as_deref() == Some(&id)) {
            Some(existing) => {
                existing.config = config;
                existing.clone()
            }
            None => {
                let saved = SavedBot {
                    config,
                    creator_name: default_creator(),
                    times_played: 0,
                    avg_damage_dealt: 0.0,
                };
                records.push(saved.clone());
                saved
            }
        };

        self.write(&records)?;
        debug!(%id, "bot saved");
        Ok(saved)
    }

    /// Remove a bot. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut records = self.try_records()?;
        let before = records.len();
        records.retain(|r| r.config.id.as_deref() != Some(id));
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }

    /// Fold one finished round into a bot's statistics.
    pub fn record_play(&self, id: &str, damage_dealt: f64) -> Result<(), AppError> {
        let mut records = self.try_records()?;
        let record = records
            .iter_mut()
            .find(|r| r.config.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::UnknownBot(id.to_string()))?;

        record.times_played += 1;
        let n = f64::from(record.times_played);
        record.avg_damage_dealt = (record.avg_damage_dealt * (n - 1.0) + damage_dealt) / n;
        self.write(&records)
    }

    fn write(&self, records: &[SavedBot]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// First free `bot_N` id.
fn next_id(records: &[SavedBot]) -> String {
    let mut n = records.len() + 1;
    loop {
        let candidate = format!("bot_{n}");
        if !records.iter().any(|r| r.config.id.as_deref() == Some(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

impl BotSource for JsonBotStore {
    fn list(&self) -> Result<Vec<BotConfiguration>, AppError> {
        Ok(self.records().into_iter().map(|r| r.config).collect())
    }
}

/// A fixed in-memory list of bots.
#[derive(Debug, Clone, Default)]
pub struct MemoryBotSource {
    bots: Vec<BotConfiguration>,
}

impl MemoryBotSource {
    pub fn new(bots: Vec<BotConfiguration>) -> Self {
        Self { bots }
    }
}

impl BotSource for MemoryBotSource {
    fn list(&self) -> Result<Vec<BotConfiguration>, AppError> {
        Ok(self.bots.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerotrust_core::catalog::{BotType, SystemTargetId};

    fn sample(id: Option<&str>) -> BotConfiguration {
        let json = r#"{
            "botName": "Night Crawler",
            "botType": "rootkit",
            "primaryTarget": "auth",
            "secondaryTargets": ["api"],
            "damageMultiplier": 1.4,
            "victoryCondition": "system_destruction",
            "threatCount": 5,
            "spawnPattern": "burst",
            "skillDiversity": "high"
        }"#;
        let mut bot: BotConfiguration = serde_json::from_str(json).unwrap();
        bot.id = id.map(str::to_string);
        bot
    }

    fn temp_store(name: &str) -> JsonBotStore {
        let path = std::env::temp_dir().join(format!(
            "zerotrust-{name}-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        JsonBotStore::new(path)
    }

    #[test]
    fn test_missing_store_is_empty() {
        let store = temp_store("missing");
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.get("bot_1"), Err(AppError::UnknownBot(_))));
    }

    #[test]
    fn test_save_assigns_ids_and_upserts() {
        let store = temp_store("upsert");
        let first = store.save(sample(None)).unwrap();
        let second = store.save(sample(None)).unwrap();
        assert_eq!(first.config.id.as_deref(), Some("bot_1"));
        assert_eq!(second.config.id.as_deref(), Some("bot_2"));

        let mut renamed = sample(Some("bot_1"));
        renamed.bot_name = "Renamed".into();
        store.save(renamed).unwrap();

        let bots = store.list().unwrap();
        assert_eq!(bots.len(), 2);
        let bot = store.get("bot_1").unwrap();
        assert_eq!(bot.bot_name, "Renamed");
        assert_eq!(bot.bot_type, BotType::Rootkit);
        assert_eq!(bot.primary_target, SystemTargetId::Auth);

        assert!(store.delete("bot_2").unwrap());
        assert!(!store.delete("bot_2").unwrap());
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_save_rejects_invalid_bot() {
        let store = temp_store("invalid");
        let mut bot = sample(None);
        bot.threat_count = 12;
        assert!(matches!(store.save(bot), Err(AppError::Setup(_))));
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_record_play_keeps_running_average() {
        let store = temp_store("stats");
        store.save(sample(Some("crawler"))).unwrap();
        store.record_play("crawler", 40.0).unwrap();
        store.record_play("crawler", 80.0).unwrap();

        let record = store
            .records()
            .into_iter()
            .find(|r| r.config.id.as_deref() == Some("crawler"))
            .unwrap();
        assert_eq!(record.times_played, 2);
        assert!((record.avg_damage_dealt - 60.0).abs() < 1e-9);
        assert_eq!(record.creator_name, "Anonymous");
        assert!(matches!(
            store.record_play("ghost", 1.0),
            Err(AppError::UnknownBot(_))
        ));
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_malformed_store_reads_as_empty() {
        let store = temp_store("malformed");
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.list().unwrap().is_empty());
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_writes_refuse_malformed_store() {
        let store = temp_store("partial");
        store.save(sample(Some("keep"))).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();

        // Second record lacks threatCount.
        let broken = text.trim_end().trim_end_matches(']').to_string()
            + r#", {"id": "broken", "botName": "Half", "botType": "worm", "primaryTarget": "api"}]"#;
        std::fs::write(store.path(), &broken).unwrap();

        assert!(matches!(store.save(sample(None)), Err(AppError::Json(_))));
        assert!(matches!(store.delete("keep"), Err(AppError::Json(_))));
        assert!(matches!(store.record_play("keep", 10.0), Err(AppError::Json(_))));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), broken);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_memory_source_lookup() {
        let source = MemoryBotSource::new(vec![sample(Some("a")), sample(Some("b"))]);
        assert_eq!(source.list().unwrap().len(), 2);
        assert_eq!(source.get("b").unwrap().id.as_deref(), Some("b"));
        assert!(source.get("c").is_err());
    }
}
