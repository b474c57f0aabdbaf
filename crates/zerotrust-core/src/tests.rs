#[cfg(test)]
mod tests {
    use crate::action_log::ActionLog;
    use crate::bot::BotConfiguration;
    use crate::catalog::*;
    use crate::commands::RoundCommand;
    use crate::components::{AssignmentInterval, Threat};
    use crate::config::EngineConfig;
    use crate::enums::*;
    use crate::error::{BotConfigError, ConfigError};
    use crate::state::EndReason;
    use crate::types::{ResponderId, RoundClock, ThreatId};

    fn sample_bot() -> BotConfiguration {
        BotConfiguration {
            id: Some("bot_1".into()),
            bot_name: "Night Crawler".into(),
            bot_type: BotType::Worm,
            primary_target: SystemTargetId::Compute,
            secondary_targets: vec![SystemTargetId::Storage, SystemTargetId::Api],
            resource_attack: ResourceAttack::Cpu,
            damage_multiplier: 1.5,
            victory_condition: VictoryCondition::SystemDestruction,
            abilities: vec![SpecialAbility::Stealth],
            threat_count: 5,
            spawn_pattern: SpawnPattern::Crescendo,
            skill_diversity: SkillDiversity::High,
        }
    }

    fn sample_threat() -> Threat {
        Threat {
            id: ThreatId(0),
            spawn_time_ms: 5_000,
            target: SystemTargetId::Auth.descriptor(),
            required_skills: vec![SkillId::Rust, SkillId::Crypto],
            damage_rate: 1.2,
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
    }

    // ---- Bot configuration ----

    #[test]
    fn test_bot_config_parses_creator_json() {
        let json = r#"{
            "botName": "Locker",
            "botType": "ransomware",
            "primaryTarget": "storage",
            "secondaryTargets": ["cdn"],
            "resourceAttack": "disk",
            "damageMultiplier": 2.0,
            "victoryCondition": "data_exfiltration",
            "abilities": ["encryption", "persistence"],
            "threatCount": 8,
            "spawnPattern": "burst",
            "skillDiversity": "low"
        }"#;
        let bot: BotConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(bot.bot_type, BotType::Ransomware);
        assert_eq!(bot.primary_target, SystemTargetId::Storage);
        assert_eq!(bot.victory_condition, VictoryCondition::DataExfiltration);
        assert_eq!(bot.spawn_pattern, SpawnPattern::Burst);
        assert_eq!(bot.skill_diversity.skill_count(), 2);
        assert!(bot.id.is_none());
        assert!(bot.validate().is_ok());
    }

    #[test]
    fn test_bot_config_optional_fields_default() {
        let json = r#"{
            "botName": "Minimal",
            "botType": "malware",
            "primaryTarget": "api",
            "damageMultiplier": 1.0,
            "threatCount": 3
        }"#;
        let bot: BotConfiguration = serde_json::from_str(json).unwrap();
        assert!(bot.secondary_targets.is_empty());
        assert_eq!(bot.victory_condition, VictoryCondition::TimeSurvival);
        assert_eq!(bot.spawn_pattern, SpawnPattern::Steady);
        assert_eq!(bot.skill_diversity, SkillDiversity::Medium);
        assert_eq!(bot.resource_attack, ResourceAttack::None);
    }

    #[test]
    fn test_validate_threat_count_bounds() {
        let mut bot = sample_bot();
        bot.threat_count = 2;
        assert_eq!(bot.validate(), Err(BotConfigError::ThreatCountOutOfRange(2)));
        bot.threat_count = 9;
        assert_eq!(bot.validate(), Err(BotConfigError::ThreatCountOutOfRange(9)));
        bot.threat_count = 3;
        assert!(bot.validate().is_ok());
        bot.threat_count = 8;
        assert!(bot.validate().is_ok());
    }

    #[test]
    fn test_validate_damage_multiplier() {
        let mut bot = sample_bot();
        bot.damage_multiplier = 0.4;
        assert!(matches!(
            bot.validate(),
            Err(BotConfigError::DamageMultiplierOutOfRange(_))
        ));
        bot.damage_multiplier = f64::NAN;
        assert!(matches!(
            bot.validate(),
            Err(BotConfigError::DamageMultiplierOutOfRange(_))
        ));
        bot.damage_multiplier = 0.5;
        assert!(bot.validate().is_ok());
    }

    #[test]
    fn test_validate_secondary_targets() {
        let mut bot = sample_bot();
        bot.secondary_targets = vec![SystemTargetId::Compute];
        assert_eq!(
            bot.validate(),
            Err(BotConfigError::SecondaryOverlapsPrimary(SystemTargetId::Compute))
        );

        bot.secondary_targets = vec![SystemTargetId::Iot, SystemTargetId::Iot];
        assert_eq!(
            bot.validate(),
            Err(BotConfigError::DuplicateSecondaryTarget(SystemTargetId::Iot))
        );

        bot.secondary_targets = vec![
            SystemTargetId::Iot,
            SystemTargetId::Cdn,
            SystemTargetId::Api,
        ];
        assert_eq!(
            bot.validate(),
            Err(BotConfigError::TooManySecondaryTargets(3))
        );
    }

    #[test]
    fn test_validate_error_messages_are_descriptive() {
        let mut bot = sample_bot();
        bot.threat_count = 12;
        let message = bot.validate().unwrap_err().to_string();
        assert!(message.contains("12"), "{message}");
        assert!(message.contains("3..=8"), "{message}");
    }

    // ---- Catalog ----

    #[test]
    fn test_skill_pool_order_matches_index() {
        for (i, skill) in SKILL_POOL.iter().enumerate() {
            assert_eq!(skill.pool_index(), i);
        }
        assert_eq!(SKILL_POOL[0], SkillId::Python);
        assert_eq!(SKILL_POOL[8], SkillId::Forensics);
    }

    #[test]
    fn test_target_descriptor_copies_metadata() {
        let d = SystemTargetId::Transaction.descriptor();
        assert_eq!(d.id, SystemTargetId::Transaction);
        assert_eq!(d.name, "Transaction Processors");
        assert!(!d.icon.is_empty());
    }

    // ---- Threat status ----

    #[test]
    fn test_threat_status_progression() {
        let mut threat = sample_threat();
        assert_eq!(threat.status(4_999), ThreatStatus::Dormant);
        assert_eq!(threat.status(5_000), ThreatStatus::Unassigned);

        threat.committing_responder = Some(ResponderId(2));
        assert_eq!(threat.status(6_000), ThreatStatus::Committing);

        threat.committing_responder = None;
        threat.assigned_responder = Some(ResponderId(2));
        assert_eq!(threat.status(6_000), ThreatStatus::Locked);
        assert_eq!(threat.linked_responder(), Some(ResponderId(2)));

        threat.assigned_responder = None;
        threat.is_cured = true;
        assert_eq!(threat.status(6_000), ThreatStatus::Cured);
        assert!(threat.status(6_000).is_terminal());
    }

    #[test]
    fn test_interval_covers_excludes_lock_tick() {
        let interval = AssignmentInterval {
            responder_index: 1,
            threat_index: 0,
            assigned_at_ms: 1_500,
            unassigned_at_ms: 2_000,
        };
        assert!(!interval.covers(1_500));
        assert!(interval.covers(1_600));
        assert!(interval.covers(2_000));
        assert!(!interval.covers(2_100));
        assert_eq!(interval.duration_ms(), 500);
    }

    #[test]
    fn test_interval_serializes_verifier_field_names() {
        let interval = AssignmentInterval {
            responder_index: 3,
            threat_index: 1,
            assigned_at_ms: 100,
            unassigned_at_ms: 900,
        };
        let value = serde_json::to_value(interval).unwrap();
        assert_eq!(value["dev_index"], 3);
        assert_eq!(value["threat_index"], 1);
        assert_eq!(value["unassigned_at_ms"], 900);
    }

    // ---- Clock ----

    #[test]
    fn test_clock_pause_does_not_drain_time() {
        let mut clock = RoundClock::new(10_000);
        assert_eq!(clock.elapsed_at(12_000), 2_000);

        clock.pause(12_000);
        assert!(clock.is_paused());
        assert_eq!(clock.elapsed_at(20_000), 2_000);

        clock.resume(20_000);
        assert!(!clock.is_paused());
        assert_eq!(clock.elapsed_at(21_000), 3_000);
    }

    #[test]
    fn test_clock_double_pause_keeps_first_timestamp() {
        let mut clock = RoundClock::new(0);
        clock.pause(1_000);
        clock.pause(3_000);
        clock.resume(5_000);
        assert_eq!(clock.paused_total_ms, 4_000);
        clock.resume(9_000);
        assert_eq!(clock.paused_total_ms, 4_000);
    }

    // ---- Action log ----

    #[test]
    fn test_action_log_open_close() {
        let mut log = ActionLog::new();
        log.open(ResponderId(0), ThreatId(2), 1_500);
        assert!(log.is_open(ResponderId(0), ThreatId(2)));

        let closed = log.close(ResponderId(0), ThreatId(2), 4_000).unwrap();
        assert_eq!(closed.assigned_at_ms, 1_500);
        assert_eq!(closed.unassigned_at_ms, 4_000);
        assert!(!log.is_open(ResponderId(0), ThreatId(2)));
        assert_eq!(log.entries(), &[closed]);

        // Closing again is a no-op.
        assert!(log.close(ResponderId(0), ThreatId(2), 5_000).is_none());
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn test_action_log_drops_empty_span() {
        let mut log = ActionLog::new();
        log.open(ResponderId(1), ThreatId(0), 2_000);
        assert!(log.close(ResponderId(1), ThreatId(0), 2_000).is_none());
        assert!(log.entries().is_empty());
        assert!(log.open_entries().is_empty());
    }

    #[test]
    fn test_action_log_close_all_in_lock_order() {
        let mut log = ActionLog::new();
        log.open(ResponderId(4), ThreatId(1), 1_000);
        log.open(ResponderId(2), ThreatId(0), 2_000);
        let closed = log.close_all(9_000);
        assert_eq!(closed.len(), 2);
        assert_eq!(closed[0].responder_index, 4);
        assert_eq!(closed[1].responder_index, 2);
        assert!(log.open_entries().is_empty());
        assert!(closed.iter().all(|c| c.unassigned_at_ms == 9_000));
    }

    // ---- Tuning ----

    #[test]
    fn test_engine_config_partial_toml_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            commit_ticks = 10
            round_duration_ms = 60000

            [cure]
            perfect = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.commit_ticks, 10);
        assert_eq!(config.round_duration_ms, 60_000);
        assert_eq!(config.cure.perfect, 4.0);
        assert_eq!(config.cure.poor, 0.5);
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.score.destroyed_penalty, 50);
    }

    #[test]
    fn test_engine_config_rejects_zero_tick() {
        let err = EngineConfig::from_toml_str("tick_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tick_ms", .. }));
    }

    #[test]
    fn test_engine_config_rejects_bad_probability() {
        let err = EngineConfig::from_toml_str("primary_target_probability = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "primary_target_probability",
                ..
            }
        ));
    }

    #[test]
    fn test_engine_config_rejects_malformed_toml() {
        let err = EngineConfig::from_toml_str("commit_ticks = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ticks_per_sec(), 10.0);
    }

    // ---- Commands / reasons ----

    #[test]
    fn test_round_command_tagged_json() {
        let json = r#"{"type":"Assign","responder":3,"threat":1}"#;
        let cmd: RoundCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            RoundCommand::Assign {
                responder: ResponderId(3),
                threat: ThreatId(1),
            }
        );
    }

    #[test]
    fn test_end_reason_messages() {
        assert_eq!(
            EndReason::BotSurvived { duration_secs: 90 }.to_string(),
            "The bot survived all 90s, bot wins"
        );
        assert_eq!(
            EndReason::SystemsDestroyed { destroyed: 3 }.to_string(),
            "3 systems destroyed, bot wins"
        );
        assert!(EndReason::DestructionHeld {
            destroyed: 1,
            threshold: 3
        }
        .to_string()
        .contains("1/3"));
    }
}
