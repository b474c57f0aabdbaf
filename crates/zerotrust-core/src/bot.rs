//! Bot configurations: the attacker-authored parameters a round is
//! generated from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{BotType, ResourceAttack, SpecialAbility, SystemTargetId};
use crate::constants::*;
use crate::enums::{SkillDiversity, SpawnPattern, VictoryCondition};
use crate::error::BotConfigError;

/// Immutable bot configuration, as supplied by a bot source.
///
/// Field names follow the camelCase layout written by the bot creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfiguration {
    /// Stable identifier assigned by the source (local id or token id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub bot_name: String,
    pub bot_type: BotType,
    pub primary_target: SystemTargetId,
    #[serde(default)]
    pub secondary_targets: Vec<SystemTargetId>,
    #[serde(default)]
    pub resource_attack: ResourceAttack,
    /// Multiplier on the base damage rate, 0.5 to 2.0.
    pub damage_multiplier: f64,
    #[serde(default)]
    pub victory_condition: VictoryCondition,
    #[serde(default)]
    pub abilities: Vec<SpecialAbility>,
    /// Number of threats in the round, 3 to 8.
    pub threat_count: u32,
    #[serde(default)]
    pub spawn_pattern: SpawnPattern,
    #[serde(default)]
    pub skill_diversity: SkillDiversity,
}

impl BotConfiguration {
    /// Check every constraint the threat generator relies on.
    pub fn validate(&self) -> Result<(), BotConfigError> {
        if !(MIN_THREAT_COUNT..=MAX_THREAT_COUNT).contains(&self.threat_count) {
            return Err(BotConfigError::ThreatCountOutOfRange(self.threat_count));
        }

        // NaN fails the range check too.
        if !(MIN_DAMAGE_MULTIPLIER..=MAX_DAMAGE_MULTIPLIER).contains(&self.damage_multiplier) {
            return Err(BotConfigError::DamageMultiplierOutOfRange(
                self.damage_multiplier,
            ));
        }

        if self.secondary_targets.len() > MAX_SECONDARY_TARGETS {
            return Err(BotConfigError::TooManySecondaryTargets(
                self.secondary_targets.len(),
            ));
        }

        let mut seen = HashSet::new();
        for &target in &self.secondary_targets {
            if target == self.primary_target {
                return Err(BotConfigError::SecondaryOverlapsPrimary(target));
            }
            if !seen.insert(target) {
                return Err(BotConfigError::DuplicateSecondaryTarget(target));
            }
        }

        if self.abilities.len() > MAX_ABILITIES {
            return Err(BotConfigError::TooManyAbilities(self.abilities.len()));
        }

        Ok(())
    }
}
