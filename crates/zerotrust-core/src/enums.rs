//! Enumeration types used throughout the round.

use serde::{Deserialize, Serialize};

/// Rule set deciding which side wins a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryCondition {
    /// Bot wins if any threat is still unresolved when time runs out.
    #[default]
    TimeSurvival,
    /// Bot wins once enough systems are destroyed.
    SystemDestruction,
    /// Bot wins once enough unattended failures leak data.
    DataExfiltration,
}

impl VictoryCondition {
    pub fn label(self) -> &'static str {
        match self {
            VictoryCondition::TimeSurvival => "Time Survival",
            VictoryCondition::SystemDestruction => "System Destruction",
            VictoryCondition::DataExfiltration => "Data Exfiltration",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VictoryCondition::TimeSurvival => "Bot wins if it survives the full round",
            VictoryCondition::SystemDestruction => "Bot wins if it destroys 3+ systems",
            VictoryCondition::DataExfiltration => "Bot wins based on data stolen over time",
        }
    }
}

/// How threat spawn times are spaced across the round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPattern {
    /// Threats appear at regular intervals.
    #[default]
    Steady,
    /// Short fixed spacing; threats cluster near round start.
    Burst,
    /// Gaps shrink as the round goes on.
    Crescendo,
}

/// How many distinct skills each threat requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillDiversity {
    Low,
    #[default]
    Medium,
    High,
}

impl SkillDiversity {
    /// Length of the required-skill prefix taken from the shuffled pool.
    pub fn skill_count(self) -> usize {
        match self {
            SkillDiversity::Low => 2,
            SkillDiversity::Medium => 3,
            SkillDiversity::High => 4,
        }
    }
}

/// Derived per-threat lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatStatus {
    /// Spawn time not yet reached.
    Dormant,
    /// Active, nobody attached. Takes damage.
    Unassigned,
    /// A responder is inside the lock-in window. Still takes damage.
    Committing,
    /// A responder is locked in and curing.
    Locked,
    /// Neutralised. Absorbing.
    Cured,
    /// Reached full damage. Absorbing.
    Failed,
}

impl ThreatStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ThreatStatus::Cured | ThreatStatus::Failed)
    }
}

/// Top-level round phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Active,
    Paused,
    Complete,
}

/// Quality of a responder/threat skill match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchQuality {
    Poor,
    Partial,
    Good,
    Perfect,
}

impl MatchQuality {
    pub fn label(self) -> &'static str {
        match self {
            MatchQuality::Perfect => "Perfect Match",
            MatchQuality::Good => "Good Match",
            MatchQuality::Partial => "Partial Match",
            MatchQuality::Poor => "Poor Match",
        }
    }
}
