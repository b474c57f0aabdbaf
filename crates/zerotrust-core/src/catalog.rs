//! Static reference data: skills, system targets, bot types and their
//! display metadata.
//!
//! Pure lookup. Other components compare the ids defined here; nothing in
//! this module carries round state.

use serde::{Deserialize, Serialize};

/// A responder skill. Declaration order is the pool order used by the
/// threat generator's shuffle, so it must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    Python,
    Rust,
    Javascript,
    Network,
    Endpoint,
    Crypto,
    Database,
    Web,
    Forensics,
}

/// The full skill pool, in pool order.
pub const SKILL_POOL: [SkillId; 9] = [
    SkillId::Python,
    SkillId::Rust,
    SkillId::Javascript,
    SkillId::Network,
    SkillId::Endpoint,
    SkillId::Crypto,
    SkillId::Database,
    SkillId::Web,
    SkillId::Forensics,
];

impl SkillId {
    pub fn name(self) -> &'static str {
        match self {
            SkillId::Python => "Python",
            SkillId::Rust => "Rust",
            SkillId::Javascript => "JavaScript",
            SkillId::Network => "Network Security",
            SkillId::Endpoint => "Endpoint Protection",
            SkillId::Crypto => "Cryptography",
            SkillId::Database => "Database Security",
            SkillId::Web => "Web Security",
            SkillId::Forensics => "Forensics",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SkillId::Python => "🐍",
            SkillId::Rust => "⚙️",
            SkillId::Javascript => "📜",
            SkillId::Network => "🕸️",
            SkillId::Endpoint => "🛡️",
            SkillId::Crypto => "🔐",
            SkillId::Database => "📊",
            SkillId::Web => "🌐",
            SkillId::Forensics => "🔍",
        }
    }

    /// Position of this skill in [`SKILL_POOL`].
    pub fn pool_index(self) -> usize {
        self as usize
    }
}

/// A system a threat can attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemTargetId {
    Compute,
    Storage,
    Network,
    Auth,
    Analytics,
    Communication,
    Transaction,
    Api,
    Endpoint,
    Cdn,
    Iot,
}

impl SystemTargetId {
    pub const ALL: [SystemTargetId; 11] = [
        SystemTargetId::Compute,
        SystemTargetId::Storage,
        SystemTargetId::Network,
        SystemTargetId::Auth,
        SystemTargetId::Analytics,
        SystemTargetId::Communication,
        SystemTargetId::Transaction,
        SystemTargetId::Api,
        SystemTargetId::Endpoint,
        SystemTargetId::Cdn,
        SystemTargetId::Iot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SystemTargetId::Compute => "Compute Nodes",
            SystemTargetId::Storage => "Storage Systems",
            SystemTargetId::Network => "Network Devices",
            SystemTargetId::Auth => "Authentication Services",
            SystemTargetId::Analytics => "Analytics Systems",
            SystemTargetId::Communication => "Communication Servers",
            SystemTargetId::Transaction => "Transaction Processors",
            SystemTargetId::Api => "API Gateways",
            SystemTargetId::Endpoint => "User Endpoints",
            SystemTargetId::Cdn => "CDN/Edge Nodes",
            SystemTargetId::Iot => "IoT Devices",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SystemTargetId::Compute => "🖥️",
            SystemTargetId::Storage => "💾",
            SystemTargetId::Network => "🌐",
            SystemTargetId::Auth => "🔐",
            SystemTargetId::Analytics => "📊",
            SystemTargetId::Communication => "💬",
            SystemTargetId::Transaction => "🛒",
            SystemTargetId::Api => "📱",
            SystemTargetId::Endpoint => "🖱️",
            SystemTargetId::Cdn => "🌍",
            SystemTargetId::Iot => "🔌",
        }
    }

    /// Build the descriptor copied onto a threat.
    pub fn descriptor(self) -> TargetDescriptor {
        TargetDescriptor {
            id: self,
            name: self.name().to_string(),
            icon: self.icon().to_string(),
        }
    }
}

/// Target metadata copied from the catalog onto each threat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub id: SystemTargetId,
    pub name: String,
    pub icon: String,
}

/// Attack bot family chosen by the bot author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    Malware,
    Trojan,
    Ransomware,
    Worm,
    Rootkit,
    Spyware,
    Botnet,
    Logicbomb,
}

impl BotType {
    pub fn name(self) -> &'static str {
        match self {
            BotType::Malware => "Malware",
            BotType::Trojan => "Trojan",
            BotType::Ransomware => "Ransomware",
            BotType::Worm => "Worm",
            BotType::Rootkit => "Rootkit",
            BotType::Spyware => "Spyware",
            BotType::Botnet => "Botnet Agent",
            BotType::Logicbomb => "Logic Bomb",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BotType::Malware => "General purpose attack bot - balanced stats",
            BotType::Trojan => "Disguises as legitimate process - harder to detect",
            BotType::Ransomware => "Encrypts data rapidly - high damage rate",
            BotType::Worm => "Self-replicating - spawns multiple threats",
            BotType::Rootkit => "Deep system access - requires advanced skills",
            BotType::Spyware => "Silent data exfiltration - slow but persistent",
            BotType::Botnet => "Coordinated attack - multiple simultaneous threats",
            BotType::Logicbomb => "Delayed activation - sudden burst damage",
        }
    }

    /// Lowercase tag, as used for seed derivation.
    pub fn tag(self) -> &'static str {
        match self {
            BotType::Malware => "malware",
            BotType::Trojan => "trojan",
            BotType::Ransomware => "ransomware",
            BotType::Worm => "worm",
            BotType::Rootkit => "rootkit",
            BotType::Spyware => "spyware",
            BotType::Botnet => "botnet",
            BotType::Logicbomb => "logicbomb",
        }
    }
}

/// Resource-exhaustion flavour of a bot. Carried for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAttack {
    Cpu,
    Memory,
    Bandwidth,
    Disk,
    #[default]
    None,
}

impl ResourceAttack {
    pub fn name(self) -> &'static str {
        match self {
            ResourceAttack::Cpu => "CPU Exhaustion",
            ResourceAttack::Memory => "Memory Leak",
            ResourceAttack::Bandwidth => "Bandwidth Flood",
            ResourceAttack::Disk => "Disk Fill",
            ResourceAttack::None => "None",
        }
    }
}

/// Special ability tag. Carried on the configuration, not simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbility {
    Stealth,
    Mutation,
    Replication,
    Encryption,
    Persistence,
}

impl SpecialAbility {
    pub fn name(self) -> &'static str {
        match self {
            SpecialAbility::Stealth => "Stealth Mode",
            SpecialAbility::Mutation => "Code Mutation",
            SpecialAbility::Replication => "Self-Replication",
            SpecialAbility::Encryption => "Heavy Encryption",
            SpecialAbility::Persistence => "Persistence",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SpecialAbility::Stealth => "Harder to detect - shows fewer symptoms initially",
            SpecialAbility::Mutation => "Changes required skills mid-cure",
            SpecialAbility::Replication => "Spawns additional threats when damaged",
            SpecialAbility::Encryption => "Requires crypto skills to cure",
            SpecialAbility::Persistence => "Harder to fully remove - slow cure rate",
        }
    }
}
