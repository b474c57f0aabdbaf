//! Responder pool: the fixed defending roster.
//!
//! Responders never vary between rounds. Only threats do, so outcome
//! variance comes from the defender, not from the roster.

use zerotrust_core::catalog::SkillId;
use zerotrust_core::catalog::SkillId::*;
use zerotrust_core::components::Responder;
use zerotrust_core::types::ResponderId;

/// (name, avatar, skills) for every responder, in roster order.
const ROSTER: [(&str, &str, [SkillId; 3]); 10] = [
    ("Alice", "👩‍💻", [Python, Network, Crypto]),
    ("Bob", "👨‍💻", [Rust, Endpoint, Database]),
    ("Charlie", "🧑‍💻", [Javascript, Web, Forensics]),
    ("Diana", "👩‍🔬", [Crypto, Python, Forensics]),
    ("Eve", "👨‍🔬", [Network, Endpoint, Web]),
    ("Frank", "🧑‍🔬", [Database, Rust, Python]),
    ("Grace", "👩‍🚀", [Web, Javascript, Database]),
    ("Hiro", "👨‍🚀", [Forensics, Network, Rust]),
    ("Iris", "🧑‍🚀", [Endpoint, Crypto, Javascript]),
    ("Jin", "🧑‍🔧", [Python, Database, Web]),
];

/// Number of responders in the roster.
pub const ROSTER_SIZE: usize = ROSTER.len();

/// Build the roster with every responder unassigned.
pub fn generate() -> Vec<Responder> {
    ROSTER
        .iter()
        .enumerate()
        .map(|(i, (name, avatar, skills))| Responder {
            id: ResponderId(i as u32),
            name: (*name).to_string(),
            avatar: (*avatar).to_string(),
            skills: skills.to_vec(),
            is_assigned: false,
            assigned_to_threat: None,
        })
        .collect()
}
