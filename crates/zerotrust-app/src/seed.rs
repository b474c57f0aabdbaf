//! Round seed derivation.
//!
//! The seed is stable for a (player, bot type) pair so a verifier can
//! rebuild the exact wave the player faced.

use sha2::{Digest, Sha256};

use zerotrust_core::catalog::BotType;

/// Seed text used when no player key is available.
pub const FALLBACK_SEED_TEXT: &str = "1234";

/// Hex-encoded SHA-256 of `player_key` followed by the lowercase bot type.
pub fn derive_seed(player_key: Option<&str>, bot_type: BotType) -> String {
    let mut hasher = Sha256::new();
    match player_key {
        Some(key) if !key.is_empty() => {
            hasher.update(key.as_bytes());
            hasher.update(bot_type.tag().as_bytes());
        }
        _ => hasher.update(FALLBACK_SEED_TEXT.as_bytes()),
    }
    hex::encode(hasher.finalize())
}

/// Challenge id for a derived seed: its first four digest bytes, little-endian.
pub fn challenge_id(seed: &str) -> Option<u32> {
    let bytes = hex::decode(seed).ok()?;
    let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(head))
}
