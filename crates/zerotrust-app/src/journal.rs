//! Outcome journal: the fixed 64-byte little-endian record an external
//! attestation flow commits to.
//!
//! Layout: challenge id, player key (32 bytes), bot id, cured, destroyed,
//! data leaked x100, score, duration ms, accuracy bps. Every integer is a
//! little-endian `u32`.

use zerotrust_core::state::RoundOutcome;

pub const JOURNAL_LEN: usize = 64;

/// Decoded journal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Journal {
    pub challenge_id: u32,
    pub player_key: [u8; 32],
    pub bot_id: u32,
    pub threats_cured: u32,
    pub systems_destroyed: u32,
    /// Leaked share of the wave in hundredths of a percent, capped at 10000.
    pub data_leaked_x100: u32,
    pub score: u32,
    pub duration_ms: u32,
    pub accuracy_bps: u32,
}

impl Journal {
    pub fn from_outcome(
        challenge_id: u32,
        player_key: [u8; 32],
        bot_id: u32,
        outcome: &RoundOutcome,
    ) -> Self {
        let leaked_x100 =
            u64::from(outcome.data_leaked) * 10_000 / u64::from(outcome.threats_total.max(1));
        Self {
            challenge_id,
            player_key,
            bot_id,
            threats_cured: outcome.threats_cured,
            systems_destroyed: outcome.systems_destroyed,
            data_leaked_x100: leaked_x100.min(10_000) as u32,
            score: outcome.score,
            duration_ms: u32::try_from(outcome.duration_ms).unwrap_or(u32::MAX),
            accuracy_bps: outcome.accuracy_bps,
        }
    }

    pub fn encode(&self) -> [u8; JOURNAL_LEN] {
        let mut out = [0u8; JOURNAL_LEN];
        out[0..4].copy_from_slice(&self.challenge_id.to_le_bytes());
        out[4..36].copy_from_slice(&self.player_key);

        let tail = [
            self.bot_id,
            self.threats_cured,
            self.systems_destroyed,
            self.data_leaked_x100,
            self.score,
            self.duration_ms,
            self.accuracy_bps,
        ];
        for (i, value) in tail.iter().enumerate() {
            let at = 36 + i * 4;
            out[at..at + 4].copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    pub fn decode(bytes: &[u8; JOURNAL_LEN]) -> Self {
        let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let mut player_key = [0u8; 32];
        player_key.copy_from_slice(&bytes[4..36]);
        Self {
            challenge_id: word(0),
            player_key,
            bot_id: word(36),
            threats_cured: word(40),
            systems_destroyed: word(44),
            data_leaked_x100: word(48),
            score: word(52),
            duration_ms: word(56),
            accuracy_bps: word(60),
        }
    }
}

/// Encode an outcome straight into journal bytes.
pub fn encode(
    challenge_id: u32,
    player_key: [u8; 32],
    bot_id: u32,
    outcome: &RoundOutcome,
) -> [u8; JOURNAL_LEN] {
    Journal::from_outcome(challenge_id, player_key, bot_id, outcome).encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> RoundOutcome {
        RoundOutcome {
            defender_won: false,
            end_reason: "Data fully exfiltrated (3 leaks), bot wins".into(),
            threats_cured: 1,
            threats_total: 6,
            systems_destroyed: 4,
            data_leaked: 3,
            score: 1_679,
            duration_ms: 51_300,
            accuracy_bps: 1_666,
        }
    }

    #[test]
    fn test_layout_offsets() {
        let bytes = encode(0xAABB_CCDD, [7u8; 32], 42, &outcome());
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[0..4], &[0xDD, 0xCC, 0xBB, 0xAA]);
        assert!(bytes[4..36].iter().all(|b| *b == 7));
        assert_eq!(&bytes[36..40], &42u32.to_le_bytes());
        assert_eq!(&bytes[48..52], &5_000u32.to_le_bytes());
        assert_eq!(&bytes[56..60], &51_300u32.to_le_bytes());
        assert_eq!(&bytes[60..64], &1_666u32.to_le_bytes());
    }

    #[test]
    fn test_decode_reads_back_fields() {
        let journal = Journal::from_outcome(9, [1u8; 32], 3, &outcome());
        assert_eq!(Journal::decode(&journal.encode()), journal);
        assert_eq!(journal.data_leaked_x100, 5_000);
    }

    #[test]
    fn test_leak_share_is_capped() {
        let mut o = outcome();
        o.data_leaked = 20;
        assert_eq!(Journal::from_outcome(0, [0; 32], 0, &o).data_leaked_x100, 10_000);
    }
}
