//! Seeded randomness for threat generation.
//!
//! The seed is hashed with SHA-256 and the digest keys a ChaCha8 stream, so
//! any seed length works and the same seed always yields the same stream.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Build the generator's RNG from arbitrary seed bytes.
pub fn seeded_rng(seed: &[u8]) -> ChaCha8Rng {
    let digest = Sha256::digest(seed);
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    ChaCha8Rng::from_seed(key)
}
