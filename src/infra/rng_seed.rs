//! RngSeed: доменный seed для RNG столов.
//!
//! Позволяет:
//!   - хранить базовый seed ([u8;32]);
//!   - выводить независимый seed на каждый стол:
//!         new = H(domain || base || table_name)
//!   - создавать DeterministicRng из seed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для конфига и тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed конкретного стола: разные имена → независимые колоды.
    pub fn derive_for_table(&self, table_name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"HOLDEM_TABLE_RNG_V1");
        hasher.update(self.bytes);
        hasher.update((table_name.len() as u64).to_le_bytes());
        hasher.update(table_name.as_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
