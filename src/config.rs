//! Конфигурация движка столов.
//!
//! Значения по умолчанию → TOML (`from_toml_str`) → переменные окружения
//! (`with_env_overrides`).

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, TableConfig, DEFAULT_TABLE_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Некорректное значение {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Параметры сессии покерных столов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Максимум мест за столом.
    pub table_size: usize,
    /// Пауза после закрытого раунда, фолда всех и шоудауна.
    pub phase_delay_ms: u64,
    /// Бай-ин стола, если игрок не указал свой (целые фишки).
    pub default_buy_in: u64,
    /// Большой блайнд по умолчанию (целые фишки).
    pub default_big_blind: u64,
    /// Фиксированный seed колод – для воспроизводимых сессий.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            phase_delay_ms: 3_000,
            default_buy_in: 2_000,
            default_big_blind: 20,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// HOLDEM_PHASE_DELAY_MS, HOLDEM_RNG_SEED.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(value) = env::var("HOLDEM_PHASE_DELAY_MS") {
            self.phase_delay_ms = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "HOLDEM_PHASE_DELAY_MS",
                value: value.clone(),
            })?;
        }
        if let Ok(value) = env::var("HOLDEM_RNG_SEED") {
            self.rng_seed = Some(value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "HOLDEM_RNG_SEED",
                value: value.clone(),
            })?);
        }
        Ok(self)
    }

    pub fn phase_delay(&self) -> Duration {
        Duration::from_millis(self.phase_delay_ms)
    }

    /// Конфиг нового стола: свои бай-ин/блайнд игрока или значения по умолчанию.
    pub fn table_config(&self, buy_in: Option<Chips>, big_blind: Option<Chips>) -> TableConfig {
        TableConfig {
            max_seats: self.table_size,
            buy_in: buy_in.unwrap_or(Chips::new(self.default_buy_in)),
            big_blind: big_blind.unwrap_or(Chips::new(self.default_big_blind)),
        }
    }
}
