//! Движок техасского холдема на несколько столов.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, места, стол;
//! - `eval` – оценка лучшей пятикарточной руки;
//! - `engine` – блайнды, очередь ходов, раунды, сайд-поты, шоудаун;
//! - `api` – команды транспорта, проекции стола, события;
//! - `runtime` – акторы столов, таймеры фаз, реестр сессии;
//! - `infra` – RNG, seed-ы, логирование;
//! - `config` – параметры сессии.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod runtime;

pub use config::EngineConfig;
pub use runtime::SessionManager;
