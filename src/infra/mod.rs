//! Инфраструктурный слой вокруг покерного движка:
//! - RNG-реализации для движка;
//! - seed-ы столов;
//! - логирование.

pub mod logging;
pub mod rng;
pub mod rng_seed;

pub use logging::init_tracing;
pub use rng::*;
pub use rng_seed::RngSeed;
