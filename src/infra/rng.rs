use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engine::RandomSource;

/// Системный RNG: `thread_rng` + Фишер–Йейтс из `rand`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

/// RNG, которым владеет актор стола: системный или с фиксированным seed.
#[derive(Clone, Debug)]
pub enum TableRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl RandomSource for TableRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            TableRng::System(rng) => rng.shuffle(slice),
            TableRng::Seeded(rng) => rng.shuffle(slice),
        }
    }
}
