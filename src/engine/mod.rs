//! Покерный движок: блайнды, очередь ходов, закрытие раундов, сайд-поты, шоудаун.
//!
//! Стол живёт в `domain::Table`, движок – набор функций над ним:
//!   - `start_hand` – новая раздача
//!   - `apply_action` – действие игрока
//!   - `advance_round` – следующая улица или шоудаун после паузы

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod positions;
pub mod side_pots;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use game_loop::{advance_round, apply_action, start_hand, DealOutcome, HandResult, HandStatus, ShowdownEntry};
pub use side_pots::{compute_side_pots, settle_pots, Contribution, SidePot};

use crate::domain::Deck;

/// RNG интерфейс для engine. Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Каноническая колода, пропущенная через несмещённое перемешивание.
pub fn shuffled_deck<R: RandomSource>(rng: &mut R) -> Deck {
    let mut deck = Deck::standard_52();
    rng.shuffle(deck.cards_mut());
    deck
}
