//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `best_hand(cards) -> (Rating, HandCategory)`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{best_hand, evaluate_best_hand};
pub use hand_rank::{describe_hand, HandCategory};
