use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatStatus};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Check,
    Call,
    Raise,
    Fold,
}

impl PlayerActionKind {
    /// Статус, который получает место после действия.
    pub fn status(self) -> SeatStatus {
        match self {
            PlayerActionKind::Check => SeatStatus::Check,
            PlayerActionKind::Call => SeatStatus::Call,
            PlayerActionKind::Raise => SeatStatus::Raise,
            PlayerActionKind::Fold => SeatStatus::Fold,
        }
    }

    /// Несёт ли действие фишки.
    pub fn carries_chips(self) -> bool {
        matches!(self, PlayerActionKind::Call | PlayerActionKind::Raise)
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player: String,
    pub kind: PlayerActionKind,
    /// Сколько фишек добавить к ставке раунда (Call/Raise).
    pub amount: Chips,
}

impl PlayerAction {
    pub fn new(player: impl Into<String>, kind: PlayerActionKind, amount: Chips) -> Self {
        Self {
            player: player.into(),
            kind,
            amount,
        }
    }

    pub fn check(player: impl Into<String>) -> Self {
        Self::new(player, PlayerActionKind::Check, Chips::ZERO)
    }

    pub fn fold(player: impl Into<String>) -> Self {
        Self::new(player, PlayerActionKind::Fold, Chips::ZERO)
    }

    pub fn call(player: impl Into<String>, amount: Chips) -> Self {
        Self::new(player, PlayerActionKind::Call, amount)
    }

    pub fn raise(player: impl Into<String>, amount: Chips) -> Self {
        Self::new(player, PlayerActionKind::Raise, amount)
    }
}
