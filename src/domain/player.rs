use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Статус места в текущей раздаче: последнее действие или особое состояние.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeatStatus {
    /// Ещё не действовал в этом раунде ставок.
    #[default]
    None,
    SmallBlind,
    BigBlind,
    Call,
    Raise,
    Check,
    /// Сбросил карты до конца раздачи.
    Fold,
    /// Не участвует в раздаче (сел посреди раздачи или банкрот).
    Inactive,
}

impl SeatStatus {
    /// Место ещё борется за банк.
    pub fn is_active(self) -> bool {
        !matches!(self, SeatStatus::Fold | SeatStatus::Inactive)
    }

    /// В этом раунде место ещё не делало добровольного действия.
    pub fn awaits_action(self) -> bool {
        matches!(
            self,
            SeatStatus::None | SeatStatus::SmallBlind | SeatStatus::BigBlind
        )
    }
}

/// Состояние игрока за конкретным столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Фишки, ещё не отправленные в банк.
    pub balance: Chips,
    /// Ставка в текущем раунде ставок.
    pub current_bid: Chips,
    /// Сумма, внесённая в банк за все закрытые раунды раздачи.
    pub total_bid: Chips,
    pub status: SeatStatus,
    /// Размер последнего действия (0 для Check/Fold).
    pub status_data: Chips,
}

impl Seat {
    pub fn new(name: impl Into<String>, balance: Chips) -> Self {
        Self {
            name: name.into(),
            hole_cards: Vec::new(),
            balance,
            current_bid: Chips::ZERO,
            total_bid: Chips::ZERO,
            status: SeatStatus::None,
            status_data: Chips::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Переложить фишки из стека в ставку раунда. Не больше, чем есть в стеке.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.balance);
        self.balance -= real;
        self.current_bid += real;
        real
    }

    /// Закрыть раунд: ставка уходит в банк, возвращаем её размер.
    pub fn collect_bid(&mut self) -> Chips {
        let bid = self.current_bid;
        self.total_bid += bid;
        self.current_bid = Chips::ZERO;
        bid
    }

    /// Сброс перед новой раздачей.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bid = Chips::ZERO;
        self.total_bid = Chips::ZERO;
        self.status = SeatStatus::None;
        self.status_data = Chips::ZERO;
    }
}
