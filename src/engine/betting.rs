use crate::domain::chips::Chips;
use crate::domain::table::{SeatIndex, Table};

/// Чем закончилось действие с точки зрения раунда ставок.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    /// Остался один активный игрок – он забирает банк.
    SingleSurvivor(SeatIndex),
    /// Кто-то ещё должен действовать.
    Continue,
    /// Все уравняли или не могут добавить: раунд закрыт.
    Complete,
}

/// Целевая ставка раунда: максимум current_bid среди активных мест с фишками.
///
/// Олл-ин (баланс 0) цель не поднимает.
pub fn target_bid(table: &Table) -> Chips {
    table
        .seats
        .iter()
        .filter(|s| s.is_active() && !s.balance.is_zero())
        .map(|s| s.current_bid)
        .max()
        .unwrap_or(Chips::ZERO)
}

/// Оценить состояние раунда после очередного действия.
pub fn evaluate_round(table: &Table) -> RoundState {
    let active = table.active_seats();
    if let [only] = active.as_slice() {
        return RoundState::SingleSurvivor(*only);
    }

    let target = target_bid(table);
    let continues = active.iter().map(|&i| &table.seats[i]).any(|s| {
        s.status.awaits_action() || (s.current_bid < target && !s.balance.is_zero())
    });

    if continues {
        RoundState::Continue
    } else {
        RoundState::Complete
    }
}
