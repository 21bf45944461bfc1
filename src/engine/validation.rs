use crate::domain::chips::Chips;
use crate::domain::hand::HandPhase;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;

/// Проверенное действие: чьё оно и сколько фишек реально уходит в ставку.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedAction {
    pub seat: SeatIndex,
    pub amount: Chips,
}

/// Проверка очереди хода и нормализация суммы.
///
/// - не та фаза / не тот игрок → отклоняем;
/// - Check/Fold всегда с нулём;
/// - Call/Raise больше стека урезаются до стека (короткий стек не ошибка).
pub fn validate_action(table: &Table, action: &PlayerAction) -> Result<ValidatedAction, EngineError> {
    if !matches!(table.phase, HandPhase::Betting(_)) {
        return Err(EngineError::NoBettingRound);
    }

    let seat = table
        .seat_index(&action.player)
        .ok_or_else(|| EngineError::SeatNotFound(action.player.clone()))?;

    if table.current_player != Some(seat) {
        return Err(EngineError::NotPlayersTurn(action.player.clone()));
    }

    let amount = if action.kind.carries_chips() {
        action.amount.min(table.seats[seat].balance)
    } else {
        Chips::ZERO
    };

    Ok(ValidatedAction { seat, amount })
}
