use thiserror::Error;

/// Ошибки движка покера.
///
/// Ни одна не фатальна: отклонённое действие просто не меняет состояние,
/// клиент сверяется по следующему снапшоту стола.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Стол {0} заполнен")]
    TableFull(String),

    #[error("Игрок {0} уже сидит за столом")]
    AlreadySeated(String),

    #[error("Игрок {0} не найден за столом")]
    SeatNotFound(String),

    #[error("Сейчас не ход игрока {0}")]
    NotPlayersTurn(String),

    #[error("Раунд ставок сейчас не идёт")]
    NoBettingRound,

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandInProgress,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Класс RejectedAction: действие молча отбрасывается.
    pub fn is_rejected_action(&self) -> bool {
        matches!(
            self,
            EngineError::SeatNotFound(_) | EngineError::NotPlayersTurn(_) | EngineError::NoBettingRound
        )
    }
}
