use thiserror::Error;

use crate::engine::EngineError;

/// Ошибки уровня сессии (над движком одного стола).
///
/// Транспорт вправе их игнорировать: клиент сверится по следующему снапшоту.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Стол {0} не найден")]
    TableNotFound(String),

    #[error("Стол {0} заполнен")]
    TableFull(String),

    #[error("Игрок {0} не сидит ни за одним столом")]
    PlayerNotSeated(String),

    #[error("Игрок {0} уже сидит за столом {1}")]
    AlreadySeated(String, String),

    #[error("Стол с именем {0} уже существует")]
    TableExists(String),

    #[error("Стол {0} закрыт")]
    TableClosed(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
