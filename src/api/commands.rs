use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::actions::PlayerActionKind;

/// Имя стола-маркер: создать новый стол под именем игрока.
pub const NEW_TABLE: &str = "#new";

/// Команда от транспорта (уже разобранное сообщение клиента).
///
/// JSON вида `{"type": "joinTableRequest", "data": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Command {
    /// Сесть за стол или создать новый (`table_name == "#new"`).
    JoinTableRequest(JoinTableCommand),

    /// Встать из-за стола (применяется на границе раздачи).
    LeaveTable(LeaveTableCommand),

    /// Действие игрока в раздаче.
    PlayerAction(PlayerActionCommand),

    /// Список столов для лобби.
    ListTables,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinTableCommand {
    pub table_name: String,
    pub player_name: String,
    /// Только для нового стола. Сумма в сотых, как и все Chips.
    #[serde(default)]
    pub buy_in: Option<Chips>,
    #[serde(default)]
    pub big_blind: Option<Chips>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTableCommand {
    pub player_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionCommand {
    pub table_name: String,
    pub player_name: String,
    pub action: PlayerActionKind,
    #[serde(default)]
    pub amount: Chips,
}
