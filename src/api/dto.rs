use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandPhase, Rating};
use crate::domain::player::SeatStatus;
use crate::domain::SeatIndex;
use crate::eval::HandCategory;

/// DTO места за столом глазами конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub name: String,
    /// Карманные карты – только свои. Для остальных null.
    pub cards: Option<Vec<Card>>,
    pub balance: Chips,
    pub current_bid: Chips,
    pub total_bid: Chips,
    pub status: SeatStatus,
    pub status_data: Chips,
}

/// DTO стола для события `tableUpdate`. Колоды здесь нет и быть не может.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub name: String,
    pub buy_in: Chips,
    pub big_blind: Chips,
    pub pot: Chips,
    pub community_cards: [Option<Card>; 5],
    pub seats: Vec<SeatView>,
    /// Чей ход; null, если действие сейчас не ждём.
    pub current_player_index: Option<SeatIndex>,
    pub dealer_index: Option<SeatIndex>,
    pub phase: HandPhase,
}

/// Вскрытая рука в событии `showdown`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShowdownHand {
    pub player_name: String,
    pub revealed_cards: Vec<Card>,
    pub rating_category: HandCategory,
    pub rating: Rating,
    pub won: Chips,
}

/// Итог шоудауна: руки по убыванию силы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShowdownView {
    pub table_name: String,
    pub hands: Vec<ShowdownHand>,
}

/// Стол в списке лобби: только публичные поля.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub name: String,
    pub buy_in: Chips,
    pub big_blind: Chips,
    pub player_names: Vec<String>,
    pub is_active: bool,
}

/// Событие, которое транспорт доставляет конкретному игроку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum TableEvent {
    TableUpdate(TableView),
    Showdown(ShowdownView),
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum CommandResponse {
    /// Команда принята (или молча отброшена – транспорт не различает).
    Ok,
    /// Игрок сел за стол.
    Joined {
        #[serde(rename = "tableName")]
        table_name: String,
    },
    /// Список столов для лобби.
    Tables(Vec<TableSummary>),
}
