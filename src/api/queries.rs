use crate::domain::table::{SeatIndex, Table};
use crate::engine::ShowdownEntry;

use super::dto::{SeatView, ShowdownHand, ShowdownView, TableSummary, TableView};

/// Проекция стола для зрителя `viewer`.
///
/// Чистая функция: копирует публичные поля, карманные карты оставляет только
/// зрителю, колоду не трогает вовсе.
pub fn build_table_view(table: &Table, viewer: Option<SeatIndex>) -> TableView {
    let seats = table
        .seats
        .iter()
        .enumerate()
        .map(|(idx, seat)| SeatView {
            name: seat.name.clone(),
            cards: (viewer == Some(idx) && !seat.hole_cards.is_empty()).then(|| seat.hole_cards.clone()),
            balance: seat.balance,
            current_bid: seat.current_bid,
            total_bid: seat.total_bid,
            status: seat.status,
            status_data: seat.status_data,
        })
        .collect();

    TableView {
        name: table.name.clone(),
        buy_in: table.config.buy_in,
        big_blind: table.config.big_blind,
        pot: table.pot,
        community_cards: table.community_cards,
        seats,
        current_player_index: table.current_player,
        dealer_index: table.dealer_index,
        phase: table.phase,
    }
}

/// Проекция для игрока по имени (посторонний видит только публичное).
pub fn build_table_view_for(table: &Table, player: &str) -> TableView {
    build_table_view(table, table.seat_index(player))
}

/// Краткая карточка стола для лобби.
pub fn build_table_summary(table: &Table) -> TableSummary {
    TableSummary {
        name: table.name.clone(),
        buy_in: table.config.buy_in,
        big_blind: table.config.big_blind,
        player_names: table.seats.iter().map(|s| s.name.clone()).collect(),
        is_active: table.seats.len() >= 2,
    }
}

/// DTO шоудауна. Порядок рук сохраняется (по убыванию рейтинга).
pub fn build_showdown_view(table: &Table, entries: &[ShowdownEntry]) -> ShowdownView {
    ShowdownView {
        table_name: table.name.clone(),
        hands: entries
            .iter()
            .map(|e| ShowdownHand {
                player_name: e.player_name.clone(),
                revealed_cards: e.hole_cards.clone(),
                rating_category: e.category,
                rating: e.rating,
                won: e.won,
            })
            .collect(),
    }
}

/// Кому рассылать обновления: все сидящие, кроме стоящих в очереди на выход.
pub fn broadcast_recipients(table: &Table) -> Vec<(SeatIndex, String)> {
    table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, s)| !table.is_departing(&s.name))
        .map(|(idx, s)| (idx, s.name.clone()))
        .collect()
}
