use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandPhase, Rating, Street};
use crate::domain::player::SeatStatus;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::actions::PlayerAction;
use crate::engine::betting::{evaluate_round, RoundState};
use crate::engine::errors::EngineError;
use crate::engine::positions::{blind_positions, collect_dealt_seats_from, next_active_seat, next_dealer};
use crate::engine::side_pots::{settle_pots, Contribution};
use crate::engine::validation::validate_action;
use crate::engine::{shuffled_deck, RandomSource};
use crate::eval::{evaluate_best_hand, HandCategory};

/// Статус раздачи для внешнего кода (рантайм решает, какой таймер ставить).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Ход передан следующему игроку.
    Ongoing,
    /// Раунд ставок закрыт: после паузы вызвать `advance_round`.
    RoundComplete,
    /// Банк разыгран: после паузы вызвать `start_hand`.
    Finished(HandResult),
}

/// Итог раздачи.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// Выигрыш по местам (только ненулевые).
    pub winnings: BTreeMap<SeatIndex, Chips>,
    /// Вскрытые руки, по убыванию рейтинга. Пусто, если все сфолдили.
    pub showdown: Vec<ShowdownEntry>,
}

/// Вскрытая на шоудауне рука.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub seat: SeatIndex,
    pub player_name: String,
    pub hole_cards: Vec<Card>,
    pub rating: Rating,
    pub category: HandCategory,
    pub won: Chips,
}

/// Результат попытки начать раздачу.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DealOutcome {
    /// Карты розданы, блайнды поставлены.
    Dealt { removed: Vec<String> },
    /// Играть некому: стол в Idle.
    Idle { removed: Vec<String> },
}

impl DealOutcome {
    /// Игроки, убранные со стола на этой границе раздачи.
    pub fn removed(&self) -> &[String] {
        match self {
            DealOutcome::Dealt { removed } | DealOutcome::Idle { removed } => removed,
        }
    }
}

/// Старт новой раздачи:
/// - убирает ушедших и банкротов;
/// - двигает кнопку дилера;
/// - раздаёт карманные карты;
/// - постит блайнды и передаёт ход первому.
pub fn start_hand<R: RandomSource>(table: &mut Table, rng: &mut R) -> Result<DealOutcome, EngineError> {
    if matches!(table.phase, HandPhase::Betting(_) | HandPhase::RoundComplete(_)) {
        return Err(EngineError::HandInProgress);
    }

    let removed = prune_seats(table);

    // Сброс board/pot/ставок.
    table.pot = Chips::ZERO;
    table.community_cards = [None; 5];
    table.current_player = None;
    for seat in table.seats.iter_mut() {
        seat.reset_for_hand();
        if seat.balance.is_zero() {
            seat.status = SeatStatus::Inactive;
        }
    }

    let playing = table
        .seats
        .iter()
        .filter(|s| s.status != SeatStatus::Inactive)
        .count();
    if playing < 2 {
        table.phase = HandPhase::Idle;
        table.deck = crate::domain::Deck::empty();
        info!(table = %table.name, seated = table.seats.len(), "стол ждёт игроков");
        return Ok(DealOutcome::Idle { removed });
    }

    let dealer = next_dealer(table).ok_or(EngineError::NotEnoughPlayers)?;
    let blinds = blind_positions(table, dealer).ok_or(EngineError::NotEnoughPlayers)?;

    table.deck = shuffled_deck(rng);
    table.hand_number += 1;
    table.dealer_index = Some(dealer);

    deal_hole_cards(table, dealer);

    let small = table.config.small_blind();
    let big = table.config.big_blind;
    post_blind(table, blinds.small_blind, small, SeatStatus::SmallBlind);
    post_blind(table, blinds.big_blind, big, SeatStatus::BigBlind);

    table.current_player = Some(blinds.first_to_act);
    table.phase = HandPhase::Betting(Street::PreFlop);

    info!(
        table = %table.name,
        hand = table.hand_number,
        dealer,
        small_blind = blinds.small_blind,
        big_blind = blinds.big_blind,
        "раздача началась"
    );

    Ok(DealOutcome::Dealt { removed })
}

/// Убрать ушедших (очередь выхода) и тех, кто просидел банкротом целую раздачу.
fn prune_seats(table: &mut Table) -> Vec<String> {
    let mut removed = Vec::new();
    let mut idx = 0;
    while idx < table.seats.len() {
        let seat = &table.seats[idx];
        let bankrupt = seat.status == SeatStatus::Inactive && seat.balance.is_zero();
        if table.is_departing(&seat.name) || bankrupt {
            if let Some(seat) = table.remove_seat(idx) {
                debug!(table = %table.name, player = %seat.name, bankrupt, "место освобождено");
                removed.push(seat.name);
            }
        } else {
            idx += 1;
        }
    }
    removed
}

/// Раздача карманных карт – по 2 карты, по кругу от дилера.
fn deal_hole_cards(table: &mut Table, dealer: SeatIndex) {
    let order = collect_dealt_seats_from(table, dealer);
    for _round in 0..2 {
        for &seat in &order {
            if let Some(card) = table.deck.draw_one() {
                table.seats[seat].hole_cards.push(card);
            }
        }
    }
}

/// Блайнд: не больше, чем есть в стеке.
fn post_blind(table: &mut Table, seat: SeatIndex, required: Chips, status: SeatStatus) {
    let player = &mut table.seats[seat];
    let paid = player.commit(required);
    player.status = status;
    player.status_data = paid;
}

/// Применить действие игрока. Возвращает статус раздачи.
pub fn apply_action(table: &mut Table, action: &PlayerAction) -> Result<HandStatus, EngineError> {
    let validated = validate_action(table, action)?;
    let seat = validated.seat;

    {
        let player = &mut table.seats[seat];
        let paid = player.commit(validated.amount);
        player.status = action.kind.status();
        player.status_data = paid;
    }

    debug!(
        table = %table.name,
        player = %action.player,
        kind = ?action.kind,
        amount = %validated.amount,
        "действие принято"
    );

    match evaluate_round(table) {
        RoundState::SingleSurvivor(winner) => Ok(finish_without_showdown(table, winner)),
        RoundState::Continue => {
            table.current_player = next_active_seat(table, seat);
            Ok(HandStatus::Ongoing)
        }
        RoundState::Complete => {
            close_betting_round(table);
            Ok(HandStatus::RoundComplete)
        }
    }
}

/// Закрыть раунд: ставки уходят в банк, ход ни от кого не ждём.
fn close_betting_round(table: &mut Table) {
    let street = match table.phase {
        HandPhase::Betting(street) => street,
        _ => return,
    };

    let collected: Chips = table.seats.iter_mut().map(|s| s.collect_bid()).sum();
    table.pot += collected;
    table.current_player = None;
    table.phase = HandPhase::RoundComplete(street);

    debug!(table = %table.name, ?street, pot = %table.pot, "раунд ставок закрыт");
}

/// Переход после закрытого раунда: следующая улица или шоудаун.
pub fn advance_round(table: &mut Table) -> Result<HandStatus, EngineError> {
    let street = match table.phase {
        HandPhase::RoundComplete(street) => street,
        _ => return Err(EngineError::Internal("advance_round вне RoundComplete")),
    };

    for seat in table.seats.iter_mut().filter(|s| s.is_active()) {
        seat.status = SeatStatus::None;
        seat.status_data = Chips::ZERO;
    }

    match street.next() {
        Some(next) => {
            let revealed = table.reveal_next();
            let dealer = table.dealer_index.unwrap_or(0);
            table.current_player = next_active_seat(table, dealer);
            table.phase = HandPhase::Betting(next);

            debug!(
                table = %table.name,
                street = ?next,
                cards = ?revealed.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
                "открыты общие карты"
            );
            Ok(HandStatus::Ongoing)
        }
        None => Ok(HandStatus::Finished(showdown(table))),
    }
}

/// Завершение раздачи без шоудауна (все сфолдили, остался один).
fn finish_without_showdown(table: &mut Table, winner: SeatIndex) -> HandStatus {
    let collected: Chips = table.seats.iter_mut().map(|s| s.collect_bid()).sum();
    table.pot += collected;

    let total_pot = table.pot;
    table.seats[winner].balance += total_pot;
    table.pot = Chips::ZERO;
    table.current_player = None;
    table.phase = HandPhase::HandComplete;

    info!(
        table = %table.name,
        hand = table.hand_number,
        winner = %table.seats[winner].name,
        pot = %total_pot,
        "все сфолдили, банк забирает последний"
    );

    let mut winnings = BTreeMap::new();
    winnings.insert(winner, total_pot);
    HandStatus::Finished(HandResult {
        winnings,
        showdown: Vec::new(),
    })
}

/// Шоудаун: оценка рук и раздача банка по слоям.
fn showdown(table: &mut Table) -> HandResult {
    let board = table.board();

    let contributions: Vec<Contribution> = table
        .seats
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let rating = if p.is_active() {
                evaluate_best_hand(&p.hole_cards, &board).0
            } else {
                Rating::NONE
            };
            Contribution {
                seat,
                total_bid: p.total_bid,
                rating,
            }
        })
        .collect();

    // Неделимые сотые – по кругу от места после дилера.
    let n = table.seats.len();
    let dealer = table.dealer_index.unwrap_or(0);
    let payout_order: Vec<SeatIndex> = (1..=n).map(|off| (dealer + off) % n).collect();

    let winnings = settle_pots(&contributions, &payout_order);
    for (&seat, &amount) in &winnings {
        table.seats[seat].balance += amount;
    }

    let mut entries: Vec<ShowdownEntry> = table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(seat, p)| {
            let (rating, category) = evaluate_best_hand(&p.hole_cards, &board);
            ShowdownEntry {
                seat,
                player_name: p.name.clone(),
                hole_cards: p.hole_cards.clone(),
                rating,
                category,
                won: winnings.get(&seat).copied().unwrap_or(Chips::ZERO),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.rating.cmp(&a.rating));

    info!(
        table = %table.name,
        hand = table.hand_number,
        pot = %table.pot,
        winners = ?entries.iter().filter(|e| !e.won.is_zero()).map(|e| e.player_name.as_str()).collect::<Vec<_>>(),
        "шоудаун"
    );

    table.pot = Chips::ZERO;
    table.current_player = None;
    table.phase = HandPhase::HandComplete;

    HandResult {
        winnings,
        showdown: entries,
    }
}
