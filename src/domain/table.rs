use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::HandPhase;
use crate::domain::player::{Seat, SeatStatus};
use crate::engine::errors::EngineError;

/// Индекс места за столом (позиция в упорядоченном списке мест).
pub type SeatIndex = usize;

/// Максимум мест за столом по умолчанию.
pub const DEFAULT_TABLE_SIZE: usize = 6;

/// Конфиг стола: размер, бай-ин, блайнды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub max_seats: usize,
    pub buy_in: Chips,
    pub big_blind: Chips,
}

impl TableConfig {
    pub fn new(buy_in: Chips, big_blind: Chips) -> Self {
        Self {
            max_seats: DEFAULT_TABLE_SIZE,
            buy_in,
            big_blind,
        }
    }

    /// Малый блайнд = половина большого.
    pub fn small_blind(&self) -> Chips {
        self.big_blind.half()
    }
}

/// Основное состояние стола.
///
/// Колода приватна: наружу стол отдаётся только через проекции из `api`.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    pub config: TableConfig,

    /// Места в порядке рассадки; порядок задаёт очередь ходов и блайндов.
    pub seats: Vec<Seat>,

    /// Фишки закрытых раундов ставок.
    pub pot: Chips,

    /// Общие карты борда: None, пока карта не открыта.
    pub community_cards: [Option<Card>; 5],

    /// Место дилера или None, если раздач ещё не было.
    pub dealer_index: Option<SeatIndex>,

    /// Чей ход. None – действие сейчас ни от кого не ждём.
    pub current_player: Option<SeatIndex>,

    pub phase: HandPhase,

    /// Номер текущей раздачи за этим столом.
    pub hand_number: u64,

    /// Игроки, покидающие стол на ближайшей границе раздачи.
    pub disconnect_queue: Vec<String>,

    pub(crate) deck: Deck,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(name: impl Into<String>, config: TableConfig) -> Self {
        Self {
            name: name.into(),
            config,
            seats: Vec::new(),
            pot: Chips::ZERO,
            community_cards: [None; 5],
            dealer_index: None,
            current_player: None,
            phase: HandPhase::Idle,
            hand_number: 0,
            disconnect_queue: Vec::new(),
            deck: Deck::empty(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.config.max_seats
    }

    pub fn seat_index(&self, name: &str) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.name == name)
    }

    /// Посадить игрока со стеком = бай-ин стола.
    ///
    /// Если раздача уже идёт, место получает статус Inactive до следующей раздачи.
    pub fn seat_player(&mut self, name: &str) -> Result<SeatIndex, EngineError> {
        if self.is_full() {
            return Err(EngineError::TableFull(self.name.clone()));
        }
        if self.seat_index(name).is_some() {
            return Err(EngineError::AlreadySeated(name.to_string()));
        }

        let mut seat = Seat::new(name, self.config.buy_in);
        if self.phase.hand_in_progress() {
            seat.status = SeatStatus::Inactive;
        }
        self.seats.push(seat);
        Ok(self.seats.len() - 1)
    }

    /// Поставить игрока в очередь на выход. Повторная постановка игнорируется.
    pub fn enqueue_departure(&mut self, name: &str) -> bool {
        if self.seat_index(name).is_none() || self.is_departing(name) {
            return false;
        }
        self.disconnect_queue.push(name.to_string());
        true
    }

    pub fn is_departing(&self, name: &str) -> bool {
        self.disconnect_queue.iter().any(|n| n == name)
    }

    /// Убрать место. Дилерская кнопка сдвигается так, чтобы ротация не сбилась.
    ///
    /// Вызывается только на границе раздачи (current_player = None).
    pub fn remove_seat(&mut self, index: SeatIndex) -> Option<Seat> {
        if index >= self.seats.len() {
            return None;
        }
        let seat = self.seats.remove(index);
        self.disconnect_queue.retain(|n| *n != seat.name);

        self.dealer_index = match self.dealer_index {
            _ if self.seats.is_empty() => None,
            Some(d) if index < d => Some(d - 1),
            Some(d) if index == d => Some((d + self.seats.len() - 1) % self.seats.len()),
            other => other,
        };
        self.current_player = None;
        Some(seat)
    }

    /// Сколько общих карт уже открыто.
    pub fn revealed_count(&self) -> usize {
        self.community_cards.iter().filter(|c| c.is_some()).count()
    }

    /// Открытые общие карты по порядку.
    pub fn board(&self) -> Vec<Card> {
        self.community_cards.iter().flatten().copied().collect()
    }

    /// Открыть следующую порцию борда: сначала 3 карты, затем по одной, максимум 5.
    pub fn reveal_next(&mut self) -> Vec<Card> {
        let revealed = self.revealed_count();
        let count = match revealed {
            0 => 3,
            3 | 4 => 1,
            _ => 0,
        };

        let cards = self.deck.draw_n(count);
        for (offset, card) in cards.iter().enumerate() {
            self.community_cards[revealed + offset] = Some(*card);
        }
        cards
    }

    /// Сколько карт осталось в колоде текущей раздачи.
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Индексы мест, ещё борющихся за банк.
    pub fn active_seats(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i)
            .collect()
    }

    /// Все фишки стола: банк + ставки раунда + стеки.
    pub fn total_chips(&self) -> Chips {
        self.pot
            + self.seats.iter().map(|s| s.current_bid).sum::<Chips>()
            + self.seats.iter().map(|s| s.balance).sum::<Chips>()
    }
}
