use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт с курсором выдачи.
///
/// Карты никогда не удаляются из `cards`: раздача сдвигает `cursor`,
/// поэтому одна и та же карта не может выйти дважды за раздачу.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в каноническом порядке:
    /// Hearts 2..A, Diamonds 2..A, Spades 2..A, Clubs 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, cursor: 0 }
    }

    /// Пустая колода (стол в Idle).
    pub fn empty() -> Self {
        Deck {
            cards: Vec::new(),
            cursor: 0,
        }
    }

    /// Все карты колоды в текущем порядке, включая уже выданные.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Мутабельный доступ для перемешивания. Курсор сбрасывается.
    pub fn cards_mut(&mut self) -> &mut [Card] {
        self.cursor = 0;
        &mut self.cards
    }

    /// Сколько карт ещё не выдано.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Взять одну карту и сдвинуть курсор.
    pub fn draw_one(&mut self) -> Option<Card> {
        let card = self.cards.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }

    /// Взять n карт подряд.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            match self.draw_one() {
                Some(card) => taken.push(card),
                None => break,
            }
        }
        taken
    }
}
