use crate::domain::card::{Card, Suit};
use crate::domain::hand::Rating;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, mask_of, RankMask};

/// Вычислить лучшую 5-карточную руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> (Rating, HandCategory) {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    best_hand(&all_cards)
}

/// Лучшая рука из 7 карт (работает и для 5–6).
///
/// Все 21 подмножество по 5 карт не перебираем: категории ищутся по шаблонам
/// (счётчики рангов, маски мастей) от сильной к слабой, первая найденная и есть лучшая.
pub fn best_hand(cards: &[Card]) -> (Rating, HandCategory) {
    let analysis = CardAnalysis::new(cards);
    let (category, tie_breakers) = analysis.classify();
    (Rating::from_parts(category, tie_breakers), category)
}

/// Предрасчёт для поиска шаблонов.
struct CardAnalysis {
    /// Карты по убыванию ранга. Масть на порядок не влияет.
    sorted: Vec<Card>,
    /// rank_counts[v] – сколько карт ранга v (2..14).
    rank_counts: [u8; 15],
    suit_counts: [u8; 4],
    suit_masks: [RankMask; 4],
}

impl CardAnalysis {
    fn new(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_by(|a, b| b.rank.cmp(&a.rank));

        let mut rank_counts = [0u8; 15];
        let mut suit_counts = [0u8; 4];
        let mut suit_masks = [0 as RankMask; 4];
        for card in &sorted {
            rank_counts[card.rank.value() as usize] += 1;
            suit_counts[card.suit.index()] += 1;
        }
        for suit in Suit::ALL {
            suit_masks[suit.index()] = mask_of(sorted.iter().copied().filter(|c| c.suit == suit));
        }

        Self {
            sorted,
            rank_counts,
            suit_counts,
            suit_masks,
        }
    }

    fn classify(&self) -> (HandCategory, [u8; 5]) {
        if let Some(high) = self.straight_flush() {
            return (HandCategory::StraightFlush, [high, 0, 0, 0, 0]);
        }

        if let Some(quad) = self.highest_with_count(4, &[]) {
            let kicker = self.kickers(&[quad], 1);
            return (HandCategory::FourOfAKind, pack(&[&[quad], kicker.as_slice()]));
        }

        if let Some(trips) = self.highest_with_count(3, &[]) {
            // Вторая тройка тоже годится как пара.
            if let Some(pair) = self.highest_with_count(2, &[trips]) {
                return (HandCategory::FullHouse, pack(&[&[trips, pair]]));
            }
        }

        if let Some(suit) = self.flush_suit() {
            let ranks: Vec<u8> = self
                .sorted
                .iter()
                .filter(|c| c.suit == suit)
                .take(5)
                .map(|c| c.rank.value())
                .collect();
            return (HandCategory::Flush, pack(&[ranks.as_slice()]));
        }

        if let Some(high) = detect_straight(mask_of(self.sorted.iter().copied())) {
            return (HandCategory::Straight, [high, 0, 0, 0, 0]);
        }

        if let Some(trips) = self.highest_with_count(3, &[]) {
            let kickers = self.kickers(&[trips], 2);
            return (HandCategory::ThreeOfAKind, pack(&[&[trips], kickers.as_slice()]));
        }

        if let Some(high_pair) = self.highest_with_count(2, &[]) {
            if let Some(low_pair) = self.highest_with_count(2, &[high_pair]) {
                let kicker = self.kickers(&[high_pair, low_pair], 1);
                return (HandCategory::TwoPair, pack(&[&[high_pair, low_pair], kicker.as_slice()]));
            }
            let kickers = self.kickers(&[high_pair], 3);
            return (HandCategory::OnePair, pack(&[&[high_pair], kickers.as_slice()]));
        }

        (HandCategory::HighCard, pack(&[self.kickers(&[], 5).as_slice()]))
    }

    /// Старший стрит внутри одной масти.
    fn straight_flush(&self) -> Option<u8> {
        Suit::ALL
            .iter()
            .filter(|s| self.suit_counts[s.index()] >= 5)
            .filter_map(|s| detect_straight(self.suit_masks[s.index()]))
            .max()
    }

    fn flush_suit(&self) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| self.suit_counts[s.index()] >= 5)
    }

    /// Старший ранг, у которого не меньше `count` карт, кроме `except`.
    fn highest_with_count(&self, count: u8, except: &[u8]) -> Option<u8> {
        (2..=14u8)
            .rev()
            .find(|&v| self.rank_counts[v as usize] >= count && !except.contains(&v))
    }

    /// `n` старших карт, ранг которых не входит в `except`.
    fn kickers(&self, except: &[u8], n: usize) -> Vec<u8> {
        self.sorted
            .iter()
            .map(|c| c.rank.value())
            .filter(|v| !except.contains(v))
            .take(n)
            .collect()
    }
}

/// Сложить куски рангов в массив из 5, хвост заполнить нулями.
fn pack(parts: &[&[u8]]) -> [u8; 5] {
    let mut out = [0u8; 5];
    for (slot, v) in out.iter_mut().zip(parts.iter().flat_map(|p| p.iter())) {
        *slot = *v;
    }
    out
}
