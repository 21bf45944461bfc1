use serde::{Deserialize, Serialize};

use crate::domain::hand::Rating;

/// Основание кодирования: ранг (макс. 14) влазит в 4 бита.
pub const RATING_BASE: u32 = 16;

/// Категория + до 5 рангов для тай-брейка.
pub const DECIDERS_COUNT: usize = 6;

/// Категория покерной руки по силе (порядковые номера 1..9).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl HandCategory {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(v: u8) -> Option<HandCategory> {
        Some(match v {
            1 => HandCategory::HighCard,
            2 => HandCategory::OnePair,
            3 => HandCategory::TwoPair,
            4 => HandCategory::ThreeOfAKind,
            5 => HandCategory::Straight,
            6 => HandCategory::Flush,
            7 => HandCategory::FullHouse,
            8 => HandCategory::FourOfAKind,
            9 => HandCategory::StraightFlush,
            _ => return None,
        })
    }
}

impl Rating {
    /// Собрать рейтинг из категории и 5 рангов-кикеров (0 = не используется).
    ///
    /// rating = Σ decider[i] * 16^(5-i), decider[0]: категория.
    pub fn from_parts(category: HandCategory, tie_breakers: [u8; 5]) -> Self {
        let deciders = core::iter::once(category.ordinal()).chain(tie_breakers);
        let value = deciders.fold(0u32, |acc, d| acc * RATING_BASE + u32::from(d & 0x0F));
        Rating(value)
    }

    /// Категория руки; None для `Rating::NONE`.
    pub fn category(&self) -> Option<HandCategory> {
        let ordinal = self.0 / RATING_BASE.pow(DECIDERS_COUNT as u32 - 1);
        HandCategory::from_ordinal(ordinal as u8)
    }

    /// Ранги тай-брейка от старшего к младшему.
    pub fn tie_breakers(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        let mut value = self.0;
        for slot in out.iter_mut().rev() {
            *slot = (value % RATING_BASE) as u8;
            value /= RATING_BASE;
        }
        out
    }

    /// Обратное декодирование (категория, кикеры).
    pub fn decode(&self) -> Option<(HandCategory, [u8; 5])> {
        self.category().map(|c| (c, self.tie_breakers()))
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(category: HandCategory) -> &'static str {
    match category {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    }
}
