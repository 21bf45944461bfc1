use crate::domain::card::{Card, Rank};

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маска wheel-стрита A2345: туз играет как единица.
const WHEEL_MASK: RankMask = mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);

/// Пять подряд идущих бит, сдвигаемые по маске.
const RUN_OF_FIVE: RankMask = 0b1_1111;

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let r = ranks[i] as u8;
        mask |= 1 << (r - 2);
        i += 1;
    }
    mask
}

/// Маска рангов набора карт.
pub fn mask_of(cards: impl IntoIterator<Item = Card>) -> RankMask {
    cards.into_iter().fold(0, |m, c| m | rank_to_bit(c.rank))
}

/// Найти стрит в битовой маске рангов.
/// Возвращает значение старшей карты стрита (14..6), старший стрит выигрывает.
///
/// Особый случай: wheel (A2345) → 5.
pub fn detect_straight(rank_mask: RankMask) -> Option<u8> {
    // Проверяем от бродвея (T..A) вниз до 2..6.
    for low_bit in (0..=8u8).rev() {
        let run = RUN_OF_FIVE << low_bit;
        if rank_mask & run == run {
            return Some(low_bit + 2 + 4);
        }
    }
    if rank_mask & WHEEL_MASK == WHEEL_MASK {
        return Some(Rank::Five.value());
    }
    None
}
