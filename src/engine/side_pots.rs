use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, hand::Rating, SeatIndex};

/// Вклад места в раздачу для расчёта выплат.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    /// Сколько всего фишек место внесло за раздачу.
    pub total_bid: Chips,
    /// Рейтинг руки; `Rating::NONE` для сфолдивших/неактивных.
    pub rating: Rating,
}

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Разложить банк на слои.
///
/// На каждом шаге минимальный оставшийся вклад – потолок слоя: каждый
/// оставшийся участник кладёт в слой min(остаток, потолок). Обнулившиеся
/// выбывают. Выход: слои от основного банка к старшим сайд-потам.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let mut remaining: Vec<(SeatIndex, Chips)> = contributions
        .iter()
        .filter(|c| !c.total_bid.is_zero())
        .map(|c| (c.seat, c.total_bid))
        .collect();

    let mut pots = Vec::new();
    while let Some(cap) = remaining.iter().map(|(_, left)| *left).min() {
        let mut amount = Chips::ZERO;
        let mut eligible_seats = Vec::with_capacity(remaining.len());

        for (seat, left) in remaining.iter_mut() {
            let given = (*left).min(cap);
            amount += given;
            *left -= given;
            eligible_seats.push(*seat);
        }

        remaining.retain(|(_, left)| !left.is_zero());
        pots.push(SidePot {
            amount,
            eligible_seats,
        });
    }

    pots
}

/// Разыграть все слои банка.
///
/// Слой забирают участники с максимальным рейтингом, при равенстве делят
/// поровну. Неделимые сотые раздаются по одной в порядке `payout_order`
/// (обычно по кругу от места после дилера). Сумма выплат равна банку.
/// Слой, все участники которого сбросили карты, уходит лучшим живым рукам раздачи.
pub fn settle_pots(
    contributions: &[Contribution],
    payout_order: &[SeatIndex],
) -> BTreeMap<SeatIndex, Chips> {
    let rating_of = |seat: SeatIndex| {
        contributions
            .iter()
            .find(|c| c.seat == seat)
            .map(|c| c.rating)
            .unwrap_or(Rating::NONE)
    };

    // Лучшие живые руки раздачи: им уходит слой, где все участники мертвы.
    let overall_best = contributions.iter().map(|c| c.rating).max().unwrap_or(Rating::NONE);

    let mut winnings: BTreeMap<SeatIndex, Chips> = BTreeMap::new();

    for pot in compute_side_pots(contributions) {
        let best = pot
            .eligible_seats
            .iter()
            .map(|&s| rating_of(s))
            .max()
            .unwrap_or(Rating::NONE);

        let mut winners: Vec<SeatIndex> = if best > Rating::NONE {
            pot.eligible_seats.iter().copied().filter(|&s| rating_of(s) == best).collect()
        } else if overall_best > Rating::NONE {
            // Мёртвый слой: живых участников нет, забирает лучшая рука раздачи.
            contributions
                .iter()
                .filter(|c| c.rating == overall_best)
                .map(|c| c.seat)
                .collect()
        } else {
            pot.eligible_seats.clone()
        };

        sort_by_payout_order(&mut winners, payout_order);

        for (seat, share) in split_evenly(pot.amount, &winners) {
            *winnings.entry(seat).or_insert(Chips::ZERO) += share;
        }
    }

    winnings
}

/// Поделить сумму поровну; остаток в сотых – первым в списке, по одной.
pub fn split_evenly(amount: Chips, winners: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }

    let n = winners.len() as u64;
    let share = amount.cents() / n;
    let remainder = amount.cents() % n;

    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| {
            let extra = u64::from((i as u64) < remainder);
            (seat, Chips::from_cents(share + extra))
        })
        .collect()
}

fn sort_by_payout_order(seats: &mut [SeatIndex], payout_order: &[SeatIndex]) {
    seats.sort_by_key(|s| payout_order.iter().position(|p| p == s).unwrap_or(usize::MAX));
}
