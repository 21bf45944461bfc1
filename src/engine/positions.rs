use crate::domain::{SeatIndex, SeatStatus, Table};

/// Следующее активное место по кругу после `from` (не Fold, не Inactive).
///
/// Сам `from` проверяется последним, так что при одном активном вернётся он.
pub fn next_active_seat(table: &Table, from: SeatIndex) -> Option<SeatIndex> {
    next_matching(table, from, |status| status.is_active())
}

/// Места, участвующие в раздаче, по кругу начиная с `start` включительно.
pub fn collect_dealt_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let n = table.seats.len();
    (0..n)
        .map(|offset| (start + offset) % n)
        .filter(|&idx| table.seats[idx].status != SeatStatus::Inactive)
        .collect()
}

/// Предложить следующую позицию дилера:
/// - если есть текущая кнопка – следующее играющее место;
/// - если нет – первое играющее место с нуля.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    let playing = |status: SeatStatus| status != SeatStatus::Inactive;
    match table.dealer_index {
        Some(button) if button < table.seats.len() => next_matching(table, button, playing),
        _ => (0..table.seats.len()).find(|&idx| playing(table.seats[idx].status)),
    }
}

/// Позиции блайндов и первого ходящего на префлопе.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlindPositions {
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    pub first_to_act: SeatIndex,
}

/// Хедз-ап: дилер ставит малый блайнд. 3+: малый – следующий за дилером.
/// Первым ходит место после большого блайнда.
pub fn blind_positions(table: &Table, dealer: SeatIndex) -> Option<BlindPositions> {
    let order = collect_dealt_seats_from(table, dealer);
    let n = order.len();
    if n < 2 {
        return None;
    }

    let (sb_pos, bb_pos) = if n == 2 { (0, 1) } else { (1, 2) };
    Some(BlindPositions {
        small_blind: order[sb_pos],
        big_blind: order[bb_pos],
        first_to_act: order[(bb_pos + 1) % n],
    })
}

fn next_matching(table: &Table, from: SeatIndex, pred: impl Fn(SeatStatus) -> bool) -> Option<SeatIndex> {
    let n = table.seats.len();
    (1..=n)
        .map(|offset| (from + offset) % n)
        .find(|&idx| pred(table.seats[idx].status))
}
