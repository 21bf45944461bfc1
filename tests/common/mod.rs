//! Общие утилиты интеграционных тестов: столы, сценарные колоды.
#![allow(dead_code)]

use holdem_engine::domain::card::Card;
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::deck::Deck;
use holdem_engine::domain::table::{Table, TableConfig};
use holdem_engine::engine::RandomSource;

/// Колода без перемешивания: канонический порядок h, d, s, c по 2..A.
pub struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

/// Сценарная колода: заданные карты сверху, остальные в каноническом порядке.
///
/// Раздача идёт от дилера по кругу, по одной карте за проход, затем борд
/// (флоп, тёрн, ривер) без сжигания.
pub struct ScriptedDeck {
    order: Vec<usize>,
}

impl ScriptedDeck {
    pub fn new(top: &str) -> Self {
        let canonical = Deck::standard_52();
        let index_of = |card: &Card| {
            canonical
                .cards()
                .iter()
                .position(|c| c == card)
                .expect("карта есть в колоде")
        };

        let top: Vec<usize> = top
            .split_whitespace()
            .map(|s| index_of(&s.parse::<Card>().expect("корректная карта")))
            .collect();
        let mut order = top.clone();
        order.extend((0..canonical.cards().len()).filter(|i| !top.contains(i)));
        Self { order }
    }
}

impl RandomSource for ScriptedDeck {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        // pos[j] – исходный индекс элемента, который сейчас лежит в j.
        let mut pos: Vec<usize> = (0..slice.len()).collect();
        for (i, &wanted) in self.order.iter().enumerate().take(slice.len()) {
            let j = (i..pos.len()).find(|&j| pos[j] == wanted).expect("перестановка");
            slice.swap(i, j);
            pos.swap(i, j);
        }
    }
}

/// Стол с бай-ином 100 и большим блайндом 2.
pub fn make_table(players: &[&str]) -> Table {
    let mut table = Table::new("test", TableConfig::new(Chips::new(100), Chips::new(2)));
    for name in players {
        table.seat_player(name).expect("место есть");
    }
    table
}

pub fn chips(whole: u64) -> Chips {
    Chips::new(whole)
}
