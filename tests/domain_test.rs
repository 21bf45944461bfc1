//! Тесты доменной модели: карты, колода, фишки, посадка за стол, борд.

mod common;

use std::collections::HashSet;

use holdem_engine::domain::card::{parse_cards, Card, Rank, Suit};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::deck::Deck;
use holdem_engine::domain::hand::{HandPhase, Street};
use holdem_engine::domain::player::{Seat, SeatStatus};
use holdem_engine::engine::{start_hand, EngineError};

use common::{make_table, NoShuffle};

#[test]
fn standard_deck_has_52_unique_cards_in_canonical_order() {
    let deck = Deck::standard_52();
    assert_eq!(deck.remaining(), 52);

    let unique: HashSet<Card> = deck.cards().iter().copied().collect();
    assert_eq!(unique.len(), 52);

    assert_eq!(deck.cards()[0], Card::new(Rank::Two, Suit::Hearts));
    assert_eq!(deck.cards()[12], Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(deck.cards()[13], Card::new(Rank::Two, Suit::Diamonds));
    assert_eq!(deck.cards()[51], Card::new(Rank::Ace, Suit::Clubs));
}

#[test]
fn deck_draws_from_cursor_until_empty() {
    let mut deck = Deck::standard_52();
    let first = deck.draw_n(3);
    assert_eq!(first.len(), 3);
    assert_eq!(deck.remaining(), 49);

    let rest = deck.draw_n(100);
    assert_eq!(rest.len(), 49);
    assert!(deck.is_empty());
    assert_eq!(deck.draw_one(), None);
}

#[test]
fn card_display_and_parse_agree() {
    let card: Card = "Td".parse().unwrap();
    assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(card.to_string(), "Td");

    let lower: Card = "as".parse().unwrap();
    assert_eq!(lower, Card::new(Rank::Ace, Suit::Spades));

    assert!("1h".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());

    let cards = parse_cards("Ah Kd 7c").unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[2], Card::new(Rank::Seven, Suit::Clubs));
}

#[test]
fn chips_are_fixed_point_hundredths() {
    let bb = Chips::new(25);
    assert_eq!(bb.cents(), 2_500);
    assert_eq!(bb.half(), Chips::from_cents(1_250));
    assert_eq!(bb.half().to_string(), "12.50");
    assert_eq!(Chips::new(3).saturating_sub(Chips::new(5)), Chips::ZERO);
    assert_eq!(Chips::new(1) + Chips::from_cents(5), Chips::from_cents(105));
}

#[test]
fn chips_from_huge_whole_amount_saturate() {
    assert_eq!(Chips::new(u64::MAX / 100), Chips::from_cents(u64::MAX / 100 * 100));
    assert_eq!(Chips::new(u64::MAX / 100 + 1), Chips::from_cents(u64::MAX));
    assert_eq!(Chips::new(u64::MAX), Chips::from_cents(u64::MAX));
}

#[test]
fn seat_commit_is_capped_by_balance() {
    let mut seat = Seat::new("alice", Chips::new(10));
    assert_eq!(seat.commit(Chips::new(4)), Chips::new(4));
    assert_eq!(seat.commit(Chips::new(50)), Chips::new(6));
    assert_eq!(seat.balance, Chips::ZERO);
    assert_eq!(seat.current_bid, Chips::new(10));

    assert_eq!(seat.collect_bid(), Chips::new(10));
    assert_eq!(seat.current_bid, Chips::ZERO);
    assert_eq!(seat.total_bid, Chips::new(10));
}

#[test]
fn seat_player_rejects_seventh_player_and_duplicates() {
    let mut table = make_table(&["p1", "p2", "p3", "p4", "p5", "p6"]);
    assert!(table.is_full());

    let err = table.seat_player("p7").unwrap_err();
    assert_eq!(err, EngineError::TableFull("test".to_string()));

    let mut small = make_table(&["alice"]);
    assert_eq!(
        small.seat_player("alice").unwrap_err(),
        EngineError::AlreadySeated("alice".to_string())
    );
}

#[test]
fn seat_player_gets_buy_in_balance_and_no_cards() {
    let table = make_table(&["alice", "bob"]);
    for seat in &table.seats {
        assert_eq!(seat.balance, Chips::new(100));
        assert!(seat.hole_cards.is_empty());
        assert_eq!(seat.status, SeatStatus::None);
    }
}

#[test]
fn joining_mid_hand_sits_out_as_inactive() {
    let mut table = make_table(&["alice", "bob"]);
    table.phase = HandPhase::Betting(Street::PreFlop);

    let idx = table.seat_player("carol").unwrap();
    assert_eq!(table.seats[idx].status, SeatStatus::Inactive);
}

#[test]
fn reveal_next_opens_three_then_one_then_one() {
    let mut table = make_table(&["alice", "bob"]);
    start_hand(&mut table, &mut NoShuffle).unwrap();
    assert_eq!(table.deck_remaining(), 48);

    assert_eq!(table.reveal_next().len(), 3);
    assert_eq!(table.revealed_count(), 3);
    assert_eq!(table.reveal_next().len(), 1);
    assert_eq!(table.reveal_next().len(), 1);
    assert_eq!(table.revealed_count(), 5);
    assert!(table.reveal_next().is_empty());

    assert_eq!(table.deck_remaining(), 43);
    assert_eq!(table.board().len(), 5);
}

#[test]
fn departure_queue_is_deduplicated() {
    let mut table = make_table(&["alice", "bob"]);
    assert!(table.enqueue_departure("alice"));
    assert!(!table.enqueue_departure("alice"));
    assert!(!table.enqueue_departure("nobody"));
    assert!(table.is_departing("alice"));
    assert_eq!(table.disconnect_queue.len(), 1);
}

#[test]
fn removing_seat_before_dealer_shifts_button() {
    let mut table = make_table(&["a", "b", "c", "d"]);
    table.dealer_index = Some(2);

    table.remove_seat(0);
    assert_eq!(table.dealer_index, Some(1));
    assert_eq!(table.seats[1].name, "c");

    table.remove_seat(1);
    assert_eq!(table.dealer_index, Some(0));
    assert_eq!(table.seats.len(), 2);
}

#[test]
fn street_progression_ends_after_river() {
    assert_eq!(Street::PreFlop.next(), Some(Street::Flop));
    assert_eq!(Street::Turn.next(), Some(Street::River));
    assert_eq!(Street::River.next(), None);
    assert_eq!(Street::Turn.visible_board_cards(), 4);
}
