//! Тесты рантайма: акторы столов, таймеры фаз, реестр сессии.
//!
//! Время tokio на паузе: `sleep` в тесте мгновенно прокручивает часы,
//! поэтому таймеры фаз срабатывают без реального ожидания.

use std::sync::Arc;
use std::time::Duration;

use holdem_engine::api::{
    Command, CommandResponse, JoinTableCommand, LeaveTableCommand, PlayerActionCommand, SessionError, TableEvent,
    NEW_TABLE,
};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::hand::{HandPhase, Street};
use holdem_engine::domain::player::SeatStatus;
use holdem_engine::engine::{EngineError, PlayerActionKind};
use holdem_engine::runtime::{ChannelSink, SessionManager};
use holdem_engine::EngineConfig;
use tokio::sync::mpsc::UnboundedReceiver;

const DELAY: Duration = Duration::from_millis(1_000);

type Events = UnboundedReceiver<(String, TableEvent)>;

fn new_session(seed: u64) -> (SessionManager, Events) {
    let config = EngineConfig {
        phase_delay_ms: DELAY.as_millis() as u64,
        rng_seed: Some(seed),
        ..EngineConfig::default()
    };
    let (sink, events) = ChannelSink::new();
    (SessionManager::new(config, Arc::new(sink)), events)
}

async fn join(session: &SessionManager, table: &str, player: &str) -> Result<String, SessionError> {
    session
        .join_table(JoinTableCommand {
            table_name: table.to_string(),
            player_name: player.to_string(),
            buy_in: None,
            big_blind: None,
        })
        .await
}

async fn act(
    session: &SessionManager,
    table: &str,
    player: &str,
    action: PlayerActionKind,
    amount: Chips,
) -> Result<(), SessionError> {
    session
        .apply_action(PlayerActionCommand {
            table_name: table.to_string(),
            player_name: player.to_string(),
            action,
            amount,
        })
        .await
}

fn drain(events: &mut Events) -> Vec<(String, TableEvent)> {
    let mut out = Vec::new();
    while let Ok(item) = events.try_recv() {
        out.push(item);
    }
    out
}

/// Стол alice + bob с начатой раздачей (alice – дилер и малый блайнд).
async fn heads_up(session: &SessionManager) {
    assert_eq!(join(session, NEW_TABLE, "alice").await.unwrap(), "alice");
    assert_eq!(join(session, "alice", "bob").await.unwrap(), "alice");
}

#[tokio::test(start_paused = true)]
async fn new_table_is_named_after_creator_and_listed() {
    let (session, _events) = new_session(1);
    assert_eq!(join(&session, NEW_TABLE, "alice").await.unwrap(), "alice");

    let tables = session.list_tables().await;
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "alice");
    assert_eq!(tables[0].player_names, vec!["alice".to_string()]);
    assert!(!tables[0].is_active);
    assert_eq!(tables[0].buy_in, Chips::new(2_000));

    let view = session.snapshot("alice", "alice").await.unwrap();
    assert_eq!(view.phase, HandPhase::Idle);
    assert_eq!(session.table_of("alice"), Some("alice".to_string()));
}

#[tokio::test(start_paused = true)]
async fn second_player_starts_hand_and_each_sees_own_cards() {
    let (session, mut events) = new_session(2);
    heads_up(&session).await;

    let view = session.snapshot("alice", "alice").await.unwrap();
    assert_eq!(view.phase, HandPhase::Betting(Street::PreFlop));
    assert_eq!(view.current_player_index, Some(0));

    let updates = drain(&mut events);
    let last_for = |player: &str| {
        updates
            .iter()
            .rev()
            .find_map(|(to, event)| match event {
                TableEvent::TableUpdate(view) if to == player => Some(view.clone()),
                _ => None,
            })
            .expect("обновление доставлено")
    };

    let alice_view = last_for("alice");
    assert_eq!(alice_view.seats[0].cards.as_ref().map(Vec::len), Some(2));
    assert_eq!(alice_view.seats[1].cards, None);

    let bob_view = last_for("bob");
    assert_eq!(bob_view.seats[0].cards, None);
    assert_eq!(bob_view.seats[1].cards.as_ref().map(Vec::len), Some(2));
}

#[tokio::test(start_paused = true)]
async fn seventh_player_is_turned_away() {
    let (session, _events) = new_session(3);
    join(&session, NEW_TABLE, "p0").await.unwrap();
    for n in 1..6 {
        join(&session, "p0", &format!("p{n}")).await.unwrap();
    }

    let err = join(&session, "p0", "p6").await.unwrap_err();
    assert_eq!(err, SessionError::TableFull("p0".to_string()));
    assert_eq!(session.table_of("p6"), None);
}

#[tokio::test(start_paused = true)]
async fn join_errors_do_not_touch_registry() {
    let (session, _events) = new_session(4);
    assert_eq!(
        join(&session, "nowhere", "alice").await.unwrap_err(),
        SessionError::TableNotFound("nowhere".to_string())
    );

    join(&session, NEW_TABLE, "alice").await.unwrap();
    join(&session, NEW_TABLE, "bob").await.unwrap();
    assert_eq!(
        join(&session, "bob", "alice").await.unwrap_err(),
        SessionError::AlreadySeated("alice".to_string(), "alice".to_string())
    );
    assert_eq!(session.table_count(), 2);
}

/// Одновременный вход одного игрока за два стола: садится только за один.
#[tokio::test(start_paused = true)]
async fn concurrent_joins_seat_player_once() {
    let (session, _events) = new_session(14);
    join(&session, NEW_TABLE, "alice").await.unwrap();
    join(&session, NEW_TABLE, "bob").await.unwrap();

    let (a, b) = tokio::join!(join(&session, "alice", "carol"), join(&session, "bob", "carol"));
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let seated_at = a.or(b).unwrap();
    assert_eq!(session.table_of("carol"), Some(seated_at.clone()));

    let seats: usize = session
        .list_tables()
        .await
        .iter()
        .map(|t| t.player_names.iter().filter(|p| *p == "carol").count())
        .sum();
    assert_eq!(seats, 1);

    // Отказ не оставил брони: после ухода можно сесть за другой стол.
    session.leave_table("carol").unwrap();
    let other = if seated_at == "alice" { "bob" } else { "alice" };
    assert_eq!(join(&session, other, "carol").await.unwrap(), other);
}

#[tokio::test(start_paused = true)]
async fn joining_mid_hand_sits_out_until_next_deal() {
    let (session, _events) = new_session(5);
    heads_up(&session).await;
    join(&session, "alice", "carol").await.unwrap();

    let view = session.snapshot("alice", "carol").await.unwrap();
    assert_eq!(view.seats[2].status, SeatStatus::Inactive);
    assert_eq!(view.seats[2].cards, None);
}

#[tokio::test(start_paused = true)]
async fn next_street_opens_only_after_phase_delay() {
    let (session, _events) = new_session(6);
    heads_up(&session).await;

    act(&session, "alice", "alice", PlayerActionKind::Call, Chips::new(10)).await.unwrap();
    act(&session, "alice", "bob", PlayerActionKind::Check, Chips::ZERO).await.unwrap();

    let view = session.snapshot("alice", "bob").await.unwrap();
    assert_eq!(view.phase, HandPhase::RoundComplete(Street::PreFlop));
    assert_eq!(view.current_player_index, None);
    assert_eq!(view.pot, Chips::new(40));

    tokio::time::sleep(DELAY / 2).await;
    let view = session.snapshot("alice", "bob").await.unwrap();
    assert_eq!(view.phase, HandPhase::RoundComplete(Street::PreFlop));

    tokio::time::sleep(DELAY).await;
    let view = session.snapshot("alice", "bob").await.unwrap();
    assert_eq!(view.phase, HandPhase::Betting(Street::Flop));
    assert_eq!(view.community_cards.iter().flatten().count(), 3);
    assert_eq!(view.current_player_index, Some(1));
}

#[tokio::test(start_paused = true)]
async fn out_of_turn_action_is_rejected() {
    let (session, _events) = new_session(7);
    heads_up(&session).await;

    let err = act(&session, "alice", "bob", PlayerActionKind::Check, Chips::ZERO)
        .await
        .unwrap_err();
    assert_eq!(err, SessionError::Engine(EngineError::NotPlayersTurn("bob".to_string())));

    let view = session.snapshot("alice", "bob").await.unwrap();
    assert_eq!(view.current_player_index, Some(0));
}

#[tokio::test(start_paused = true)]
async fn leaving_on_turn_folds_and_frees_seat_at_next_deal() {
    let (session, _events) = new_session(8);
    heads_up(&session).await;

    // Ход alice: уход = немедленный фолд, bob забирает блайнды.
    session.leave_table("alice").unwrap();
    assert_eq!(session.table_of("alice"), None);

    let view = session.snapshot("alice", "bob").await.unwrap();
    assert_eq!(view.phase, HandPhase::HandComplete);
    assert_eq!(view.seats[1].balance, Chips::new(2_010));

    tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
    let view = session.snapshot("alice", "bob").await.unwrap();
    assert_eq!(view.seats.len(), 1);
    assert_eq!(view.phase, HandPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn departing_player_gets_no_more_updates() {
    let (session, mut events) = new_session(9);
    join(&session, NEW_TABLE, "alice").await.unwrap();
    join(&session, "alice", "bob").await.unwrap();
    join(&session, "alice", "carol").await.unwrap();
    // Идёт раздача с alice и bob, carol ждёт следующей.
    session.leave_table("carol").unwrap();
    session.snapshot("alice", "alice").await.unwrap();
    drain(&mut events);

    act(&session, "alice", "alice", PlayerActionKind::Call, Chips::new(10)).await.unwrap();
    let delivered = drain(&mut events);
    assert!(!delivered.is_empty());
    assert!(delivered.iter().all(|(to, _)| to != "carol"));
}

#[tokio::test(start_paused = true)]
async fn last_player_leaving_closes_table() {
    let (session, _events) = new_session(10);
    join(&session, NEW_TABLE, "alice").await.unwrap();

    session.leave_table("alice").unwrap();
    assert!(session.list_tables().await.is_empty());
    assert_eq!(session.table_count(), 0);

    // Имя освободилось – можно открыть стол заново.
    assert_eq!(join(&session, NEW_TABLE, "alice").await.unwrap(), "alice");
}

#[tokio::test(start_paused = true)]
async fn leave_without_seat_is_an_error() {
    let (session, _events) = new_session(11);
    assert_eq!(
        session.leave_table("ghost").unwrap_err(),
        SessionError::PlayerNotSeated("ghost".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn showdown_is_broadcast_after_checked_down_hand() {
    let (session, mut events) = new_session(12);
    heads_up(&session).await;

    act(&session, "alice", "alice", PlayerActionKind::Call, Chips::new(10)).await.unwrap();
    act(&session, "alice", "bob", PlayerActionKind::Check, Chips::ZERO).await.unwrap();
    for _street in 0..3 {
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        act(&session, "alice", "bob", PlayerActionKind::Check, Chips::ZERO).await.unwrap();
        act(&session, "alice", "alice", PlayerActionKind::Check, Chips::ZERO).await.unwrap();
    }
    tokio::time::sleep(DELAY + Duration::from_millis(10)).await;

    let showdowns: Vec<(String, TableEvent)> = drain(&mut events)
        .into_iter()
        .filter(|(_, e)| matches!(e, TableEvent::Showdown(_)))
        .collect();
    assert_eq!(showdowns.len(), 2);

    let TableEvent::Showdown(view) = &showdowns[0].1 else {
        unreachable!()
    };
    assert_eq!(view.hands.len(), 2);
    let won: Chips = view.hands.iter().map(|h| h.won).sum();
    assert_eq!(won, Chips::new(40));
}

#[tokio::test(start_paused = true)]
async fn same_seed_deals_same_cards() {
    let (first, _e1) = new_session(42);
    let (second, _e2) = new_session(42);
    heads_up(&first).await;
    heads_up(&second).await;

    let a = first.snapshot("alice", "alice").await.unwrap();
    let b = second.snapshot("alice", "alice").await.unwrap();
    assert_eq!(a.seats[0].cards, b.seats[0].cards);
    assert!(a.seats[0].cards.is_some());
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_tables_and_silences_timers() {
    let (session, _events) = new_session(13);
    heads_up(&session).await;
    act(&session, "alice", "alice", PlayerActionKind::Call, Chips::new(10)).await.unwrap();
    act(&session, "alice", "bob", PlayerActionKind::Check, Chips::ZERO).await.unwrap();

    // Таймер фазы взведён, но стол закрывается раньше.
    session.shutdown();
    tokio::time::sleep(DELAY * 2).await;

    assert_eq!(session.table_count(), 0);
    assert_eq!(
        act(&session, "alice", "bob", PlayerActionKind::Check, Chips::ZERO)
            .await
            .unwrap_err(),
        SessionError::TableNotFound("alice".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn dispatch_routes_transport_commands() {
    let (session, _events) = new_session(14);

    let joined = session
        .dispatch(Command::JoinTableRequest(JoinTableCommand {
            table_name: NEW_TABLE.to_string(),
            player_name: "alice".to_string(),
            buy_in: Some(Chips::new(300)),
            big_blind: Some(Chips::new(4)),
        }))
        .await
        .unwrap();
    assert_eq!(
        joined,
        CommandResponse::Joined {
            table_name: "alice".to_string()
        }
    );

    let CommandResponse::Tables(tables) = session.dispatch(Command::ListTables).await.unwrap() else {
        panic!("ожидали список столов");
    };
    assert_eq!(tables[0].buy_in, Chips::new(300));
    assert_eq!(tables[0].big_blind, Chips::new(4));

    let left = session
        .dispatch(Command::LeaveTable(LeaveTableCommand {
            player_name: "alice".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(left, CommandResponse::Ok);
}
