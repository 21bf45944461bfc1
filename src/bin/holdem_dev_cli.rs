// src/bin/holdem_dev_cli.rs

use std::sync::Arc;
use std::time::Duration;

use holdem_engine::api::{JoinTableCommand, PlayerActionCommand, TableEvent, TableView, NEW_TABLE};
use holdem_engine::domain::chips::Chips;
use holdem_engine::engine::PlayerActionKind;
use holdem_engine::infra::init_tracing;
use holdem_engine::runtime::{ChannelSink, SessionManager};
use holdem_engine::EngineConfig;
use tracing::{info, warn};

/// Сколько действий ботов сыграть до остановки.
const MAX_ACTIONS: usize = 400;

#[tokio::main]
async fn main() {
    init_tracing("info,holdem_engine=debug");

    let config = match EngineConfig::default().with_env_overrides() {
        Ok(config) => EngineConfig {
            phase_delay_ms: config.phase_delay_ms.min(200),
            ..config
        },
        Err(err) => {
            warn!(%err, "конфиг из окружения не прочитан, берём значения по умолчанию");
            EngineConfig {
                phase_delay_ms: 200,
                ..EngineConfig::default()
            }
        }
    };

    let (sink, mut events) = ChannelSink::new();
    let session = SessionManager::new(config, Arc::new(sink));

    println!("holdem_dev_cli: три стола с ботами (check/call, иногда raise)…");

    // 1. Столы: хозяин создаёт через "#new", остальные подсаживаются.
    let layouts: [(&str, usize); 3] = [("alice", 2), ("bob", 4), ("carol", 6)];
    for (owner, players) in layouts {
        let created = session
            .join_table(JoinTableCommand {
                table_name: NEW_TABLE.to_string(),
                player_name: owner.to_string(),
                buy_in: Some(Chips::new(500)),
                big_blind: Some(Chips::new(10)),
            })
            .await;
        let table_name = match created {
            Ok(name) => name,
            Err(err) => {
                warn!(%err, "стол не создан");
                continue;
            }
        };

        for n in 1..players {
            let bot = format!("{owner}-bot{n}");
            if let Err(err) = session
                .join_table(JoinTableCommand {
                    table_name: table_name.clone(),
                    player_name: bot.clone(),
                    buy_in: None,
                    big_blind: None,
                })
                .await
            {
                warn!(%bot, %err, "бот не сел");
            }
        }
    }

    for summary in session.list_tables().await {
        println!(
            "  стол {:<8} бай-ин {:>8} ББ {:>6} игроки {:?}",
            summary.name, summary.buy_in, summary.big_blind, summary.player_names
        );
    }

    // 2. Боты отвечают на свои ходы, пока не наиграют MAX_ACTIONS.
    let mut actions = 0usize;
    let mut showdowns = 0usize;
    while actions < MAX_ACTIONS {
        let next = tokio::time::timeout(Duration::from_secs(5), events.recv()).await;
        let (player, event) = match next {
            Ok(Some(item)) => item,
            Ok(None) => break,
            Err(_) => {
                info!("событий нет, все столы простаивают");
                break;
            }
        };

        match event {
            TableEvent::Showdown(view) => {
                showdowns += 1;
                if view.hands.first().map(|h| h.player_name.as_str()) == Some(player.as_str()) {
                    for hand in &view.hands {
                        println!(
                            "  [{}] {:<12} {:?} выиграл {}",
                            view.table_name, hand.player_name, hand.rating_category, hand.won
                        );
                    }
                }
            }
            TableEvent::TableUpdate(view) => {
                let Some((kind, amount)) = bot_decision(&view, &player, actions) else {
                    continue;
                };
                actions += 1;
                let result = session
                    .apply_action(PlayerActionCommand {
                        table_name: view.name.clone(),
                        player_name: player.clone(),
                        action: kind,
                        amount,
                    })
                    .await;
                if let Err(err) = result {
                    warn!(%player, %err, "действие бота отклонено");
                }
            }
        }
    }

    println!();
    println!("Итог: действий {actions}, шоудаунов {showdowns}");
    for summary in session.list_tables().await {
        println!("  стол {:<8} игроки {:?}", summary.name, summary.player_names);
    }

    session.shutdown();
}

/// Простой бот: чек, если нечего доплачивать, иначе колл; каждое 7-е решение – рейз.
fn bot_decision(view: &TableView, player: &str, step: usize) -> Option<(PlayerActionKind, Chips)> {
    let current = view.current_player_index?;
    let me = view.seats.get(current)?;
    if me.name != player {
        return None;
    }

    let target = view.seats.iter().map(|s| s.current_bid).max().unwrap_or(Chips::ZERO);
    let to_call = target.saturating_sub(me.current_bid);

    if step % 7 == 6 && me.balance > to_call + view.big_blind {
        return Some((PlayerActionKind::Raise, to_call + view.big_blind));
    }
    if to_call.is_zero() {
        Some((PlayerActionKind::Check, Chips::ZERO))
    } else {
        Some((PlayerActionKind::Call, to_call))
    }
}
