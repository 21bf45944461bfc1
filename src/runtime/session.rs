//! Сессия: реестр столов и игроков поверх акторов.
//!
//! Глобального состояния нет: всё хранится в `SessionManager`, сколько угодно
//! независимых менеджеров могут жить в одном процессе (тесты, несколько лобби).

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, warn};

use crate::api::{
    Command, CommandResponse, JoinTableCommand, PlayerActionCommand, SessionError, TableSummary, TableView,
    NEW_TABLE,
};
use crate::config::EngineConfig;
use crate::domain::chips::Chips;
use crate::domain::table::Table;
use crate::engine::PlayerAction;
use crate::infra::{RngSeed, SystemRng, TableRng};

use super::actor::{TableActor, TableHandle};
use super::sink::EventSink;

/// Общие данные сессии, разделяемые с акторами столов.
pub(crate) struct SessionRegistry {
    pub(crate) config: EngineConfig,
    pub(crate) sink: Arc<dyn EventSink>,
    /// Имя стола → актор.
    pub(crate) tables: DashMap<String, TableHandle>,
    /// Имя игрока → имя стола.
    pub(crate) seats: DashMap<String, String>,
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionRegistry>,
}

impl SessionManager {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            inner: Arc::new(SessionRegistry {
                config,
                sink,
                tables: DashMap::new(),
                seats: DashMap::new(),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Сесть за стол. `"#new"` создаёт стол с именем игрока.
    ///
    /// Имя игрока занимается в реестре до обращения к актору: параллельный
    /// вход того же игрока получит `AlreadySeated`. При ошибке бронь снимается.
    /// Возвращает имя стола, за который сел игрок.
    pub async fn join_table(&self, cmd: JoinTableCommand) -> Result<String, SessionError> {
        let JoinTableCommand {
            table_name,
            player_name: player,
            buy_in,
            big_blind,
        } = cmd;
        let create = table_name == NEW_TABLE;
        let target = if create { player.clone() } else { table_name };

        match self.inner.seats.entry(player.clone()) {
            Entry::Occupied(seat) => return Err(SessionError::AlreadySeated(player, seat.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(target.clone());
            }
        }

        let result = self.seat_at(&player, &target, create, buy_in, big_blind).await;
        match &result {
            Err(_) => {
                self.inner.seats.remove_if(&player, |_, table| *table == target);
            }
            // Игрок успел уйти, пока актор его сажал.
            Ok(table) if self.table_of(&player).as_deref() != Some(table.as_str()) => {
                self.handle(table)?.leave(&player)?;
            }
            Ok(_) => {}
        }
        result
    }

    async fn seat_at(
        &self,
        player: &str,
        target: &str,
        create: bool,
        buy_in: Option<Chips>,
        big_blind: Option<Chips>,
    ) -> Result<String, SessionError> {
        let handle = if create {
            self.create_table(target, buy_in, big_blind)?
        } else {
            self.handle(target)?
        };

        match handle.join(player).await {
            Ok(_) => Ok(handle.name().to_string()),
            Err(err) => {
                if create {
                    handle.shutdown();
                }
                Err(err)
            }
        }
    }

    fn create_table(
        &self,
        name: &str,
        buy_in: Option<Chips>,
        big_blind: Option<Chips>,
    ) -> Result<TableHandle, SessionError> {
        match self.inner.tables.entry(name.to_string()) {
            Entry::Occupied(_) => Err(SessionError::TableExists(name.to_string())),
            Entry::Vacant(slot) => {
                let config = self.inner.config.table_config(buy_in, big_blind);
                let table = Table::new(name, config);
                let rng = match self.inner.config.rng_seed {
                    Some(seed) => TableRng::Seeded(RngSeed::from_u64(seed).derive_for_table(name).to_rng()),
                    None => TableRng::System(SystemRng),
                };

                info!(
                    table = %name,
                    buy_in = %table.config.buy_in,
                    big_blind = %table.config.big_blind,
                    "создан новый стол"
                );

                let (actor, handle) = TableActor::new(table, rng, Arc::clone(&self.inner));
                tokio::spawn(actor.run());
                slot.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    /// Встать из-за стола. Место освободится на границе раздачи.
    pub fn leave_table(&self, player: &str) -> Result<(), SessionError> {
        let (_, table) = self
            .inner
            .seats
            .remove(player)
            .ok_or_else(|| SessionError::PlayerNotSeated(player.to_string()))?;
        self.handle(&table)?.leave(player)
    }

    /// Действие игрока. Отклонённое действие состояние не меняет.
    pub async fn apply_action(&self, cmd: PlayerActionCommand) -> Result<(), SessionError> {
        let handle = self.handle(&cmd.table_name)?;
        let action = PlayerAction::new(cmd.player_name, cmd.action, cmd.amount);
        handle.act(action).await
    }

    /// Все открытые столы (только публичные поля), по имени.
    pub async fn list_tables(&self) -> Vec<TableSummary> {
        let handles: Vec<TableHandle> = self.inner.tables.iter().map(|e| e.value().clone()).collect();

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.summary().await {
                Ok(summary) => summaries.push(summary),
                Err(err) => warn!(table = %handle.name(), %err, "стол не ответил"),
            }
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// Стол глазами игрока `viewer`.
    pub async fn snapshot(&self, table_name: &str, viewer: &str) -> Result<TableView, SessionError> {
        self.handle(table_name)?.snapshot(viewer).await
    }

    /// За каким столом сидит игрок.
    pub fn table_of(&self, player: &str) -> Option<String> {
        self.inner.seats.get(player).map(|t| t.value().clone())
    }

    pub fn table_count(&self) -> usize {
        self.inner.tables.len()
    }

    /// Разбор команды транспорта.
    pub async fn dispatch(&self, command: Command) -> Result<CommandResponse, SessionError> {
        match command {
            Command::JoinTableRequest(cmd) => {
                let table_name = self.join_table(cmd).await?;
                Ok(CommandResponse::Joined { table_name })
            }
            Command::LeaveTable(cmd) => {
                self.leave_table(&cmd.player_name)?;
                Ok(CommandResponse::Ok)
            }
            Command::PlayerAction(cmd) => {
                self.apply_action(cmd).await?;
                Ok(CommandResponse::Ok)
            }
            Command::ListTables => Ok(CommandResponse::Tables(self.list_tables().await)),
        }
    }

    /// Закрыть все столы. Отложенные таймеры после этого ничего не делают.
    pub fn shutdown(&self) {
        for entry in self.inner.tables.iter() {
            entry.value().shutdown();
        }
        self.inner.tables.clear();
        self.inner.seats.clear();
        info!("сессия остановлена");
    }

    fn handle(&self, table_name: &str) -> Result<TableHandle, SessionError> {
        self.inner
            .tables
            .get(table_name)
            .map(|h| h.value().clone())
            .ok_or_else(|| SessionError::TableNotFound(table_name.to_string()))
    }
}
