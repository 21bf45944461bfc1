//! Актор одного стола: единственный владелец `Table`.
//!
//! Все изменения стола идут через очередь сообщений, поэтому действия,
//! посадки, уходы и срабатывания таймеров строго упорядочены.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::{
    broadcast_recipients, build_showdown_view, build_table_summary, build_table_view, build_table_view_for,
    SessionError, TableEvent, TableSummary, TableView,
};
use crate::domain::hand::HandPhase;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::{advance_round, apply_action, start_hand, DealOutcome, EngineError, HandStatus, PlayerAction};
use crate::infra::TableRng;

use super::session::SessionRegistry;
use super::timer::PhaseTimer;

/// Сообщения в очередь стола.
#[derive(Debug)]
pub(crate) enum TableMessage {
    Join {
        player: String,
        respond: oneshot::Sender<Result<SeatIndex, SessionError>>,
    },
    Leave {
        player: String,
    },
    Action {
        action: PlayerAction,
        respond: oneshot::Sender<Result<(), SessionError>>,
    },
    Snapshot {
        viewer: String,
        respond: oneshot::Sender<TableView>,
    },
    Summary {
        respond: oneshot::Sender<TableSummary>,
    },
    TimerFired {
        epoch: u64,
    },
    Shutdown,
}

/// Ручка стола: клонируемый адрес очереди актора.
#[derive(Clone, Debug)]
pub struct TableHandle {
    name: String,
    sender: mpsc::UnboundedSender<TableMessage>,
}

impl TableHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Актор ещё принимает сообщения.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    fn send(&self, message: TableMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .map_err(|_| SessionError::TableClosed(self.name.clone()))
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(make(tx))?;
        rx.await.map_err(|_| SessionError::TableClosed(self.name.clone()))
    }

    pub async fn join(&self, player: &str) -> Result<SeatIndex, SessionError> {
        let player = player.to_string();
        self.request(|respond| TableMessage::Join { player, respond }).await?
    }

    /// Уход обрабатывается асинхронно, ответа нет.
    pub fn leave(&self, player: &str) -> Result<(), SessionError> {
        self.send(TableMessage::Leave {
            player: player.to_string(),
        })
    }

    pub async fn act(&self, action: PlayerAction) -> Result<(), SessionError> {
        self.request(|respond| TableMessage::Action { action, respond }).await?
    }

    /// Проекция стола глазами `viewer` (посторонний видит только публичное).
    pub async fn snapshot(&self, viewer: &str) -> Result<TableView, SessionError> {
        let viewer = viewer.to_string();
        self.request(|respond| TableMessage::Snapshot { viewer, respond }).await
    }

    pub async fn summary(&self) -> Result<TableSummary, SessionError> {
        self.request(|respond| TableMessage::Summary { respond }).await
    }

    pub fn shutdown(&self) {
        let _ = self.sender.send(TableMessage::Shutdown);
    }
}

/// Актор стола.
pub struct TableActor {
    table: Table,
    rng: TableRng,
    inbox: mpsc::UnboundedReceiver<TableMessage>,
    /// Слабая ссылка на свою очередь – для таймеров.
    self_sender: mpsc::WeakUnboundedSender<TableMessage>,
    timer: PhaseTimer,
    registry: Arc<SessionRegistry>,
    closed: bool,
}

impl TableActor {
    pub(crate) fn new(table: Table, rng: TableRng, registry: Arc<SessionRegistry>) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::unbounded_channel();
        let handle = TableHandle {
            name: table.name.clone(),
            sender: sender.clone(),
        };
        let actor = Self {
            table,
            rng,
            inbox,
            self_sender: sender.downgrade(),
            timer: PhaseTimer::new(),
            registry,
            closed: false,
        };
        (actor, handle)
    }

    /// Цикл обработки сообщений. Завершается, когда стол опустел или закрыт.
    pub async fn run(mut self) {
        info!(table = %self.table.name, "стол открыт");

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            if self.closed {
                break;
            }
        }

        self.timer.cancel();
        self.inbox.close();
        let name = self.table.name.clone();
        self.registry.tables.remove_if(&name, |_, handle| !handle.is_open());
        info!(table = %name, "стол закрыт");
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Join { player, respond } => {
                let result = self.handle_join(&player);
                let _ = respond.send(result);
            }
            TableMessage::Leave { player } => self.handle_leave(&player),
            TableMessage::Action { action, respond } => {
                let result = self.handle_action(&action);
                let _ = respond.send(result);
            }
            TableMessage::Snapshot { viewer, respond } => {
                let _ = respond.send(build_table_view_for(&self.table, &viewer));
            }
            TableMessage::Summary { respond } => {
                let _ = respond.send(build_table_summary(&self.table));
            }
            TableMessage::TimerFired { epoch } => self.handle_timer(epoch),
            TableMessage::Shutdown => self.closed = true,
        }
    }

    fn handle_join(&mut self, player: &str) -> Result<SeatIndex, SessionError> {
        let seat = self.table.seat_player(player).map_err(|err| match err {
            EngineError::TableFull(name) => SessionError::TableFull(name),
            other => SessionError::Engine(other),
        })?;
        info!(table = %self.table.name, %player, seat, "игрок сел за стол");

        if self.table.phase == HandPhase::Idle {
            self.deal();
        } else {
            self.broadcast();
        }
        Ok(seat)
    }

    fn handle_leave(&mut self, player: &str) {
        let Some(seat) = self.table.seat_index(player) else {
            return;
        };

        // Карт на руках нет – место освобождаем сразу.
        if matches!(self.table.phase, HandPhase::Idle | HandPhase::HandComplete) {
            self.table.remove_seat(seat);
            self.forget_players(&[player.to_string()]);
            info!(table = %self.table.name, %player, "игрок покинул стол");
            if self.close_if_empty() {
                return;
            }
            self.broadcast();
            return;
        }

        if self.table.enqueue_departure(player) {
            debug!(table = %self.table.name, %player, "игрок в очереди на выход");
        }
        if self.table.current_player == Some(seat) {
            self.fold_departing();
        } else {
            self.broadcast();
        }
    }

    fn handle_action(&mut self, action: &PlayerAction) -> Result<(), SessionError> {
        if self.table.is_departing(&action.player) {
            return Err(EngineError::SeatNotFound(action.player.clone()).into());
        }
        match apply_action(&mut self.table, action) {
            Ok(status) => {
                self.on_status(status);
                Ok(())
            }
            Err(err) => {
                // Чужой ход и действие вне раунда: обычный шум от клиента.
                if err.is_rejected_action() {
                    debug!(table = %self.table.name, player = %action.player, %err, "действие отклонено");
                } else {
                    warn!(table = %self.table.name, player = %action.player, %err, "действие отклонено");
                }
                Err(err.into())
            }
        }
    }

    fn handle_timer(&mut self, epoch: u64) {
        if !self.timer.is_current(epoch) {
            debug!(table = %self.table.name, epoch, "устаревший таймер");
            return;
        }
        self.timer.cancel();

        match self.table.phase {
            HandPhase::RoundComplete(_) => match advance_round(&mut self.table) {
                Ok(status) => self.on_status(status),
                Err(err) => warn!(table = %self.table.name, %err, "не удалось перейти к следующей улице"),
            },
            HandPhase::HandComplete => self.deal(),
            _ => {}
        }
    }

    /// Реакция на результат шага движка: рассылка и, при необходимости, таймер.
    fn on_status(&mut self, status: HandStatus) {
        match status {
            HandStatus::Ongoing => {
                self.broadcast();
                self.fold_departing();
            }
            HandStatus::RoundComplete => {
                self.broadcast();
                self.schedule_phase();
            }
            HandStatus::Finished(result) => {
                self.broadcast();
                if !result.showdown.is_empty() {
                    let event = TableEvent::Showdown(build_showdown_view(&self.table, &result.showdown));
                    for (_, player) in broadcast_recipients(&self.table) {
                        self.registry.sink.deliver(&player, &event);
                    }
                }
                self.schedule_phase();
            }
        }
    }

    /// Если ход у игрока из очереди выхода – фолдим за него.
    fn fold_departing(&mut self) {
        let Some(seat) = self.table.current_player else {
            return;
        };
        let name = self.table.seats[seat].name.clone();
        if !self.table.is_departing(&name) {
            return;
        }

        debug!(table = %self.table.name, player = %name, "автофолд ушедшего игрока");
        match apply_action(&mut self.table, &PlayerAction::fold(name)) {
            Ok(status) => self.on_status(status),
            Err(err) => warn!(table = %self.table.name, %err, "автофолд не прошёл"),
        }
    }

    /// Новая раздача (или переход в Idle, если играть некому).
    fn deal(&mut self) {
        match start_hand(&mut self.table, &mut self.rng) {
            Ok(outcome) => {
                self.forget_players(outcome.removed());
                if self.close_if_empty() {
                    return;
                }
                self.broadcast();
                if matches!(outcome, DealOutcome::Dealt { .. }) {
                    self.fold_departing();
                }
            }
            Err(err) => warn!(table = %self.table.name, %err, "раздача не началась"),
        }
    }

    fn schedule_phase(&mut self) {
        let delay = self.registry.config.phase_delay();
        self.timer.schedule(delay, self.self_sender.clone());
    }

    /// Убрать игроков из реестра сессии (только если они числятся за этим столом).
    fn forget_players(&self, players: &[String]) {
        for player in players {
            self.registry
                .seats
                .remove_if(player, |_, table| *table == self.table.name);
        }
    }

    fn close_if_empty(&mut self) -> bool {
        if self.table.seats.is_empty() {
            self.closed = true;
        }
        self.closed
    }

    /// Каждому сидящему (кроме уходящих) – своя проекция стола.
    fn broadcast(&self) {
        for (seat, player) in broadcast_recipients(&self.table) {
            let event = TableEvent::TableUpdate(build_table_view(&self.table, Some(seat)));
            self.registry.sink.deliver(&player, &event);
        }
    }
}
