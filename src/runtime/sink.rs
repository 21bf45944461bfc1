use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::TableEvent;

/// Точка выхода событий к транспорту (websocket, тестовый канал, лог).
///
/// Вызывается из актора стола синхронно, поэтому реализация не должна
/// блокироваться надолго.
pub trait EventSink: Send + Sync + 'static {
    fn deliver(&self, player: &str, event: &TableEvent);
}

/// Sink, который только пишет события в лог (dev CLI).
#[derive(Clone, Debug, Default)]
pub struct LoggingSink;

impl EventSink for LoggingSink {
    fn deliver(&self, player: &str, event: &TableEvent) {
        match serde_json::to_string(event) {
            Ok(json) => debug!(%player, %json, "событие стола"),
            Err(err) => warn!(%player, %err, "не удалось сериализовать событие"),
        }
    }
}

/// Sink поверх канала: пары (игрок, событие) уходят получателю.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<(String, TableEvent)>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, TableEvent)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn deliver(&self, player: &str, event: &TableEvent) {
        // Получатель мог уйти: событие просто теряется.
        let _ = self.tx.send((player.to_string(), event.clone()));
    }
}
