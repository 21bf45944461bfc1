use std::time::Duration;

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

use super::actor::TableMessage;

/// Отложенный переход фазы стола (следующая улица / новая раздача).
///
/// В каждый момент взведён не больше одного таймера. Новый `schedule`
/// отменяет предыдущий и увеличивает эпоху; сработавший таймер с устаревшей
/// эпохой актор игнорирует. Таймер держит слабую ссылку на очередь стола,
/// поэтому после закрытия стола срабатывание ничего не делает.
#[derive(Debug, Default)]
pub struct PhaseTimer {
    epoch: u64,
    handle: Option<JoinHandle<()>>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Таймер `epoch` – последний взведённый и ещё не отменённый.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.handle.is_some() && self.epoch == epoch
    }

    /// Взвести таймер: через `delay` в очередь стола придёт `TimerFired`.
    pub(crate) fn schedule(&mut self, delay: Duration, inbox: WeakUnboundedSender<TableMessage>) {
        self.cancel();
        self.epoch += 1;
        let epoch = self.epoch;

        trace!(epoch, delay_ms = delay.as_millis() as u64, "таймер фазы взведён");

        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match inbox.upgrade() {
                Some(tx) => {
                    let _ = tx.send(TableMessage::TimerFired { epoch });
                }
                None => trace!(epoch, "стол уже закрыт, таймер пропущен"),
            }
        }));
    }

    /// Погасить таймер (после срабатывания или при закрытии стола).
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
