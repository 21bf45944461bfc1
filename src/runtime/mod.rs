//! Рантайм столов: по одному tokio-актору на стол, реестр сессии,
//! таймеры фаз и выход событий к транспорту.

pub mod actor;
pub mod session;
pub mod sink;
pub mod timer;

pub use actor::{TableActor, TableHandle};
pub use session::SessionManager;
pub use sink::{ChannelSink, EventSink, LoggingSink};
pub use timer::PhaseTimer;
