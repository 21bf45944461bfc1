//! Внешний API покерного движка.
//!
//! Здесь описываются:
//! - команды (commands.rs): что присылает транспорт;
//! - запросы (queries.rs): проекции стола с редактированием по зрителю;
//! - DTO (dto.rs): события и карточки столов для клиента;
//! - ошибки (errors.rs): ошибки уровня сессии.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
