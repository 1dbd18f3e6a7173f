//! Внешний API движка драфта.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние (создать драфт, join, begin, пик, heartbeat);
//! - запросы (queries.rs) — только чтение;
//! - DTO (dto.rs) — удобные структуры для фронта;
//! - ошибки (errors.rs) — то, что видит клиент;
//! - handler.rs — исполнение команд/запросов поверх DraftManager.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod handler;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use handler::*;
pub use queries::*;
