//! Главный модуль приложения бустер-драфта на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! связываем contract/service с нашим DraftState.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};
use crate::state::DraftState;

/// Операции (внешние команды), которые модуль принимает.
///
/// Для простоты: одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DraftOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera.
/// Пока нам не нужны – оставим пустой enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DraftMessage {}

/// Запросы к сервису (read-only).
pub type DraftQuery = Query;

/// Ответы на запросы.
pub type DraftResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct DraftAbi;

impl ContractAbi for DraftAbi {
    type Operation = DraftOperation;
    type Response = ();
}

impl ServiceAbi for DraftAbi {
    type Query = DraftQuery;
    type QueryResponse = DraftResponse;
}

/// Экспортируем типы состояния, чтобы contract.rs и service.rs могли их использовать.
pub type Storage = DraftState;
