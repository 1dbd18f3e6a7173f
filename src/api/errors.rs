use serde::{Deserialize, Serialize};

use crate::domain::{CubeId, DraftId, SeatId};
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Драфт не найден.
    DraftNotFound(DraftId),

    /// Место не найдено в драфте.
    SeatNotFound(SeatId),

    /// Куб не найден.
    CubeNotFound(CubeId),

    /// Параллельные записи не разрешились, можно повторить запрос.
    Conflict(String),

    /// Фатальная ошибка движка (маленький куб, нарушенный инвариант).
    EngineError(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineError(err.to_string())
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::DraftNotFound(id) => ApiError::DraftNotFound(id),
            ManagerError::CubeNotFound(id) => ApiError::CubeNotFound(id),
            ManagerError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            ManagerError::Engine(e) => e.into(),
        }
    }
}
