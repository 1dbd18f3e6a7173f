use crate::domain::{DraftId, SeatPosition};

use thiserror::Error;

/// Ошибки движка драфта.
///
/// Нарушения предусловий (чужой бустер, драфт не начат, стол полон)
/// сюда НЕ попадают: они возвращаются как `false` / `JoinOutcome::SeatUnavailable`.
/// Здесь только фатальные случаи, которые прерывают операцию целиком.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Недостаточно карт в пуле: запрошено {requested}, доступно {available}")]
    InsufficientPool { requested: usize, available: usize },

    #[error("Кольцо мест повреждено: позиция {0} отсутствует или занята дважды")]
    MalformedRing(SeatPosition),

    #[error("Боты не закончили пики за {passes} проходов (драфт {draft_id}, раунд {round})")]
    BotLoopExceeded {
        draft_id: DraftId,
        round: u32,
        passes: usize,
    },

    #[error("Нарушен инвариант движка: {0}")]
    InvariantViolation(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
