//! Движок бустер-драфта: сборка бустеров, рассадка, передача бустеров, боты.
//!
//! Высокоуровневый объект: `DraftEngine`
//! Основные операции:
//!   - `join` / `begin` – набор участников и старт драфта
//!   - `make_selection` – пик карты местом
//!   - `heartbeat` – догнать ботов и проверить конец раунда
//!
//! Поверх него `DraftManager` – транзакционная граница на каждый драфт.

pub mod bot_policy;
pub mod draft_engine;
pub mod draft_history;
pub mod draft_manager;
pub mod errors;
pub mod pack_allocator;
pub mod seat_ring;

pub use bot_policy::{BotPolicy, RandomBotPolicy};
pub use draft_engine::{DraftEngine, JoinOutcome};
pub use draft_history::{DraftEvent, DraftEventKind, DraftHistory};
pub use draft_manager::{DraftManager, ManagerError, ParticipantDraft};
pub use errors::EngineError;
pub use pack_allocator::{generate_cube_packs, generate_packs};
pub use seat_ring::{PassDirection, SeatRing};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`), в тестах – детерминированные подмены.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерный индекс в диапазоне `0..len`. Вызывается только с `len > 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource> RandomSource for &mut R {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        (**self).shuffle(slice)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}
