use linera_sdk::views::{linera_views, MapView, RootView, ViewStorageContext};
use serde::{Deserialize, Serialize};

use crate::domain::cube::Cube;
use crate::domain::draft::{Draft, DraftEntry};
use crate::domain::pack::{Pack, Pick};
use crate::domain::seat::Seat;
use crate::domain::{CubeId, DraftId};
use crate::engine::draft_engine::DraftEngine;
use crate::engine::draft_history::DraftHistory;
use crate::engine::errors::EngineError;
use crate::engine::seat_ring::SeatRing;

/// Снэпшот DraftEngine, который можно хранить во View / в хранилище.
/// Это «замороженный» драфт: всё, что нужно, чтобы восстановить DraftEngine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftSnapshot {
    pub draft: Draft,
    pub entries: Vec<DraftEntry>,
    pub seats: Vec<Seat>,
    pub packs: Vec<Pack>,
    pub picks: Vec<Pick>,
    pub history: DraftHistory,
    pub next_local_id: u64,
}

impl DraftSnapshot {
    /// Упаковать живой DraftEngine в снапшот для хранения.
    pub fn from_engine(engine: &DraftEngine) -> Self {
        Self {
            draft: engine.draft.clone(),
            entries: engine.entries.clone(),
            seats: engine.ring.seats().to_vec(),
            packs: engine.packs.clone(),
            picks: engine.picks.clone(),
            history: engine.history.clone(),
            next_local_id: engine.next_local_id,
        }
    }

    /// Развернуть снапшот обратно в DraftEngine (в памяти).
    /// Кольцо мест проверяется: битая рассадка – ошибка, а не тихий баг.
    pub fn into_engine(self) -> Result<DraftEngine, EngineError> {
        Ok(DraftEngine {
            draft: self.draft,
            entries: self.entries,
            ring: SeatRing::from_seats(self.seats)?,
            packs: self.packs,
            picks: self.picks,
            history: self.history,
            next_local_id: self.next_local_id,
        })
    }

    pub fn id(&self) -> DraftId {
        self.draft.id
    }
}

/// Глобальное состояние драфт-приложения на Linera.
///
/// Важное:
/// - НЕ вкладываем RegisterView внутрь MapView.
/// - Драфт хранится целиком одним снапшотом: все изменения драфта
///   пишутся одной записью по ключу DraftId.
#[derive(RootView)]
#[view(context = ViewStorageContext)]
pub struct DraftState {
    /// Ключ: DraftId, значение: снапшот драфта.
    #[view(map)]
    pub drafts: MapView<DraftId, DraftSnapshot>,

    /// Кубы, из которых собираются бустеры.
    #[view(map)]
    pub cubes: MapView<CubeId, Cube>,
}
