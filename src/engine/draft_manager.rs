// src/engine/draft_manager.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::{
    CardPool, Cube, CubeId, Draft, DraftId, EntryId, ParticipantId, Pack, Pick, Seat, SeatId,
    SeatPosition,
};
use crate::engine::bot_policy::BotPolicy;
use crate::engine::draft_engine::{DraftEngine, JoinOutcome};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::DraftStorage;
use crate::infra::rng_seed::{RngSeed, SeedStream};
use crate::state::DraftSnapshot;

/// Ошибки уровня менеджера драфтов (над движком одного драфта).
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Драфт {0} не найден")]
    DraftNotFound(DraftId),

    #[error("Куб {0} не найден")]
    CubeNotFound(CubeId),

    #[error("Драфт {draft_id}: конфликт записи не разрешился за {attempts} попыток")]
    Conflict { draft_id: DraftId, attempts: u32 },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Участие в драфте для списка "мои драфты".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParticipantDraft {
    /// Заявка в ещё не начатый драфт.
    Entry { draft_id: DraftId, draft_name: String },
    /// Место в начатом драфте.
    Seat {
        draft_id: DraftId,
        draft_name: String,
        position: SeatPosition,
    },
}

/// Менеджер драфтов:
/// - хранит драфты в `DraftStorage` (снапшот + версия на драфт);
/// - каждая операция: загрузить → применить к DraftEngine → сохранить,
///   если версия не поменялась, иначе повторить на свежем состоянии;
/// - при ошибке движка ничего не сохраняется.
///
/// Между вызовами состояние драфта в памяти не держится.
pub struct DraftManager<S: DraftStorage> {
    storage: S,
    config: EngineConfig,
    ids: IdGenerator,
}

impl<S: DraftStorage> DraftManager<S> {
    pub fn new(storage: S, config: EngineConfig) -> Self {
        let last_draft = storage.draft_ids().into_iter().max().unwrap_or(0);
        let last_cube = storage.cube_ids().into_iter().max().unwrap_or(0);
        Self {
            storage,
            config,
            ids: IdGenerator::starting_after(last_draft, last_cube),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Кубы и драфты
    // ------------------------------------------------------------------

    /// Сохранить куб (новый или обновлённый). Id выбирает клиент.
    pub fn register_cube(&self, cube: Cube) -> CubeId {
        let id = cube.id;
        self.ids.observe_cube_id(id);
        self.storage.save_cube(&cube);
        id
    }

    /// Новый пустой куб с раскладкой бустеров из конфига.
    ///
    /// Id берётся из счётчика; занятые id пропускаются, чужой куб не перезаписывается.
    pub fn create_cube(&self, name: impl Into<String>, owner: ParticipantId) -> Cube {
        let mut cube = Cube::new(self.ids.next_cube_id(), name, owner)
            .with_pack_layout(self.config.default_pack_count, self.config.default_pack_size);
        while !self.storage.insert_cube(&cube) {
            debug!(target: "storage", "id куба {} занят, берём следующий", cube.id);
            cube.id = self.ids.next_cube_id();
        }
        cube
    }

    pub fn cube(&self, id: CubeId) -> Option<Cube> {
        self.storage.load_cube(id)
    }

    /// Создать драфт. Число раундов – из куба, иначе из конфига.
    pub fn create_draft(
        &self,
        name: impl Into<String>,
        creator: Option<ParticipantId>,
        cube_id: Option<CubeId>,
        max_players: Option<u8>,
    ) -> Result<DraftId, ManagerError> {
        let total_rounds = match cube_id {
            Some(cid) => {
                let cube = self
                    .storage
                    .load_cube(cid)
                    .ok_or(ManagerError::CubeNotFound(cid))?;
                cube.default_pack_count()
            }
            None => self.config.default_pack_count,
        };

        let id = self.ids.next_draft_id();
        let max_players = max_players.unwrap_or(self.config.default_max_players);

        let mut draft = Draft::new(id, name, max_players, total_rounds);
        draft.creator = creator;
        draft.cube = cube_id;

        let engine = DraftEngine::new(draft);
        self.storage
            .save_draft(&DraftSnapshot::from_engine(&engine), None)
            .map_err(|_| ManagerError::Conflict {
                draft_id: id,
                attempts: 1,
            })?;

        info!(target: "draft", "создан драфт {} ({} мест, {} раундов)", id, max_players, total_rounds);
        Ok(id)
    }

    /// Удалить драфт вместе с местами, бустерами и пиками.
    pub fn delete_draft(&self, draft_id: DraftId) -> bool {
        let deleted = self.storage.delete_draft(draft_id);
        if deleted {
            info!(target: "draft", "драфт {} удалён", draft_id);
        }
        deleted
    }

    // ------------------------------------------------------------------
    // Операции жизненного цикла
    // ------------------------------------------------------------------

    pub fn join(&self, draft_id: DraftId, participant: ParticipantId) -> Result<JoinOutcome, ManagerError> {
        self.transact(draft_id, |engine| Ok(engine.join(participant)))
    }

    /// Старт драфта. Куб, если он привязан, подгружается из хранилища.
    pub fn begin<R: RandomSource>(&self, draft_id: DraftId, rng: &mut R) -> Result<bool, ManagerError> {
        let cube = match self.load(draft_id)?.draft.cube {
            Some(cid) => Some(
                self.storage
                    .load_cube(cid)
                    .ok_or(ManagerError::CubeNotFound(cid))?,
            ),
            None => None,
        };

        self.transact(draft_id, |engine| {
            engine.begin(cube.as_ref().map(|c| c as &dyn CardPool), &mut *rng)
        })
    }

    pub fn make_selection(
        &self,
        draft_id: DraftId,
        seat_id: SeatId,
        entry_id: EntryId,
    ) -> Result<bool, ManagerError> {
        self.transact(draft_id, |engine| engine.make_selection(seat_id, entry_id))
    }

    pub fn heartbeat<P: BotPolicy + ?Sized>(
        &self,
        draft_id: DraftId,
        policy: &mut P,
    ) -> Result<(), ManagerError> {
        self.transact(draft_id, |engine| engine.heartbeat(&mut *policy))
    }

    /// RNG для следующей операции над драфтом, если в конфиге задан `rng_seed`.
    ///
    /// Seed зависит от драфта, раунда и длины истории: повтор операции
    /// на том же состоянии даёт ту же рассадку и те же пики ботов.
    pub fn seeded_rng(&self, draft_id: DraftId) -> Result<Option<SeedStream>, ManagerError> {
        let Some(base) = self.config.rng_seed else {
            return Ok(None);
        };
        let engine = self.load(draft_id)?;
        let seed = RngSeed::from_u64(base).derive(
            draft_id,
            engine.current_round(),
            engine.history.len() as u32,
        );
        Ok(Some(seed.stream()))
    }

    // ------------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------------

    /// Поднять драфт только для чтения.
    pub fn load(&self, draft_id: DraftId) -> Result<DraftEngine, ManagerError> {
        let (snapshot, _) = self
            .storage
            .load_draft(draft_id)
            .ok_or(ManagerError::DraftNotFound(draft_id))?;
        Ok(snapshot.into_engine()?)
    }

    pub fn current_round(&self, draft_id: DraftId) -> Result<u32, ManagerError> {
        Ok(self.load(draft_id)?.current_round())
    }

    pub fn roster(&self, draft_id: DraftId) -> Result<Vec<Seat>, ManagerError> {
        Ok(self.load(draft_id)?.seats().to_vec())
    }

    pub fn waiting_packs(&self, draft_id: DraftId, seat_id: SeatId) -> Result<Vec<Pack>, ManagerError> {
        let engine = self.load(draft_id)?;
        Ok(engine.waiting_packs(seat_id).into_iter().cloned().collect())
    }

    pub fn picks(&self, draft_id: DraftId, seat_id: SeatId) -> Result<Vec<Pick>, ManagerError> {
        let engine = self.load(draft_id)?;
        Ok(engine.picks_for(seat_id).into_iter().cloned().collect())
    }

    /// Все драфты, где участник подал заявку или сидит за столом.
    pub fn drafts_for_participant(&self, participant: ParticipantId) -> Vec<ParticipantDraft> {
        let mut entries = Vec::new();
        let mut seats = Vec::new();

        for id in self.storage.draft_ids() {
            let engine = match self.load(id) {
                Ok(engine) => engine,
                Err(err) => {
                    warn!(target: "storage", "драфт {} не читается: {}", id, err);
                    continue;
                }
            };

            if engine.entries.iter().any(|e| e.participant == participant) {
                entries.push(ParticipantDraft::Entry {
                    draft_id: id,
                    draft_name: engine.draft.name.clone(),
                });
            }
            if let Some(seat) = engine.seat_for_participant(participant) {
                seats.push(ParticipantDraft::Seat {
                    draft_id: id,
                    draft_name: engine.draft.name.clone(),
                    position: seat.position,
                });
            }
        }

        entries.extend(seats);
        entries
    }

    // ------------------------------------------------------------------
    // Транзакционная граница
    // ------------------------------------------------------------------

    /// Выполнить операцию над драфтом атомарно.
    ///
    /// Операция может быть вызвана несколько раз (на свежем состоянии после
    /// конфликта). Если история драфта не выросла, ничего не пишем.
    fn transact<T, F>(&self, draft_id: DraftId, mut op: F) -> Result<T, ManagerError>
    where
        F: FnMut(&mut DraftEngine) -> Result<T, EngineError>,
    {
        let attempts = self.config.max_transaction_retries.max(1);

        for attempt in 1..=attempts {
            let (snapshot, version) = self
                .storage
                .load_draft(draft_id)
                .ok_or(ManagerError::DraftNotFound(draft_id))?;

            let mut engine = snapshot.into_engine()?;
            let events_before = engine.history.len();

            let result = op(&mut engine)?;

            if engine.history.len() == events_before {
                return Ok(result);
            }

            match self
                .storage
                .save_draft(&DraftSnapshot::from_engine(&engine), Some(version))
            {
                Ok(_) => return Ok(result),
                Err(conflict) => {
                    debug!(
                        target: "storage",
                        "драфт {}: конфликт версий (попытка {}/{}): {:?}",
                        draft_id, attempt, attempts, conflict
                    );
                }
            }
        }

        warn!(target: "storage", "драфт {}: сдаёмся после {} конфликтов", draft_id, attempts);
        Err(ManagerError::Conflict { draft_id, attempts })
    }
}
