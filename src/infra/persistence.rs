use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::cube::Cube;
use crate::domain::{CubeId, DraftId};
use crate::state::DraftSnapshot;

/// Версия сохранённого драфта. Растёт на 1 при каждой записи.
pub type Version = u64;

/// Запись отклонена: с момента чтения драфт успел измениться.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionConflict {
    pub draft_id: DraftId,
    pub expected: Option<Version>,
    pub actual: Option<Version>,
}

/// Абстракция хранилища для драфтов.
///
/// В Linera-режиме вместо этого используется `DraftState` и Views,
/// но эта абстракция удобна:
/// - для юнит- и интеграционных тестов движка,
/// - для оффчейн-сервисов (например, веб-бэкенда).
///
/// Запись драфта – compare-and-save по версии: так два писателя
/// одного драфта не могут перетереть друг друга.
pub trait DraftStorage: Send + Sync {
    /// Загрузить драфт вместе с его версией.
    fn load_draft(&self, id: DraftId) -> Option<(DraftSnapshot, Version)>;

    /// Сохранить драфт, если его версия всё ещё `expected`
    /// (`None` – драфта ещё не должно быть). Возвращает новую версию.
    fn save_draft(
        &self,
        snapshot: &DraftSnapshot,
        expected: Option<Version>,
    ) -> Result<Version, VersionConflict>;

    /// Удалить драфт целиком (места, бустеры и пики живут внутри снапшота).
    fn delete_draft(&self, id: DraftId) -> bool;

    /// Все id драфтов.
    fn draft_ids(&self) -> Vec<DraftId>;

    /// Загрузить куб.
    fn load_cube(&self, id: CubeId) -> Option<Cube>;

    /// Сохранить куб (перезаписывает куб с тем же id).
    fn save_cube(&self, cube: &Cube);

    /// Добавить новый куб. `false`, если id уже занят: существующий куб не трогаем.
    fn insert_cube(&self, cube: &Cube) -> bool;

    /// Все id кубов.
    fn cube_ids(&self) -> Vec<CubeId>;
}

/// Простая in-memory реализация для тестов и локального запуска.
///
/// DashMap шардирует блокировки: разные драфты пишутся параллельно,
/// а запись одного драфта атомарна относительно проверки версии.
#[derive(Debug, Default)]
pub struct InMemoryDraftStorage {
    drafts: DashMap<DraftId, (DraftSnapshot, Version)>,
    cubes: DashMap<CubeId, Cube>,
}

impl InMemoryDraftStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStorage for InMemoryDraftStorage {
    fn load_draft(&self, id: DraftId) -> Option<(DraftSnapshot, Version)> {
        self.drafts.get(&id).map(|r| r.value().clone())
    }

    fn save_draft(
        &self,
        snapshot: &DraftSnapshot,
        expected: Option<Version>,
    ) -> Result<Version, VersionConflict> {
        let id = snapshot.id();
        match self.drafts.entry(id) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get().1;
                if expected != Some(current) {
                    debug!(target: "storage", "драфт {}: версия {:?}, ожидали {:?}", id, current, expected);
                    return Err(VersionConflict {
                        draft_id: id,
                        expected,
                        actual: Some(current),
                    });
                }
                let next = current + 1;
                occupied.insert((snapshot.clone(), next));
                Ok(next)
            }
            Entry::Vacant(vacant) => {
                if expected.is_some() {
                    return Err(VersionConflict {
                        draft_id: id,
                        expected,
                        actual: None,
                    });
                }
                vacant.insert((snapshot.clone(), 1));
                Ok(1)
            }
        }
    }

    fn delete_draft(&self, id: DraftId) -> bool {
        self.drafts.remove(&id).is_some()
    }

    fn draft_ids(&self) -> Vec<DraftId> {
        let mut ids: Vec<DraftId> = self.drafts.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }

    fn load_cube(&self, id: CubeId) -> Option<Cube> {
        self.cubes.get(&id).map(|r| r.value().clone())
    }

    fn save_cube(&self, cube: &Cube) {
        self.cubes.insert(cube.id, cube.clone());
    }

    fn insert_cube(&self, cube: &Cube) -> bool {
        match self.cubes.entry(cube.id) {
            Entry::Occupied(_) => {
                debug!(target: "storage", "куб {} уже есть, вставка отклонена", cube.id);
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(cube.clone());
                true
            }
        }
    }

    fn cube_ids(&self) -> Vec<CubeId> {
        let mut ids: Vec<CubeId> = self.cubes.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}
