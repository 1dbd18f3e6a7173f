use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{CubeId, DraftId, ParticipantId, PrintingId};

/// Простая генерация глобальных ID на основе монотонных счётчиков.
///
/// Id внутри драфта (места, бустеры, карты) сюда не относятся:
/// их выдаёт сам DraftEngine из своей локальной последовательности.
#[derive(Debug)]
pub struct IdGenerator {
    draft_counter: AtomicU64,
    participant_counter: AtomicU64,
    cube_counter: AtomicU64,
    printing_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            draft_counter: AtomicU64::new(1),
            participant_counter: AtomicU64::new(1),
            cube_counter: AtomicU64::new(1),
            printing_counter: AtomicU64::new(1),
        }
    }

    /// Продолжить нумерацию после уже занятых id (например, после загрузки хранилища).
    pub fn starting_after(last_draft: DraftId, last_cube: CubeId) -> Self {
        let gen = Self::new();
        gen.draft_counter.store(last_draft + 1, Ordering::Relaxed);
        gen.cube_counter.store(last_cube + 1, Ordering::Relaxed);
        gen
    }

    #[inline]
    pub fn next_draft_id(&self) -> DraftId {
        self.draft_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_participant_id(&self) -> ParticipantId {
        self.participant_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_cube_id(&self) -> CubeId {
        self.cube_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Учесть id куба, выбранный снаружи: следующие `next_cube_id` будут больше.
    pub fn observe_cube_id(&self, id: CubeId) {
        self.cube_counter.fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }

    #[inline]
    pub fn next_printing_id(&self) -> PrintingId {
        self.printing_counter.fetch_add(1, Ordering::Relaxed)
    }
}
