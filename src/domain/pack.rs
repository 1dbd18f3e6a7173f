use serde::{Deserialize, Serialize};

use crate::domain::seat::SeatPosition;
use crate::domain::{EntryId, PackId, PrintingId, SeatId};

/// Одна карта внутри бустера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackEntry {
    pub id: EntryId,
    pub printing: PrintingId,
}

/// Бустер. В каждый момент принадлежит ровно одному месту (`seat_position`),
/// владение переходит по мере пиков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pack {
    pub id: PackId,
    /// Раунд, в котором этот бустер открывается.
    pub round: u32,
    /// Номер пика внутри раунда: начинается с 1, +1 за каждый пик из бустера.
    pub pick: u32,
    /// Текущий владелец.
    pub seat_position: SeatPosition,
    pub entries: Vec<PackEntry>,
}

impl Pack {
    pub fn new(id: PackId, round: u32, seat_position: SeatPosition, entries: Vec<PackEntry>) -> Self {
        Self {
            id,
            round,
            pick: 1,
            seat_position,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry_id: EntryId) -> bool {
        self.entries.iter().any(|e| e.id == entry_id)
    }

    /// Ждёт ли бустер решения у места `position` в раунде `round`.
    /// Пустые бустеры никого не ждут.
    pub fn is_waiting_at(&self, position: SeatPosition, round: u32) -> bool {
        self.seat_position == position && self.round == round && !self.is_empty()
    }

    /// Вынуть карту из бустера (удаляется, а не помечается).
    pub fn take_entry(&mut self, entry_id: EntryId) -> Option<PackEntry> {
        let idx = self.entries.iter().position(|e| e.id == entry_id)?;
        Some(self.entries.remove(idx))
    }
}

/// Неизменяемая запись о том, что место забрало карту.
///
/// `entry_id` – тот же id, что был у карты в бустере: единица пула
/// сохраняет идентичность на протяжении всего драфта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pick {
    pub entry_id: EntryId,
    pub seat_id: SeatId,
    pub printing: PrintingId,
    pub round: u32,
    pub pick: u32,
}
