use serde::{Deserialize, Serialize};

use crate::domain::{
    DraftEntryId, DraftId, EntryId, PackId, ParticipantId, PrintingId, SeatId, SeatPosition,
};

/// Тип события в драфте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DraftEventKind {
    /// Участник подал заявку.
    EntryCreated {
        entry_id: DraftEntryId,
        participant: ParticipantId,
    },

    /// Драфт начался: места рассажены, бустеры розданы.
    DraftStarted {
        draft_id: DraftId,
        seats: u8,
        packs: u32,
    },

    /// Место забрало карту.
    CardPicked {
        seat_id: SeatId,
        entry_id: EntryId,
        printing: PrintingId,
        round: u32,
        pick: u32,
        by_bot: bool,
    },

    /// Бустер передан соседу.
    PackPassed {
        pack_id: PackId,
        from: SeatPosition,
        to: SeatPosition,
    },

    /// Раунд закончился (все бустеры раунда пусты).
    RoundCompleted { round: u32 },

    /// Все раунды сыграны.
    DraftCompleted { draft_id: DraftId },
}

/// Событие драфта с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftEvent {
    pub index: u32,
    pub kind: DraftEventKind,
}

/// Полная история драфта.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftHistory {
    pub events: Vec<DraftEvent>,
}

impl DraftHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: DraftEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(DraftEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
