use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{CubeId, DraftEntryId, DraftId, ParticipantId};

/// Статус драфта. Не хранится отдельно, а выводится из `current_round`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DraftStatus {
    /// Драфт ещё не начат, принимаются заявки.
    Pending,
    /// Идёт раунд `round` (1..=total_rounds).
    Active { round: u32 },
    /// Все раунды сыграны.
    Complete,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Pending => "Pending",
            DraftStatus::Active { .. } => "Active",
            DraftStatus::Complete => "Complete",
        }
    }
}

/// Драфт: сессия, в которой общий пул карт раздаётся последовательными пиками.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draft {
    pub id: DraftId,
    pub name: String,

    /// 0 – драфт не начат, иначе номер текущего раунда.
    pub current_round: u32,

    /// Сколько раундов всего. При старте берётся из куба.
    pub total_rounds: u32,

    pub max_players: u8,
    pub creator: Option<ParticipantId>,
    pub cube: Option<CubeId>,
}

impl Draft {
    pub fn new(id: DraftId, name: impl Into<String>, max_players: u8, total_rounds: u32) -> Self {
        Self {
            id,
            name: name.into(),
            current_round: 0,
            total_rounds,
            max_players,
            creator: None,
            cube: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.current_round > 0
    }

    pub fn status(&self) -> DraftStatus {
        if self.current_round == 0 {
            DraftStatus::Pending
        } else if self.current_round > self.total_rounds {
            DraftStatus::Complete
        } else {
            DraftStatus::Active {
                round: self.current_round,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status(), DraftStatus::Complete)
    }
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Заявка участника на ещё не начатый драфт.
/// На один (draft, participant) – не больше одной заявки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftEntry {
    pub id: DraftEntryId,
    pub draft_id: DraftId,
    pub participant: ParticipantId,
}
