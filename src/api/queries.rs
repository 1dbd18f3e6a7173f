use serde::{Deserialize, Serialize};

use crate::domain::{DraftId, ParticipantId, SeatId};

use super::dto::{DraftViewDto, ParticipantDraftDto, SeatViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Состояние драфта: раунд, места, заявки.
    GetDraft { draft_id: DraftId },

    /// Все драфты (для лобби).
    ListDrafts,

    /// Драфт глазами места: текущий бустер, очередь, пики.
    GetSeat { draft_id: DraftId, seat_id: SeatId },

    /// Драфты участника: заявки и места.
    MyDrafts { participant_id: ParticipantId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Draft(DraftViewDto),
    Drafts(Vec<DraftViewDto>),
    Seat(SeatViewDto),
    MyDrafts(Vec<ParticipantDraftDto>),
}
