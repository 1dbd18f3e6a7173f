use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantId, SeatId};

/// Позиция места за виртуальным столом (0..max_players-1).
pub type SeatPosition = u8;

/// Место за столом драфта. `participant == None` – бот.
///
/// Места создаются только при старте драфта и больше не перемещаются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub position: SeatPosition,
    pub participant: Option<ParticipantId>,
}

impl Seat {
    pub fn new(id: SeatId, position: SeatPosition, participant: Option<ParticipantId>) -> Self {
        Self {
            id,
            position,
            participant,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.participant.is_none()
    }
}
