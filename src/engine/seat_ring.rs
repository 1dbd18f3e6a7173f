use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantId, Seat, SeatId, SeatPosition};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Направление передачи бустера.
///
/// Нечётные раунды – налево (позиция +1), чётные – направо (позиция -1).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PassDirection {
    Left,
    Right,
}

impl PassDirection {
    pub fn for_round(round: u32) -> Self {
        if round % 2 == 1 {
            PassDirection::Left
        } else {
            PassDirection::Right
        }
    }

    /// Сделать один шаг по кругу из `n` мест.
    pub fn step(self, position: SeatPosition, n: usize) -> SeatPosition {
        let pos = position as usize;
        let next = match self {
            PassDirection::Left => (pos + 1) % n,
            PassDirection::Right => (pos + n - 1) % n,
        };
        next as SeatPosition
    }
}

/// Кольцо мест драфта: индекс вектора = позиция места.
///
/// Соседи считаются по модулю размера кольца, без ссылок между местами.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRing {
    seats: Vec<Seat>,
}

impl SeatRing {
    /// Рассадка при старте драфта:
    /// - список участников добивается ботами (`None`) до `max_players`;
    /// - один раз перемешивается;
    /// - позиции 0..max_players-1 раздаются в перемешанном порядке.
    pub fn assign<R, F>(
        mut participants: Vec<Option<ParticipantId>>,
        max_players: u8,
        rng: &mut R,
        mut next_seat_id: F,
    ) -> Result<Self, EngineError>
    where
        R: RandomSource,
        F: FnMut() -> SeatId,
    {
        if participants.len() > max_players as usize {
            return Err(EngineError::InvariantViolation(format!(
                "участников {} больше, чем мест {}",
                participants.len(),
                max_players
            )));
        }

        participants.resize(max_players as usize, None);
        rng.shuffle(&mut participants);

        let seats = participants
            .into_iter()
            .enumerate()
            .map(|(position, participant)| {
                Seat::new(next_seat_id(), position as SeatPosition, participant)
            })
            .collect();

        Ok(Self { seats })
    }

    /// Восстановить кольцо из сохранённых мест.
    /// Каждая позиция 0..n-1 должна встречаться ровно один раз.
    pub fn from_seats(mut seats: Vec<Seat>) -> Result<Self, EngineError> {
        seats.sort_by_key(|s| s.position);
        for (idx, seat) in seats.iter().enumerate() {
            if seat.position as usize != idx {
                return Err(EngineError::MalformedRing(idx as SeatPosition));
            }
        }
        Ok(Self { seats })
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn into_seats(self) -> Vec<Seat> {
        self.seats
    }

    pub fn get(&self, position: SeatPosition) -> Option<&Seat> {
        self.seats.get(position as usize)
    }

    pub fn by_id(&self, seat_id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    pub fn by_participant(&self, participant: ParticipantId) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|s| s.participant == Some(participant))
    }

    /// Место слева: (position + 1) mod n.
    pub fn seat_to_the_left(&self, position: SeatPosition) -> Option<&Seat> {
        self.neighbour(position, PassDirection::Left)
    }

    /// Место справа: (position - 1) mod n.
    pub fn seat_to_the_right(&self, position: SeatPosition) -> Option<&Seat> {
        self.neighbour(position, PassDirection::Right)
    }

    /// Кому уходит бустер после пика в раунде `round`.
    pub fn pass_target(&self, position: SeatPosition, round: u32) -> Option<&Seat> {
        self.neighbour(position, PassDirection::for_round(round))
    }

    /// Позиции ботов в порядке передачи раунда:
    /// по возрастанию для нечётных раундов, по убыванию для чётных.
    pub fn bot_positions_in_pass_order(&self, round: u32) -> Vec<SeatPosition> {
        let mut bots: Vec<SeatPosition> = self
            .seats
            .iter()
            .filter(|s| s.is_bot())
            .map(|s| s.position)
            .collect();

        if PassDirection::for_round(round) == PassDirection::Right {
            bots.reverse();
        }
        bots
    }

    fn neighbour(&self, position: SeatPosition, direction: PassDirection) -> Option<&Seat> {
        let n = self.seats.len();
        if n == 0 || position as usize >= n {
            return None;
        }
        self.get(direction.step(position, n))
    }
}
