use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::domain::{
    CardPool, Draft, DraftEntry, DraftStatus, EntryId, Pack, PackEntry, ParticipantId, Pick,
    Seat, SeatId,
};
use crate::engine::bot_policy::BotPolicy;
use crate::engine::draft_history::{DraftEventKind, DraftHistory};
use crate::engine::errors::EngineError;
use crate::engine::pack_allocator::generate_packs;
use crate::engine::seat_ring::SeatRing;
use crate::engine::RandomSource;

/// Результат `join`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Заявка создана или уже была (повторный join возвращает ту же).
    Joined(DraftEntry),
    /// Стол полон или драфт уже начат.
    SeatUnavailable,
}

impl JoinOutcome {
    pub fn entry(&self) -> Option<&DraftEntry> {
        match self {
            JoinOutcome::Joined(entry) => Some(entry),
            JoinOutcome::SeatUnavailable => None,
        }
    }

    pub fn is_joined(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }
}

/// Полное состояние одного драфта в памяти.
///
/// Живёт только в пределах одной операции: `DraftManager` поднимает его
/// из снапшота, применяет операцию и сохраняет обратно.
#[derive(Clone, Debug)]
pub struct DraftEngine {
    pub draft: Draft,
    /// Заявки до старта. После старта пусто.
    pub entries: Vec<DraftEntry>,
    /// Места. До старта пусто.
    pub ring: SeatRing,
    pub packs: Vec<Pack>,
    pub picks: Vec<Pick>,
    pub history: DraftHistory,
    /// Следующий свободный id внутри драфта (заявки, места, бустеры, карты).
    pub next_local_id: u64,
}

/// Локальный счётчик id: меняем `next_local_id` только при коммите операции.
struct LocalIds {
    next: u64,
}

impl LocalIds {
    fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl DraftEngine {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            entries: Vec::new(),
            ring: SeatRing::default(),
            packs: Vec::new(),
            picks: Vec::new(),
            history: DraftHistory::new(),
            next_local_id: 1,
        }
    }

    pub fn status(&self) -> DraftStatus {
        self.draft.status()
    }

    pub fn current_round(&self) -> u32 {
        self.draft.current_round
    }

    // ------------------------------------------------------------------
    // Набор участников
    // ------------------------------------------------------------------

    /// Заявка участника. Идемпотентна: существующая заявка возвращается как есть.
    pub fn join(&mut self, participant: ParticipantId) -> JoinOutcome {
        if let Some(existing) = self.entries.iter().find(|e| e.participant == participant) {
            return JoinOutcome::Joined(existing.clone());
        }

        if self.draft.is_started() {
            warn!(target: "draft", "драфт {}: join участника {} после старта", self.draft.id, participant);
            return JoinOutcome::SeatUnavailable;
        }

        if self.entries.len() >= self.draft.max_players as usize {
            debug!(target: "draft", "драфт {}: стол полон, участник {} не принят", self.draft.id, participant);
            return JoinOutcome::SeatUnavailable;
        }

        let entry = DraftEntry {
            id: self.next_local_id,
            draft_id: self.draft.id,
            participant,
        };
        self.next_local_id += 1;

        self.entries.push(entry.clone());
        self.history.push(DraftEventKind::EntryCreated {
            entry_id: entry.id,
            participant,
        });

        JoinOutcome::Joined(entry)
    }

    // ------------------------------------------------------------------
    // Старт
    // ------------------------------------------------------------------

    /// Старт драфта:
    /// - участники по порядку заявок + боты до `max_players`, перемешать, рассадить;
    /// - заявки удаляются;
    /// - при наличии куба: `pack_count * max_players` бустеров, каждому месту
    ///   по одному на раунд 1..=pack_count.
    ///
    /// `Ok(false)` – предусловия не выполнены, состояние не тронуто.
    /// `Err(InsufficientPool)` – куб слишком мал, состояние не тронуто.
    pub fn begin<R: RandomSource>(
        &mut self,
        cube: Option<&dyn CardPool>,
        rng: &mut R,
    ) -> Result<bool, EngineError> {
        if self.draft.is_started() {
            warn!(target: "draft", "драфт {}: повторный begin", self.draft.id);
            return Ok(false);
        }
        if self.entries.is_empty() {
            warn!(target: "draft", "драфт {}: begin без участников", self.draft.id);
            return Ok(false);
        }

        let mut ids = LocalIds {
            next: self.next_local_id,
        };

        let participants: Vec<Option<ParticipantId>> =
            self.entries.iter().map(|e| Some(e.participant)).collect();
        let ring = SeatRing::assign(participants, self.draft.max_players, rng, || ids.next())?;

        let mut packs = Vec::new();
        let mut total_rounds = self.draft.total_rounds;

        if let Some(cube) = cube {
            let pack_count = cube.default_pack_count();
            let pack_size = cube.default_pack_size() as usize;
            let packs_needed = pack_count as usize * ring.len();
            let pool = cube.expand_pool();

            let mut generated = match generate_packs(&pool, packs_needed, pack_size, rng) {
                Ok(generated) => generated,
                Err(err) => {
                    error!(
                        target: "draft",
                        "драфт {}: старт прерван (раунд {}, мест {}): {}",
                        self.draft.id,
                        self.draft.current_round,
                        ring.len(),
                        err
                    );
                    return Err(err);
                }
            };

            for seat in ring.seats() {
                for round in 1..=pack_count {
                    let printings = generated
                        .pop()
                        .ok_or(EngineError::Internal("бустеров сгенерировано меньше, чем мест"))?;
                    let pack_id = ids.next();
                    let entries = printings
                        .into_iter()
                        .map(|printing| PackEntry {
                            id: ids.next(),
                            printing,
                        })
                        .collect();
                    packs.push(Pack::new(pack_id, round, seat.position, entries));
                }
            }

            total_rounds = pack_count;
        }

        // Коммит: дальше ошибок быть не может.
        let seats_count = ring.len() as u8;
        let packs_count = packs.len() as u32;

        self.ring = ring;
        self.packs = packs;
        self.picks.clear();
        self.entries.clear();
        self.draft.total_rounds = total_rounds;
        self.draft.current_round = 1;
        self.next_local_id = ids.next;

        self.history.push(DraftEventKind::DraftStarted {
            draft_id: self.draft.id,
            seats: seats_count,
            packs: packs_count,
        });

        info!(
            target: "draft",
            "драфт {} начат: мест {}, бустеров {}, раундов {}",
            self.draft.id, seats_count, packs_count, total_rounds
        );

        Ok(true)
    }

    // ------------------------------------------------------------------
    // Пики
    // ------------------------------------------------------------------

    /// Пик карты `entry_id` местом `seat_id` из любого бустера, который ждёт это место
    /// в текущем раунде.
    ///
    /// `Ok(false)` – карта не найдена у этого места (чужое место, другой раунд,
    /// уже забрана, драфт не активен). Состояние при этом не меняется.
    pub fn make_selection(&mut self, seat_id: SeatId, entry_id: EntryId) -> Result<bool, EngineError> {
        let round = match self.status() {
            DraftStatus::Active { round } => round,
            _ => return Ok(false),
        };

        let seat = match self.ring.by_id(seat_id) {
            Some(seat) => seat.clone(),
            None => return Ok(false),
        };

        let pack_idx = self
            .packs
            .iter()
            .position(|p| p.is_waiting_at(seat.position, round) && p.contains(entry_id));

        match pack_idx {
            Some(idx) => {
                self.apply_selection(&seat, idx, entry_id, round)?;
                Ok(true)
            }
            None => {
                debug!(
                    target: "draft",
                    "драфт {}: карта {} не ждёт место {} в раунде {}",
                    self.draft.id, entry_id, seat.position, round
                );
                Ok(false)
            }
        }
    }

    /// Пик только из текущего бустера места (с наименьшим номером пика).
    pub fn make_selection_from_current_pack(
        &mut self,
        seat_id: SeatId,
        entry_id: EntryId,
    ) -> Result<bool, EngineError> {
        let round = match self.status() {
            DraftStatus::Active { round } => round,
            _ => return Ok(false),
        };

        let seat = match self.ring.by_id(seat_id) {
            Some(seat) => seat.clone(),
            None => return Ok(false),
        };

        let current = self
            .packs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_waiting_at(seat.position, round))
            .min_by_key(|(_, p)| p.pick)
            .map(|(idx, _)| idx);

        match current {
            Some(idx) if self.packs[idx].contains(entry_id) => {
                self.apply_selection(&seat, idx, entry_id, round)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Сам пик: Pick + удаление карты + передача бустера + pick += 1.
    /// Цель передачи считается до изменений, поэтому ошибка ничего не ломает.
    fn apply_selection(
        &mut self,
        seat: &Seat,
        pack_idx: usize,
        entry_id: EntryId,
        round: u32,
    ) -> Result<(), EngineError> {
        let target = self
            .ring
            .pass_target(seat.position, round)
            .map(|s| s.position)
            .ok_or(EngineError::MalformedRing(seat.position))?;

        let pack = self
            .packs
            .get_mut(pack_idx)
            .ok_or(EngineError::Internal("индекс бустера вне диапазона"))?;

        if pack.seat_position != seat.position {
            return Err(EngineError::InvariantViolation(format!(
                "бустер {} у места {}, а пик делает место {}",
                pack.id, pack.seat_position, seat.position
            )));
        }

        let entry = pack.take_entry(entry_id).ok_or_else(|| {
            EngineError::InvariantViolation(format!("карты {} нет в бустере {}", entry_id, pack.id))
        })?;

        let pick_number = pack.pick;
        let pack_id = pack.id;
        pack.seat_position = target;
        pack.pick += 1;

        self.picks.push(Pick {
            entry_id: entry.id,
            seat_id: seat.id,
            printing: entry.printing,
            round,
            pick: pick_number,
        });

        self.history.push(DraftEventKind::CardPicked {
            seat_id: seat.id,
            entry_id: entry.id,
            printing: entry.printing,
            round,
            pick: pick_number,
            by_bot: seat.is_bot(),
        });
        self.history.push(DraftEventKind::PackPassed {
            pack_id,
            from: seat.position,
            to: target,
        });

        debug!(
            target: "draft",
            "драфт {}: место {} взяло карту {} (раунд {}, пик {}), бустер {} -> место {}",
            self.draft.id, seat.position, entry.id, round, pick_number, pack_id, target
        );

        Ok(())
    }

    // ------------------------------------------------------------------
    // Боты и раунды
    // ------------------------------------------------------------------

    /// Боты догоняют, затем проверяется конец раунда.
    pub fn heartbeat<P: BotPolicy + ?Sized>(&mut self, policy: &mut P) -> Result<(), EngineError> {
        if !matches!(self.status(), DraftStatus::Active { .. }) {
            return Ok(());
        }
        self.make_all_bot_selections(policy)?;
        self.check_end_of_round();
        Ok(())
    }

    /// Все боты делают пики, пока ни у одного бота не останется ждущего бустера.
    ///
    /// Проход: боты в порядке передачи раунда; каждый бот берёт ровно одну карту
    /// из каждого бустера, который ждал его в начале его хода. Бустеры, пришедшие
    /// во время прохода, обрабатываются следующим проходом.
    ///
    /// Каждый проход забирает хотя бы одну карту, поэтому проходов не больше,
    /// чем карт в раунде + 1. Иначе – `BotLoopExceeded`.
    /// При любой ошибке состояние откатывается к началу вызова.
    pub fn make_all_bot_selections<P: BotPolicy + ?Sized>(
        &mut self,
        policy: &mut P,
    ) -> Result<usize, EngineError> {
        let backup = self.clone();
        match self.run_bots(policy) {
            Ok(picks) => Ok(picks),
            Err(err) => {
                error!(
                    target: "bots",
                    "драфт {}: ход ботов прерван (раунд {}): {}",
                    self.draft.id, self.draft.current_round, err
                );
                *self = backup;
                Err(err)
            }
        }
    }

    fn run_bots<P: BotPolicy + ?Sized>(&mut self, policy: &mut P) -> Result<usize, EngineError> {
        let round = match self.status() {
            DraftStatus::Active { round } => round,
            _ => return Ok(0),
        };

        let order = self.ring.bot_positions_in_pass_order(round);
        if order.is_empty() {
            return Ok(0);
        }

        let max_passes = self.remaining_in_round(round) + 1;
        let mut picks_made = 0;

        for _ in 0..max_passes {
            if !self.any_bot_waiting(round) {
                return Ok(picks_made);
            }

            for &position in &order {
                let waiting: Vec<usize> = self
                    .packs
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.is_waiting_at(position, round))
                    .map(|(idx, _)| idx)
                    .collect();

                if waiting.is_empty() {
                    continue;
                }

                let seat = self
                    .ring
                    .get(position)
                    .cloned()
                    .ok_or(EngineError::MalformedRing(position))?;

                for pack_idx in waiting {
                    let pack = &self.packs[pack_idx];
                    let choice = policy.choose(&pack.entries).ok_or_else(|| {
                        EngineError::InvariantViolation(format!(
                            "бот на месте {} не выбрал карту из бустера {}",
                            position, pack.id
                        ))
                    })?;

                    if !pack.contains(choice) {
                        return Err(EngineError::InvariantViolation(format!(
                            "бот на месте {} выбрал карту {} не из бустера {}",
                            position, choice, pack.id
                        )));
                    }

                    self.apply_selection(&seat, pack_idx, choice, round)?;
                    picks_made += 1;
                }
            }
        }

        if !self.any_bot_waiting(round) {
            return Ok(picks_made);
        }

        Err(EngineError::BotLoopExceeded {
            draft_id: self.draft.id,
            round,
            passes: max_passes,
        })
    }

    /// Конец раунда: если все бустеры текущего раунда пусты – переходим к следующему.
    /// После последнего раунда драфт завершён.
    pub fn check_end_of_round(&mut self) -> bool {
        let round = match self.status() {
            DraftStatus::Active { round } => round,
            _ => return false,
        };

        if self.packs.iter().any(|p| p.round == round && !p.is_empty()) {
            return false;
        }

        self.draft.current_round += 1;
        self.history.push(DraftEventKind::RoundCompleted { round });
        info!(target: "draft", "драфт {}: раунд {} завершён", self.draft.id, round);

        if self.draft.is_complete() {
            self.history.push(DraftEventKind::DraftCompleted {
                draft_id: self.draft.id,
            });
            info!(target: "draft", "драфт {} завершён", self.draft.id);
        }

        true
    }

    fn remaining_in_round(&self, round: u32) -> usize {
        self.packs
            .iter()
            .filter(|p| p.round == round)
            .map(|p| p.len())
            .sum()
    }

    fn any_bot_waiting(&self, round: u32) -> bool {
        self.packs.iter().any(|p| {
            p.round == round
                && !p.is_empty()
                && self
                    .ring
                    .get(p.seat_position)
                    .map(|s| s.is_bot())
                    .unwrap_or(false)
        })
    }

    // ------------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------------

    pub fn seats(&self) -> &[Seat] {
        self.ring.seats()
    }

    pub fn seat(&self, seat_id: SeatId) -> Option<&Seat> {
        self.ring.by_id(seat_id)
    }

    pub fn seat_for_participant(&self, participant: ParticipantId) -> Option<&Seat> {
        self.ring.by_participant(participant)
    }

    /// До старта смотрим заявки, после – места.
    pub fn is_participant_in_draft(&self, participant: ParticipantId) -> bool {
        if self.draft.is_started() {
            self.seat_for_participant(participant).is_some()
        } else {
            self.entries.iter().any(|e| e.participant == participant)
        }
    }

    /// Непустые бустеры текущего раунда у места, по номеру пика.
    pub fn waiting_packs(&self, seat_id: SeatId) -> Vec<&Pack> {
        let round = match self.status() {
            DraftStatus::Active { round } => round,
            _ => return Vec::new(),
        };
        let position = match self.seat(seat_id) {
            Some(seat) => seat.position,
            None => return Vec::new(),
        };

        let mut packs: Vec<&Pack> = self
            .packs
            .iter()
            .filter(|p| p.is_waiting_at(position, round))
            .collect();
        packs.sort_by_key(|p| p.pick);
        packs
    }

    pub fn pack_count(&self, seat_id: SeatId) -> usize {
        self.waiting_packs(seat_id).len()
    }

    pub fn current_pack(&self, seat_id: SeatId) -> Option<&Pack> {
        self.waiting_packs(seat_id).into_iter().next()
    }

    /// Пики места в порядке, в котором они были сделаны.
    pub fn picks_for(&self, seat_id: SeatId) -> Vec<&Pick> {
        self.picks.iter().filter(|p| p.seat_id == seat_id).collect()
    }
}
