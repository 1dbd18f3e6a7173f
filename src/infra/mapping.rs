use std::collections::HashMap;

use crate::api::dto::{DraftViewDto, PackDto, PackEntryDto, PickDto, SeatDto, SeatViewDto};
use crate::domain::{Draft, DraftEntry, Pack, PackEntry, ParticipantId, Pick, Printing, PrintingId, Seat};
use crate::engine::draft_engine::DraftEngine;

/// Утилита: получить отображаемое имя участника.
///
/// Имена живут вне движка (профили пользователей), поэтому только трейт.
pub trait ParticipantNameResolver {
    fn resolve_name(&self, participant: ParticipantId) -> String;
}

/// Простая реализация: отображаемое имя = "Player {id}".
pub struct DefaultNameResolver;

impl ParticipantNameResolver for DefaultNameResolver {
    fn resolve_name(&self, participant: ParticipantId) -> String {
        format!("Player {}", participant)
    }
}

impl ParticipantNameResolver for HashMap<ParticipantId, String> {
    fn resolve_name(&self, participant: ParticipantId) -> String {
        self.get(&participant)
            .cloned()
            .unwrap_or_else(|| DefaultNameResolver.resolve_name(participant))
    }
}

/// Поиск принта по id: имя карты и картинка. Только для отображения.
pub trait PrintingResolver {
    fn printing(&self, id: PrintingId) -> Option<Printing>;
}

/// In-memory каталог принтов.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPrintingCatalog {
    printings: HashMap<PrintingId, Printing>,
}

impl InMemoryPrintingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, printing: Printing) {
        self.printings.insert(printing.id, printing);
    }

    /// Поиск по имени карты (первый подходящий принт).
    pub fn find_by_name(&self, card_name: &str) -> Option<&Printing> {
        let mut found: Vec<&Printing> = self
            .printings
            .values()
            .filter(|p| p.card_name == card_name)
            .collect();
        found.sort_by_key(|p| p.id);
        found.into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.printings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printings.is_empty()
    }
}

impl PrintingResolver for InMemoryPrintingCatalog {
    fn printing(&self, id: PrintingId) -> Option<Printing> {
        self.printings.get(&id).cloned()
    }
}

/// Короткое имя места: "Bot" или имя участника.
pub fn seat_short_name(seat: &Seat, names: &impl ParticipantNameResolver) -> String {
    match seat.participant {
        Some(pid) => names.resolve_name(pid),
        None => "Bot".to_string(),
    }
}

/// Полная подпись места: "Seat #0 of Test Draft: user_a".
pub fn seat_label(seat: &Seat, draft: &Draft, names: &impl ParticipantNameResolver) -> String {
    format!(
        "Seat #{} of {}: {}",
        seat.position,
        draft,
        seat_short_name(seat, names)
    )
}

/// Подпись заявки: "Entry for testuser in Test Draft".
pub fn entry_label(entry: &DraftEntry, draft: &Draft, names: &impl ParticipantNameResolver) -> String {
    format!("Entry for {} in {}", names.resolve_name(entry.participant), draft)
}

fn resolve_printing(printing: PrintingId, printings: &impl PrintingResolver) -> (String, Option<String>) {
    match printings.printing(printing) {
        Some(p) => (p.card_name, p.image_url),
        None => (format!("Printing {}", printing), None),
    }
}

pub fn map_entry_to_dto(entry: &PackEntry, printings: &impl PrintingResolver) -> PackEntryDto {
    let (card_name, image_url) = resolve_printing(entry.printing, printings);
    PackEntryDto {
        entry_id: entry.id,
        printing_id: entry.printing,
        card_name,
        image_url,
    }
}

pub fn map_pack_to_dto(pack: &Pack, printings: &impl PrintingResolver) -> PackDto {
    PackDto {
        pack_id: pack.id,
        round: pack.round,
        pick: pack.pick,
        entries: pack
            .entries
            .iter()
            .map(|e| map_entry_to_dto(e, printings))
            .collect(),
    }
}

pub fn map_pick_to_dto(pick: &Pick, printings: &impl PrintingResolver) -> PickDto {
    let (card_name, image_url) = resolve_printing(pick.printing, printings);
    PickDto {
        entry_id: pick.entry_id,
        printing_id: pick.printing,
        card_name,
        image_url,
        round: pick.round,
        pick: pick.pick,
    }
}

pub fn map_seat_to_dto(
    engine: &DraftEngine,
    seat: &Seat,
    names: &impl ParticipantNameResolver,
) -> SeatDto {
    SeatDto {
        seat_id: seat.id,
        position: seat.position,
        display_name: seat_short_name(seat, names),
        label: seat_label(seat, &engine.draft, names),
        is_bot: seat.is_bot(),
        waiting_packs: engine.pack_count(seat.id) as u32,
        picks: engine.picks_for(seat.id).len() as u32,
    }
}

/// Утилита: маппинг DraftEngine -> DraftViewDto.
pub fn map_draft_to_dto(engine: &DraftEngine, names: &impl ParticipantNameResolver) -> DraftViewDto {
    let draft = &engine.draft;
    DraftViewDto {
        draft_id: draft.id,
        name: draft.name.clone(),
        status: draft.status().as_str().to_string(),
        current_round: draft.current_round,
        total_rounds: draft.total_rounds,
        max_players: draft.max_players,
        cube_id: draft.cube,
        entries: engine
            .entries
            .iter()
            .map(|e| entry_label(e, draft, names))
            .collect(),
        seats: engine
            .seats()
            .iter()
            .map(|s| map_seat_to_dto(engine, s, names))
            .collect(),
    }
}

/// Вид драфта со стороны одного места: текущий бустер, очередь бустеров, пики.
pub fn map_seat_view(
    engine: &DraftEngine,
    seat: &Seat,
    names: &impl ParticipantNameResolver,
    printings: &impl PrintingResolver,
) -> SeatViewDto {
    let waiting: Vec<PackDto> = engine
        .waiting_packs(seat.id)
        .into_iter()
        .map(|p| map_pack_to_dto(p, printings))
        .collect();

    SeatViewDto {
        seat: map_seat_to_dto(engine, seat, names),
        current_round: engine.current_round(),
        current_pack: waiting.first().cloned(),
        waiting_packs: waiting,
        picks: engine
            .picks_for(seat.id)
            .into_iter()
            .map(|p| map_pick_to_dto(p, printings))
            .collect(),
    }
}
