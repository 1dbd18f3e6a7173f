//! Тесты хода драфта: пики, передача бустеров, смена раундов.
//!
//! Сценарии:
//! - пик "Dolor" из бустера {"Lorem Ipsum", "Dolor", "Sit Amet"};
//! - повторный пик той же карты;
//! - пик чужим местом;
//! - направление передачи в чётном раунде;
//! - текущий бустер и очередь бустеров;
//! - завершение драфта.

use draft_engine::domain::{CardPool, Cube, Draft, DraftStatus, PackEntry, Printing, SeatId};
use draft_engine::engine::{BotPolicy, DraftEngine, DraftEventKind, RandomSource};
use draft_engine::infra::{InMemoryPrintingCatalog, PrintingResolver};
use draft_engine::state::DraftSnapshot;

struct IdentityRng;

impl RandomSource for IdentityRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// Бот, который всегда берёт первую карту.
struct FirstEntryPolicy;

impl BotPolicy for FirstEntryPolicy {
    fn choose(&mut self, visible: &[PackEntry]) -> Option<u64> {
        visible.first().map(|e| e.id)
    }
}

/// Каталог из 12 принтов: первые три – "Lorem Ipsum", "Dolor", "Sit Amet".
fn make_catalog() -> InMemoryPrintingCatalog {
    let mut catalog = InMemoryPrintingCatalog::new();
    catalog.insert(Printing::new(1, "Lorem Ipsum"));
    catalog.insert(Printing::new(2, "Dolor"));
    catalog.insert(Printing::new(3, "Sit Amet"));
    for id in 4..=12 {
        catalog.insert(Printing::new(id, format!("Filler {}", id)));
    }
    catalog
}

fn make_cube(pack_count: u32, pack_size: u32, printings: u64) -> Cube {
    let mut cube = Cube::new(1, "Test Cube", 1).with_pack_layout(pack_count, pack_size);
    for printing in 1..=printings {
        cube.add_printing(printing, 1);
    }
    cube
}

/// 4 места, один человек (позиция 0), остальные – боты.
fn started_engine(cube: &Cube) -> DraftEngine {
    let mut engine = DraftEngine::new(Draft::new(1, "Test Draft", 4, 3));
    assert!(engine.join(100).is_joined());
    assert!(engine
        .begin(Some(cube as &dyn CardPool), &mut IdentityRng)
        .unwrap());
    engine
}

fn human_seat(engine: &DraftEngine) -> SeatId {
    engine.seat_for_participant(100).map(|s| s.id).unwrap()
}

/// Человек берёт первую карту текущего бустера, боты догоняют.
fn human_pick_and_heartbeat(engine: &mut DraftEngine) {
    let seat_id = human_seat(engine);
    let entry_id = engine
        .current_pack(seat_id)
        .and_then(|p| p.entries.first())
        .map(|e| e.id);
    if let Some(entry_id) = entry_id {
        assert!(engine.make_selection(seat_id, entry_id).unwrap());
    }
    engine.heartbeat(&mut FirstEntryPolicy).unwrap();
}

#[test]
fn picking_dolor_passes_pack_to_the_left() {
    let catalog = make_catalog();
    let dolor = catalog.find_by_name("Dolor").map(|p| p.id).unwrap();

    let cube = make_cube(1, 3, 12);
    let mut engine = started_engine(&cube);

    let pack = engine
        .packs
        .iter()
        .find(|p| p.entries.iter().any(|e| e.printing == dolor))
        .cloned()
        .unwrap();
    let mut names: Vec<String> = pack
        .entries
        .iter()
        .filter_map(|e| catalog.printing(e.printing).map(|p| p.card_name))
        .collect();
    names.sort();
    assert_eq!(names, vec!["Dolor", "Lorem Ipsum", "Sit Amet"]);

    let seat_a = engine.ring.get(pack.seat_position).cloned().unwrap();
    let entry_id = pack
        .entries
        .iter()
        .find(|e| e.printing == dolor)
        .map(|e| e.id)
        .unwrap();

    assert!(engine.make_selection(seat_a.id, entry_id).unwrap());

    let moved = engine.packs.iter().find(|p| p.id == pack.id).unwrap();
    assert_eq!(moved.seat_position, (seat_a.position + 1) % 4);
    assert_eq!(moved.pick, 2);
    assert_eq!(moved.len(), 2);
    assert!(!moved.contains(entry_id));

    let picks = engine.picks_for(seat_a.id);
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].printing, dolor);
    assert_eq!(picks[0].entry_id, entry_id);
    assert_eq!(picks[0].round, 1);
    assert_eq!(picks[0].pick, 1);
}

#[test]
fn picking_same_entry_twice_fails_without_side_effects() {
    let cube = make_cube(1, 3, 12);
    let mut engine = started_engine(&cube);
    let seat_id = human_seat(&engine);
    let entry_id = engine.current_pack(seat_id).unwrap().entries[0].id;

    assert!(engine.make_selection(seat_id, entry_id).unwrap());
    let after_first = DraftSnapshot::from_engine(&engine);

    assert!(!engine.make_selection(seat_id, entry_id).unwrap());
    assert_eq!(DraftSnapshot::from_engine(&engine), after_first);
    assert_eq!(engine.picks_for(seat_id).len(), 1);
}

#[test]
fn picking_from_someone_elses_pack_fails() {
    let cube = make_cube(1, 3, 12);
    let mut engine = started_engine(&cube);
    let human = human_seat(&engine);

    let foreign_entry = engine
        .packs
        .iter()
        .find(|p| p.seat_position != 0)
        .map(|p| p.entries[0].id)
        .unwrap();
    let before = DraftSnapshot::from_engine(&engine);

    assert!(!engine.make_selection(human, foreign_entry).unwrap());
    assert!(!engine.make_selection(9_999, foreign_entry).unwrap());
    assert_eq!(DraftSnapshot::from_engine(&engine), before);
}

#[test]
fn picking_before_begin_fails() {
    let mut engine = DraftEngine::new(Draft::new(1, "Test Draft", 4, 3));
    engine.join(100);

    assert!(!engine.make_selection(1, 1).unwrap());
    assert!(engine.waiting_packs(1).is_empty());
}

#[test]
fn bots_catch_up_and_pile_packs_on_the_human() {
    let cube = make_cube(3, 5, 60);
    let mut engine = started_engine(&cube);
    let human = human_seat(&engine);

    let picks = engine.make_all_bot_selections(&mut FirstEntryPolicy).unwrap();

    // Бустер бота 1 прошёл 1→2→3, бота 2 – 2→3, бота 3 – только 3.
    assert_eq!(picks, 6);
    assert_eq!(engine.pack_count(human), 4);
    for seat in engine.seats().iter().filter(|s| s.is_bot()) {
        assert_eq!(engine.pack_count(seat.id), 0);
    }

    // Текущий бустер – свой, ещё не тронутый.
    let current = engine.current_pack(human).unwrap();
    assert_eq!(current.pick, 1);
    assert_eq!(current.len(), 5);

    let waiting: Vec<u32> = engine.waiting_packs(human).iter().map(|p| p.pick).collect();
    assert_eq!(waiting, vec![1, 2, 3, 4]);
}

#[test]
fn selection_from_current_pack_only_accepts_current() {
    let cube = make_cube(3, 5, 60);
    let mut engine = started_engine(&cube);
    let human = human_seat(&engine);
    engine.make_all_bot_selections(&mut FirstEntryPolicy).unwrap();

    let queued_entry = engine.waiting_packs(human)[1].entries[0].id;
    assert!(!engine
        .make_selection_from_current_pack(human, queued_entry)
        .unwrap());

    let current_entry = engine.current_pack(human).unwrap().entries[0].id;
    assert!(engine
        .make_selection_from_current_pack(human, current_entry)
        .unwrap());

    // Обычный пик разрешён из любого ждущего бустера.
    assert!(engine.make_selection(human, queued_entry).unwrap());
}

#[test]
fn even_round_passes_to_the_right() {
    let cube = make_cube(2, 2, 16);
    let mut engine = started_engine(&cube);

    let mut guard = 0;
    while engine.current_round() == 1 {
        human_pick_and_heartbeat(&mut engine);
        guard += 1;
        assert!(guard < 100, "раунд 1 не закончился");
    }
    assert_eq!(engine.status(), DraftStatus::Active { round: 2 });

    let human = human_seat(&engine);
    let pack = engine.current_pack(human).cloned().unwrap();
    assert_eq!(pack.round, 2);

    assert!(engine.make_selection(human, pack.entries[0].id).unwrap());

    let moved = engine.packs.iter().find(|p| p.id == pack.id).unwrap();
    assert_eq!(moved.seat_position, 3);
    assert!(matches!(
        engine.history.events.last().map(|e| &e.kind),
        Some(DraftEventKind::PackPassed { from: 0, to: 3, .. })
    ));
}

#[test]
fn draft_completes_after_last_round() {
    let cube = make_cube(3, 5, 60);
    let mut engine = started_engine(&cube);

    let mut guard = 0;
    while engine.status() != DraftStatus::Complete {
        human_pick_and_heartbeat(&mut engine);
        guard += 1;
        assert!(guard < 1_000, "драфт не завершился");
    }

    assert_eq!(engine.current_round(), 4);
    assert!(engine.packs.iter().all(|p| p.is_empty()));
    for seat in engine.seats() {
        assert_eq!(engine.picks_for(seat.id).len(), 15);
    }

    let rounds_completed = engine
        .history
        .events
        .iter()
        .filter(|e| matches!(e.kind, DraftEventKind::RoundCompleted { .. }))
        .count();
    assert_eq!(rounds_completed, 3);
    assert!(matches!(
        engine.history.events.last().map(|e| &e.kind),
        Some(DraftEventKind::DraftCompleted { draft_id: 1 })
    ));

    // После завершения пики и heartbeat ничего не делают.
    assert!(!engine.make_selection(human_seat(&engine), 1).unwrap());
    let before = DraftSnapshot::from_engine(&engine);
    engine.heartbeat(&mut FirstEntryPolicy).unwrap();
    assert_eq!(DraftSnapshot::from_engine(&engine), before);
}
