// tests/infra_test.rs

use std::collections::HashMap;

use draft_engine::{
    config::{EngineConfig, DEFAULT_MAX_PLAYERS, DEFAULT_PACK_COUNT, DEFAULT_PACK_SIZE},
    domain::{Draft, DraftEntry, Pack, PackEntry, ParticipantId, Pick, Printing, Seat},
    engine::{DraftEngine, EngineError},
    infra::{
        ids::IdGenerator,
        mapping::{
            entry_label, map_pack_to_dto, map_pick_to_dto, seat_label, seat_short_name,
            DefaultNameResolver, InMemoryPrintingCatalog, ParticipantNameResolver,
            PrintingResolver,
        },
        persistence::{DraftStorage, InMemoryDraftStorage, VersionConflict},
    },
    state::DraftSnapshot,
};

//
// ---------- helpers ----------
//

fn make_snapshot(id: u64) -> DraftSnapshot {
    DraftSnapshot::from_engine(&DraftEngine::new(Draft::new(id, "Test Draft", 8, 3)))
}

//
// ---------- ids ----------
//

#[test]
fn id_generator_is_monotonic() {
    let ids = IdGenerator::new();

    assert_eq!(ids.next_draft_id(), 1);
    assert_eq!(ids.next_draft_id(), 2);
    assert_eq!(ids.next_participant_id(), 1);
    assert_eq!(ids.next_cube_id(), 1);
    assert_eq!(ids.next_printing_id(), 1);
    assert_eq!(ids.next_printing_id(), 2);
}

#[test]
fn id_generator_starting_after() {
    let ids = IdGenerator::starting_after(41, 9);
    assert_eq!(ids.next_draft_id(), 42);
    assert_eq!(ids.next_cube_id(), 10);

    ids.observe_cube_id(20);
    assert_eq!(ids.next_cube_id(), 21);
    ids.observe_cube_id(5);
    assert_eq!(ids.next_cube_id(), 22);
}

//
// ---------- config ----------
//

#[test]
fn default_config_is_valid() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.default_max_players, DEFAULT_MAX_PLAYERS);
    assert_eq!(config.default_pack_count, DEFAULT_PACK_COUNT);
    assert_eq!(config.default_pack_size, DEFAULT_PACK_SIZE);
}

#[test]
fn zero_values_are_rejected() {
    let bad = EngineConfig {
        default_pack_size: 0,
        ..EngineConfig::default()
    };
    assert!(bad.validate().is_err());

    let bad = EngineConfig {
        max_transaction_retries: 0,
        ..EngineConfig::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn config_fills_missing_fields_from_defaults() {
    let config: EngineConfig = serde_json::from_str(r#"{"default_max_players":4}"#).unwrap();
    assert_eq!(config.default_max_players, 4);
    assert_eq!(config.default_pack_size, DEFAULT_PACK_SIZE);
}

//
// ---------- storage ----------
//

#[test]
fn storage_compare_and_save() {
    let storage = InMemoryDraftStorage::new();
    let snapshot = make_snapshot(1);

    assert_eq!(storage.save_draft(&snapshot, None), Ok(1));
    assert_eq!(storage.save_draft(&snapshot, Some(1)), Ok(2));

    assert_eq!(
        storage.save_draft(&snapshot, Some(1)),
        Err(VersionConflict {
            draft_id: 1,
            expected: Some(1),
            actual: Some(2),
        })
    );
    assert!(storage.save_draft(&snapshot, None).is_err());
    assert!(storage.save_draft(&make_snapshot(2), Some(3)).is_err());

    let (loaded, version) = storage.load_draft(1).unwrap();
    assert_eq!(loaded, snapshot);
    assert_eq!(version, 2);
}

#[test]
fn storage_lists_and_deletes() {
    let storage = InMemoryDraftStorage::new();
    for id in [3, 1, 2] {
        storage.save_draft(&make_snapshot(id), None).unwrap();
    }
    assert_eq!(storage.draft_ids(), vec![1, 2, 3]);

    assert!(storage.delete_draft(2));
    assert!(!storage.delete_draft(2));
    assert!(storage.load_draft(2).is_none());
    assert_eq!(storage.draft_ids(), vec![1, 3]);
}

#[test]
fn snapshot_with_broken_ring_does_not_load() {
    let mut snapshot = make_snapshot(1);
    snapshot.seats = vec![Seat::new(1, 0, None), Seat::new(2, 3, None)];

    assert!(matches!(
        snapshot.into_engine(),
        Err(EngineError::MalformedRing(1))
    ));
}

//
// ---------- mapping ----------
//

#[test]
fn labels_follow_display_format() {
    let draft = Draft::new(1, "Test Draft", 8, 3);
    let mut names: HashMap<ParticipantId, String> = HashMap::new();
    names.insert(5, "user_a".to_string());

    let human = Seat::new(10, 0, Some(5));
    let bot = Seat::new(11, 1, None);
    let entry = DraftEntry {
        id: 1,
        draft_id: 1,
        participant: 6,
    };

    assert_eq!(seat_label(&human, &draft, &names), "Seat #0 of Test Draft: user_a");
    assert_eq!(seat_label(&bot, &draft, &names), "Seat #1 of Test Draft: Bot");
    assert_eq!(seat_short_name(&bot, &DefaultNameResolver), "Bot");
    assert_eq!(entry_label(&entry, &draft, &names), "Entry for Player 6 in Test Draft");
    assert_eq!(DefaultNameResolver.resolve_name(9), "Player 9");
    assert_eq!(draft.to_string(), "Test Draft");
}

#[test]
fn printing_catalog_resolves_names() {
    let mut catalog = InMemoryPrintingCatalog::new();
    assert!(catalog.is_empty());
    catalog.insert(Printing::new(2, "Dolor").with_image("https://img/2.png"));
    catalog.insert(Printing::new(1, "Dolor"));
    catalog.insert(Printing::new(3, "Sit Amet"));

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.find_by_name("Dolor").map(|p| p.id), Some(1));
    assert!(catalog.find_by_name("Nope").is_none());
    assert_eq!(
        catalog.printing(2).and_then(|p| p.image_url),
        Some("https://img/2.png".to_string())
    );

    let pack = Pack::new(
        7,
        1,
        0,
        vec![
            PackEntry { id: 20, printing: 3 },
            PackEntry { id: 21, printing: 99 },
        ],
    );
    let dto = map_pack_to_dto(&pack, &catalog);
    assert_eq!(dto.entries[0].card_name, "Sit Amet");
    assert_eq!(dto.entries[1].card_name, "Printing 99");

    let pick = Pick {
        entry_id: 20,
        seat_id: 10,
        printing: 2,
        round: 1,
        pick: 3,
    };
    let dto = map_pick_to_dto(&pick, &catalog);
    assert_eq!(dto.card_name, "Dolor");
    assert_eq!(dto.pick, 3);
}
