// tests/api_test.rs

use std::collections::HashMap;

use draft_engine::api::{
    execute_command, parse_command, parse_query, run_query, ApiError, BeginDraftCommand, Command,
    CommandResponse, CreateDraftCommand, DraftCommand, HeartbeatCommand, JoinDraftCommand,
    MakeSelectionCommand, Query, QueryResponse, RegisterCubeCommand,
};
use draft_engine::config::EngineConfig;
use draft_engine::domain::{Cube, DraftId, ParticipantId, Printing};
use draft_engine::engine::{DraftManager, RandomSource};
use draft_engine::infra::{
    DefaultNameResolver, DeterministicRng, InMemoryDraftStorage, InMemoryPrintingCatalog,
};
use draft_engine::{DraftAbi, DraftOperation};

//
// ---------- helpers ----------
//

struct IdentityRng;

impl RandomSource for IdentityRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}

fn make_manager() -> DraftManager<InMemoryDraftStorage> {
    DraftManager::new(InMemoryDraftStorage::new(), EngineConfig::default())
}

fn make_catalog() -> InMemoryPrintingCatalog {
    let mut catalog = InMemoryPrintingCatalog::new();
    for (id, name) in [(1, "Lorem Ipsum"), (2, "Dolor"), (3, "Sit Amet"), (4, "Amet")] {
        catalog.insert(Printing::new(id, name).with_image(format!("https://img/{}.png", id)));
    }
    catalog
}

fn exec(manager: &DraftManager<InMemoryDraftStorage>, command: Command) -> CommandResponse {
    execute_command(manager, command, &mut IdentityRng, &DefaultNameResolver).unwrap()
}

/// Куб 1 x 2 на двух местах + драфт, в который записан участник 5, уже начатый.
fn started_draft(manager: &DraftManager<InMemoryDraftStorage>) -> DraftId {
    let mut cube = Cube::new(10, "Api Cube", 1).with_pack_layout(1, 2);
    for printing in 1..=4 {
        cube.add_printing(printing, 1);
    }
    assert_eq!(
        exec(manager, Command::RegisterCube(RegisterCubeCommand { cube })),
        CommandResponse::CubeRegistered { cube_id: 10 }
    );

    let draft_id = match exec(
        manager,
        Command::CreateDraft(CreateDraftCommand {
            name: "Test Draft".to_string(),
            creator: Some(5),
            cube_id: Some(10),
            max_players: Some(2),
        }),
    ) {
        CommandResponse::DraftCreated { draft_id } => draft_id,
        other => panic!("ожидали DraftCreated, получили {:?}", other),
    };

    assert!(matches!(
        exec(
            manager,
            Command::DraftCommand(DraftCommand::Join(JoinDraftCommand {
                draft_id,
                participant_id: 5,
            }))
        ),
        CommandResponse::Joined { .. }
    ));
    assert_eq!(
        exec(
            manager,
            Command::DraftCommand(DraftCommand::Begin(BeginDraftCommand { draft_id }))
        ),
        CommandResponse::Started(true)
    );

    draft_id
}

//
// ---------- parsing ----------
//

#[test]
fn parse_command_from_json() {
    let json = r#"{"DraftCommand":{"Join":{"draft_id":3,"participant_id":5}}}"#;
    let cmd = parse_command(json).unwrap();

    assert_eq!(
        cmd,
        Command::DraftCommand(DraftCommand::Join(JoinDraftCommand {
            draft_id: 3,
            participant_id: 5,
        }))
    );
}

#[test]
fn parse_query_from_json() {
    assert_eq!(parse_query(r#""ListDrafts""#).unwrap(), Query::ListDrafts);
    assert_eq!(
        parse_query(r#"{"GetSeat":{"draft_id":1,"seat_id":2}}"#).unwrap(),
        Query::GetSeat {
            draft_id: 1,
            seat_id: 2
        }
    );
}

#[test]
fn malformed_json_is_bad_request() {
    assert!(matches!(parse_command("{not json"), Err(ApiError::BadRequest(_))));
    assert!(matches!(
        parse_query(r#"{"Unknown":{}}"#),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn operation_wraps_command() {
    let op = DraftOperation::Command(Command::DraftCommand(DraftCommand::Heartbeat(
        HeartbeatCommand { draft_id: 1 },
    )));
    let json = serde_json::to_string(&op).unwrap();
    let back: DraftOperation = serde_json::from_str(&json).unwrap();
    assert!(matches!(
        back,
        DraftOperation::Command(Command::DraftCommand(DraftCommand::Heartbeat(_)))
    ));
    let _abi = DraftAbi;
}

//
// ---------- commands ----------
//

#[test]
fn join_on_full_draft_reports_unavailable() {
    let manager = make_manager();
    let draft_id = manager.create_draft("Tiny", None, None, Some(1)).unwrap();

    let join = |participant_id: ParticipantId| {
        exec(
            &manager,
            Command::DraftCommand(DraftCommand::Join(JoinDraftCommand {
                draft_id,
                participant_id,
            })),
        )
    };

    assert!(matches!(join(1), CommandResponse::Joined { .. }));
    assert_eq!(join(2), CommandResponse::SeatUnavailable);
}

#[test]
fn create_draft_with_missing_cube_is_error() {
    let manager = make_manager();
    let err = execute_command(
        &manager,
        Command::CreateDraft(CreateDraftCommand {
            name: "Nope".to_string(),
            creator: None,
            cube_id: Some(999),
            max_players: None,
        }),
        &mut IdentityRng,
        &DefaultNameResolver,
    )
    .unwrap_err();

    assert_eq!(err, ApiError::CubeNotFound(999));
}

#[test]
fn heartbeat_returns_draft_state() {
    let manager = make_manager();
    let draft_id = started_draft(&manager);

    let response = exec(
        &manager,
        Command::DraftCommand(DraftCommand::Heartbeat(HeartbeatCommand { draft_id })),
    );

    let dto = match response {
        CommandResponse::DraftState(dto) => dto,
        other => panic!("ожидали DraftState, получили {:?}", other),
    };
    assert_eq!(dto.status, "Active");
    assert_eq!(dto.current_round, 1);
    assert_eq!(dto.total_rounds, 1);
    assert_eq!(dto.seats.len(), 2);
    assert!(dto.entries.is_empty());

    let human = &dto.seats[0];
    assert!(!human.is_bot);
    assert_eq!(human.display_name, "Player 5");
    assert_eq!(human.label, "Seat #0 of Test Draft: Player 5");
    assert_eq!(human.waiting_packs, 2);

    let bot = &dto.seats[1];
    assert!(bot.is_bot);
    assert_eq!(bot.display_name, "Bot");
    assert_eq!(bot.picks, 1);
    assert_eq!(bot.waiting_packs, 0);
}

#[test]
fn selection_command_reports_result() {
    let manager = make_manager();
    let draft_id = started_draft(&manager);
    let seat_id = manager.roster(draft_id).unwrap()[0].id;
    let entry_id = manager.waiting_packs(draft_id, seat_id).unwrap()[0].entries[0].id;

    let pick = |entry_id: u64| {
        exec(
            &manager,
            Command::DraftCommand(DraftCommand::MakeSelection(MakeSelectionCommand {
                draft_id,
                seat_id,
                entry_id,
            })),
        )
    };

    assert_eq!(pick(entry_id), CommandResponse::Selection(true));
    assert_eq!(pick(entry_id), CommandResponse::Selection(false));
}

#[test]
fn configured_seed_drives_seating_and_bots() {
    let seeded_manager = || {
        let config = EngineConfig {
            rng_seed: Some(2024),
            ..EngineConfig::default()
        };
        DraftManager::new(InMemoryDraftStorage::new(), config)
    };

    // RNG вызывающего не участвует: у одного менеджера он тождественный,
    // у другого случайный, а результат одинаковый.
    let run = |manager: &DraftManager<InMemoryDraftStorage>, send: &mut dyn FnMut(Command) -> CommandResponse| {
        let mut cube = Cube::new(10, "Seeded Cube", 1).with_pack_layout(1, 5);
        for printing in 1..=40 {
            cube.add_printing(printing, 1);
        }
        send(Command::RegisterCube(RegisterCubeCommand { cube }));
        let draft_id = manager.create_draft("Seeded", None, Some(10), Some(8)).unwrap();
        for participant_id in 1..=3 {
            send(Command::DraftCommand(DraftCommand::Join(JoinDraftCommand {
                draft_id,
                participant_id,
            })));
        }
        send(Command::DraftCommand(DraftCommand::Begin(BeginDraftCommand { draft_id })));
        send(Command::DraftCommand(DraftCommand::Heartbeat(HeartbeatCommand { draft_id })));
        manager.load(draft_id).unwrap()
    };

    let a_manager = seeded_manager();
    let a = run(&a_manager, &mut |cmd| exec(&a_manager, cmd));

    let b_manager = seeded_manager();
    let mut other_rng = DeterministicRng::from_u64(99);
    let b = run(&b_manager, &mut |cmd| {
        execute_command(&b_manager, cmd, &mut other_rng, &DefaultNameResolver).unwrap()
    });

    assert_eq!(a.seats(), b.seats());
    assert_eq!(a.packs, b.packs);
    assert_eq!(a.picks, b.picks);
    assert!(!a.picks.is_empty());
}

#[test]
fn seeded_rng_is_off_by_default() {
    let manager = make_manager();
    let draft_id = manager.create_draft("Plain", None, None, None).unwrap();
    assert!(manager.seeded_rng(draft_id).unwrap().is_none());
}

//
// ---------- queries ----------
//

#[test]
fn get_seat_shows_current_pack_and_names() {
    let manager = make_manager();
    let draft_id = started_draft(&manager);
    exec(
        &manager,
        Command::DraftCommand(DraftCommand::Heartbeat(HeartbeatCommand { draft_id })),
    );
    let seat_id = manager.roster(draft_id).unwrap()[0].id;

    let mut names: HashMap<ParticipantId, String> = HashMap::new();
    names.insert(5, "testuser".to_string());

    let response = run_query(
        &manager,
        Query::GetSeat { draft_id, seat_id },
        &names,
        &make_catalog(),
    )
    .unwrap();

    let view = match response {
        QueryResponse::Seat(view) => view,
        other => panic!("ожидали Seat, получили {:?}", other),
    };
    assert_eq!(view.seat.label, "Seat #0 of Test Draft: testuser");
    assert_eq!(view.waiting_packs.len(), 2);

    let current = view.current_pack.unwrap();
    assert_eq!(current.pick, 1);
    assert_eq!(current.entries.len(), 2);
    for entry in &current.entries {
        assert!(!entry.card_name.starts_with("Printing"));
        assert!(entry.image_url.is_some());
    }
    assert!(view.picks.is_empty());
}

#[test]
fn get_seat_unknown_is_error() {
    let manager = make_manager();
    let draft_id = started_draft(&manager);

    let err = run_query(
        &manager,
        Query::GetSeat {
            draft_id,
            seat_id: 9_999,
        },
        &DefaultNameResolver,
        &InMemoryPrintingCatalog::new(),
    )
    .unwrap_err();
    assert_eq!(err, ApiError::SeatNotFound(9_999));

    let err = run_query(
        &manager,
        Query::GetDraft { draft_id: 4_242 },
        &DefaultNameResolver,
        &InMemoryPrintingCatalog::new(),
    )
    .unwrap_err();
    assert_eq!(err, ApiError::DraftNotFound(4_242));
}

#[test]
fn list_and_my_drafts() {
    let manager = make_manager();
    let started = started_draft(&manager);
    let pending = manager.create_draft("Later", None, None, Some(4)).unwrap();
    manager.join(pending, 5).unwrap();

    let catalog = InMemoryPrintingCatalog::new();

    let all = match run_query(&manager, Query::ListDrafts, &DefaultNameResolver, &catalog).unwrap() {
        QueryResponse::Drafts(all) => all,
        other => panic!("ожидали Drafts, получили {:?}", other),
    };
    assert_eq!(all.len(), 2);
    let later = all.iter().find(|d| d.draft_id == pending).unwrap();
    assert_eq!(later.status, "Pending");
    assert_eq!(later.entries, vec!["Entry for Player 5 in Later".to_string()]);

    let mine = match run_query(
        &manager,
        Query::MyDrafts { participant_id: 5 },
        &DefaultNameResolver,
        &catalog,
    )
    .unwrap()
    {
        QueryResponse::MyDrafts(mine) => mine,
        other => panic!("ожидали MyDrafts, получили {:?}", other),
    };
    let labels: Vec<(DraftId, String)> = mine.into_iter().map(|r| (r.draft_id, r.label)).collect();
    assert_eq!(
        labels,
        vec![
            (pending, "Entry in Later".to_string()),
            (started, "Seat #0 of Test Draft".to_string()),
        ]
    );
}
