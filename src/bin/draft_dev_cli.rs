// src/bin/draft_dev_cli.rs

use draft_engine::api::SeatViewDto;
use draft_engine::config::EngineConfig;
use draft_engine::domain::{DraftId, DraftStatus, ParticipantId, Printing, SeatId};
use draft_engine::engine::{DraftManager, ManagerError, RandomBotPolicy};
use draft_engine::infra::{
    map_seat_view, DefaultNameResolver, IdGenerator, InMemoryDraftStorage, InMemoryPrintingCatalog,
    SystemRng,
};
use tracing_subscriber::EnvFilter;

const CARD_NAMES: [&str; 12] = [
    "Lightning Bolt",
    "Counterspell",
    "Llanowar Elves",
    "Dark Ritual",
    "Swords to Plowshares",
    "Brainstorm",
    "Giant Growth",
    "Shock",
    "Duress",
    "Serra Angel",
    "Shivan Dragon",
    "Wrath of God",
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("DRAFT_LOG"))
        .init();

    println!("draft_dev_cli: стартуем dev-CLI бустер-драфта…");

    let config = EngineConfig::from_env();
    if let Err(err) = config.validate() {
        eprintln!("Некорректный конфиг: {}", err);
        return;
    }

    if let Err(err) = run(config) {
        eprintln!("Драфт прерван: {}", err);
    }
}

fn run(config: EngineConfig) -> Result<(), ManagerError> {
    // 1. Генератор ID, RNG, хранилище, каталог принтов
    let ids = IdGenerator::new();
    let mut rng = SystemRng::default();
    let manager = DraftManager::new(InMemoryDraftStorage::new(), config);
    let mut catalog = InMemoryPrintingCatalog::new();

    // 2. Куб: каждый принт в нескольких копиях, чтобы хватило на весь стол
    let owner = ids.next_participant_id();
    let mut cube = manager.create_cube("Dev Cube", owner);
    let copies_needed = cube.default_pack_count as usize
        * cube.default_pack_size as usize
        * manager.config().default_max_players as usize;
    let copies = (copies_needed / CARD_NAMES.len() + 1) as u32;

    for name in CARD_NAMES {
        let printing = Printing::new(ids.next_printing_id(), name);
        cube.add_printing(printing.id, copies);
        catalog.insert(printing);
    }
    let cube_id = manager.register_cube(cube);

    // 3. Драфт + два живых участника, остальные места – боты
    let draft_id = manager.create_draft("DEV DRAFT", Some(owner), Some(cube_id), None)?;
    let humans: Vec<ParticipantId> = vec![owner, ids.next_participant_id()];
    for &pid in &humans {
        manager.join(draft_id, pid)?;
    }

    if !manager.begin(draft_id, &mut rng)? {
        println!("Драфт не стартовал");
        return Ok(());
    }

    let human_seats: Vec<SeatId> = manager
        .roster(draft_id)?
        .into_iter()
        .filter(|s| !s.is_bot())
        .map(|s| s.id)
        .collect();

    println!();
    println!("================ DRAFT SIMULATION =================");

    // 4. Люди берут первую карту текущего бустера, затем heartbeat для ботов.
    loop {
        let engine = manager.load(draft_id)?;
        let round = match engine.status() {
            DraftStatus::Active { round } => round,
            DraftStatus::Complete => break,
            DraftStatus::Pending => {
                println!("Драфт внезапно в статусе Pending, выходим");
                return Ok(());
            }
        };

        for &seat_id in &human_seats {
            let choice = engine
                .current_pack(seat_id)
                .and_then(|p| p.entries.first())
                .map(|e| e.id);
            if let Some(entry_id) = choice {
                manager.make_selection(draft_id, seat_id, entry_id)?;
            }
        }

        let mut policy = RandomBotPolicy::new(&mut rng);
        manager.heartbeat(draft_id, &mut policy)?;

        let after = manager.current_round(draft_id)?;
        if after != round {
            println!("--- раунд {} завершён ---", round);
        }
    }

    // 5. Итог: пулы живых участников
    print_pools(&manager, draft_id, &human_seats, &catalog)?;

    println!();
    println!("draft_dev_cli: драфт {} завершён.", draft_id);
    Ok(())
}

fn print_pools(
    manager: &DraftManager<InMemoryDraftStorage>,
    draft_id: DraftId,
    seats: &[SeatId],
    catalog: &InMemoryPrintingCatalog,
) -> Result<(), ManagerError> {
    let engine = manager.load(draft_id)?;

    for &seat_id in seats {
        let seat = match engine.seat(seat_id) {
            Some(seat) => seat,
            None => continue,
        };
        let view: SeatViewDto = map_seat_view(&engine, seat, &DefaultNameResolver, catalog);

        println!();
        println!("{} ({} карт):", view.seat.label, view.picks.len());
        for pick in &view.picks {
            println!("  R{} P{:>2}  {}", pick.round, pick.pick, pick.card_name);
        }
    }

    Ok(())
}
