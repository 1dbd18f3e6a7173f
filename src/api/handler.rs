//! Исполнение команд и запросов поверх `DraftManager`.
//!
//! Это тонкий слой: разбор входа, вызов менеджера, маппинг в DTO.
//! HTTP / GraphQL транспорт живёт снаружи.

use tracing::debug;

use crate::api::commands::{Command, DraftCommand};
use crate::api::dto::{CommandResponse, ParticipantDraftDto};
use crate::api::errors::ApiError;
use crate::api::queries::{Query, QueryResponse};
use crate::engine::bot_policy::RandomBotPolicy;
use crate::engine::draft_engine::JoinOutcome;
use crate::engine::draft_manager::{DraftManager, ParticipantDraft};
use crate::engine::RandomSource;
use crate::infra::mapping::{map_draft_to_dto, map_seat_view, ParticipantNameResolver, PrintingResolver};
use crate::infra::persistence::DraftStorage;

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Разобрать запрос из JSON.
pub fn parse_query(json: &str) -> Result<Query, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Выполнить команду.
///
/// `rng` используется для рассадки/бустеров (Begin) и для ботов (Heartbeat).
/// Если в конфиге менеджера задан `rng_seed`, вместо него берётся
/// `DraftManager::seeded_rng`.
pub fn execute_command<S, R, N>(
    manager: &DraftManager<S>,
    command: Command,
    rng: &mut R,
    names: &N,
) -> Result<CommandResponse, ApiError>
where
    S: DraftStorage,
    R: RandomSource,
    N: ParticipantNameResolver,
{
    debug!(target: "api", "команда: {:?}", command);

    match command {
        Command::CreateDraft(cmd) => {
            let draft_id =
                manager.create_draft(cmd.name, cmd.creator, cmd.cube_id, cmd.max_players)?;
            Ok(CommandResponse::DraftCreated { draft_id })
        }

        Command::RegisterCube(cmd) => {
            let cube_id = manager.register_cube(cmd.cube);
            Ok(CommandResponse::CubeRegistered { cube_id })
        }

        Command::DraftCommand(cmd) => match cmd {
            DraftCommand::Join(c) => match manager.join(c.draft_id, c.participant_id)? {
                JoinOutcome::Joined(entry) => Ok(CommandResponse::Joined { entry_id: entry.id }),
                JoinOutcome::SeatUnavailable => Ok(CommandResponse::SeatUnavailable),
            },

            DraftCommand::Begin(c) => {
                let started = match manager.seeded_rng(c.draft_id)? {
                    Some(mut seeded) => manager.begin(c.draft_id, &mut seeded)?,
                    None => manager.begin(c.draft_id, rng)?,
                };
                Ok(CommandResponse::Started(started))
            }

            DraftCommand::MakeSelection(c) => {
                let ok = manager.make_selection(c.draft_id, c.seat_id, c.entry_id)?;
                Ok(CommandResponse::Selection(ok))
            }

            DraftCommand::Heartbeat(c) => {
                match manager.seeded_rng(c.draft_id)? {
                    Some(mut seeded) => {
                        manager.heartbeat(c.draft_id, &mut RandomBotPolicy::new(&mut seeded))?
                    }
                    None => manager.heartbeat(c.draft_id, &mut RandomBotPolicy::new(&mut *rng))?,
                }
                let engine = manager.load(c.draft_id)?;
                Ok(CommandResponse::DraftState(map_draft_to_dto(&engine, names)))
            }

            DraftCommand::Delete(c) => Ok(CommandResponse::DraftDeleted(
                manager.delete_draft(c.draft_id),
            )),
        },
    }
}

/// Выполнить запрос "только чтение".
pub fn run_query<S, N, P>(
    manager: &DraftManager<S>,
    query: Query,
    names: &N,
    printings: &P,
) -> Result<QueryResponse, ApiError>
where
    S: DraftStorage,
    N: ParticipantNameResolver,
    P: PrintingResolver,
{
    match query {
        Query::GetDraft { draft_id } => {
            let engine = manager.load(draft_id)?;
            Ok(QueryResponse::Draft(map_draft_to_dto(&engine, names)))
        }

        Query::ListDrafts => {
            let mut drafts = Vec::new();
            for id in manager.storage().draft_ids() {
                let engine = manager.load(id)?;
                drafts.push(map_draft_to_dto(&engine, names));
            }
            Ok(QueryResponse::Drafts(drafts))
        }

        Query::GetSeat { draft_id, seat_id } => {
            let engine = manager.load(draft_id)?;
            let seat = engine.seat(seat_id).ok_or(ApiError::SeatNotFound(seat_id))?;
            Ok(QueryResponse::Seat(map_seat_view(&engine, seat, names, printings)))
        }

        Query::MyDrafts { participant_id } => {
            let rows = manager
                .drafts_for_participant(participant_id)
                .into_iter()
                .map(|row| match row {
                    ParticipantDraft::Entry { draft_id, draft_name } => ParticipantDraftDto {
                        draft_id,
                        label: format!("Entry in {}", draft_name),
                    },
                    ParticipantDraft::Seat {
                        draft_id,
                        draft_name,
                        position,
                    } => ParticipantDraftDto {
                        draft_id,
                        label: format!("Seat #{} of {}", position, draft_name),
                    },
                })
                .collect();
            Ok(QueryResponse::MyDrafts(rows))
        }
    }
}
