use serde::{Deserialize, Serialize};

use crate::domain::cube::Cube;
use crate::domain::{CubeId, DraftId, EntryId, ParticipantId, SeatId};

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`DraftOperation`),
/// которые Linera экспонирует наружу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать новый драфт.
    CreateDraft(CreateDraftCommand),

    /// Зарегистрировать / обновить куб.
    RegisterCube(RegisterCubeCommand),

    /// Операция над конкретным драфтом.
    DraftCommand(DraftCommand),
}

/// Команда создания драфта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDraftCommand {
    pub name: String,
    pub creator: Option<ParticipantId>,
    /// Куб-источник карт. Без куба драфт идёт без бустеров.
    pub cube_id: Option<CubeId>,
    /// Размер стола; по умолчанию из конфига.
    pub max_players: Option<u8>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterCubeCommand {
    pub cube: Cube,
}

/// Команды, которые относятся к существующему драфту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DraftCommand {
    /// Подать заявку.
    Join(JoinDraftCommand),

    /// Старт: рассадка + бустеры.
    Begin(BeginDraftCommand),

    /// Пик карты.
    MakeSelection(MakeSelectionCommand),

    /// Дать ботам догнать и проверить конец раунда.
    /// Фронт дёргает после каждого пика человека.
    Heartbeat(HeartbeatCommand),

    /// Удалить драфт целиком.
    Delete(DeleteDraftCommand),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinDraftCommand {
    pub draft_id: DraftId,
    pub participant_id: ParticipantId,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeginDraftCommand {
    pub draft_id: DraftId,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MakeSelectionCommand {
    pub draft_id: DraftId,
    pub seat_id: SeatId,
    pub entry_id: EntryId,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeartbeatCommand {
    pub draft_id: DraftId,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteDraftCommand {
    pub draft_id: DraftId,
}
