use serde::{Deserialize, Serialize};

use crate::domain::{CubeId, DraftEntryId, DraftId, EntryId, PackId, PrintingId, SeatId, SeatPosition};

/// DTO карты в бустере.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackEntryDto {
    pub entry_id: EntryId,
    pub printing_id: PrintingId,
    pub card_name: String,
    pub image_url: Option<String>,
}

/// DTO бустера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackDto {
    pub pack_id: PackId,
    pub round: u32,
    pub pick: u32,
    pub entries: Vec<PackEntryDto>,
}

/// DTO пика (карта в пуле места).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickDto {
    pub entry_id: EntryId,
    pub printing_id: PrintingId,
    pub card_name: String,
    pub image_url: Option<String>,
    pub round: u32,
    pub pick: u32,
}

/// DTO места за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatDto {
    pub seat_id: SeatId,
    pub position: SeatPosition,
    /// "Bot" или имя участника.
    pub display_name: String,
    /// "Seat #N of <драфт>: <имя>".
    pub label: String,
    pub is_bot: bool,
    /// Сколько непустых бустеров ждут место в текущем раунде.
    pub waiting_packs: u32,
    pub picks: u32,
}

/// DTO драфта (для лобби и страницы драфта).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftViewDto {
    pub draft_id: DraftId,
    pub name: String,
    /// Статус в текстовом виде: "Pending", "Active", "Complete".
    pub status: String,
    pub current_round: u32,
    pub total_rounds: u32,
    pub max_players: u8,
    pub cube_id: Option<CubeId>,
    /// Подписи заявок до старта.
    pub entries: Vec<String>,
    pub seats: Vec<SeatDto>,
}

/// DTO драфта глазами одного места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatViewDto {
    pub seat: SeatDto,
    pub current_round: u32,
    pub current_pack: Option<PackDto>,
    pub waiting_packs: Vec<PackDto>,
    pub picks: Vec<PickDto>,
}

/// Строка списка "мои драфты".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantDraftDto {
    pub draft_id: DraftId,
    /// "Entry in <драфт>" или "Seat #N of <драфт>".
    pub label: String,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    DraftCreated { draft_id: DraftId },

    CubeRegistered { cube_id: CubeId },

    Joined { entry_id: DraftEntryId },

    /// Стол полон или драфт уже начат.
    SeatUnavailable,

    /// Результат begin: false – предусловия не выполнены.
    Started(bool),

    /// Результат пика: false – карта не ждёт это место.
    Selection(bool),

    /// Обновлённое состояние драфта (после heartbeat).
    DraftState(DraftViewDto),

    DraftDeleted(bool),
}
