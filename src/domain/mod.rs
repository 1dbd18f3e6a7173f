//! Доменная модель драфта: драфты, заявки, места, бустеры, пики, кубы и принты.

pub mod cube;
pub mod draft;
pub mod pack;
pub mod printing;
pub mod seat;

// Глобальные идентификаторы (генерятся через infra::IdGenerator).
pub type DraftId = u64;
pub type ParticipantId = u64;
pub type CubeId = u64;
pub type PrintingId = u64;

// Идентификаторы внутри одного драфта (локальная последовательность драфта).
pub type DraftEntryId = u64;
pub type SeatId = u64;
pub type PackId = u64;
pub type EntryId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Pack и т.п.
pub use cube::*;
pub use draft::*;
pub use pack::*;
pub use printing::*;
pub use seat::*;
