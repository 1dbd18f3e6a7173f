use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PACK_COUNT, DEFAULT_PACK_SIZE};
use crate::domain::{CubeId, ParticipantId, PrintingId};

/// Источник пула карт для драфта.
///
/// Движку от куба нужно только три вещи: развёрнутый пул
/// (каждая копия карты – отдельная единица) и размеры бустеров по умолчанию.
pub trait CardPool {
    /// Пул принтов с повторением по count.
    fn expand_pool(&self) -> Vec<PrintingId>;

    /// Сколько бустеров получает каждое место (= число раундов).
    fn default_pack_count(&self) -> u32;

    /// Сколько карт в одном бустере.
    fn default_pack_size(&self) -> u32;

    /// Общее количество единиц в пуле.
    fn pool_size(&self) -> usize {
        self.expand_pool().len()
    }
}

/// Одна строка куба: принт + количество копий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CubeEntry {
    pub printing: PrintingId,
    pub count: u32,
}

/// Куб — именованный пул карт, из которого собираются бустеры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cube {
    pub id: CubeId,
    pub name: String,
    pub owner: ParticipantId,
    pub entries: Vec<CubeEntry>,
    pub default_pack_count: u32,
    pub default_pack_size: u32,
}

impl Cube {
    /// Пустой куб с размерами бустеров по умолчанию (3 x 15).
    pub fn new(id: CubeId, name: impl Into<String>, owner: ParticipantId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            entries: Vec::new(),
            default_pack_count: DEFAULT_PACK_COUNT,
            default_pack_size: DEFAULT_PACK_SIZE,
        }
    }

    pub fn with_pack_layout(mut self, pack_count: u32, pack_size: u32) -> Self {
        self.default_pack_count = pack_count;
        self.default_pack_size = pack_size;
        self
    }

    /// Добавить копии принта. Повторное добавление того же принта
    /// увеличивает count существующей строки.
    pub fn add_printing(&mut self, printing: PrintingId, count: u32) {
        if count == 0 {
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.printing == printing) {
            entry.count += count;
        } else {
            self.entries.push(CubeEntry { printing, count });
        }
    }

    /// Количество карт в кубе с учётом копий (не число уникальных принтов).
    pub fn size(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }
}

impl CardPool for Cube {
    fn expand_pool(&self) -> Vec<PrintingId> {
        let mut pool = Vec::with_capacity(self.size());
        for entry in &self.entries {
            for _ in 0..entry.count {
                pool.push(entry.printing);
            }
        }
        pool
    }

    fn default_pack_count(&self) -> u32 {
        self.default_pack_count
    }

    fn default_pack_size(&self) -> u32 {
        self.default_pack_size
    }

    fn pool_size(&self) -> usize {
        self.size()
    }
}
