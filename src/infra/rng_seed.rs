//! Seed драфта и детерминированный поток случайности из него.
//!
//! `RngSeed` – 32 байта. Для каждой операции над драфтом берётся свой
//! seed: `derive(draft_id, round, pick)` = SHA-256 от домена, базового
//! seed и контекста. Из него `SeedStream` выдаёт числа блоками
//! SHA-256(домен || seed || счётчик).
//!
//! SeedStream не зависит от rand и работает и на wasm32: там это
//! единственный источник перестановок рассадки, бустеров и выбора ботов.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::RandomSource;

const DERIVE_DOMAIN: &[u8] = b"DRAFT_ENGINE_SEED_V1";
const STREAM_DOMAIN: &[u8] = b"DRAFT_ENGINE_STREAM_V1";

/// 32-байтовый seed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64: младшие 8 байт little-endian, остальное нули.
    pub fn from_u64(x: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes }
    }

    /// Seed конкретной операции над драфтом.
    ///
    /// `round` = 0 – рассадка и бустеры, `pick` – сколько событий
    /// уже в истории драфта.
    pub fn derive(&self, draft_id: u64, round: u32, pick: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DERIVE_DOMAIN);
        hasher.update(self.bytes);
        hasher.update(draft_id.to_le_bytes());
        hasher.update(round.to_le_bytes());
        hasher.update(pick.to_le_bytes());

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self { bytes }
    }

    pub fn stream(&self) -> SeedStream {
        SeedStream::new(self.clone())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn to_rng(&self) -> crate::infra::rng::DeterministicRng {
        crate::infra::rng::DeterministicRng::from_seed(self.bytes)
    }
}

/// `RandomSource` поверх SHA-256 в режиме счётчика.
#[derive(Clone, Debug)]
pub struct SeedStream {
    seed: RngSeed,
    counter: u64,
    block: [u8; 32],
    offset: usize,
}

impl SeedStream {
    pub fn new(seed: RngSeed) -> Self {
        Self {
            seed,
            counter: 0,
            block: [0u8; 32],
            offset: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(STREAM_DOMAIN);
        hasher.update(self.seed.bytes);
        hasher.update(self.counter.to_le_bytes());

        self.block.copy_from_slice(&hasher.finalize());
        self.counter += 1;
        self.offset = 0;
    }

    pub fn next_u64(&mut self) -> u64 {
        if self.offset + 8 > self.block.len() {
            self.refill();
        }
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.block[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_le_bytes(word)
    }

    /// Равномерно в `0..bound` (отбрасываем хвост, дающий смещение).
    fn below(&mut self, bound: u64) -> u64 {
        let limit = u64::MAX - u64::MAX % bound;
        loop {
            let x = self.next_u64();
            if x < limit {
                return x % bound;
            }
        }
    }
}

impl RandomSource for SeedStream {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.below(i as u64 + 1) as usize;
            slice.swap(i, j);
        }
    }

    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.below(len as u64) as usize
    }
}
