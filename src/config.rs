//! Настройки движка драфта.
//!
//! Значения по умолчанию совпадают с классическим бустер-драфтом:
//! 8 мест, 3 бустера по 15 карт.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PLAYERS: u8 = 8;
pub const DEFAULT_PACK_COUNT: u32 = 3;
pub const DEFAULT_PACK_SIZE: u32 = 15;
pub const DEFAULT_TX_RETRIES: u32 = 8;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Размер стола для новых драфтов, если явно не задан.
    pub default_max_players: u8,

    /// Сколько раундов у драфта без куба и у новых кубов.
    pub default_pack_count: u32,

    /// Размер бустера у новых кубов.
    pub default_pack_size: u32,

    /// Сколько раз DraftManager перезапускает операцию при конфликте версий.
    pub max_transaction_retries: u32,

    /// Базовый seed. Если задан, рассадка, бустеры и выбор ботов
    /// выводятся из него (`RngSeed::derive`), а не из RNG вызывающего.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_max_players: DEFAULT_MAX_PLAYERS,
            default_pack_count: DEFAULT_PACK_COUNT,
            default_pack_size: DEFAULT_PACK_SIZE,
            max_transaction_retries: DEFAULT_TX_RETRIES,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_max_players == 0 {
            return Err("EngineConfig: default_max_players = 0".into());
        }
        if self.default_pack_count == 0 {
            return Err("EngineConfig: default_pack_count = 0".into());
        }
        if self.default_pack_size == 0 {
            return Err("EngineConfig: default_pack_size = 0".into());
        }
        if self.max_transaction_retries == 0 {
            return Err("EngineConfig: max_transaction_retries = 0".into());
        }
        Ok(())
    }

    /// Прочитать конфиг из окружения (и `.env`, если он есть).
    ///
    /// Переменные: DRAFT_MAX_PLAYERS, DRAFT_PACK_COUNT, DRAFT_PACK_SIZE, DRAFT_TX_RETRIES,
    /// DRAFT_RNG_SEED (необязательная).
    /// Нечитаемые значения заменяются дефолтами с предупреждением в лог.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        Self {
            default_max_players: env_or("DRAFT_MAX_PLAYERS", defaults.default_max_players),
            default_pack_count: env_or("DRAFT_PACK_COUNT", defaults.default_pack_count),
            default_pack_size: env_or("DRAFT_PACK_SIZE", defaults.default_pack_size),
            max_transaction_retries: env_or("DRAFT_TX_RETRIES", defaults.max_transaction_retries),
            rng_seed: std::env::var("DRAFT_RNG_SEED").ok().and_then(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| {
                        tracing::warn!(target: "config", "DRAFT_RNG_SEED={:?} не парсится, seed не задан", raw)
                    })
                    .ok()
            }),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_or<T>(key: &str, default: T) -> T
where
    T: core::str::FromStr + core::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(target: "config", "{}={:?} не парсится, берём {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
