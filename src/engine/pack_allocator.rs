use tracing::debug;

use crate::domain::{CardPool, PrintingId};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Нарезать пул на `pack_count` бустеров по `pack_size` карт.
///
/// - пул считается поштучно (копии одного принта – отдельные единицы);
/// - если `pack_count * pack_size` больше пула – `InsufficientPool`;
/// - иначе пул перемешивается и режется на подряд идущие куски;
/// - остаток отбрасывается.
///
/// Входной пул не изменяется.
pub fn generate_packs<R: RandomSource>(
    pool: &[PrintingId],
    pack_count: usize,
    pack_size: usize,
    rng: &mut R,
) -> Result<Vec<Vec<PrintingId>>, EngineError> {
    let requested = pack_count
        .checked_mul(pack_size)
        .ok_or(EngineError::InsufficientPool {
            requested: usize::MAX,
            available: pool.len(),
        })?;

    if requested > pool.len() {
        return Err(EngineError::InsufficientPool {
            requested,
            available: pool.len(),
        });
    }

    if pack_size == 0 {
        return Ok(vec![Vec::new(); pack_count]);
    }

    let mut shuffled = pool.to_vec();
    rng.shuffle(&mut shuffled);

    let leftover = shuffled.len() - requested;
    if leftover > 0 {
        debug!(target: "draft", "остаток пула отброшен: {} карт", leftover);
    }
    shuffled.truncate(requested);

    Ok(shuffled
        .chunks_exact(pack_size)
        .map(|chunk| chunk.to_vec())
        .collect())
}

/// То же самое поверх куба: размер бустера и их количество по умолчанию
/// берутся из куба, если не заданы явно.
pub fn generate_cube_packs<R: RandomSource>(
    cube: &dyn CardPool,
    pack_count: Option<usize>,
    pack_size: Option<usize>,
    rng: &mut R,
) -> Result<Vec<Vec<PrintingId>>, EngineError> {
    let pack_count = pack_count.unwrap_or(cube.default_pack_count() as usize);
    let pack_size = pack_size.unwrap_or(cube.default_pack_size() as usize);
    let pool = cube.expand_pool();
    generate_packs(&pool, pack_count, pack_size, rng)
}
