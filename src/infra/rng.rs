use crate::engine::RandomSource;

//
// NATIVE вариант (не wasm32): обёртки над rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        use rand::thread_rng;

        slice.shuffle(&mut thread_rng());
    }

    fn choose_index(&mut self, len: usize) -> usize {
        use rand::{thread_rng, Rng};

        thread_rng().gen_range(0..len)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одну и ту же рассадку и те же бустеры при одинаковом seed.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    fn choose_index(&mut self, len: usize) -> usize {
        use rand::Rng;
        self.inner.gen_range(0..len)
    }
}

//
// WASM вариант (Linera контракт): тут НЕТ rand / getrandom.
// Случайность берётся из seed (например, из хэша блока) через SeedStream.
//
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct SystemRng {
    stream: crate::infra::rng_seed::SeedStream,
}

#[cfg(target_arch = "wasm32")]
impl SystemRng {
    pub fn from_seed(seed: crate::infra::rng_seed::RngSeed) -> Self {
        Self {
            stream: seed.stream(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for SystemRng {
    fn default() -> Self {
        Self::from_seed(crate::infra::rng_seed::RngSeed::from_u64(0))
    }
}

#[cfg(target_arch = "wasm32")]
impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.stream.shuffle(slice);
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.stream.choose_index(len)
    }
}
