use crate::domain::{EntryId, PackEntry};
use crate::engine::RandomSource;

/// Правило, по которому бот выбирает карту из бустера.
///
/// Движок никогда не зовёт политику с пустым бустером.
/// Возврат `None` или id карты не из `visible` – ошибка движка (инвариант).
pub trait BotPolicy {
    fn choose(&mut self, visible: &[PackEntry]) -> Option<EntryId>;
}

impl<P: BotPolicy + ?Sized> BotPolicy for &mut P {
    fn choose(&mut self, visible: &[PackEntry]) -> Option<EntryId> {
        (**self).choose(visible)
    }
}

/// Политика по умолчанию: равномерно случайная карта.
#[derive(Clone, Debug, Default)]
pub struct RandomBotPolicy<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> RandomBotPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RandomSource> BotPolicy for RandomBotPolicy<R> {
    fn choose(&mut self, visible: &[PackEntry]) -> Option<EntryId> {
        if visible.is_empty() {
            return None;
        }
        let idx = self.rng.choose_index(visible.len());
        visible.get(idx).map(|e| e.id)
    }
}
