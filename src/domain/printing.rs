use serde::{Deserialize, Serialize};

use crate::domain::PrintingId;

/// Конкретный принт карты: имя карты + ссылка на арт.
///
/// Движок оперирует только `PrintingId`, имя и картинка нужны
/// исключительно для отображения (DTO).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Printing {
    pub id: PrintingId,
    pub card_name: String,
    pub image_url: Option<String>,
}

impl Printing {
    pub fn new(id: PrintingId, card_name: impl Into<String>) -> Self {
        Self {
            id,
            card_name: card_name.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
