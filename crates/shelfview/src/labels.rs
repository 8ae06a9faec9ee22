//! User-facing text shown in the grid and status line.

use serde::{Deserialize, Serialize};

/// UI strings. Defaults are the Russian storefront texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub loading: String,
    pub no_data: String,
    pub not_found: String,
    pub load_error: String,
    pub status_error: String,
    pub untitled: String,
    pub no_image: String,
    pub reviews: String,
    pub buy: String,
    pub added_to_cart: String,
    pub items: String,
    pub page: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            loading: "Загрузка...".into(),
            no_data: "Нет данных".into(),
            not_found: "Товары не найдены".into(),
            load_error: "Ошибка загрузки".into(),
            status_error: "Ошибка".into(),
            untitled: "Без названия".into(),
            no_image: "Нет изображения".into(),
            reviews: "отзывов".into(),
            buy: "Купить".into(),
            added_to_cart: "Добавлено в корзину".into(),
            items: "товаров".into(),
            page: "стр.".into(),
        }
    }
}

impl Labels {
    /// `"{count} товаров (стр. {page})"`
    pub fn status_count(&self, count: usize, page: u32) -> String {
        format!("{count} {} ({} {page})", self.items, self.page)
    }

    /// `"0 товаров"`
    pub fn status_zero(&self) -> String {
        format!("0 {}", self.items)
    }

    pub fn cart_notice(&self, title: &str) -> String {
        format!("{}: {title}", self.added_to_cart)
    }
}
