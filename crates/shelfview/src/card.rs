//! Product card view model built from a loosely typed item record.

use serde::Serialize;
use serde_json::Value;

use crate::format::{
    coerce_number, escape_markup, format_currency, render_stars, truncate, value_text,
};
use crate::labels::Labels;

/// Longest title shown on a card, ellipsis included.
pub const TITLE_MAX_LEN: usize = 70;

/// Shown in place of a missing price.
pub const NO_PRICE: &str = "—";

/// Rating assumed when the record has none.
pub const DEFAULT_RATING: f64 = 5.0;

const FAVORITE_OFF: &str = "♡";
const FAVORITE_ON: &str = "♥";

/// A local interaction on a painted card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Buy,
    Favorite,
}

/// What a card interaction did. Nothing is persisted: there is no cart or
/// wishlist behind these, and favorites reset on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardEvent {
    AddedToCart { title: String },
    FavoriteToggled { title: String, favorite: bool },
}

/// One rendered catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Full, unescaped title.
    pub title: String,
    pub image: Option<String>,
    pub stars: String,
    pub reviews: String,
    /// Formatted old price, empty when the record has none.
    pub old_price: String,
    /// Formatted price, [`NO_PRICE`] when the record has none.
    pub price: String,
    pub favorite: bool,
}

impl Card {
    /// Build a card, applying the field fallbacks of the catalog API.
    ///
    /// A field counts as present only if it is truthy: `null`, `false`, `0`
    /// and `""` all fall through to the next candidate.
    pub fn from_record(record: &Value, labels: &Labels) -> Self {
        let title = first_truthy(record, &["title", "name", "bookTitle"])
            .map(value_text)
            .unwrap_or_else(|| labels.untitled.clone());

        let price = first_truthy(record, &["price", "currentPrice"])
            .map(format_currency)
            .unwrap_or_else(|| NO_PRICE.to_string());

        let old_price = first_truthy(record, &["oldPrice"])
            .map(format_currency)
            .unwrap_or_default();

        let image = first_truthy(record, &["image"])
            .or_else(|| record.get("images")?.get(0).filter(|v| truthy(v)))
            .map(value_text);

        let rating = first_truthy(record, &["rating"])
            .map(|v| coerce_number(v).unwrap_or(0.0))
            .unwrap_or(DEFAULT_RATING);

        let reviews = first_truthy(record, &["reviews_count"])
            .map(value_text)
            .unwrap_or_else(|| "0".to_string());

        Self {
            title,
            image,
            stars: render_stars(rating),
            reviews,
            old_price,
            price,
            favorite: false,
        }
    }

    /// Title as shown on the card.
    pub fn display_title(&self) -> String {
        truncate(&self.title, TITLE_MAX_LEN)
    }

    pub fn favorite_glyph(&self) -> &'static str {
        if self.favorite {
            FAVORITE_ON
        } else {
            FAVORITE_OFF
        }
    }

    pub fn buy(&self) -> CardEvent {
        CardEvent::AddedToCart {
            title: self.title.clone(),
        }
    }

    pub fn toggle_favorite(&mut self) -> CardEvent {
        self.favorite = !self.favorite;
        CardEvent::FavoriteToggled {
            title: self.title.clone(),
            favorite: self.favorite,
        }
    }

    pub fn apply(&mut self, action: CardAction) -> CardEvent {
        match action {
            CardAction::Buy => self.buy(),
            CardAction::Favorite => self.toggle_favorite(),
        }
    }

    /// Card markup. All record-supplied text is escaped.
    pub fn to_html(&self, labels: &Labels) -> String {
        let thumb = match &self.image {
            Some(src) => format!(
                r#"<img src="{}" alt="{}">"#,
                escape_markup(src),
                escape_markup(&self.title)
            ),
            None => format!(
                r#"<div class="no-image">{}</div>"#,
                escape_markup(&labels.no_image)
            ),
        };

        format!(
            concat!(
                r#"<article class="card">"#,
                r#"<div class="thumb">{thumb}</div>"#,
                r#"<h3 class="title">{title}</h3>"#,
                r#"<div class="rating"><div class="stars">{stars}</div>"#,
                r#"<div class="reviews">{reviews} {reviews_label}</div></div>"#,
                r#"<div class="price-old">{old_price}</div>"#,
                r#"<div class="price">{price}</div>"#,
                r#"<div class="actions"><button class="btn buy-btn">{buy}</button>"#,
                r#"<button class="icon-btn fav-btn">{fav}</button></div>"#,
                r#"</article>"#
            ),
            thumb = thumb,
            title = escape_markup(&self.display_title()),
            stars = self.stars,
            reviews = escape_markup(&self.reviews),
            reviews_label = escape_markup(&labels.reviews),
            old_price = escape_markup(&self.old_price),
            price = escape_markup(&self.price),
            buy = escape_markup(&labels.buy),
            fav = self.favorite_glyph(),
        )
    }
}

fn first_truthy<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|v| truthy(v))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(record: Value) -> Card {
        Card::from_record(&record, &Labels::default())
    }

    #[test]
    fn test_full_record() {
        let c = card(json!({
            "title": "Book A",
            "price": 15000,
            "oldPrice": 20000,
            "image": "https://cdn.example/a.jpg",
            "rating": 4,
            "reviews_count": 12
        }));
        assert_eq!(c.title, "Book A");
        assert_eq!(c.price, "15 000 сум");
        assert_eq!(c.old_price, "20 000 сум");
        assert_eq!(c.image.as_deref(), Some("https://cdn.example/a.jpg"));
        assert_eq!(c.stars, "★★★★☆");
        assert_eq!(c.reviews, "12");
        assert!(!c.favorite);
    }

    #[test]
    fn test_defaults_for_empty_record() {
        let c = card(json!({}));
        assert_eq!(c.title, "Без названия");
        assert_eq!(c.price, NO_PRICE);
        assert_eq!(c.old_price, "");
        assert_eq!(c.image, None);
        assert_eq!(c.stars, "★★★★★");
        assert_eq!(c.reviews, "0");
    }

    #[test]
    fn test_title_fallback_skips_falsy() {
        assert_eq!(card(json!({"title": "", "name": "Named"})).title, "Named");
        assert_eq!(card(json!({"bookTitle": "Deep"})).title, "Deep");
    }

    #[test]
    fn test_price_fallbacks() {
        assert_eq!(card(json!({"currentPrice": 5000})).price, "5 000 сум");
        // Zero is falsy, so it falls through to the placeholder.
        assert_eq!(card(json!({"price": 0})).price, NO_PRICE);
    }

    #[test]
    fn test_image_from_images_list() {
        let c = card(json!({"images": ["first.png", "second.png"]}));
        assert_eq!(c.image.as_deref(), Some("first.png"));
        assert_eq!(card(json!({"images": []})).image, None);
    }

    #[test]
    fn test_zero_rating_uses_default() {
        assert_eq!(card(json!({"rating": 0})).stars, "★★★★★");
        assert_eq!(card(json!({"rating": "2"})).stars, "★★☆☆☆");
    }

    #[test]
    fn test_favorite_toggles_glyph() {
        let mut c = card(json!({"title": "Book A"}));
        assert_eq!(c.favorite_glyph(), "♡");
        let event = c.toggle_favorite();
        assert_eq!(
            event,
            CardEvent::FavoriteToggled {
                title: "Book A".into(),
                favorite: true
            }
        );
        assert_eq!(c.favorite_glyph(), "♥");
        c.apply(CardAction::Favorite);
        assert_eq!(c.favorite_glyph(), "♡");
    }

    #[test]
    fn test_buy_event_carries_full_title() {
        let long = "x".repeat(90);
        let c = card(json!({ "title": long.clone() }));
        assert_eq!(c.buy(), CardEvent::AddedToCart { title: long });
        assert_eq!(c.display_title().chars().count(), TITLE_MAX_LEN);
    }

    #[test]
    fn test_html_escapes_record_text() {
        let c = card(json!({
            "title": "<script>alert(1)</script>",
            "image": "x\" onerror=\"alert(1)"
        }));
        let html = c.to_html(&Labels::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("\" onerror"));
    }

    #[test]
    fn test_html_placeholder_without_image() {
        let html = card(json!({"title": "A"})).to_html(&Labels::default());
        assert!(html.contains("Нет изображения"));
        assert!(!html.contains("<img"));
    }
}
