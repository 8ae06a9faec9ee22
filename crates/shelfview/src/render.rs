//! Render engine: item records in, a full grid out.
//!
//! A grid is rebuilt from scratch on every fetch cycle. Cards are never
//! reused or diffed, so local card state (favorites) does not survive a
//! re-render.

use serde::Serialize;
use serde_json::Value;

use crate::card::Card;
use crate::format::escape_markup;
use crate::labels::Labels;

/// Single-message grid contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMessage {
    /// The API answered with an empty list.
    NotFound,
    /// The response held no item array at all.
    NoData,
    /// The fetch failed.
    LoadError,
}

impl GridMessage {
    pub fn text<'a>(&self, labels: &'a Labels) -> &'a str {
        match self {
            GridMessage::NotFound => labels.not_found.as_str(),
            GridMessage::NoData => labels.no_data.as_str(),
            GridMessage::LoadError => labels.load_error.as_str(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            GridMessage::LoadError => "grid-message error",
            GridMessage::NotFound | GridMessage::NoData => "grid-message",
        }
    }
}

/// Everything painted into the grid mount point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Grid {
    Cards(Vec<Card>),
    Message(GridMessage),
}

impl Grid {
    pub fn cards(&self) -> &[Card] {
        match self {
            Grid::Cards(cards) => cards,
            Grid::Message(_) => &[],
        }
    }

    /// Mutable access to the card at `index`, if the grid shows cards.
    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        match self {
            Grid::Cards(cards) => cards.get_mut(index),
            Grid::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<GridMessage> {
        match self {
            Grid::Message(m) => Some(*m),
            Grid::Cards(_) => None,
        }
    }

    /// Inner markup of the grid element.
    pub fn to_html(&self, labels: &Labels) -> String {
        match self {
            Grid::Cards(cards) => cards.iter().map(|c| c.to_html(labels)).collect(),
            Grid::Message(m) => format!(
                r#"<div class="{}">{}</div>"#,
                m.css_class(),
                escape_markup(m.text(labels))
            ),
        }
    }
}

/// One card per record, in input order; an empty list becomes the
/// "not found" placeholder.
pub fn render_items(items: &[Value], labels: &Labels) -> Grid {
    if items.is_empty() {
        return Grid::Message(GridMessage::NotFound);
    }
    Grid::Cards(
        items
            .iter()
            .map(|record| Card::from_record(record, labels))
            .collect(),
    )
}
