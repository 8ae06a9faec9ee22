//! Shelfview — core library for paginated, searchable catalog grids.
//!
//! A fetch cycle flows through the modules in order: [`bindings`] mutate the
//! [`QueryState`], the [`controller`] asks a [`source::CatalogSource`] for a
//! page, [`detect`] finds the item array in whatever envelope came back, and
//! [`render`] turns the records into cards painted on a [`view::View`].

pub mod bindings;
pub mod card;
pub mod config;
pub mod controller;
pub mod detect;
pub mod format;
pub mod labels;
pub mod render;
pub mod source;
pub mod types;
pub mod view;

pub use bindings::{Bindings, Debouncer, UiEvent};
pub use card::{Card, CardAction, CardEvent};
pub use config::{resolve_api_base, resolve_config_path, ShelfConfig};
pub use controller::{Controller, FetchOutcome};
pub use detect::{locate_items, ItemsLocation, LocatedItems, ShapeError};
pub use format::{escape_markup, format_currency, render_stars, truncate};
pub use labels::Labels;
pub use render::{render_items, Grid, GridMessage};
pub use source::{CatalogSource, HttpCatalog};
pub use types::*;
pub use view::{MemoryView, View};
