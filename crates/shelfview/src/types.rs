//! Core data types for query state and errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::detect::ShapeError;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Sort direction forwarded to the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Order::Asc),
            "DESC" => Ok(Order::Desc),
            other => Err(ShelfError::InvalidInput(format!(
                "unknown order '{other}', expected ASC or DESC"
            ))),
        }
    }
}

/// Pagination, sort and search parameters driving the next fetch.
///
/// Page and size are always at least 1. The search text is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub page: u32,
    pub size: u32,
    pub order: Order,
    pub query: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            order: Order::default(),
            query: String::new(),
        }
    }
}

impl QueryState {
    pub fn new(size: u32, order: Order) -> Self {
        Self {
            size: size.max(1),
            order,
            ..Self::default()
        }
    }

    /// Advance one page. There is no upper bound; the server answers past
    /// the end with an empty list.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Go back one page. Returns `false` and leaves the state alone on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
        self.page = 1;
    }

    pub fn set_order(&mut self, order: Order) {
        self.order = order;
        self.page = 1;
    }

    /// Store the trimmed search text. The page is reset separately, when the
    /// debounced fetch fires.
    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.trim().to_string();
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Query-string parameters in request order; `q` only when non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("size", self.size.to_string()),
            ("page", self.page.to_string()),
            ("order", self.order.to_string()),
        ];
        if !self.query.is_empty() {
            pairs.push(("q", self.query.clone()));
        }
        pairs
    }
}

/// Errors from Shelfview operations.
#[derive(thiserror::Error, Debug)]
pub enum ShelfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience result type.
pub type ShelfResult<T> = Result<T, ShelfError>;
