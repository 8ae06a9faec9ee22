//! Where catalog pages come from.
//!
//! [`HttpCatalog`] is a thin wrapper over reqwest: one GET per fetch, no
//! retries, and no timeout unless one is configured.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::types::{QueryState, ShelfError, ShelfResult};

/// A remote list endpoint answering with JSON.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and decode one page for the given state.
    async fn fetch(&self, state: &QueryState) -> ShelfResult<Value>;
}

/// Catalog API over HTTP.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base: Url,
    timeout: Option<Duration>,
}

impl HttpCatalog {
    pub fn new(base: &str, timeout_ms: Option<u64>) -> ShelfResult<Self> {
        let base = Url::parse(base)?;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("shelfview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base,
            timeout: timeout_ms.map(Duration::from_millis),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Endpoint URL with the state's query parameters appended.
    pub fn request_url(&self, state: &QueryState) -> Url {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in state.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self, state: &QueryState) -> ShelfResult<Value> {
        let url = self.request_url(state);
        tracing::debug!(%url, "fetching catalog page");

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ShelfError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        tracing::debug!(%url, bytes = body.len(), "catalog page received");
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;

    #[test]
    fn test_request_url_params_in_order() {
        let catalog = HttpCatalog::new("https://library.example/api/app/books", None).unwrap();
        let url = catalog.request_url(&QueryState::default());
        assert_eq!(
            url.as_str(),
            "https://library.example/api/app/books?size=24&page=1&order=DESC"
        );
    }

    #[test]
    fn test_request_url_encodes_search() {
        let catalog = HttpCatalog::new("https://library.example/books", None).unwrap();
        let mut state = QueryState::new(12, Order::Asc);
        state.set_query("война и мир");
        state.next_page();
        let url = catalog.request_url(&state);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("size".to_string(), "12".to_string()),
                ("page".to_string(), "2".to_string()),
                ("order".to_string(), "ASC".to_string()),
                ("q".to_string(), "война и мир".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(matches!(
            HttpCatalog::new("not a url", None),
            Err(ShelfError::Url(_))
        ));
    }
}
