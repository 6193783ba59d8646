//! HTTP client implementing the inventory service contract.

use crate::{
    COPIES_PATH, EDITOR_PICKS_PATH, PURCHASE_PATH, RESET_PATH, STOCK_ENTRIES_PATH,
    STORE_ENTRIES_PATH,
};
use async_trait::async_trait;
use catalog_core::{CatalogEntry, EntryId, PurchaseRequest, ReplenishRequest};
use inventory_service::{DomainError, InventoryService, ServiceError, ServiceResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::time::Duration;

/// Request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for an inventory service reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8081`).
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the remote service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and turn non-success statuses into service errors.
    async fn send(&self, request: RequestBuilder) -> ServiceResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let domain = response.json::<DomainError>().await.map_err(|e| {
                ServiceError::Transport(format!("Failed to decode domain error: {e}"))
            })?;
            return Err(ServiceError::Domain(domain));
        }

        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Transport(format!(
            "Server returned status {status}: {body}"
        )))
    }

    async fn send_unit(&self, request: RequestBuilder) -> ServiceResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ServiceResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Transport(format!("Failed to decode response: {e}")))
    }
}

#[async_trait]
impl InventoryService for HttpInventoryClient {
    async fn reset_catalog(&self) -> ServiceResult<()> {
        self.send_unit(self.client.post(self.url(RESET_PATH))).await
    }

    async fn add_entries(&self, entries: Vec<CatalogEntry>) -> ServiceResult<()> {
        let request = self.client.post(self.url(STOCK_ENTRIES_PATH)).json(&entries);
        self.send_unit(request).await
    }

    async fn add_copies(&self, requests: Vec<ReplenishRequest>) -> ServiceResult<()> {
        let request = self.client.post(self.url(COPIES_PATH)).json(&requests);
        self.send_unit(request).await
    }

    async fn purchase(&self, requests: Vec<PurchaseRequest>) -> ServiceResult<()> {
        let request = self.client.post(self.url(PURCHASE_PATH)).json(&requests);
        self.send_unit(request).await
    }

    async fn fetch_all(&self) -> ServiceResult<Vec<CatalogEntry>> {
        self.send_json(self.client.get(self.url(STOCK_ENTRIES_PATH)))
            .await
    }

    async fn fetch_by_ids(&self, ids: &BTreeSet<EntryId>) -> ServiceResult<Vec<CatalogEntry>> {
        let request = self.client.post(self.url(STORE_ENTRIES_PATH)).json(ids);
        self.send_json(request).await
    }

    async fn fetch_editor_picks(&self, count: usize) -> ServiceResult<Vec<CatalogEntry>> {
        let request = self
            .client
            .get(self.url(EDITOR_PICKS_PATH))
            .query(&[("count", count)]);
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpInventoryClient::new("http://localhost:8081/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081");
        assert_eq!(
            client.url(PURCHASE_PATH),
            "http://localhost:8081/store/purchase"
        );
    }
}
