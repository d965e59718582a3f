//! Cache-mediated HTTP fetching
//!
//! Every outbound request goes through [`CachedFetcher`], which consults the
//! [`CacheStore`] first and only touches the network on a miss. The network
//! side sits behind the [`HttpFetch`] trait so the mediator can be driven
//! without a live server.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::CacheStore;

/// Errors that can occur when fetching a response
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single GET against a remote server
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Performs `GET url?query` and returns the response body as text
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError>;
}

/// [`HttpFetch`] backed by a `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let body = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

/// Fetch mediator that serves responses from a [`CacheStore`] when it can
///
/// Owns the store for the lifetime of the program. Each miss is fetched once,
/// inserted and flushed before the body is handed back, so a later call with
/// the same key never touches the network, in this run or the next.
pub struct CachedFetcher {
    store: CacheStore,
    http: Box<dyn HttpFetch>,
}

impl CachedFetcher {
    pub fn new(store: CacheStore, http: impl HttpFetch + 'static) -> Self {
        Self {
            store,
            http: Box::new(http),
        }
    }

    /// Returns the body at `url`, from cache if present
    ///
    /// # Behavior
    /// - On a hit, returns the stored body verbatim without any network call
    /// - On a miss, performs one GET, stores the raw body under `url`,
    ///   flushes the store and returns the body
    /// - A failed flush is logged; the fetched body is still returned
    pub async fn fetch_with_cache(&mut self, url: &str) -> Result<String, FetchError> {
        if let Some(cached) = self.store.get(url) {
            info!(key = url, "Using cache");
            return Ok(match cached {
                Value::String(body) => body.clone(),
                other => other.to_string(),
            });
        }

        info!(url, "Fetching");
        let body = self.http.get(url, &[]).await?;
        self.remember(url, Value::String(body.clone()));
        Ok(body)
    }

    /// Returns the decoded JSON response for a parameterized request
    ///
    /// `key` identifies the request in the cache; build it with
    /// [`build_key`](crate::cache::build_key) over the parameters that matter.
    /// Decoded responses are stored as JSON values and flushed like page bodies.
    pub async fn fetch_json_with_cache(
        &mut self,
        key: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        if let Some(cached) = self.store.get(key) {
            info!(key, "Using cache");
            // Entries written as raw text are decoded on the way out
            return match cached {
                Value::String(text) => Ok(serde_json::from_str(text)?),
                other => Ok(other.clone()),
            };
        }

        info!(url, "Fetching");
        let body = self.http.get(url, query).await?;
        let value: Value = serde_json::from_str(&body)?;
        self.remember(key, value.clone());
        Ok(value)
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    fn remember(&mut self, key: &str, value: Value) {
        if let Err(e) = self.store.insert(key, value) {
            warn!(path = %self.store.path().display(), error = %e, "failed to save cache");
        }
    }
}
