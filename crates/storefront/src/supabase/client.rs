//! Low-level PostgREST client.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SupabaseConfig;

use super::cache::CacheValue;

/// Errors that can occur when talking to the hosted store.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The store's response could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No row matched the query.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the hosted store's REST interface.
///
/// Carries the service-role key on every request. Cheaply cloneable; all
/// state lives behind an `Arc`.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    rest_url: String,
    cache: Cache<String, CacheValue>,
}

impl SupabaseClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the service-role key cannot be carried as an
    /// HTTP header or the HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let mut headers = HeaderMap::new();

        let key = config.service_role_key.expose_secret();
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|e| SupabaseError::Parse(format!("Invalid service-role key: {e}")))?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| SupabaseError::Parse(format!("Invalid service-role key: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert("Authorization", bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                rest_url: format!("{}/rest/v1", config.url),
                cache,
            }),
        })
    }

    /// Catalog response cache (5-minute TTL).
    pub(super) fn cache(&self) -> &Cache<String, CacheValue> {
        &self.inner.cache
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{table}", self.inner.rest_url)
        } else {
            format!("{}/{table}?{query}", self.inner.rest_url)
        }
    }

    /// Fetch rows matching a PostgREST query string.
    pub(super) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self
            .inner
            .client
            .get(self.table_url(table, query))
            .send()
            .await?;

        parse_rows(response).await
    }

    /// Fetch one row matching a PostgREST query string.
    ///
    /// Returns `NotFound` if no row matches.
    pub(super) async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<T, SupabaseError> {
        self.select(table, query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("{table}?{query}")))
    }

    /// Fetch rows plus the exact total count (ignoring limit/offset).
    ///
    /// Uses `Prefer: count=exact` and parses the `Content-Range` header.
    pub(super) async fn select_counted<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<(Vec<T>, u64), SupabaseError> {
        let response = self
            .inner
            .client
            .get(self.table_url(table, query))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let total = response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let rows: Vec<T> = parse_rows(response).await?;

        #[allow(clippy::cast_possible_truncation)]
        let total = total.unwrap_or(rows.len() as u64);
        Ok((rows, total))
    }

    /// Insert a row and return the stored representation (with its
    /// store-assigned id).
    pub(super) async fn insert_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, SupabaseError> {
        let response = self
            .inner
            .client
            .post(self.table_url(table, ""))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let rows: Vec<T> = parse_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::Parse(format!("insert into {table} returned no rows")))
    }

    /// Delete rows matching a PostgREST filter.
    pub(super) async fn delete_rows(&self, table: &str, filter: &str) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .delete(self.table_url(table, filter))
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    /// Patch rows matching a PostgREST filter.
    pub(super) async fn patch<B: Serialize>(
        &self,
        table: &str,
        filter: &str,
        body: &B,
    ) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .patch(self.table_url(table, filter))
            .json(body)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    /// Readiness ping: verifies the REST endpoint answers with our key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the key.
    pub async fn ping(&self) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/", self.inner.rest_url))
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }
}

/// Check the response status, returning the body text on success.
async fn check_status(response: reqwest::Response) -> Result<String, SupabaseError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() || status == StatusCode::NO_CONTENT {
        return Ok(text);
    }

    tracing::error!(
        status = %status,
        body = %text.chars().take(500).collect::<String>(),
        "Hosted store returned non-success status"
    );
    Err(SupabaseError::Api {
        status: status.as_u16(),
        message: text.chars().take(200).collect(),
    })
}

/// Parse a response body as a JSON array of rows.
async fn parse_rows<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Vec<T>, SupabaseError> {
    let text = check_status(response).await?;

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse hosted store response"
        );
        SupabaseError::Parse(e.to_string())
    })
}

/// Extract the total row count from a `Content-Range` header value
/// (`"0-9/42"` or `"*/0"`).
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-9/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-0/1"), Some(1));
    }

    #[test]
    fn test_parse_content_range_total_rejects_garbage() {
        assert_eq!(parse_content_range_total("0-9"), None);
        assert_eq!(parse_content_range_total("0-9/*"), None);
        assert_eq!(parse_content_range_total(""), None);
    }
}
