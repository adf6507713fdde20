//! HTTP client for the journal store
//!
//! Reads journal entries from the MentalMind backend (`GET /logs`). The
//! analytics side never writes to the store.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::ingest::JournalSource;
use crate::types::RawJournalEntry;

/// HTTP client for the journal store API
pub struct JournalClient {
    config: ApiConfig,
    http_client: reqwest::Client,
    base_url: String,
}

impl JournalClient {
    /// Create a new journal client from configuration
    ///
    /// Returns an error if the base URL is not an http(s) URL.
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every journal entry the store holds.
    pub async fn fetch_entries(&self) -> Result<Vec<RawJournalEntry>> {
        let url = format!("{}/logs", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Connection(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();

        if status.is_success() {
            let entries: Vec<RawJournalEntry> = response.json().await.map_err(|e| Error::Api {
                status: status.as_u16(),
                message: format!("failed to parse response: {}", e),
            })?;
            tracing::debug!(count = entries.len(), "Fetched journal entries");
            Ok(entries)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            let message = if error_text.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                error_text
            };
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetch entries with retry logic
    ///
    /// Retries transient failures (connection errors, 5xx) with exponential backoff.
    pub async fn fetch_entries_with_retry(&self) -> Result<Vec<RawJournalEntry>> {
        let mut last_error = None;
        let mut delay = Duration::from_millis(500);

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "Retrying fetch_entries (attempt {}/{}), waiting {:?}",
                    attempt + 1,
                    self.config.max_retries + 1,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, Duration::from_secs(30));
            }

            match self.fetch_entries().await {
                Ok(entries) => return Ok(entries),
                Err(e) if e.is_retryable() => {
                    tracing::warn!("Transient error fetching journal entries: {}", e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Connection("max retries exceeded".to_string())))
    }

    /// Check if the journal store is reachable and healthy
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        match self.http_client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

/// Synchronous wrapper for [`JournalClient`]
///
/// Provides blocking methods for use in synchronous code.
pub struct SyncJournalClient {
    inner: JournalClient,
    runtime: tokio::runtime::Runtime,
}

impl SyncJournalClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to create runtime: {}", e)))?;

        Ok(Self {
            inner: JournalClient::new(config)?,
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// Check if the journal store is reachable (blocking)
    pub fn health_check(&self) -> Result<bool> {
        self.runtime.block_on(self.inner.health_check())
    }
}

impl JournalSource for SyncJournalClient {
    fn fetch_entries(&self) -> Result<Vec<RawJournalEntry>> {
        self.runtime.block_on(self.inner.fetch_entries_with_retry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: String, max_retries: usize) -> JournalClient {
        JournalClient::new(ApiConfig {
            base_url,
            timeout_secs: 5,
            max_retries,
        })
        .unwrap()
    }

    #[test]
    fn test_client_rejects_bad_url() {
        let config = ApiConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(JournalClient::new(config).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        let client = JournalClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_fetch_entries() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"text": "slept well", "mood": "calm", "timestamp": "2025-03-10T07:00:00"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let entries = client(mock_server.uri(), 0)
            .fetch_entries_with_retry()
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, "calm");
        assert_eq!(entries[0].text, "slept well");
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri(), 3)
            .fetch_entries_with_retry()
            .await
            .unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.starts_with("HTTP 404"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let entries = client(mock_server.uri(), 1)
            .fetch_entries_with_retry()
            .await
            .unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_exhausts_retries() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .expect(2)
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri(), 1)
            .fetch_entries_with_retry()
            .await
            .unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_api_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oops": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri(), 0).fetch_entries().await.unwrap_err();

        assert!(matches!(err, Error::Api { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert!(client(mock_server.uri(), 0).health_check().await.unwrap());
    }

    #[test]
    fn test_connection_failure() {
        // Bind then drop to get a port nothing listens on
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let sync = SyncJournalClient::new(ApiConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 5,
            max_retries: 0,
        })
        .unwrap();
        let err = sync.fetch_entries().unwrap_err();

        assert!(matches!(err, Error::Connection(_)));
        assert!(!sync.health_check().unwrap());
    }
}
