//! Mock-data sources. A source never fails towards its caller: any problem is logged and reported as "no records".

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::kind::EntityKind;

pub const USER_AGENT: &str = "SEQUEL";
pub const DEFAULT_BASE_URL: &str = "https://my.api.mockaroo.com/";

/// Supplier of raw source records for an entity type.
#[async_trait]
pub trait MockDataSource: Debug + Send + Sync {
    /// Return the raw records for `kind`, or an empty list when none could be obtained.
    async fn fetch(&self, kind: EntityKind) -> Vec<Value>;
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("HTTP Connection Error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("MockAPI returned status code: {0}")]
    Status(StatusCode),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Response body is a JSON {0}, not an array")]
    NotAnArray(&'static str),
}

impl FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status(status) => status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS,
            FetchError::Body(_) | FetchError::NotAnArray(_) => false,
        }
    }
}

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries:     u32,
    pub initial_backoff: Duration,
    pub max_backoff:     Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries:     2,
            initial_backoff: Duration::from_millis(500),
            max_backoff:     Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based): the initial backoff doubled for each earlier retry, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.initial_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub base_url: String,
    pub api_key:  String,
    pub timeout:  Duration,
    pub retry:    RetryPolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key:  String::new(),
            timeout:  Duration::from_secs(30),
            retry:    RetryPolicy::default(),
        }
    }
}

/// HTTP client for the mock-data service.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client:   Client,
    base_url: String,
    api_key:  String,
    retry:    RetryPolicy,
    cancel:   CancellationToken,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, reqwest::Error> {
        debug!("Creating mock-data client with {}s timeout", config.timeout.as_secs());
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let mut base_url = config.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            retry: config.retry,
            cancel: CancellationToken::new(),
        })
    }

    /// Abandon pending retries once `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Resource URL without the API key.
    pub fn url_for(&self, kind: EntityKind) -> String {
        format!("{}{}.json", self.base_url, kind.resource())
    }

    async fn request(&self, kind: EntityKind) -> Result<Vec<Value>, FetchError> {
        let response = self
            .client
            .get(self.url_for(kind))
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        match response.json::<Value>().await.map_err(FetchError::Body)? {
            Value::Array(records) => Ok(records),
            Value::Object(_) => Err(FetchError::NotAnArray("object")),
            Value::String(_) => Err(FetchError::NotAnArray("string")),
            Value::Number(_) => Err(FetchError::NotAnArray("number")),
            Value::Bool(_) => Err(FetchError::NotAnArray("boolean")),
            Value::Null => Err(FetchError::NotAnArray("null")),
        }
    }
}

#[async_trait]
impl MockDataSource for Fetcher {
    async fn fetch(&self, kind: EntityKind) -> Vec<Value> {
        let resource = kind.resource();
        let mut attempt = 0;

        loop {
            match self.request(kind).await {
                Ok(records) => {
                    debug!("Fetched {} {resource} records", records.len());
                    return records;
                }
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "{resource}: {err}; retry {attempt}/{} in {:.1}s",
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::select! {
                        _ = self.cancel.cancelled() => {
                            info!("{resource}: retry abandoned on shutdown");
                            return Vec::new();
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => {
                    warn!("{resource}: {err}");
                    return Vec::new();
                }
            }
        }
    }
}

/// Offline source: records come from `<resource>.json` files in a directory, or from memory.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    dir:     Option<PathBuf>,
    records: HashMap<EntityKind, Vec<Value>>,
}

impl FixtureSource {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:     Some(dir.into()),
            records: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, kind: EntityKind, records: Vec<Value>) -> Self {
        self.records.insert(kind, records);
        self
    }

    async fn read_file(&self, dir: &PathBuf, kind: EntityKind) -> Vec<Value> {
        let path = dir.join(format!("{}.json", kind.resource()));
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) => {
                warn!("Fixture {} unavailable: {err}", path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(records) => records,
            Err(err) => {
                warn!("Fixture {} is not a JSON array: {err}", path.display());
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl MockDataSource for FixtureSource {
    async fn fetch(&self, kind: EntityKind) -> Vec<Value> {
        if let Some(records) = self.records.get(&kind) {
            return records.clone();
        }

        match &self.dir {
            Some(dir) => self.read_file(dir, kind).await,
            None => {
                info!("No fixture records for {}", kind.resource());
                Vec::new()
            }
        }
    }
}
