use crate::modules::holders::domain::records::RawRecord;
use crate::modules::holders::traits::{RecordSource, SourcePage, SourceRequest};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(200);

/// Connection settings for the holders backend.
#[derive(Debug, Clone)]
pub struct HoldersApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl HoldersApiConfig {
    /// Read the backend endpoint from the environment. `.env` files are
    /// honored when present.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("TOKENSCOPE_API_URL")
            .map_err(|_| AppError::ValidationError("TOKENSCOPE_API_URL is not set".to_string()))?;
        let api_key = std::env::var("TOKENSCOPE_API_KEY").ok();
        Ok(Self { base_url, api_key })
    }
}

/// Spaces consecutive page fetches at least [`MIN_REQUEST_INTERVAL`]
/// apart. Callers holding the slot lock queue up behind each other, so
/// the spacing holds across tasks too.
struct Throttle {
    next_slot: Mutex<Instant>,
    interval: Duration,
}

impl Throttle {
    fn new(interval: Duration) -> Self {
        Self {
            next_slot: Mutex::new(Instant::now()),
            interval,
        }
    }

    async fn wait(&self) {
        let mut next_slot = self.next_slot.lock().await;
        if Instant::now() < *next_slot {
            sleep_until(*next_slot).await;
        }
        *next_slot = Instant::now() + self.interval;
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceResponse {
    #[serde(default)]
    records: Vec<RawRecord>,
    next_cursor: Option<String>,
}

/// [`RecordSource`] backed by the holders HTTP API.
pub struct HttpRecordSource {
    client: reqwest::Client,
    config: HoldersApiConfig,
    throttle: Throttle,
}

impl HttpRecordSource {
    pub fn new(config: HoldersApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("tokenscope/1.0")
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            throttle: Throttle::new(MIN_REQUEST_INTERVAL),
        })
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, request: &SourceRequest) -> AppResult<SourcePage> {
        self.throttle.wait().await;

        let url = format!("{}/holders", self.config.base_url.trim_end_matches('/'));
        debug!(%url, cursor = ?request.cursor, "fetching holders page");

        let mut http_request = self.client.post(&url).json(request);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.header("Authorization", api_key);
        }

        let response = http_request.send().await?;
        let response = response.error_for_status().map_err(|e| {
            error!("Holders API returned error status: {}", e);
            AppError::from(e)
        })?;

        let payload = response.text().await?;
        let body: SourceResponse = serde_json::from_str(&payload)?;
        Ok(SourcePage {
            records: body.records,
            next_cursor: body.next_cursor,
        })
    }
}
