//! Client for the hosted review summarizer (a Gradio-style prediction API).
//!
//! The endpoint receives `{"data": [text]}` and answers `{"data": ...}` where
//! the payload is either the summary string itself or a list whose first
//! element is the summary. Every failure surfaces as [`SummaryError`], whose
//! display text is safe to show to users; the concrete [`SummaryFailure`] is
//! kept as the error source for logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

/// Connection settings for the summarization endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryClientConfig {
    pub api_url: Option<String>,
    pub api_user: String,
    pub api_key: Option<String>,
    pub api_name: String,
    pub timeout: Duration,
}

impl SummaryClientConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_API_USER: &'static str = "gemini";
    pub const DEFAULT_API_NAME: &'static str = "/predict";

    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            ..Self::default()
        }
    }
}

impl Default for SummaryClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_user: Self::DEFAULT_API_USER.to_string(),
            api_key: None,
            api_name: Self::DEFAULT_API_NAME.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Outbound seam used by the summary service; one attempt per call.
#[async_trait]
pub trait SummaryGateway: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError>;
}

#[derive(Debug, thiserror::Error)]
#[error("AI要約の取得中にエラーが発生しました。")]
pub struct SummaryError {
    #[source]
    failure: SummaryFailure,
}

impl SummaryError {
    pub fn failure(&self) -> &SummaryFailure {
        &self.failure
    }
}

impl From<SummaryFailure> for SummaryError {
    fn from(failure: SummaryFailure) -> Self {
        Self { failure }
    }
}

/// Concrete cause behind a [`SummaryError`]. Not meant for end users.
#[derive(Debug, thiserror::Error)]
pub enum SummaryFailure {
    #[error("summary endpoint URL is not configured")]
    MissingEndpoint,
    #[error("summary endpoint URL '{url}' is invalid")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("summary request failed")]
    Transport(#[source] reqwest::Error),
    #[error("summary endpoint answered HTTP {0}")]
    Status(StatusCode),
    #[error("unexpected summary response: {0}")]
    Normalization(String),
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    data: PredictionData,
}

/// Shapes the endpoint is known to return for `data`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum PredictionData {
    Text(String),
    Sequence(Vec<Value>),
    Other(Value),
}

impl PredictionData {
    pub(crate) fn into_summary(self) -> Result<String, SummaryFailure> {
        match self {
            PredictionData::Text(summary) => Ok(summary),
            PredictionData::Sequence(items) => match items.into_iter().next() {
                Some(Value::String(summary)) => Ok(summary),
                Some(other) => Err(SummaryFailure::Normalization(format!(
                    "first element is not a string: {other}"
                ))),
                None => Err(SummaryFailure::Normalization("empty data list".to_string())),
            },
            PredictionData::Other(other) => Err(SummaryFailure::Normalization(format!(
                "data is neither a string nor a list: {other}"
            ))),
        }
    }
}

/// HTTP implementation of [`SummaryGateway`].
#[derive(Debug, Clone)]
pub struct GradioSummaryClient {
    http: Client,
    endpoint: Option<Url>,
    credentials: Option<(String, String)>,
}

impl GradioSummaryClient {
    /// A missing URL yields a client that refuses every call without touching
    /// the network; a malformed URL is rejected here.
    pub fn new(config: &SummaryClientConfig) -> Result<Self, SummaryError> {
        let endpoint = config
            .api_url
            .as_deref()
            .map(|base| prediction_url(base, &config.api_name))
            .transpose()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SummaryFailure::Transport)?;

        let credentials = config
            .api_key
            .clone()
            .map(|key| (config.api_user.clone(), key));

        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }
}

fn prediction_url(base: &str, api_name: &str) -> Result<Url, SummaryFailure> {
    let raw = format!(
        "{}/api/{}",
        base.trim().trim_end_matches('/'),
        api_name.trim().trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|source| SummaryFailure::InvalidEndpoint {
        url: base.to_string(),
        source,
    })
}

#[async_trait]
impl SummaryGateway for GradioSummaryClient {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or(SummaryFailure::MissingEndpoint)?;

        debug!(%endpoint, chars = text.chars().count(), "requesting review summary");

        let mut request = self.http.post(endpoint.clone()).json(&json!({ "data": [text] }));
        if let Some((user, key)) = &self.credentials {
            request = request.basic_auth(user, Some(key));
        }

        let response = request.send().await.map_err(SummaryFailure::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummaryFailure::Status(status).into());
        }

        let body = response.bytes().await.map_err(SummaryFailure::Transport)?;
        let parsed: PredictionResponse = serde_json::from_slice(&body)
            .map_err(|err| SummaryFailure::Normalization(err.to_string()))?;

        Ok(parsed.data.into_summary()?)
    }
}
