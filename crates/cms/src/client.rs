//! HTTP client for the CMS query API.
//!
//! Queries are sent as `GET {base}/v{version}/data/query/{dataset}` with the
//! GROQ text in `query` and each parameter as a JSON-encoded `$name` query
//! argument. Responses arrive in a `{ "result": ... }` envelope.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::CmsConfig;

/// HTTP request timeout for a single query.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Named GROQ parameters (`$slug`, `$locale`, ...), keyed without the `$`.
pub type QueryParams = BTreeMap<String, Value>;

/// Errors from the CMS client layer.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CMS returned a non-2xx status code.
    #[error("CMS API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the expected envelope.
    #[error("Unexpected CMS response: {0}")]
    Decode(String),
}

/// A read-only source of CMS documents.
///
/// Page handlers depend on this trait rather than on [`CmsClient`] so they
/// can be exercised against canned content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a GROQ query and return its `result`.
    async fn query(&self, groq: &str, params: &QueryParams) -> Result<Value, CmsError>;
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(default)]
    result: Value,
}

/// [`ContentSource`] backed by the CMS HTTP API.
pub struct CmsClient {
    client: reqwest::Client,
    query_url: String,
    token: Option<String>,
}

impl CmsClient {
    /// Build a client from configuration.
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &CmsConfig) -> Self {
        Self {
            client,
            query_url: config.query_url(),
            token: config.token.clone(),
        }
    }

    /// Encode parameters as `$name=<json>` query arguments.
    fn encode_params(groq: &str, params: &QueryParams) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(params.len() + 1);
        pairs.push(("query".to_string(), groq.to_string()));
        for (name, value) in params {
            pairs.push((format!("${name}"), value.to_string()));
        }
        pairs
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn query(&self, groq: &str, params: &QueryParams) -> Result<Value, CmsError> {
        let mut request = self
            .client
            .get(&self.query_url)
            .query(&Self::encode_params(groq, params));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "CMS query rejected");
            return Err(CmsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let envelope: QueryEnvelope =
            serde_json::from_str(&text).map_err(|e| CmsError::Decode(e.to_string()))?;
        Ok(envelope.result)
    }
}
