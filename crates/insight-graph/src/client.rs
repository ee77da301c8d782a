//! Gremlin Server connection management and shared graph client.

use std::time::Duration;

use async_trait::async_trait;
use insight_core::config::GremlinSettings;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;

use crate::queries::{self, GremlinQuery};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Gremlin connection error: {0}")]
    Connection(String),

    #[error("Gremlin transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gremlin server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Failed to decode graph element: {0}")]
    Decode(String),
}

/// Configuration for connecting to a Gremlin Server.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    /// `Accept` header value. Typed GraphSON (`@class` keys, `[class, value]`
    /// wrappers) cannot be decoded.
    pub mime_type: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GremlinSettings::default().into()
    }
}

impl From<GremlinSettings> for GraphConfig {
    fn from(s: GremlinSettings) -> Self {
        Self {
            uri: s.uri,
            user: s.user,
            password: s.password,
            timeout_secs: s.timeout_secs,
            mime_type: s.mime_type,
        }
    }
}

/// Anything that can run a Gremlin script and hand back its result set.
#[async_trait]
pub trait GremlinExecutor: Send + Sync {
    /// Submit a query and collect every element of the result set.
    async fn submit(&self, query: &GremlinQuery) -> Result<Vec<Value>, GraphError>;
}

/// Gremlin Server client over the HTTP endpoint.
///
/// Built once and shared; clone is cheap (the inner `reqwest::Client` is an
/// `Arc`). The client only reads from the graph.
#[derive(Clone)]
pub struct GremlinClient {
    http: reqwest::Client,
    endpoint: String,
    mime_type: String,
    user: Option<String>,
    password: Option<String>,
}

impl GremlinClient {
    /// Build a client without contacting the server.
    pub fn new(config: &GraphConfig) -> Result<Self, GraphError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.uri.trim_end_matches('/').to_string(),
            mime_type: config.mime_type.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    /// Build a client and check that the server answers a trivial script.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let client = Self::new(config)?;
        if let Err(e) = client.submit(&queries::probe()).await {
            tracing::error!(uri = %config.uri, error = %e, "Gremlin Server probe failed");
            return Err(GraphError::Connection(e.to_string()));
        }

        tracing::info!(uri = %config.uri, "Connected to Gremlin Server");
        Ok(client)
    }

    /// The HTTP endpoint queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The `Accept` header sent with every query.
    pub fn accept(&self) -> &str {
        &self.mime_type
    }
}

#[async_trait]
impl GremlinExecutor for GremlinClient {
    async fn submit(&self, query: &GremlinQuery) -> Result<Vec<Value>, GraphError> {
        tracing::debug!(gremlin = %query.script(), "Submitting Gremlin query");

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, self.mime_type.as_str())
            .json(query);
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Server {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let body: GremlinResponse = response.json().await?;
        Ok(body.into_data())
    }
}

#[derive(Debug, Deserialize)]
struct GremlinResponse {
    result: GremlinResult,
}

#[derive(Debug, Deserialize)]
struct GremlinResult {
    #[serde(default)]
    data: Value,
}

impl GremlinResponse {
    fn into_data(self) -> Vec<Value> {
        match self.result.data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }
}

/// Pull the error text out of a Gremlin Server error body.
fn server_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
