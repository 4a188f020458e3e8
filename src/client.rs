use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::models::user::Session;

/// Errors raised while talking to the hosted service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Classify a non-success response by its status code
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Pull a human-readable message out of an auth or PostgREST error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

/// Handle to the hosted auth/data service.
///
/// Built once per process and shared by cloning; the underlying
/// `reqwest::Client` pools connections internally.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    http_client: Client,
    base_url: String,
    anon_key: String,
}

impl ServiceClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Like [`ServiceClient::new`] but logs and swallows construction failures
    pub fn from_config(config: &ServiceConfig) -> Option<Self> {
        match Self::new(config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build service client");
                None
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request against a PostgREST table on behalf of `session`
    pub fn table(&self, method: Method, table: &str, session: &Session) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.http_client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
    }

    /// Request against the auth API using the caller's access token
    pub fn auth(&self, method: Method, path: &str, access_token: &str) -> RequestBuilder {
        let url = format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'));
        self.http_client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }
}

/// Build the process-wide client from the environment.
///
/// Returns `None` when configuration is missing or invalid; this never
/// touches the network.
pub fn create_client() -> Option<ServiceClient> {
    let config = ServiceConfig::from_env()?;
    ServiceClient::from_config(&config)
}

/// Send a request and decode a JSON body from a success response
pub async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_status(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Send a request whose success body is irrelevant
pub async fn send_empty(request: RequestBuilder) -> Result<(), ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_status(status, &body));
    }
    Ok(())
}
