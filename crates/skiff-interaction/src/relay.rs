//! RelayProvider - HTTP implementation of the response provider.
//!
//! Posts each dispatched message to a remote relay function and decodes the
//! JSON envelope it answers with. The wire contract is fixed: the body
//! carries the message and session id in camelCase, a success answer is
//! `{"data":{"response":...}}`, and a failure answer is
//! `{"error":{"message":...}}`. Any non-success HTTP status is a hard
//! failure regardless of the body.
//!
//! Construct with explicit values via [`RelayProvider::new`] or from
//! environment variables via [`RelayProvider::try_from_env`].

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::provider::{ProviderError, ProviderRequest, ResponseProvider};

const ENDPOINT_ENV: &str = "SKIFF_RELAY_ENDPOINT";
const TOKEN_ENV: &str = "SKIFF_RELAY_TOKEN";
const TIMEOUT_ENV: &str = "SKIFF_RELAY_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A provider that relays messages to a remote HTTP function.
#[derive(Debug, Clone)]
pub struct RelayProvider {
    client: Client,
    endpoint: String,
    token: String,
    timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayRequestBody<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Deserialize)]
struct SuccessEnvelope {
    data: SuccessBody,
}

#[derive(Deserialize)]
struct SuccessBody {
    response: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl RelayProvider {
    /// Creates a provider for the given endpoint and bearer token.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `SKIFF_RELAY_ENDPOINT` and `SKIFF_RELAY_TOKEN` are required.
    /// `SKIFF_RELAY_TIMEOUT_SECS` optionally overrides the 30 second
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] when a required variable is
    /// missing or the timeout does not parse.
    pub fn try_from_env() -> Result<Self, ProviderError> {
        let endpoint = env::var(ENDPOINT_ENV)
            .map_err(|_| ProviderError::Config(format!("{ENDPOINT_ENV} not set")))?;
        let token = env::var(TOKEN_ENV)
            .map_err(|_| ProviderError::Config(format!("{TOKEN_ENV} not set")))?;

        let mut provider = Self::new(endpoint, token);
        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.parse().map_err(|_| {
                ProviderError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            provider = provider.with_timeout(Duration::from_secs(secs));
        }
        Ok(provider)
    }

    async fn send_request(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let body = RelayRequestBody {
            message: &request.message,
            session_id: &request.session_id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(format!("relay request failed: {err}")))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| ProviderError::Transport(format!("failed to read relay body: {err}")))?;

        if !status.is_success() {
            return Err(map_http_error(status.as_u16(), &body_text));
        }

        decode_success(&body_text)
    }
}

#[async_trait]
impl ResponseProvider for RelayProvider {
    async fn respond(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        tracing::debug!(
            "[Relay] Dispatching message for session {} to {}",
            request.session_id,
            self.endpoint
        );
        let result = self.send_request(request).await;
        if let Err(err) = &result {
            tracing::warn!("[Relay] Request failed: {}", err);
        }
        result
    }
}

/// Maps a non-success HTTP status to a provider error, preferring the
/// relay's structured message when the body carries one.
fn map_http_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    ProviderError::Status { status, message }
}

/// Decodes the body of a success-status relay answer.
///
/// A structured error body under a 2xx status counts as a rejection, not a
/// success.
fn decode_success(body: &str) -> Result<String, ProviderError> {
    if let Ok(envelope) = serde_json::from_str::<SuccessEnvelope>(body) {
        return Ok(envelope.data.response);
    }
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Err(ProviderError::Rejected(envelope.error.message));
    }
    Err(ProviderError::Malformed(format!(
        "expected a data or error envelope, got: {body}"
    )))
}
