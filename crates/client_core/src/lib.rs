//! HTTP client for the symptom-checker backend.
//!
//! Every call is a single best-effort attempt: no retries, no timeouts.
//! Callers needing bounded latency wrap these futures themselves.

use reqwest::Client;
use shared::protocol::{ChatOutcome, ChatRequest, DisclaimerResponse};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response, or the endpoint
    /// answered with a status the operation treats as failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body matched no expected shape.
    #[error("malformed response payload: {0}")]
    Decode(#[source] serde_json::Error),
}

pub struct TriageClient {
    http: Client,
    server_url: String,
}

impl TriageClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub async fn fetch_disclaimer(&self) -> Result<String, ApiError> {
        let body = self
            .http
            .get(format!("{}/api/disclaimer", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let parsed: DisclaimerResponse =
            serde_json::from_str(&body).map_err(ApiError::Decode)?;
        Ok(parsed.disclaimer)
    }

    /// Business errors can ride non-2xx statuses, so the body is decoded
    /// regardless of status; only a transport fault or an unreadable body
    /// fails this call.
    pub async fn send_chat(&self, message: &str) -> Result<ChatOutcome, ApiError> {
        let body = self
            .http
            .post(format!("{}/api/chat", self.server_url))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?
            .text()
            .await?;
        serde_json::from_str(&body).map_err(|err| {
            warn!("chat response matched no known shape: {err}");
            ApiError::Decode(err)
        })
    }

    /// Success is signaled purely by an ok transport status; the body is
    /// not inspected.
    pub async fn reset_conversation(&self) -> Result<(), ApiError> {
        self.http
            .post(format!("{}/api/reset", self.server_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
