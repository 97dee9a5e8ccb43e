use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{AssistReply, AssistRequest};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LLM server error: {0}")]
    Status(u16),
    #[error("LLM reply could not be parsed: {0}")]
    Malformed(String),
    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

/// Remote assistant used when a local command does not apply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn assist(&self, request: AssistRequest) -> Result<AssistReply>;
}

/// JSON-over-HTTP client: POSTs an [`AssistRequest`] and expects an [`AssistReply`].
#[derive(Clone)]
pub struct HttpLlmClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpLlmClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.into(),
            timeout,
        }
    }

    /// Client-side timeouts are reported as [`LlmError::Timeout`], not as transport errors.
    fn transport(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(e)
        }
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn assist(&self, request: AssistRequest) -> Result<AssistReply> {
        debug!(session = %request.session_id, url = %self.url, "Posting assist request");
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        if !response.status().is_success() {
            return Err(LlmError::Status(response.status().as_u16()).into());
        }

        let body = response.text().await.map_err(|e| self.transport(e))?;
        let reply: AssistReply =
            serde_json::from_str(&body).map_err(|e| LlmError::Malformed(e.to_string()))?;
        Ok(reply)
    }
}
