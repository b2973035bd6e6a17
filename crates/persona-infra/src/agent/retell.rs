//! RetellAgentClient -- [`AgentClient`] implementation for the Retell REST API.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and only exposed when
//! building the `Authorization` header.

use std::time::Duration;

use persona_core::agent::client::AgentClient;
use persona_types::agent::{AgentId, AgentUpdate};
use persona_types::error::AgentError;
use secrecy::{ExposeSecret, SecretString};

pub struct RetellAgentClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl RetellAgentClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.retellai.com";

    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        agent_id: &AgentId,
    ) -> Result<(), AgentError> {
        let response = request
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| AgentError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 => AgentError::AuthenticationFailed,
            404 => AgentError::NotFound(agent_id.to_string()),
            429 => AgentError::RateLimited,
            code => AgentError::Api {
                status: code,
                message: body,
            },
        })
    }
}

impl AgentClient for RetellAgentClient {
    fn name(&self) -> &str {
        "retell"
    }

    async fn update_agent(&self, agent_id: &AgentId, update: &AgentUpdate) -> Result<(), AgentError> {
        let url = self.url(&format!("/update-agent/{agent_id}"));
        tracing::debug!(agent_id = %agent_id, "updating remote agent");
        self.send(self.client.patch(&url).json(update), agent_id).await
    }

    async fn delete_agent(&self, agent_id: &AgentId) -> Result<(), AgentError> {
        let url = self.url(&format!("/delete-agent/{agent_id}"));
        tracing::debug!(agent_id = %agent_id, "deleting remote agent");
        self.send(self.client.delete(&url), agent_id).await
    }
}
