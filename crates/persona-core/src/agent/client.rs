//! AgentClient trait definition.

use persona_types::agent::{AgentId, AgentUpdate};
use persona_types::error::AgentError;

/// Client for the hosted voice agent platform.
///
/// Implementations live in persona-infra (e.g., `RetellAgentClient`).
pub trait AgentClient: Send + Sync {
    /// Human-readable platform name (e.g., "retell").
    fn name(&self) -> &str;

    /// Push a new name/voice to the remote agent.
    fn update_agent(
        &self,
        agent_id: &AgentId,
        update: &AgentUpdate,
    ) -> impl std::future::Future<Output = Result<(), AgentError>> + Send;

    /// Remove the remote agent.
    fn delete_agent(
        &self,
        agent_id: &AgentId,
    ) -> impl std::future::Future<Output = Result<(), AgentError>> + Send;
}
