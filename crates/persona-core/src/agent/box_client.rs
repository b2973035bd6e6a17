//! BoxAgentClient -- object-safe dynamic dispatch wrapper for AgentClient.
//!
//! 1. Define an object-safe `AgentClientDyn` trait with boxed futures
//! 2. Blanket-impl `AgentClientDyn` for all `T: AgentClient`
//! 3. `BoxAgentClient` wraps `Box<dyn AgentClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use persona_types::agent::{AgentId, AgentUpdate};
use persona_types::error::AgentError;

use super::client::AgentClient;

/// Object-safe version of [`AgentClient`] with boxed futures.
pub trait AgentClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn update_agent_boxed<'a>(
        &'a self,
        agent_id: &'a AgentId,
        update: &'a AgentUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + 'a>>;

    fn delete_agent_boxed<'a>(
        &'a self,
        agent_id: &'a AgentId,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + 'a>>;
}

impl<T: AgentClient> AgentClientDyn for T {
    fn name(&self) -> &str {
        AgentClient::name(self)
    }

    fn update_agent_boxed<'a>(
        &'a self,
        agent_id: &'a AgentId,
        update: &'a AgentUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + 'a>> {
        Box::pin(self.update_agent(agent_id, update))
    }

    fn delete_agent_boxed<'a>(
        &'a self,
        agent_id: &'a AgentId,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + 'a>> {
        Box::pin(self.delete_agent(agent_id))
    }
}

/// Type-erased agent client, so application state can hold the production
/// client or a test double behind one concrete type.
pub struct BoxAgentClient {
    inner: Box<dyn AgentClientDyn>,
}

impl BoxAgentClient {
    pub fn new<T: AgentClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }
}

impl AgentClient for BoxAgentClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn update_agent(&self, agent_id: &AgentId, update: &AgentUpdate) -> Result<(), AgentError> {
        self.inner.update_agent_boxed(agent_id, update).await
    }

    async fn delete_agent(&self, agent_id: &AgentId) -> Result<(), AgentError> {
        self.inner.delete_agent_boxed(agent_id).await
    }
}
