//! Types for the remote voice agent that mirrors an interviewer.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Identifier of an agent on the voice agent platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    /// Build an agent id from an interviewer's `agent_id` column, treating
    /// an empty string the same as a missing reference.
    pub fn from_reference(reference: Option<&str>) -> Option<Self> {
        reference
            .filter(|r| !r.trim().is_empty())
            .map(|r| Self(r.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields pushed to the remote agent when an interviewer's name or voice
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUpdate {
    pub agent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}
