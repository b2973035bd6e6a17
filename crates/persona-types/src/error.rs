use thiserror::Error;

/// Errors from interviewer service operations.
#[derive(Debug, Error)]
pub enum InterviewerError {
    #[error("interviewer not found")]
    NotFound,

    #[error("an interviewer named '{name}' already exists for agent {agent_id:?}")]
    Duplicate {
        name: String,
        agent_id: Option<String>,
    },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in persona-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the remote voice agent platform.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent request failed: {0}")]
    Http(String),

    #[error("agent '{0}' not found")]
    NotFound(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("agent API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Errors seen by the dashboard when calling the HTTP API.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("audio playback failed: {0}")]
    Playback(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_error_display() {
        let err = InterviewerError::Duplicate {
            name: "Lisa".to_string(),
            agent_id: Some("agent_1".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("Lisa"));
        assert!(msg.contains("agent_1"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("no such column: colour".to_string());
        assert_eq!(err.to_string(), "query error: no such column: colour");
    }

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "agent API returned 502: bad gateway");
    }
}
