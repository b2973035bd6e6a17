//! Interviewer repository trait definition.

use persona_types::error::RepositoryError;
use persona_types::interviewer::{Interviewer, InterviewerId, InterviewerPatch, NewInterviewer};

/// Repository trait for interviewer persistence.
///
/// Implementations live in persona-infra (e.g., SqliteInterviewerRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
///
/// Single-row lookups distinguish "no rows" (`Ok(None)`) from failures
/// (`Err`). Bulk mutations return the affected rows; zero rows is not an
/// error.
pub trait InterviewerRepository: Send + Sync {
    /// List every interviewer, oldest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Interviewer>, RepositoryError>> + Send;

    /// Get an interviewer by id.
    fn get_by_id(
        &self,
        id: InterviewerId,
    ) -> impl std::future::Future<Output = Result<Option<Interviewer>, RepositoryError>> + Send;

    /// Find an interviewer with exactly this `name` and `agent_id` pair.
    /// A `None` agent id matches rows without an agent.
    fn find_by_name_and_agent(
        &self,
        name: &str,
        agent_id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Option<Interviewer>, RepositoryError>> + Send;

    /// Insert a new interviewer. Returns the stored row.
    fn insert(
        &self,
        new: &NewInterviewer,
    ) -> impl std::future::Future<Output = Result<Interviewer, RepositoryError>> + Send;

    /// Apply a partial patch to the row with this id. Returns updated rows.
    fn update(
        &self,
        id: InterviewerId,
        patch: &InterviewerPatch,
    ) -> impl std::future::Future<Output = Result<Vec<Interviewer>, RepositoryError>> + Send;

    /// Delete the row with this id. Returns deleted rows.
    fn delete(
        &self,
        id: InterviewerId,
    ) -> impl std::future::Future<Output = Result<Vec<Interviewer>, RepositoryError>> + Send;
}
