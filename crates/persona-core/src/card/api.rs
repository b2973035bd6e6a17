//! Ports the card needs from its surroundings: the HTTP API and an audio
//! output for voice previews.

use persona_types::error::DashboardError;
use persona_types::interviewer::{Interviewer, InterviewerId, InterviewerPatch, NewInterviewer};

/// Client side of the interviewer HTTP API.
///
/// Implementations live in persona-infra (e.g., `HttpInterviewerApi`).
pub trait InterviewerApi: Send + Sync {
    /// GET /api/interviewer
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Interviewer>, DashboardError>> + Send;

    /// GET /api/interviewer/{id}
    fn get(
        &self,
        id: InterviewerId,
    ) -> impl std::future::Future<Output = Result<Interviewer, DashboardError>> + Send;

    /// POST /api/interviewer
    fn create(
        &self,
        new: &NewInterviewer,
    ) -> impl std::future::Future<Output = Result<Interviewer, DashboardError>> + Send;

    /// PATCH /api/interviewer/{id}
    fn update(
        &self,
        id: InterviewerId,
        patch: &InterviewerPatch,
    ) -> impl std::future::Future<Output = Result<Vec<Interviewer>, DashboardError>> + Send;

    /// DELETE /api/interviewer/{id}
    fn delete(
        &self,
        id: InterviewerId,
    ) -> impl std::future::Future<Output = Result<Vec<Interviewer>, DashboardError>> + Send;
}

/// Plays a voice reference such as `/audio/Lisa.wav`.
pub trait AudioPlayer: Send + Sync {
    fn play(
        &self,
        source: &str,
    ) -> impl std::future::Future<Output = Result<(), DashboardError>> + Send;
}
