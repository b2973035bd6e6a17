//! Interviewer CRUD handlers.
//!
//! PATCH and DELETE mirror successful local changes onto the remote voice
//! agent afterwards. The remote outcome is logged and never changes the
//! response.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::Instrument;

use persona_core::agent::client::AgentClient;
use persona_core::agent::sync::SyncOutcome;
use persona_observe::attrs::{
    OP_CREATE, OP_DELETE, OP_GET, OP_LIST, OP_UPDATE, SPAN_AGENT_SYNC, SPAN_INTERVIEWER_REQUEST,
};
use persona_types::api::{InterviewerBody, InterviewerListBody};
use persona_types::interviewer::{Interviewer, InterviewerId, InterviewerPatch, NewInterviewer};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Identifies the caller in logs; does not filter.
    pub client_id: Option<String>,
}

fn request_span(operation: &'static str, id: Option<InterviewerId>) -> tracing::Span {
    let span = tracing::info_span!(
        SPAN_INTERVIEWER_REQUEST,
        request_id = %uuid::Uuid::now_v7(),
        operation,
        interviewer_id = tracing::field::Empty,
    );
    if let Some(id) = id {
        span.record("interviewer_id", id.0);
    }
    span
}

fn parse_id(raw: &str) -> Result<InterviewerId, AppError> {
    raw.parse()
        .map_err(|e| AppError::Malformed(format!("invalid interviewer id '{raw}': {e}")))
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Malformed(rejection.body_text()))
}

/// GET /api/interviewer - All interviewers. Store failures yield an empty list.
pub async fn list_interviewers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<InterviewerListBody<Interviewer>> {
    let interviewers = state
        .interviewer_service
        .list_interviewers(query.client_id.as_deref())
        .instrument(request_span(OP_LIST, None))
        .await
        .unwrap_or_default();

    Json(InterviewerListBody { interviewers })
}

/// POST /api/interviewer - Create unless the name/agent pair exists.
pub async fn create_interviewer(
    State(state): State<AppState>,
    payload: Result<Json<NewInterviewer>, JsonRejection>,
) -> Result<Json<InterviewerBody<Interviewer>>, AppError> {
    let new = parse_body(payload)?;

    let interviewer = state
        .interviewer_service
        .create_interviewer(new)
        .instrument(request_span(OP_CREATE, None))
        .await
        .map_err(AppError::Create)?;

    Ok(Json(InterviewerBody { interviewer }))
}

/// GET /api/interviewer/{id}
pub async fn get_interviewer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<InterviewerBody<Interviewer>>, AppError> {
    let id = parse_id(&raw_id)?;

    let interviewer = state
        .interviewer_service
        .get_interviewer(id)
        .instrument(request_span(OP_GET, Some(id)))
        .await
        .map_err(AppError::Get)?;

    Ok(Json(InterviewerBody { interviewer }))
}

/// PATCH /api/interviewer/{id} - Partial update, then agent name/voice sync.
pub async fn update_interviewer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<InterviewerPatch>, JsonRejection>,
) -> Result<Json<InterviewerBody<Vec<Interviewer>>>, AppError> {
    let id = parse_id(&raw_id)?;
    let patch = parse_body(payload)?;
    let span = request_span(OP_UPDATE, Some(id));

    async move {
        // Snapshot for comparison only; a missing record does not stop the update.
        let current = state.interviewer_service.get_interviewer(id).await.ok();

        let updated = state
            .interviewer_service
            .update_interviewer(id, &patch)
            .await
            .map_err(AppError::Update)?;

        let agent_platform = state.agent_sync.client().name();
        let outcome = state
            .agent_sync
            .after_update(current.as_ref(), &patch)
            .instrument(tracing::info_span!(SPAN_AGENT_SYNC, agent_platform))
            .await;
        tracing::debug!(?outcome, "agent sync finished");

        if outcome == SyncOutcome::MissingRecord {
            return Err(AppError::Internal(format!(
                "interviewer {id} had no record to compare its name/voice change against"
            )));
        }

        Ok::<_, AppError>(Json(InterviewerBody {
            interviewer: updated,
        }))
    }
    .instrument(span)
    .await
}

/// DELETE /api/interviewer/{id} - Delete, then remove the remote agent.
pub async fn delete_interviewer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<InterviewerBody<Vec<Interviewer>>>, AppError> {
    let id = parse_id(&raw_id)?;
    let span = request_span(OP_DELETE, Some(id));

    async move {
        let current = state.interviewer_service.get_interviewer(id).await.ok();

        let deleted = state
            .interviewer_service
            .delete_interviewer(id)
            .await
            .map_err(AppError::Delete)?;

        let agent_platform = state.agent_sync.client().name();
        let outcome = state
            .agent_sync
            .after_delete(current.as_ref())
            .instrument(tracing::info_span!(SPAN_AGENT_SYNC, agent_platform))
            .await;
        tracing::debug!(?outcome, "agent sync finished");

        Ok::<_, AppError>(Json(InterviewerBody {
            interviewer: deleted,
        }))
    }
    .instrument(span)
    .await
}
