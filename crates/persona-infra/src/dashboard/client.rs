//! HttpInterviewerApi -- [`InterviewerApi`] over a running `persona serve`.

use std::time::Duration;

use persona_core::card::api::InterviewerApi;
use persona_types::api::{ErrorBody, InterviewerBody, InterviewerListBody};
use persona_types::error::DashboardError;
use persona_types::interviewer::{Interviewer, InterviewerId, InterviewerPatch, NewInterviewer};
use serde::de::DeserializeOwned;

/// Dashboard-side client of the `/api/interviewer` routes.
#[derive(Clone)]
pub struct HttpInterviewerApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInterviewerApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DashboardError> {
        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Prefer the server's `{"error": ...}` message over the raw body.
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(DashboardError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::Decode(e.to_string()))
    }
}

impl InterviewerApi for HttpInterviewerApi {
    async fn list(&self) -> Result<Vec<Interviewer>, DashboardError> {
        let body: InterviewerListBody<Interviewer> =
            self.send(self.client.get(self.url("/interviewer"))).await?;
        Ok(body.interviewers)
    }

    async fn get(&self, id: InterviewerId) -> Result<Interviewer, DashboardError> {
        let body: InterviewerBody<Interviewer> = self
            .send(self.client.get(self.url(&format!("/interviewer/{id}"))))
            .await?;
        Ok(body.interviewer)
    }

    async fn create(&self, new: &NewInterviewer) -> Result<Interviewer, DashboardError> {
        let body: InterviewerBody<Interviewer> = self
            .send(self.client.post(self.url("/interviewer")).json(new))
            .await?;
        Ok(body.interviewer)
    }

    async fn update(
        &self,
        id: InterviewerId,
        patch: &InterviewerPatch,
    ) -> Result<Vec<Interviewer>, DashboardError> {
        let body: InterviewerBody<Vec<Interviewer>> = self
            .send(
                self.client
                    .patch(self.url(&format!("/interviewer/{id}")))
                    .json(patch),
            )
            .await?;
        Ok(body.interviewer)
    }

    async fn delete(&self, id: InterviewerId) -> Result<Vec<Interviewer>, DashboardError> {
        let body: InterviewerBody<Vec<Interviewer>> = self
            .send(self.client.delete(self.url(&format!("/interviewer/{id}"))))
            .await?;
        Ok(body.interviewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::Utc;

    type Patches = Arc<Mutex<Vec<(i64, serde_json::Value)>>>;

    fn lisa(id: i64) -> Interviewer {
        Interviewer {
            id: InterviewerId(id),
            created_at: Utc::now(),
            name: "Lisa".to_string(),
            empathy: 7,
            rapport: 7,
            exploration: 5,
            speed: 5,
            image: "/interviewers/Lisa.png".to_string(),
            description: None,
            audio: Some("/audio/Lisa.wav".to_string()),
            agent_id: Some("agent_lisa".to_string()),
        }
    }

    async fn fake_list() -> Json<InterviewerListBody<Interviewer>> {
        Json(InterviewerListBody {
            interviewers: vec![lisa(1), lisa(2)],
        })
    }

    async fn fake_get(Path(id): Path<i64>) -> axum::response::Response {
        if id == 404 {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("Interviewer not found")),
            )
                .into_response();
        }
        Json(InterviewerBody { interviewer: lisa(id) }).into_response()
    }

    async fn fake_patch(
        State(patches): State<Patches>,
        Path(id): Path<i64>,
        Json(body): Json<serde_json::Value>,
    ) -> Json<InterviewerBody<Vec<Interviewer>>> {
        patches.lock().unwrap().push((id, body));
        Json(InterviewerBody {
            interviewer: vec![lisa(id)],
        })
    }

    async fn fake_delete() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "not json")
    }

    async fn spawn_fake_server() -> (HttpInterviewerApi, Patches) {
        let patches: Patches = Arc::default();
        let app = Router::new()
            .route("/api/interviewer", get(fake_list))
            .route(
                "/api/interviewer/{id}",
                get(fake_get).patch(fake_patch).delete(fake_delete),
            )
            .with_state(patches.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = HttpInterviewerApi::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
        (api, patches)
    }

    #[tokio::test]
    async fn test_list_unwraps_interviewers() {
        let (api, _) = spawn_fake_server().await;
        let all = api.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, InterviewerId(2));
    }

    #[tokio::test]
    async fn test_get_not_found_surfaces_error_message() {
        let (api, _) = spawn_fake_server().await;
        let err = api.get(InterviewerId(404)).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Status { status: 404, ref message } if message == "Interviewer not found"
        ));
    }

    #[tokio::test]
    async fn test_update_sends_only_present_fields() {
        let (api, patches) = spawn_fake_server().await;
        let patch = InterviewerPatch {
            empathy: Some(9),
            ..Default::default()
        };

        let rows = api.update(InterviewerId(5), &patch).await.unwrap();
        assert_eq!(rows.len(), 1);

        let seen = patches.lock().unwrap().clone();
        assert_eq!(seen, vec![(5, serde_json::json!({"empathy": 9}))]);
    }

    #[tokio::test]
    async fn test_non_json_error_body_kept_verbatim() {
        let (api, _) = spawn_fake_server().await;
        let err = api.delete(InterviewerId(1)).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Status { status: 500, ref message } if message == "not json"
        ));
    }
}
