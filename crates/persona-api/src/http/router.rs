//! Axum router configuration with middleware.
//!
//! Interviewer routes live under `/api`; `/health` sits at the root.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/interviewer",
            get(handlers::interviewer::list_interviewers)
                .post(handlers::interviewer::create_interviewer),
        )
        .route(
            "/interviewer/{id}",
            get(handlers::interviewer::get_interviewer)
                .patch(handlers::interviewer::update_interviewer)
                .delete(handlers::interviewer::delete_interviewer),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
