//! HTTP/REST API layer.
//!
//! Axum routes under `/api/interviewer` returning `{interviewer}`,
//! `{interviewers}` or `{error}` bodies, with permissive CORS.

pub mod error;
pub mod handlers;
pub mod router;
