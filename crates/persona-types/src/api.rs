//! JSON bodies exchanged between the HTTP API and the dashboard.
//!
//! ```json
//! { "interviewer": [ { "id": 42, "name": "Nova", ... } ] }
//! { "interviewers": [ ... ] }
//! { "error": "Failed to update interviewer" }
//! ```

use serde::{Deserialize, Serialize};

/// Success body for single-resource routes. `T` is a record for GET/POST
/// and the affected rows for PATCH/DELETE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewerBody<T> {
    pub interviewer: T,
}

/// Success body for the list route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewerListBody<T> {
    pub interviewers: Vec<T>,
}

/// Failure body. The message is generic; causes are only logged server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
