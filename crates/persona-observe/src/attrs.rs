//! Span names and operation values shared across crates.
//!
//! Spans carry `request_id`, `operation`, `interviewer_id` and, for remote
//! calls, `agent_id` and `agent_platform` fields.

/// Span wrapping one `/api/interviewer` request.
pub const SPAN_INTERVIEWER_REQUEST: &str = "interviewer.request";

/// Span wrapping the remote agent call that follows a local mutation.
pub const SPAN_AGENT_SYNC: &str = "agent.sync";

pub const OP_LIST: &str = "list";
pub const OP_CREATE: &str = "create";
pub const OP_GET: &str = "get";
pub const OP_UPDATE: &str = "update";
pub const OP_DELETE: &str = "delete";
