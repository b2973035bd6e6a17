//! Observability for the persona workspace: subscriber setup and the span
//! names shared by the HTTP layer and the agent sync.

pub mod attrs;
pub mod tracing_setup;
