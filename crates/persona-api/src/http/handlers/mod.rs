//! Route handlers.

pub mod interviewer;
