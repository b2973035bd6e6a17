//! Shared domain types for interviewer persona management.
//!
//! This crate contains the types used across the workspace: the Interviewer
//! record and its patch/creation payloads, the remote voice agent types, the
//! avatar/voice catalogs, HTTP wire envelopes, configuration, and errors.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod agent;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod interviewer;
