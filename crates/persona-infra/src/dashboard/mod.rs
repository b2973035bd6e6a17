//! Adapters for the dashboard card: the HTTP API client and voice previews.

pub mod audio;
pub mod client;
