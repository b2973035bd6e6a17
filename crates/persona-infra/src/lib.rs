//! Infrastructure layer for interviewer personas.
//!
//! Contains implementations of the ports defined in `persona-core`: SQLite
//! storage, the Retell voice agent client, and the dashboard's HTTP API
//! client and audio player. Also resolves the data directory and loads
//! `config.toml`.

pub mod agent;
pub mod config;
pub mod dashboard;
pub mod filesystem;
pub mod sqlite;
