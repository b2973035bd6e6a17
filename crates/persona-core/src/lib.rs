//! Business logic and port definitions for interviewer persona management.
//!
//! This crate defines the "ports" (repository and collaborator traits) that
//! the infrastructure layer implements. It depends only on `persona-types` --
//! never on `persona-infra` or any database/HTTP crate.

pub mod agent;
pub mod card;
pub mod repository;
pub mod service;
