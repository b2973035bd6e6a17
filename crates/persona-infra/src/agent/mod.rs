//! Voice agent platform clients.

pub mod retell;
