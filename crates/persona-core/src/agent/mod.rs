//! Voice agent collaborator: the client port, its type-erased wrapper, and
//! the best-effort synchronisation of local edits onto remote agents.

pub mod box_client;
pub mod client;
pub mod sync;
