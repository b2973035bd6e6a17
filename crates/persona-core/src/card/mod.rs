//! Headless interviewer card.
//!
//! The dashboard card (summary tile, details view, edit form, avatar gallery
//! and delete confirmation) as a UI-independent state machine. Any frontend
//! renders from its accessors and forwards user actions to its methods; the
//! terminal dashboard in persona-api is one such frontend.

pub mod api;
pub mod draft;
pub mod refresh;
pub mod state;

pub use api::{AudioPlayer, InterviewerApi};
pub use draft::{Dimension, EditDraft};
pub use refresh::{RefreshBus, RefreshEvent};
pub use state::InterviewerCard;
