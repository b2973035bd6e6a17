//! Broadcast bus asking interviewer lists to refetch.
//!
//! Cards publish after a successful save or delete; whoever owns the list
//! subscribes and reloads. Publishing with no subscribers is a no-op.

use persona_types::interviewer::InterviewerId;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    Updated(InterviewerId),
    Deleted(InterviewerId),
}

/// Multi-consumer list-refresh bus. Cloning the bus clones the sender.
pub struct RefreshBus {
    sender: broadcast::Sender<RefreshEvent>,
}

impl RefreshBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: RefreshEvent) {
        let _ = self.sender.send(event);
    }
}

impl Clone for RefreshBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for RefreshBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
