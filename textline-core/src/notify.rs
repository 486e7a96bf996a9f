//! Change-Notification Bridge
//!
//! Typed fan-out of provider change events. The store publishes a topic on
//! every write; consumers subscribe explicitly and drop their receiver to
//! unsubscribe. There is no debouncing: a burst of writes (a multi-part MMS
//! arriving as several inserts) produces one notification per write, and
//! subscribers reload on each.

use tokio::sync::broadcast;
use tracing::debug;

/// What changed in the backing providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTopic {
    /// A message table row was inserted or updated
    Messages,
    /// The contacts store changed
    Contacts,
}

/// Broadcast bridge between provider writes and view-state reloads.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeTopic>,
}

impl ChangeNotifier {
    /// Channel depth before slow subscribers start lagging. Lagged
    /// subscribers miss intermediate notifications, which is fine: every
    /// notification triggers the same full reload.
    const CAPACITY: usize = 64;

    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(Self::CAPACITY);
        Self { tx }
    }

    /// Subscribe to change topics. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeTopic> {
        self.tx.subscribe()
    }

    /// Publish a change. A send with no live subscribers is a no-op.
    pub fn publish(&self, topic: ChangeTopic) {
        let delivered = self.tx.send(topic).unwrap_or(0);
        debug!("Change published: {:?} to {} subscribers", topic, delivered);
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
