//! Combat log: publish/subscribe bus for [`CombatEvent`]s.
//!
//! The log is owned by a session and passed by `&mut` to whatever emits
//! events. Listeners are called synchronously, in subscription order,
//! once per published event. A disabled log drops events.

use serde::{Deserialize, Serialize};

use super::event::CombatEvent;

/// Token returned by [`CombatLog::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Event listener.
pub type Listener = Box<dyn FnMut(&CombatEvent) + Send>;

/// Synchronous event bus.
pub struct CombatLog {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u32,
    enabled: bool,
    published: u64,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
            enabled: true,
            published: 0,
        }
    }
}

impl std::fmt::Debug for CombatLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatLog")
            .field("listeners", &self.listeners.len())
            .field("enabled", &self.enabled)
            .field("published", &self.published)
            .finish()
    }
}

impl CombatLog {
    /// Create an enabled log with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener. Returns `false` for unknown tokens.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn publish(&mut self, event: &CombatEvent) {
        if !self.enabled {
            return;
        }
        self.published += 1;
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Deliver several events in order.
    pub fn publish_all<'a>(&mut self, events: impl IntoIterator<Item = &'a CombatEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Events delivered since creation.
    #[must_use]
    pub fn published_count(&self) -> u64 {
        self.published
    }
}
