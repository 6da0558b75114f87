//! Per-connection subscription manager.
//!
//! Tracks which event kinds a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

/// Manages the set of event-kind subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed event kinds. If `subscribe_all` is true, this set is
    /// ignored.
    event_kinds: HashSet<String>,
    /// Whether the client subscribes to all events (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event kinds to the subscription set. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, kinds: &[String], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for kind in kinds {
            self.event_kinds.insert(kind.clone());
        }
    }

    /// Removes event kinds from the subscription set.
    pub fn unsubscribe(&mut self, kinds: &[String]) {
        for kind in kinds {
            self.event_kinds.remove(kind);
        }
    }

    /// Returns `true` if the given event kind matches the subscription
    /// filter.
    #[must_use]
    pub fn matches(&self, event_kind: &str) -> bool {
        self.subscribe_all || self.event_kinds.contains(event_kind)
    }

    /// Returns the number of explicitly subscribed event kinds.
    #[must_use]
    pub fn count(&self) -> usize {
        self.event_kinds.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches("reward_applied"));
    }

    #[test]
    fn subscribe_specific_kind() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["reward_applied".to_string()], false);
        assert!(mgr.matches("reward_applied"));
        assert!(!mgr.matches("ticket_drawn"));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches("reward_applied"));
        assert!(mgr.matches("wager_settled"));
    }

    #[test]
    fn unsubscribe_removes_kind() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["ticket_drawn".to_string()], false);
        assert!(mgr.matches("ticket_drawn"));
        mgr.unsubscribe(&["ticket_drawn".to_string()]);
        assert!(!mgr.matches("ticket_drawn"));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(
            &["reward_applied".to_string(), "ticket_drawn".to_string()],
            false,
        );
        assert_eq!(mgr.count(), 2);
    }
}
