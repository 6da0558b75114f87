//! Sequenced broadcast channel for domain events.
//!
//! Every published [`AccountEvent`] is stamped with a monotonically
//! increasing sequence number before it goes out on the underlying
//! [`tokio::sync::broadcast`] channel. Because the channel drops the
//! oldest entries for lagging receivers, the sequence number is what lets
//! a consumer know exactly how much it missed: the persistence recorder
//! compares consecutive numbers to report unrecorded telemetry, and the
//! WebSocket feed tags each frame with it so clients can spot holes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;

use super::AccountEvent;

/// An [`AccountEvent`] plus its position in the event stream.
#[derive(Debug, Clone)]
pub struct SequencedEvent {
    /// Position in the stream, starting at 1. Strictly increasing with
    /// no holes on the publishing side; a jump on the receiving side
    /// means events were dropped for that receiver.
    pub seq: u64,
    /// The event itself.
    pub event: AccountEvent,
}

/// Broadcast bus for [`SequencedEvent`]s.
///
/// Cloning shares the channel and the sequence counter. With the ring
/// buffer full (capacity is set from configuration), slow receivers lose
/// the oldest events and see the loss both as a `Lagged` error and as a
/// sequence jump.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SequencedEvent>,
    next_seq: Arc<AtomicU64>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Stamps the event with the next sequence number and broadcasts it.
    ///
    /// Returns the assigned sequence number. Events published with no
    /// active receivers still consume a number, so the stream stays
    /// gapless for receivers that subscribe later.
    pub fn publish(&self, event: AccountEvent) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = self.sender.send(SequencedEvent { seq, event });
        seq
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SequencedEvent> {
        self.sender.subscribe()
    }

    /// Sequence number of the most recently published event, or 0 when
    /// nothing has been published yet.
    #[must_use]
    pub fn last_seq(&self) -> u64 {
        self.next_seq.load(Ordering::Relaxed)
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
