//! Message bus — per-recipient FIFO queues of typed messages.
//!
//! Pure data passing: no logic lives here. Sends buffer until the
//! recipient next drains its queue, so a message sent mid-tick is observed
//! on the recipient's next update. Sends to unknown recipients are dropped
//! and reported via the return value, never fatal — a stale id targeting an
//! entity destroyed earlier in the tick is ordinary game state.

use std::collections::{HashMap, VecDeque};

use skirmish_core::messages::Message;
use skirmish_core::types::EntityId;

/// Queues of pending messages keyed by recipient.
///
/// Queues are unbounded and the bus is single-threaded-per-frame by design;
/// there is exactly one logical thread of simulation control.
#[derive(Debug, Default)]
pub struct MessageBus {
    queues: HashMap<EntityId, VecDeque<Message>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue for a newly registered entity.
    pub fn register(&mut self, id: EntityId) {
        self.queues.entry(id).or_default();
    }

    /// Drop an entity's queue along with any undelivered messages.
    pub fn unregister(&mut self, id: EntityId) {
        self.queues.remove(&id);
    }

    /// Append a message to the target's queue. Returns false if the target
    /// is unknown, in which case the message is dropped.
    pub fn send(&mut self, target: EntityId, message: Message) -> bool {
        match self.queues.get_mut(&target) {
            Some(queue) => {
                queue.push_back(message);
                true
            }
            None => false,
        }
    }

    /// Pop the oldest queued message for an entity, FIFO.
    pub fn fetch(&mut self, id: EntityId) -> Option<Message> {
        self.queues.get_mut(&id)?.pop_front()
    }

    /// Number of messages waiting for an entity.
    pub fn pending(&self, id: EntityId) -> usize {
        self.queues.get(&id).map_or(0, VecDeque::len)
    }

    /// Drop every queue (used when tearing the world down).
    pub fn clear(&mut self) {
        self.queues.clear();
    }
}
