//! Inter-entity messages.
//!
//! Messages are plain copyable values queued per recipient by the message
//! bus. Delivery is FIFO per recipient; a message sent during a tick is
//! observed the next time the recipient drains its queue (its next update).

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// The closed set of message types entities exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Activate: begin patrolling.
    Start,
    /// Deactivate.
    Stop,
    /// Deactivate (alias used by the driver's broadcast).
    Inactive,
    /// Enter the patrol state.
    Patrol,
    /// Enter the aim state.
    Aim,
    /// Enter the evade state.
    Evade,
    /// Take shell damage.
    Hit,
    /// Enter the find-ammo state.
    FindAmmo,
    /// Enter the help state.
    Help,
    /// Begin the death teardown regardless of hit points.
    Death,
    /// Tells an ammo box it has been picked up.
    CollectedAmmo,
}

/// A queued message: type tag plus sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub from: EntityId,
}

impl Message {
    pub fn new(kind: MessageKind, from: EntityId) -> Self {
        Self { kind, from }
    }

    /// A message originating from the driver rather than an entity.
    pub fn system(kind: MessageKind) -> Self {
        Self {
            kind,
            from: EntityId::SYSTEM,
        }
    }
}
