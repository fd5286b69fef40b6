//! Player commands sent from the input layer to the simulation.
//!
//! The core never polls input. The driver translates discrete input events
//! into these commands, queues them, and processes the queue at the next
//! tick boundary — either as message broadcasts or as direct setter calls.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Broadcast `Start` to every tank.
    StartAllTanks,
    /// Broadcast `Inactive` to every tank.
    StopAllTanks,
    /// Order a single tank to evade.
    EvadeTank { id: EntityId },
    /// Set or clear a tank's selection flag.
    SelectTank { id: EntityId, selected: bool },
    /// Redirect a tank's current movement target.
    SetTankTarget { id: EntityId, target: Vec3 },
}
