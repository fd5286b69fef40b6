//! Ammo box drop and pickup.

use skirmish_core::constants::AMMO_GROUND_HEIGHT;
use skirmish_core::messages::MessageKind;
use skirmish_core::types::{EntityId, Transform};

use crate::bus::MessageBus;
use crate::entity::{AmmoBoxData, UpdateOutcome};

/// Fall until resting just above the ground, then wait to be collected.
pub fn update(
    id: EntityId,
    transform: &mut Transform,
    data: &mut AmmoBoxData,
    bus: &mut MessageBus,
    dt: f32,
) -> UpdateOutcome {
    while let Some(msg) = bus.fetch(id) {
        if msg.kind == MessageKind::CollectedAmmo {
            return UpdateOutcome::Destroy;
        }
    }

    if transform.translation.y > AMMO_GROUND_HEIGHT {
        transform.move_local_y(-data.fall_speed * dt);
    }

    UpdateOutcome::Continue
}
