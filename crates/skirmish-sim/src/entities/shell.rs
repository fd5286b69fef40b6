//! Shell flight and impact.

use skirmish_core::constants::{SHELL_HIT_RADIUS, SHELL_SPEED};
use skirmish_core::messages::{Message, MessageKind};
use skirmish_core::types::{EntityId, Transform};

use crate::bus::MessageBus;
use crate::entity::{ShellData, UpdateOutcome};
use crate::registry::EntityRegistry;

/// Fly toward the launch target, expiring on timeout and detonating on the
/// first enemy tank that comes within the hit radius. A shell whose owner
/// was gone at launch carries no team and can hit nobody; it just expires.
pub fn update(
    _id: EntityId,
    transform: &mut Transform,
    data: &mut ShellData,
    registry: &EntityRegistry,
    bus: &mut MessageBus,
    dt: f32,
) -> UpdateOutcome {
    data.lifetime -= dt;

    transform.face_toward(data.target);
    transform.move_local_z(SHELL_SPEED * dt);

    // Scan before checking expiry so a hit on the final tick still lands.
    if let Some(team) = data.team {
        for sighting in registry.tank_sightings() {
            if sighting.team != team
                && transform.translation.distance(sighting.position) <= SHELL_HIT_RADIUS
            {
                bus.send(sighting.id, Message::new(MessageKind::Hit, data.owner));
                return UpdateOutcome::Destroy;
            }
        }
    }

    if data.lifetime <= 0.0 {
        return UpdateOutcome::Destroy;
    }

    UpdateOutcome::Continue
}
