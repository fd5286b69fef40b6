//! Tank behavior state machine.
//!
//! All pending messages are drained before any state logic runs; state
//! transitions happen only through messages, so a self-sent message (the
//! Aim → Evade handoff, for instance) deliberately takes effect on the
//! next tick. Death is not a state: once hit points are gone (or a death
//! order arrives) the teardown branch overrides everything until the wreck
//! is removed.

use std::sync::Arc;

use glam::{Quat, Vec3};
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::*;
use skirmish_core::enums::TankState;
use skirmish_core::messages::{Message, MessageKind};
use skirmish_core::templates::{EntityTemplate, TankStats};
use skirmish_core::types::{yaw_between, EntityId, Transform};
use skirmish_tank_ai::perception;
use skirmish_tank_ai::steering::{self, ground_distance, random_point_in_square, SteerInput};

use crate::bus::MessageBus;
use crate::entity::{TankData, UpdateOutcome};
use crate::registry::EntityRegistry;

#[allow(clippy::too_many_arguments)]
pub fn update(
    id: EntityId,
    template: &Arc<EntityTemplate>,
    transform: &mut Transform,
    data: &mut TankData,
    registry: &mut EntityRegistry,
    bus: &mut MessageBus,
    rng: &mut ChaCha8Rng,
    dt: f32,
) -> UpdateOutcome {
    let stats = match template.tank_stats() {
        Some(stats) => *stats,
        None => return UpdateOutcome::Continue,
    };

    follow_chase_cam(transform, data);

    while let Some(msg) = bus.fetch(id) {
        match msg.kind {
            MessageKind::Start | MessageKind::Patrol => data.state = TankState::Patrol,
            MessageKind::Stop | MessageKind::Inactive => data.state = TankState::Inactive,
            MessageKind::Aim => data.state = TankState::Aim,
            MessageKind::Evade => data.state = TankState::Evade,
            MessageKind::Hit => hit(id, &stats, data, registry, bus),
            MessageKind::FindAmmo => {
                data.moving = false;
                data.state = TankState::FindAmmo;
            }
            MessageKind::Help => data.state = TankState::Help,
            MessageKind::Death => data.dying = true,
            MessageKind::CollectedAmmo => {}
        }
    }

    if data.dying || data.hp <= 0 {
        return death(transform, data, registry, dt);
    }

    match data.state {
        TankState::Inactive => data.moving = false,
        TankState::Patrol => patrol(id, &stats, transform, data, registry, bus, rng, dt),
        TankState::Aim => aim(id, transform, data, registry, bus, dt),
        TankState::Evade => evade(id, &stats, transform, data, registry, bus, rng, dt),
        TankState::FindAmmo => find_ammo(id, &stats, transform, data, registry, bus, rng, dt),
        TankState::Help => help(id, transform, data, registry, bus, dt),
    }

    if data.moving {
        transform.move_local_z(data.speed * dt);
    }

    UpdateOutcome::Continue
}

/// Keep the chase camera behind and above the hull, looking at it.
fn follow_chase_cam(transform: &Transform, data: &mut TankData) {
    data.chase_cam.position = transform.translation - transform.forward() * CHASE_CAM_DISTANCE
        + transform.up() * CHASE_CAM_HEIGHT;
    data.chase_cam.look_at = transform.translation;
}

#[allow(clippy::too_many_arguments)]
fn patrol(
    id: EntityId,
    stats: &TankStats,
    transform: &mut Transform,
    data: &mut TankData,
    registry: &mut EntityRegistry,
    bus: &mut MessageBus,
    rng: &mut ChaCha8Rng,
    dt: f32,
) {
    if !data.moving {
        data.target = data.waypoint_b;
        data.moving = true;
        return;
    }

    data.turret.rotate_local_y(stats.turret_turn_speed * dt);

    // Probe point cast along the turret's world facing; any enemy hull
    // near it counts as spotted.
    let turret_forward = (transform.rotation * data.turret.rotation) * Vec3::Z;
    let probe_end =
        transform.translation + turret_forward.normalize_or_zero() * TURRET_PROBE_LENGTH;
    let sightings = registry.tank_sightings();
    if let Some(enemy) = perception::spot_enemy(probe_end, data.team, &sightings) {
        data.enemy_target = enemy.position;
        bus.send(id, Message::new(MessageKind::Aim, id));
    }

    steer_toward(stats, transform, data.target, dt);

    let throttle = steering::throttle(
        data.speed,
        ground_distance(transform.translation, data.target),
        stats.max_speed,
        stats.acceleration,
        dt,
    );
    data.speed = throttle.speed;
    if throttle.arrived {
        swap_waypoint(data, registry, rng);
    }
}

fn aim(
    id: EntityId,
    transform: &mut Transform,
    data: &mut TankData,
    registry: &mut EntityRegistry,
    bus: &mut MessageBus,
    dt: f32,
) {
    data.speed = 0.0;
    face_turret_at(transform, data, data.enemy_target);

    if data.ammo == 0 {
        bus.send(id, Message::system(MessageKind::FindAmmo));
        return;
    }

    if data.aim_timer >= 0.0 {
        data.aim_timer -= dt;
        return;
    }

    if !data.fired {
        let muzzle = Vec3::new(
            transform.translation.x,
            SHELL_MUZZLE_HEIGHT,
            transform.translation.z,
        );
        if registry
            .create_shell(
                bus,
                SHELL_TEMPLATE_TYPE,
                data.enemy_target,
                id,
                Some(data.team),
                "",
                muzzle,
            )
            .is_ok()
        {
            data.shots_fired += 1;
            data.ammo -= 1;
            data.aim_timer = AIM_DELAY_SECS;
            data.fired = true;
            bus.send(id, Message::system(MessageKind::Evade));
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn evade(
    id: EntityId,
    stats: &TankStats,
    transform: &mut Transform,
    data: &mut TankData,
    registry: &mut EntityRegistry,
    bus: &mut MessageBus,
    rng: &mut ChaCha8Rng,
    dt: f32,
) {
    data.fired = false;

    if !data.evade_started {
        data.target = random_point_in_square(rng, EVADE_AREA_HALF, transform.translation.y);
        data.evade_started = true;
        // A tank can be ordered to evade from a standstill; engage the
        // drivetrain rather than relying on a leftover patrol flag.
        data.moving = true;
    }

    if data.moving {
        transform.face_toward(data.target);
        face_turret_at(transform, data, data.target);
    }

    if data.ammo == 0 {
        bus.send(id, Message::system(MessageKind::FindAmmo));
    }

    steer_toward(stats, transform, data.target, dt);

    let distance = ground_distance(transform.translation, data.target);
    let throttle = steering::throttle(data.speed, distance, stats.max_speed, stats.acceleration, dt);
    data.speed = throttle.speed;

    if distance <= ARRIVE_RADIUS {
        data.moving = false;
        data.evade_started = false;
        data.state = TankState::Patrol;
        if throttle.arrived {
            swap_waypoint(data, registry, rng);
        }
    }
}

/// `Hit` message handler — damage application, not a state.
fn hit(
    id: EntityId,
    stats: &TankStats,
    data: &mut TankData,
    registry: &EntityRegistry,
    bus: &mut MessageBus,
) {
    data.hp -= stats.shell_damage;

    // Call every teammate (including this tank) to help.
    let help = Message::system(MessageKind::Help);
    for sighting in registry.tank_sightings() {
        if sighting.team == data.team {
            bus.send(sighting.id, help);
        }
    }
    bus.send(id, help);
}

#[allow(clippy::too_many_arguments)]
fn find_ammo(
    id: EntityId,
    stats: &TankStats,
    transform: &mut Transform,
    data: &mut TankData,
    registry: &mut EntityRegistry,
    bus: &mut MessageBus,
    rng: &mut ChaCha8Rng,
    dt: f32,
) {
    let boxes = registry.ammo_boxes();
    let positions: Vec<Vec3> = boxes.iter().map(|(_, pos)| *pos).collect();
    let nearest = perception::nearest_within(transform.translation, AMMO_SEARCH_RADIUS, &positions);

    if !data.moving {
        // No box in range: wander somewhere and hope one drops nearby.
        data.ammo_target = match nearest {
            Some(idx) => positions[idx],
            None => random_point_in_square(rng, PATROL_AREA_HALF, transform.translation.y),
        };
        data.moving = true;
        return;
    }

    data.turret.rotate_local_y(stats.turret_turn_speed * dt);
    steer_toward(stats, transform, data.ammo_target, dt);

    let throttle = steering::throttle(
        data.speed,
        ground_distance(transform.translation, data.ammo_target),
        stats.max_speed,
        stats.acceleration,
        dt,
    );
    data.speed = throttle.speed;

    if throttle.arrived {
        if let Some(idx) = nearest {
            let (box_id, _) = boxes[idx];
            data.ammo = AMMO_CAPACITY;
            bus.send(box_id, Message::new(MessageKind::CollectedAmmo, id));
        }
        bus.send(id, Message::system(MessageKind::Patrol));
    }
}

fn help(
    id: EntityId,
    transform: &mut Transform,
    data: &mut TankData,
    registry: &EntityRegistry,
    bus: &mut MessageBus,
    dt: f32,
) {
    data.speed = 0.0;

    if data.help_timer < 0.0 {
        data.help_timer = HELP_DURATION_SECS;
        bus.send(id, Message::system(MessageKind::Patrol));
        return;
    }
    data.help_timer -= dt;

    let sightings = registry.tank_sightings();
    let positions: Vec<Vec3> = sightings.iter().map(|s| s.position).collect();
    if let Some(idx) = perception::nearest_within(transform.translation, HELP_SCAN_RADIUS, &positions)
    {
        data.enemy_target = sightings[idx].position;
        data.help_timer = HELP_DURATION_SECS;
        bus.send(id, Message::system(MessageKind::Aim));
    }
}

/// Death teardown: spin the wreck for the fixed duration, then credit the
/// opposing team and ask to be removed.
fn death(
    transform: &mut Transform,
    data: &mut TankData,
    registry: &mut EntityRegistry,
    dt: f32,
) -> UpdateOutcome {
    data.dying = true;

    if data.death_timer < 0.0 {
        let opposing = (data.team + 1) % TEAM_COUNT as u32;
        registry.award_point(opposing);
        return UpdateOutcome::Destroy;
    }

    data.death_timer -= dt;
    data.turret.move_local_y(DEATH_TURRET_LIFT_RATE * dt);
    data.turret.rotate_local_x(DEATH_TURRET_SPIN_RATE * dt);
    data.turret.rotate_local_y(DEATH_TURRET_SPIN_RATE * dt);
    transform.rotate_local_y(DEATH_HULL_SPIN_RATE * dt);
    UpdateOutcome::Continue
}

/// Shared turn-rate-limited hull steering.
fn steer_toward(stats: &TankStats, transform: &mut Transform, target: Vec3, dt: f32) {
    let turn = steering::heading_correction(&SteerInput {
        position: transform.translation,
        forward: transform.forward(),
        right: transform.right(),
        target,
        turn_speed: stats.turn_speed,
        dt,
    });
    transform.rotate_y(turn);
}

/// Point the turret's world facing at a point by adjusting its local yaw.
fn face_turret_at(transform: &Transform, data: &mut TankData, point: Vec3) {
    let world_yaw = yaw_between(transform.translation, point);
    data.turret.rotation = Quat::from_rotation_y(world_yaw - transform.yaw());
}

/// Replace the waypoint the tank just left and head for the other one.
fn swap_waypoint(data: &mut TankData, registry: &mut EntityRegistry, rng: &mut ChaCha8Rng) {
    let fresh = registry
        .next_patrol_point(data.team)
        .unwrap_or_else(|| random_point_in_square(rng, PATROL_AREA_HALF, data.target.y));
    if data.target == data.waypoint_a {
        data.waypoint_b = fresh;
        data.target = data.waypoint_b;
    } else {
        data.waypoint_a = fresh;
        data.target = data.waypoint_a;
    }
}
