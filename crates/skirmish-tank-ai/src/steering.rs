//! Turn-rate-limited steering and throttle control.
//!
//! The shared driving logic for the patrol, evade, and find-ammo states:
//! yaw toward a target point no faster than the template's turn rate, and
//! accelerate/brake against a fixed arrival radius.

use glam::Vec3;
use rand::Rng;

use skirmish_core::constants::ARRIVE_RADIUS;

/// Everything the steering function needs about the steering tank.
#[derive(Debug, Clone, Copy)]
pub struct SteerInput {
    pub position: Vec3,
    /// Hull forward axis (unit length).
    pub forward: Vec3,
    /// Hull right axis (unit length).
    pub right: Vec3,
    /// World point to head toward.
    pub target: Vec3,
    /// Maximum turn rate (radians/sec).
    pub turn_speed: f32,
    pub dt: f32,
}

/// Signed yaw correction for this tick.
///
/// The angle to close comes from the clamped forward·direction dot product;
/// the sign from the right-axis dot product (positive = turn right). The
/// magnitude never exceeds `turn_speed * dt`.
pub fn heading_correction(input: &SteerInput) -> f32 {
    // Steering can only yaw, so the error is measured in the ground plane;
    // a target above or below the hull (an ammo box still falling, say)
    // must not bend the heading.
    let offset = input.target - input.position;
    let Some(to_target) = Vec3::new(offset.x, 0.0, offset.z).try_normalize() else {
        return 0.0;
    };

    let side = input.right.dot(to_target);
    let angle = input.forward.dot(to_target).clamp(-1.0, 1.0).acos();
    let turn = angle.min(input.turn_speed * input.dt);

    if side > 0.0 {
        turn
    } else {
        -turn
    }
}

/// Result of one throttle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    /// New speed, clamped to `[0, max_speed]`.
    pub speed: f32,
    /// True once the tank is inside the arrival radius and braking has
    /// brought the speed down to zero.
    pub arrived: bool,
}

/// Accelerate while beyond the arrival radius, brake inside it.
pub fn throttle(current: f32, distance: f32, max_speed: f32, acceleration: f32, dt: f32) -> Throttle {
    if distance > ARRIVE_RADIUS {
        Throttle {
            speed: (current + acceleration * dt).min(max_speed),
            arrived: false,
        }
    } else {
        let braked = current - acceleration * dt;
        Throttle {
            speed: braked.max(0.0),
            arrived: braked < 0.0,
        }
    }
}

/// Distance in the ground plane — the distance driving can actually close.
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let d = b - a;
    (d.x * d.x + d.z * d.z).sqrt()
}

/// A random point in the square of the given half-extent around the origin,
/// at the supplied height. Used for evade targets and waypoint fallbacks.
pub fn random_point_in_square<R: Rng + ?Sized>(rng: &mut R, half_extent: f32, y: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_extent..half_extent),
        y,
        rng.gen_range(-half_extent..half_extent),
    )
}
