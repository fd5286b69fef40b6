//! Fundamental geometric and simulation types.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Unique identifier for a simulated entity.
///
/// Assigned monotonically by the registry and never reused, so a stale id
/// held across ticks can only ever resolve to the entity it was issued for
/// (or to nothing at all).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Sender id used for messages that originate from the driver rather
    /// than from another entity.
    pub const SYSTEM: EntityId = EntityId(0);
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Local transform: translation, rotation, and scale.
///
/// Composite entities (tanks) keep part transforms relative to their root;
/// the world transform of a part is root ∘ part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Build a transform from a position, XYZ euler rotation (radians), and scale.
    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
            scale,
        }
    }

    /// Local forward axis (+Z), in the space this transform lives in.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local right axis (+X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local up axis (+Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Yaw of the forward axis around world Y, in radians.
    pub fn yaw(&self) -> f32 {
        let f = self.forward();
        f.x.atan2(f.z)
    }

    /// Rotate around the world Y axis. Positive angles turn the forward
    /// axis toward the right axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Rotate around the local Y axis.
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_y(angle);
    }

    /// Rotate around the local X axis.
    pub fn rotate_local_x(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_x(angle);
    }

    /// Move along the local forward axis.
    pub fn move_local_z(&mut self, distance: f32) {
        self.translation += self.forward() * distance;
    }

    /// Move along the local up axis.
    pub fn move_local_y(&mut self, distance: f32) {
        self.translation += self.up() * distance;
    }

    /// Yaw the transform to face a world point. Only the heading changes;
    /// the target's height is ignored.
    pub fn face_toward(&mut self, target: Vec3) {
        let to_target = target - self.translation;
        if to_target.x.abs() < f32::EPSILON && to_target.z.abs() < f32::EPSILON {
            return;
        }
        self.rotation = Quat::from_rotation_y(to_target.x.atan2(to_target.z));
    }
}

/// Yaw (radians around world Y) of the direction from one point to another.
pub fn yaw_between(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    d.x.atan2(d.z)
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
