//! Entity templates: immutable shared stat blocks.
//!
//! A template describes a family of entities — its type name (the lookup
//! key), display name, mesh reference, and kind-specific constants. The
//! registry owns all templates; they are never mutated after creation and
//! outlive every entity built from them.

use serde::{Deserialize, Serialize};

/// Stats shared by every tank built from one template.
///
/// Angular rates are radians/sec; unit conversions (degrees, the turret
/// π-divisor) happen in the level loader, so a template echoes back exactly
/// the values it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankStats {
    /// Maximum speed (units/sec).
    pub max_speed: f32,
    /// Acceleration and braking rate (units/sec²).
    pub acceleration: f32,
    /// Hull turn rate (radians/sec).
    pub turn_speed: f32,
    /// Turret turn rate (radians/sec).
    pub turret_turn_speed: f32,
    /// Initial hit points.
    pub max_hp: i32,
    /// Hit points removed from a tank struck by this template's shells.
    pub shell_damage: i32,
}

/// Kind-specific template data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Scenery and other inert entities (also used for shells).
    Generic,
    Tank(TankStats),
    AmmoBox {
        /// Downward speed while falling (units/sec).
        fall_speed: f32,
    },
}

/// An immutable shared description of an entity family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Lookup key, also the value entity enumeration filters match against.
    pub type_name: String,
    /// Display name.
    pub name: String,
    /// Mesh reference for the renderer.
    pub mesh: String,
    pub kind: TemplateKind,
}

impl EntityTemplate {
    pub fn generic(type_name: &str, name: &str, mesh: &str) -> Self {
        Self {
            type_name: type_name.to_owned(),
            name: name.to_owned(),
            mesh: mesh.to_owned(),
            kind: TemplateKind::Generic,
        }
    }

    pub fn tank(type_name: &str, name: &str, mesh: &str, stats: TankStats) -> Self {
        Self {
            type_name: type_name.to_owned(),
            name: name.to_owned(),
            mesh: mesh.to_owned(),
            kind: TemplateKind::Tank(stats),
        }
    }

    pub fn ammo_box(type_name: &str, name: &str, mesh: &str, fall_speed: f32) -> Self {
        Self {
            type_name: type_name.to_owned(),
            name: name.to_owned(),
            mesh: mesh.to_owned(),
            kind: TemplateKind::AmmoBox { fall_speed },
        }
    }

    /// Tank stats, if this is a tank template.
    pub fn tank_stats(&self) -> Option<&TankStats> {
        match &self.kind {
            TemplateKind::Tank(stats) => Some(stats),
            _ => None,
        }
    }
}
