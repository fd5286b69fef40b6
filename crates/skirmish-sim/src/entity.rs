//! The entity model: one tagged union over the closed set of entity kinds.
//!
//! Every entity owns a root transform and a reference to its immutable
//! template; kind-specific state hangs off the `EntityKind` variant. Updates
//! go through a single dispatch that returns whether the entity lives on —
//! destruction is signalled, never performed, from inside an update.

use std::sync::Arc;

use glam::Vec3;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::{AIM_DELAY_SECS, AMMO_CAPACITY, DEATH_DURATION_SECS, HELP_DURATION_SECS};
use skirmish_core::enums::TankState;
use skirmish_core::templates::EntityTemplate;
use skirmish_core::types::{EntityId, Transform};

use crate::bus::MessageBus;
use crate::entities;
use crate::registry::EntityRegistry;

/// What an entity's update asks the registry to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Keep the entity alive.
    Continue,
    /// Remove the entity after the current enumeration finishes.
    Destroy,
}

/// Chase camera owned by a tank, released with it. The driver hands its
/// position and look target to the renderer; the simulation only keeps
/// them following the hull.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChaseCamera {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Mutable per-tank state.
#[derive(Debug, Clone)]
pub struct TankData {
    pub team: u32,
    pub state: TankState,
    pub hp: i32,
    /// Current speed along the hull's facing.
    pub speed: f32,
    pub ammo: u32,
    pub shots_fired: u32,
    /// Driving toward `target` this state.
    pub moving: bool,
    /// Shell already launched for the current aim solution.
    pub fired: bool,
    /// Evade target already picked for the current evade run.
    pub evade_started: bool,
    /// Forced death branch entered (hp exhausted or ordered to die).
    pub dying: bool,
    pub selected: bool,
    pub aim_timer: f32,
    pub help_timer: f32,
    pub death_timer: f32,
    /// The two alternating patrol waypoints.
    pub waypoint_a: Vec3,
    pub waypoint_b: Vec3,
    /// Current movement target (a waypoint, or an evade point).
    pub target: Vec3,
    /// Last known enemy position.
    pub enemy_target: Vec3,
    /// Ammo box being driven to in the find-ammo state.
    pub ammo_target: Vec3,
    /// Body transform, relative to the root.
    pub body: Transform,
    /// Turret transform, relative to the root.
    pub turret: Transform,
    pub chase_cam: ChaseCamera,
}

impl TankData {
    pub fn new(team: u32, max_hp: i32, waypoint_a: Vec3, waypoint_b: Vec3) -> Self {
        Self {
            team,
            state: TankState::Inactive,
            hp: max_hp,
            speed: 0.0,
            ammo: AMMO_CAPACITY,
            shots_fired: 0,
            moving: false,
            fired: false,
            evade_started: false,
            dying: false,
            selected: false,
            aim_timer: AIM_DELAY_SECS,
            help_timer: HELP_DURATION_SECS,
            death_timer: DEATH_DURATION_SECS,
            waypoint_a,
            waypoint_b,
            target: waypoint_a,
            enemy_target: Vec3::ZERO,
            ammo_target: Vec3::ZERO,
            body: Transform::default(),
            turret: Transform::default(),
            chase_cam: ChaseCamera::default(),
        }
    }
}

/// Mutable per-shell state.
#[derive(Debug, Clone, Copy)]
pub struct ShellData {
    /// World point the shell keeps re-facing toward.
    pub target: Vec3,
    /// Firing tank, held as an id — it may be destroyed while the shell
    /// flies, so it is never resolved into a reference that outlives a tick.
    pub owner: EntityId,
    /// Team inherited from the owner at launch. `None` if the owner was
    /// already gone; such a shell hits nobody.
    pub team: Option<u32>,
    pub lifetime: f32,
}

/// Mutable per-ammo-box state.
#[derive(Debug, Clone, Copy)]
pub struct AmmoBoxData {
    /// Downward speed while above ground height (from the template).
    pub fall_speed: f32,
}

/// Kind-specific entity state.
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Transform only, no behavior.
    Scenery,
    Tank(Box<TankData>),
    Shell(ShellData),
    AmmoBox(AmmoBoxData),
}

/// One simulated game object.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Shared stat block; templates outlive all entities built from them.
    pub template: Arc<EntityTemplate>,
    /// Root transform. Composite parts (tank body/turret) are relative to it.
    pub transform: Transform,
    pub kind: EntityKind,
}

impl Entity {
    /// Root world position.
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Template type name, the key enumeration filters match against.
    pub fn type_name(&self) -> &str {
        &self.template.type_name
    }

    pub fn as_tank(&self) -> Option<&TankData> {
        match &self.kind {
            EntityKind::Tank(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_tank_mut(&mut self) -> Option<&mut TankData> {
        match &mut self.kind {
            EntityKind::Tank(data) => Some(data),
            _ => None,
        }
    }

    /// Step this entity by `dt`. The entity is detached from the registry
    /// while it runs, so it can freely enumerate and message every *other*
    /// entity through `registry` and `bus`.
    pub fn update(
        &mut self,
        registry: &mut EntityRegistry,
        bus: &mut MessageBus,
        rng: &mut ChaCha8Rng,
        dt: f32,
    ) -> UpdateOutcome {
        let Entity {
            id,
            template,
            transform,
            kind,
            ..
        } = self;
        match kind {
            EntityKind::Scenery => UpdateOutcome::Continue,
            EntityKind::Tank(data) => {
                entities::tank::update(*id, template, transform, data, registry, bus, rng, dt)
            }
            EntityKind::Shell(data) => {
                entities::shell::update(*id, transform, data, registry, bus, dt)
            }
            EntityKind::AmmoBox(data) => entities::ammo_box::update(*id, transform, data, bus, dt),
        }
    }
}
