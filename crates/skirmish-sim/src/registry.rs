//! Entity registry: owns every template and entity instance, assigns ids,
//! and drives the per-tick update pass with deferred destruction.
//!
//! Destruction discipline: an update never frees an entity. Entities that
//! return `Destroy` are marked doomed — later updaters in the same tick no
//! longer see them through lookup or enumeration — and are removed only
//! after the full pass finishes.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::{PATROL_AREA_HALF, SHELL_LIFETIME_SECS, TEAM_COUNT};
use skirmish_core::templates::{EntityTemplate, TankStats, TemplateKind};
use skirmish_core::types::{EntityId, Transform};
use skirmish_tank_ai::perception::TankSighting;
use skirmish_tank_ai::steering::random_point_in_square;

use crate::bus::MessageBus;
use crate::entity::{AmmoBoxData, Entity, EntityKind, ShellData, TankData, UpdateOutcome};

/// Load-time template failures. Runtime entity lookups never error — they
/// return `None` and callers must check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    UnknownTemplate(String),
    WrongTemplateKind {
        type_name: String,
        expected: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownTemplate(type_name) => {
                write!(f, "no template with type name {type_name:?}")
            }
            RegistryError::WrongTemplateKind {
                type_name,
                expected,
            } => write!(f, "template {type_name:?} is not {expected}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// A patrol waypoint pushed during level load, consumed round-robin per team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolPoint {
    pub team: u32,
    pub point: Vec3,
}

/// Enumeration filter: any combination of display name, id, and template
/// type name. Empty filter matches every live entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityFilter<'a> {
    pub name: Option<&'a str>,
    pub id: Option<EntityId>,
    pub type_name: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct EntityRegistry {
    templates: HashMap<String, Arc<EntityTemplate>>,
    /// Entity storage in creation order. A slot is `None` only while its
    /// entity is detached for its own update.
    slots: Vec<Option<Entity>>,
    index: HashMap<EntityId, usize>,
    /// Entities that signalled `Destroy` this tick, pending removal.
    doomed: HashSet<EntityId>,
    /// Next id to assign; ids are never reused. Id 0 is the system sender.
    next_id: u64,
    scores: [u32; TEAM_COUNT],
    patrol_points: Vec<PatrolPoint>,
    patrol_cursors: HashMap<u32, usize>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    // --- Templates ---

    /// Register a generic (scenery/shell) template.
    pub fn create_template(&mut self, type_name: &str, name: &str, mesh: &str) {
        self.insert_template(EntityTemplate::generic(type_name, name, mesh));
    }

    pub fn create_tank_template(&mut self, type_name: &str, name: &str, mesh: &str, stats: TankStats) {
        self.insert_template(EntityTemplate::tank(type_name, name, mesh, stats));
    }

    pub fn create_ammo_box_template(&mut self, type_name: &str, name: &str, mesh: &str, fall_speed: f32) {
        self.insert_template(EntityTemplate::ammo_box(type_name, name, mesh, fall_speed));
    }

    fn insert_template(&mut self, template: EntityTemplate) {
        self.templates
            .insert(template.type_name.clone(), Arc::new(template));
    }

    /// Look up a template by type name. Failing here is a load-time error.
    pub fn template(&self, type_name: &str) -> Result<&Arc<EntityTemplate>, RegistryError> {
        self.templates
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownTemplate(type_name.to_owned()))
    }

    pub fn destroy_all_templates(&mut self) {
        self.templates.clear();
    }

    // --- Entity creation ---

    /// Create a generic entity (scenery). Rotation is XYZ euler radians.
    pub fn create_entity(
        &mut self,
        bus: &mut MessageBus,
        type_name: &str,
        name: &str,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<EntityId, RegistryError> {
        let template = Arc::clone(self.template(type_name)?);
        Ok(self.spawn(
            bus,
            name,
            template,
            Transform::new(position, rotation, scale),
            EntityKind::Scenery,
        ))
    }

    /// Create a tank on the given team. Initial patrol waypoints are picked
    /// at random inside the patrol square, at the tank's own height.
    #[allow(clippy::too_many_arguments)]
    pub fn create_tank(
        &mut self,
        bus: &mut MessageBus,
        rng: &mut ChaCha8Rng,
        type_name: &str,
        team: u32,
        name: &str,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<EntityId, RegistryError> {
        let template = Arc::clone(self.template(type_name)?);
        let stats = template
            .tank_stats()
            .ok_or_else(|| RegistryError::WrongTemplateKind {
                type_name: type_name.to_owned(),
                expected: "a tank template",
            })?;

        let waypoint_a = random_point_in_square(rng, PATROL_AREA_HALF, position.y);
        let waypoint_b = random_point_in_square(rng, PATROL_AREA_HALF, position.y);
        let data = TankData::new(team, stats.max_hp, waypoint_a, waypoint_b);

        Ok(self.spawn(
            bus,
            name,
            template,
            Transform::new(position, rotation, scale),
            EntityKind::Tank(Box::new(data)),
        ))
    }

    pub fn create_ammo_box(
        &mut self,
        bus: &mut MessageBus,
        type_name: &str,
        name: &str,
        position: Vec3,
    ) -> Result<EntityId, RegistryError> {
        let template = Arc::clone(self.template(type_name)?);
        let fall_speed = match template.kind {
            TemplateKind::AmmoBox { fall_speed } => fall_speed,
            _ => {
                return Err(RegistryError::WrongTemplateKind {
                    type_name: type_name.to_owned(),
                    expected: "an ammo box template",
                })
            }
        };
        Ok(self.spawn(
            bus,
            name,
            template,
            Transform::from_translation(position),
            EntityKind::AmmoBox(AmmoBoxData { fall_speed }),
        ))
    }

    /// Create a shell aimed at `target`. The owner is captured as an id only
    /// (it may die before the shell lands); its team is passed in by the
    /// caller because a tank firing mid-update is detached from its slot.
    /// A shell with no team is inert and can hit nobody.
    #[allow(clippy::too_many_arguments)]
    pub fn create_shell(
        &mut self,
        bus: &mut MessageBus,
        type_name: &str,
        target: Vec3,
        owner: EntityId,
        team: Option<u32>,
        name: &str,
        position: Vec3,
    ) -> Result<EntityId, RegistryError> {
        let template = Arc::clone(self.template(type_name)?);
        Ok(self.spawn(
            bus,
            name,
            template,
            Transform::from_translation(position),
            EntityKind::Shell(ShellData {
                target,
                owner,
                team,
                lifetime: SHELL_LIFETIME_SECS,
            }),
        ))
    }

    fn spawn(
        &mut self,
        bus: &mut MessageBus,
        name: &str,
        template: Arc<EntityTemplate>,
        transform: Transform,
        kind: EntityKind,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let slot = self.slots.len();
        self.slots.push(Some(Entity {
            id,
            name: name.to_owned(),
            template,
            transform,
            kind,
        }));
        self.index.insert(id, slot);
        bus.register(id);
        id
    }

    // --- Lookup and enumeration ---

    /// Fallible lookup: `None` for ids that were never issued, entities
    /// already removed, entities doomed this tick, or the entity currently
    /// running its own update.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if self.doomed.contains(&id) {
            return None;
        }
        self.slots.get(*self.index.get(&id)?)?.as_ref()
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.doomed.contains(&id) {
            return None;
        }
        self.slots.get_mut(*self.index.get(&id)?)?.as_mut()
    }

    /// All live entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots
            .iter()
            .filter_map(Option::as_ref)
            .filter(|e| !self.doomed.contains(&e.id))
    }

    /// Live entities whose template type name matches.
    pub fn iter_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.iter().filter(move |e| e.type_name() == type_name)
    }

    /// Live entities matching every set field of the filter.
    pub fn iter_where<'a>(&'a self, filter: EntityFilter<'a>) -> impl Iterator<Item = &'a Entity> + 'a {
        self.iter().filter(move |e| {
            filter.name.is_none_or(|name| e.name == name)
                && filter.id.is_none_or(|id| e.id == id)
                && filter.type_name.is_none_or(|t| e.type_name() == t)
        })
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every live tank's id, team, and position, for scans run
    /// from inside another entity's update.
    pub fn tank_sightings(&self) -> Vec<TankSighting> {
        self.iter()
            .filter_map(|e| {
                e.as_tank().map(|tank| TankSighting {
                    id: e.id,
                    team: tank.team,
                    position: e.position(),
                })
            })
            .collect()
    }

    /// Ids and positions of every live ammo box.
    pub fn ammo_boxes(&self) -> Vec<(EntityId, Vec3)> {
        self.iter()
            .filter(|e| matches!(e.kind, EntityKind::AmmoBox(_)))
            .map(|e| (e.id, e.position()))
            .collect()
    }

    // --- Update pass ---

    /// Update every live entity once. Entities created during the pass are
    /// not updated until the next tick; entities that signal `Destroy` stay
    /// visible to updaters that already ran but vanish from lookups for the
    /// rest of the tick, and are removed once the pass completes.
    pub fn update_all(&mut self, bus: &mut MessageBus, rng: &mut ChaCha8Rng, dt: f32) {
        let count = self.slots.len();
        for idx in 0..count {
            let Some(mut entity) = self.slots[idx].take() else {
                continue;
            };
            if self.doomed.contains(&entity.id) {
                self.slots[idx] = Some(entity);
                continue;
            }

            let outcome = entity.update(self, bus, rng, dt);
            let id = entity.id;
            self.slots[idx] = Some(entity);
            if outcome == UpdateOutcome::Destroy {
                self.doomed.insert(id);
            }
        }
        self.sweep_doomed(bus);
    }

    fn sweep_doomed(&mut self, bus: &mut MessageBus) {
        if self.doomed.is_empty() {
            return;
        }
        for id in self.doomed.drain() {
            bus.unregister(id);
            self.index.remove(&id);
        }
        self.compact();
    }

    /// Drop slots whose entity is no longer indexed, then rebuild the
    /// id → slot map.
    fn compact(&mut self) {
        let index = &self.index;
        self.slots
            .retain(|slot| slot.as_ref().is_some_and(|e| index.contains_key(&e.id)));
        self.index = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(slot, e)| e.as_ref().map(|e| (e.id, slot)))
            .collect();
    }

    /// Remove every entity at once. Every queue on the bus belongs to an
    /// entity spawned here, so the bus is wiped wholesale.
    pub fn destroy_all_entities(&mut self, bus: &mut MessageBus) {
        bus.clear();
        self.slots.clear();
        self.index.clear();
        self.doomed.clear();
    }

    // --- Scores ---

    pub fn score(&self, team: u32) -> u32 {
        self.scores.get(team as usize).copied().unwrap_or(0)
    }

    pub fn scores(&self) -> [u32; TEAM_COUNT] {
        self.scores
    }

    /// Add one kill point to a team's score.
    pub fn award_point(&mut self, team: u32) {
        if let Some(score) = self.scores.get_mut(team as usize) {
            *score += 1;
        }
    }

    // --- Patrol points ---

    pub fn push_patrol_point(&mut self, team: u32, point: Vec3) {
        self.patrol_points.push(PatrolPoint { team, point });
    }

    /// Next patrol point for a team, cycling through the team's stored
    /// points in push order. `None` if the team has no points.
    pub fn next_patrol_point(&mut self, team: u32) -> Option<Vec3> {
        let team_points: Vec<Vec3> = self
            .patrol_points
            .iter()
            .filter(|p| p.team == team)
            .map(|p| p.point)
            .collect();
        if team_points.is_empty() {
            return None;
        }
        let cursor = self.patrol_cursors.entry(team).or_insert(0);
        let point = team_points[*cursor % team_points.len()];
        *cursor = (*cursor + 1) % team_points.len();
        Some(point)
    }
}
