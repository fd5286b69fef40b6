//! Level setup.
//!
//! A `LevelSpec` is a plain description of a battlefield: templates with
//! their raw tuning attributes, entity placements, and per-team patrol
//! points. `apply` performs the unit conversions the raw attributes use
//! (rotations and turn speeds in degrees, turret speed as a divisor of a
//! half turn per second) and registers everything, failing the whole load
//! on the first bad entry.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec3;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::{AMMO_TEMPLATE_TYPE, SHELL_TEMPLATE_TYPE};
use skirmish_core::templates::TankStats;

use crate::bus::MessageBus;
use crate::registry::{EntityRegistry, RegistryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    UnknownTemplate(String),
    /// A template entry is missing an attribute its category requires.
    MissingAttribute(&'static str),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::UnknownTemplate(type_name) => {
                write!(f, "level references unknown template {type_name:?}")
            }
            ScenarioError::MissingAttribute(attr) => {
                write!(f, "template entry is missing attribute {attr:?}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<RegistryError> for ScenarioError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownTemplate(type_name)
            | RegistryError::WrongTemplateKind { type_name, .. } => {
                ScenarioError::UnknownTemplate(type_name)
            }
        }
    }
}

/// What kind of entity a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    Generic,
    Tank,
    AmmoBox,
}

/// One template entry with its raw attributes. Tank attributes are in the
/// units levels are authored in: turn speed in degrees per second, turret
/// turn speed as a divisor (`PI / divisor` radians per second).
#[derive(Debug, Clone)]
pub struct TemplateSpec {
    pub type_name: String,
    pub name: String,
    pub mesh: String,
    pub category: TemplateCategory,
    pub max_speed: Option<f32>,
    pub acceleration: Option<f32>,
    pub turn_speed_degs: Option<f32>,
    pub turret_turn_divisor: Option<f32>,
    pub max_hp: Option<i32>,
    pub shell_damage: Option<i32>,
    pub fall_speed: Option<f32>,
}

impl TemplateSpec {
    pub fn generic(type_name: &str, name: &str, mesh: &str) -> Self {
        Self {
            type_name: type_name.to_owned(),
            name: name.to_owned(),
            mesh: mesh.to_owned(),
            category: TemplateCategory::Generic,
            max_speed: None,
            acceleration: None,
            turn_speed_degs: None,
            turret_turn_divisor: None,
            max_hp: None,
            shell_damage: None,
            fall_speed: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tank(
        type_name: &str,
        name: &str,
        mesh: &str,
        max_speed: f32,
        acceleration: f32,
        turn_speed_degs: f32,
        turret_turn_divisor: f32,
        max_hp: i32,
        shell_damage: i32,
    ) -> Self {
        Self {
            category: TemplateCategory::Tank,
            max_speed: Some(max_speed),
            acceleration: Some(acceleration),
            turn_speed_degs: Some(turn_speed_degs),
            turret_turn_divisor: Some(turret_turn_divisor),
            max_hp: Some(max_hp),
            shell_damage: Some(shell_damage),
            ..Self::generic(type_name, name, mesh)
        }
    }

    pub fn ammo_box(type_name: &str, name: &str, mesh: &str, fall_speed: f32) -> Self {
        Self {
            category: TemplateCategory::AmmoBox,
            fall_speed: Some(fall_speed),
            ..Self::generic(type_name, name, mesh)
        }
    }
}

/// One entity placement. Rotation is XYZ euler, in degrees.
#[derive(Debug, Clone)]
pub enum EntitySpec {
    Scenery {
        type_name: String,
        name: String,
        position: Vec3,
        rotation_degs: Vec3,
        scale: Vec3,
    },
    Tank {
        type_name: String,
        team: u32,
        name: String,
        position: Vec3,
        rotation_degs: Vec3,
        scale: Vec3,
    },
}

/// A complete level description.
#[derive(Debug, Clone, Default)]
pub struct LevelSpec {
    pub templates: Vec<TemplateSpec>,
    pub entities: Vec<EntitySpec>,
    /// `(team, point)` pairs, consumed round-robin per team at runtime.
    pub patrol_points: Vec<(u32, Vec3)>,
}

impl LevelSpec {
    /// Register every template, spawn every entity, and store the patrol
    /// points. Not transactional: entries already applied stay applied, so
    /// callers should discard the registry on error.
    pub fn apply(
        &self,
        registry: &mut EntityRegistry,
        bus: &mut MessageBus,
        rng: &mut ChaCha8Rng,
    ) -> Result<(), ScenarioError> {
        for template in &self.templates {
            apply_template(registry, template)?;
        }

        for entity in &self.entities {
            match entity {
                EntitySpec::Scenery {
                    type_name,
                    name,
                    position,
                    rotation_degs,
                    scale,
                } => {
                    registry.create_entity(
                        bus,
                        type_name,
                        name,
                        *position,
                        degrees_to_radians(*rotation_degs),
                        *scale,
                    )?;
                }
                EntitySpec::Tank {
                    type_name,
                    team,
                    name,
                    position,
                    rotation_degs,
                    scale,
                } => {
                    registry.create_tank(
                        bus,
                        rng,
                        type_name,
                        *team,
                        name,
                        *position,
                        degrees_to_radians(*rotation_degs),
                        *scale,
                    )?;
                }
            }
        }

        for (team, point) in &self.patrol_points {
            registry.push_patrol_point(*team, *point);
        }

        Ok(())
    }
}

fn apply_template(registry: &mut EntityRegistry, spec: &TemplateSpec) -> Result<(), ScenarioError> {
    match spec.category {
        TemplateCategory::Generic => {
            registry.create_template(&spec.type_name, &spec.name, &spec.mesh);
        }
        TemplateCategory::Tank => {
            let stats = TankStats {
                max_speed: require(spec.max_speed, "max-speed")?,
                acceleration: require(spec.acceleration, "acceleration")?,
                turn_speed: require(spec.turn_speed_degs, "turn-speed")?.to_radians(),
                turret_turn_speed: PI / require(spec.turret_turn_divisor, "turret-turn-divisor")?,
                max_hp: require(spec.max_hp, "max-hp")?,
                shell_damage: require(spec.shell_damage, "shell-damage")?,
            };
            registry.create_tank_template(&spec.type_name, &spec.name, &spec.mesh, stats);
        }
        TemplateCategory::AmmoBox => {
            let fall_speed = require(spec.fall_speed, "fall-speed")?;
            registry.create_ammo_box_template(&spec.type_name, &spec.name, &spec.mesh, fall_speed);
        }
    }
    Ok(())
}

fn require<T>(value: Option<T>, attr: &'static str) -> Result<T, ScenarioError> {
    value.ok_or(ScenarioError::MissingAttribute(attr))
}

fn degrees_to_radians(rotation: Vec3) -> Vec3 {
    Vec3::new(
        rotation.x.to_radians(),
        rotation.y.to_radians(),
        rotation.z.to_radians(),
    )
}

/// The stock two-team battlefield: a ground plane, a tree line on each
/// flank, three tanks per team facing each other, and patrol circuits
/// around each team's half of the arena.
pub fn default_skirmish() -> LevelSpec {
    let mut level = LevelSpec {
        templates: vec![
            TemplateSpec::generic("Ground Type 1", "Ground", "ground.x"),
            TemplateSpec::generic("Tree Type 1", "Tree", "tree.x"),
            TemplateSpec::generic(SHELL_TEMPLATE_TYPE, "Shell", "shell.x"),
            TemplateSpec::ammo_box(AMMO_TEMPLATE_TYPE, "Ammo", "cube.x", 6.0),
            TemplateSpec::tank(
                "Rogue Scout",
                "Scout",
                "hovertank02.x",
                15.0,
                5.0,
                60.0,
                2.0,
                100,
                20,
            ),
            TemplateSpec::tank(
                "Oberon MkII",
                "Oberon",
                "hovertank01.x",
                15.0,
                5.0,
                60.0,
                2.0,
                100,
                20,
            ),
        ],
        ..LevelSpec::default()
    };

    level.entities.push(EntitySpec::Scenery {
        type_name: "Ground Type 1".to_owned(),
        name: "Arena".to_owned(),
        position: Vec3::ZERO,
        rotation_degs: Vec3::ZERO,
        scale: Vec3::ONE,
    });
    for i in 0..8 {
        let offset = -35.0 + 10.0 * i as f32;
        for x in [-45.0, 45.0] {
            level.entities.push(EntitySpec::Scenery {
                type_name: "Tree Type 1".to_owned(),
                name: String::new(),
                position: Vec3::new(x, 0.0, offset),
                rotation_degs: Vec3::new(0.0, 15.0 * i as f32, 0.0),
                scale: Vec3::ONE,
            });
        }
    }

    for i in 0..3 {
        let x = -15.0 + 15.0 * i as f32;
        level.entities.push(EntitySpec::Tank {
            type_name: "Rogue Scout".to_owned(),
            team: 0,
            name: format!("Alpha-{}", i + 1),
            position: Vec3::new(x, 0.0, -25.0),
            rotation_degs: Vec3::ZERO,
            scale: Vec3::ONE,
        });
        level.entities.push(EntitySpec::Tank {
            type_name: "Oberon MkII".to_owned(),
            team: 1,
            name: format!("Bravo-{}", i + 1),
            position: Vec3::new(x, 0.0, 25.0),
            rotation_degs: Vec3::new(0.0, 180.0, 0.0),
            scale: Vec3::ONE,
        });
    }

    level.patrol_points = vec![
        (0, Vec3::new(-20.0, 0.5, -20.0)),
        (0, Vec3::new(20.0, 0.5, -20.0)),
        (0, Vec3::new(0.0, 0.5, -5.0)),
        (1, Vec3::new(20.0, 0.5, 20.0)),
        (1, Vec3::new(-20.0, 0.5, 20.0)),
        (1, Vec3::new(0.0, 0.5, 5.0)),
    ];

    level
}
