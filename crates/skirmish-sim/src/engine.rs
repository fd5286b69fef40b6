//! The simulation driver.
//!
//! Owns the registry, bus, and RNG, and exposes the only public stepping
//! surface: queue commands, call `tick`, read the returned snapshot. All
//! randomness flows through one seeded generator, so two simulations built
//! from the same config and level produce identical snapshot streams.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::constants::{
    AMMO_DROP_AREA_HALF, AMMO_DROP_HEIGHT, AMMO_SPAWN_MAX_SECS, AMMO_SPAWN_MIN_SECS,
    AMMO_TEMPLATE_TYPE, TEAM_COUNT, WIN_SCORE,
};
use skirmish_core::enums::MatchPhase;
use skirmish_core::messages::{Message, MessageKind};
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::SimTime;
use skirmish_tank_ai::steering::random_point_in_square;

use crate::bus::MessageBus;
use crate::registry::EntityRegistry;
use crate::scenario::{LevelSpec, ScenarioError};
use crate::snapshot;

/// Simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Seed for the simulation RNG.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

pub struct Simulation {
    registry: EntityRegistry,
    bus: MessageBus,
    rng: ChaCha8Rng,
    time: SimTime,
    phase: MatchPhase,
    /// Seconds until the next ammo box drop.
    ammo_spawn_timer: f32,
    command_queue: Vec<PlayerCommand>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ammo_spawn_timer = rng.gen_range(AMMO_SPAWN_MIN_SECS..=AMMO_SPAWN_MAX_SECS);
        Self {
            registry: EntityRegistry::new(),
            bus: MessageBus::new(),
            rng,
            time: SimTime::default(),
            phase: MatchPhase::Setup,
            ammo_spawn_timer,
            command_queue: Vec::new(),
        }
    }

    /// Apply a level description to the (empty) world.
    pub fn load(&mut self, level: &LevelSpec) -> Result<(), ScenarioError> {
        level.apply(&mut self.registry, &mut self.bus, &mut self.rng)
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the world by `dt` seconds and return the resulting view.
    /// During setup only commands are processed; once the match is over the
    /// world keeps animating (death teardowns finish) but scoring no longer
    /// changes the outcome.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        self.process_commands();

        match self.phase {
            MatchPhase::Setup => {}
            MatchPhase::Active => {
                self.registry.update_all(&mut self.bus, &mut self.rng, dt);
                self.spawn_ammo(dt);
                self.check_win();
                self.time.advance(dt);
            }
            MatchPhase::GameOver { .. } => {
                self.registry.update_all(&mut self.bus, &mut self.rng, dt);
                self.time.advance(dt);
            }
        }

        self.snapshot()
    }

    /// Build the read-only view of the current world state.
    pub fn snapshot(&self) -> SimSnapshot {
        snapshot::build(&self.registry, self.time, self.phase)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    fn process_commands(&mut self) {
        for command in std::mem::take(&mut self.command_queue) {
            match command {
                PlayerCommand::StartAllTanks => {
                    self.broadcast_to_tanks(MessageKind::Start);
                    if self.phase == MatchPhase::Setup {
                        self.phase = MatchPhase::Active;
                    }
                }
                PlayerCommand::StopAllTanks => {
                    self.broadcast_to_tanks(MessageKind::Inactive);
                }
                PlayerCommand::EvadeTank { id } => {
                    self.bus.send(id, Message::system(MessageKind::Evade));
                }
                PlayerCommand::SelectTank { id, selected } => {
                    if let Some(tank) = self
                        .registry
                        .entity_mut(id)
                        .and_then(|e| e.as_tank_mut())
                    {
                        tank.selected = selected;
                    }
                }
                PlayerCommand::SetTankTarget { id, target } => {
                    if let Some(tank) = self
                        .registry
                        .entity_mut(id)
                        .and_then(|e| e.as_tank_mut())
                    {
                        tank.target = target;
                        tank.moving = true;
                    }
                }
            }
        }
    }

    fn broadcast_to_tanks(&mut self, kind: MessageKind) {
        for sighting in self.registry.tank_sightings() {
            self.bus.send(sighting.id, Message::system(kind));
        }
    }

    /// Drop an ammo box high over a random spot every 20 to 30 seconds.
    fn spawn_ammo(&mut self, dt: f32) {
        self.ammo_spawn_timer -= dt;
        if self.ammo_spawn_timer > 0.0 {
            return;
        }
        self.ammo_spawn_timer = self
            .rng
            .gen_range(AMMO_SPAWN_MIN_SECS..=AMMO_SPAWN_MAX_SECS);

        let drop = random_point_in_square(&mut self.rng, AMMO_DROP_AREA_HALF, AMMO_DROP_HEIGHT);
        // A level without an ammo template simply never gets drops.
        let _ = self
            .registry
            .create_ammo_box(&mut self.bus, AMMO_TEMPLATE_TYPE, "", drop);
    }

    /// End the match when a team reaches the winning score: everything
    /// stops, surviving tanks on every other team are ordered to die.
    fn check_win(&mut self) {
        let winner = (0..TEAM_COUNT as u32).find(|&team| self.registry.score(team) >= WIN_SCORE);
        let Some(winner) = winner else {
            return;
        };

        for sighting in self.registry.tank_sightings() {
            self.bus.send(sighting.id, Message::system(MessageKind::Inactive));
            if sighting.team != winner {
                self.bus.send(sighting.id, Message::system(MessageKind::Death));
            }
        }
        self.phase = MatchPhase::GameOver { winner };
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }
}
