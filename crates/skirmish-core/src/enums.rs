//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavior state of a tank.
///
/// Death is not a state: a tank whose hit points reach zero (or that is
/// ordered to die) enters a forced teardown branch that overrides whatever
/// state it was in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankState {
    /// Standing still, ignoring everything but messages.
    #[default]
    Inactive,
    /// Driving between waypoints, sweeping the turret for enemies.
    Patrol,
    /// Halted, turret on the last known enemy position, firing timer running.
    Aim,
    /// Breaking toward a random point after firing.
    Evade,
    /// Driving to the nearest ammo box to reload.
    FindAmmo,
    /// Halted, scanning for the attacker a teammate reported.
    Help,
}

impl TankState {
    /// HUD label for this state.
    pub fn name(self) -> &'static str {
        match self {
            TankState::Inactive => "Inactive",
            TankState::Patrol => "Patrol",
            TankState::Aim => "Aim",
            TankState::Evade => "Evade",
            TankState::FindAmmo => "Search",
            TankState::Help => "Help",
        }
    }
}

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No level loaded yet.
    #[default]
    Setup,
    /// Ticking normally.
    Active,
    /// A team reached the win score. Entities still animate (death
    /// teardowns play out) but spawning and scoring checks stop.
    GameOver { winner: u32 },
}
