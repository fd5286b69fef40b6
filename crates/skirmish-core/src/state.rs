//! Simulation snapshot — the read-only view of the world built each tick
//! for the renderer and HUD. Everything here is side-effect-free data.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::TEAM_COUNT;
use crate::enums::{MatchPhase, TankState};
use crate::types::{EntityId, SimTime};

/// Complete visible state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    /// Kill points per team.
    pub scores: [u32; TEAM_COUNT],
    pub tanks: Vec<TankView>,
    pub ammo_boxes: Vec<AmmoBoxView>,
    pub shells: Vec<ShellView>,
}

/// One tank as the HUD sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub id: EntityId,
    pub name: String,
    pub team: u32,
    pub state: TankState,
    /// HUD label for the state (`TankState::name`).
    pub state_label: String,
    pub hp: i32,
    pub ammo: u32,
    pub shots_fired: u32,
    pub position: Vec3,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoBoxView {
    pub id: EntityId,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellView {
    pub id: EntityId,
    pub position: Vec3,
    /// Team inherited from the firing tank, if it still existed at launch.
    pub team: Option<u32>,
}
