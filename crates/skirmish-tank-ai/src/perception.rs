//! Target spotting and proximity scans.

use glam::Vec3;

use skirmish_core::constants::ENEMY_SPOT_RANGE;
use skirmish_core::types::EntityId;

/// A tank as seen by another entity's scan: id, team, and root position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankSighting {
    pub id: EntityId,
    pub team: u32,
    pub position: Vec3,
}

/// First enemy tank within spotting range of the turret probe point.
pub fn spot_enemy(probe_end: Vec3, own_team: u32, tanks: &[TankSighting]) -> Option<&TankSighting> {
    tanks
        .iter()
        .find(|t| t.team != own_team && t.position.distance(probe_end) < ENEMY_SPOT_RANGE)
}

/// Index of the nearest point strictly within `radius` of `origin`, if any.
pub fn nearest_within(origin: Vec3, radius: f32, points: &[Vec3]) -> Option<usize> {
    let mut best = radius;
    let mut best_idx = None;
    for (idx, point) in points.iter().enumerate() {
        let d = origin.distance(*point);
        if d < best {
            best = d;
            best_idx = Some(idx);
        }
    }
    best_idx
}
