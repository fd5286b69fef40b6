//! Snapshot construction: flatten the registry into the read-only view
//! model, in creation order so output is stable tick over tick.

use skirmish_core::enums::MatchPhase;
use skirmish_core::state::{AmmoBoxView, ShellView, SimSnapshot, TankView};
use skirmish_core::types::SimTime;

use crate::entity::EntityKind;
use crate::registry::EntityRegistry;

pub fn build(registry: &EntityRegistry, time: SimTime, phase: MatchPhase) -> SimSnapshot {
    let mut snapshot = SimSnapshot {
        time,
        phase,
        scores: registry.scores(),
        ..SimSnapshot::default()
    };

    for entity in registry.iter() {
        match &entity.kind {
            EntityKind::Scenery => {}
            EntityKind::Tank(tank) => snapshot.tanks.push(TankView {
                id: entity.id,
                name: entity.name.clone(),
                team: tank.team,
                state: tank.state,
                state_label: tank.state.name().to_owned(),
                hp: tank.hp,
                ammo: tank.ammo,
                shots_fired: tank.shots_fired,
                position: entity.position(),
                selected: tank.selected,
            }),
            EntityKind::Shell(shell) => snapshot.shells.push(ShellView {
                id: entity.id,
                position: entity.position(),
                team: shell.team,
            }),
            EntityKind::AmmoBox(_) => snapshot.ammo_boxes.push(AmmoBoxView {
                id: entity.id,
                position: entity.position(),
            }),
        }
    }

    snapshot
}
