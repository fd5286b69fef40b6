//! Per-kind entity behavior, dispatched from `Entity::update`.

pub mod ammo_box;
pub mod shell;
pub mod tank;
