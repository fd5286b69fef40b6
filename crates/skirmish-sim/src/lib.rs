//! Simulation engine for SKIRMISH.
//!
//! Owns the entity registry and message bus, steps every entity once per
//! tick, applies deferred destruction, and produces `SimSnapshot`s for the
//! renderer. Completely headless, enabling deterministic testing.

pub mod bus;
pub mod engine;
pub mod entities;
pub mod entity;
pub mod registry;
pub mod scenario;
pub mod snapshot;

pub use engine::{SimConfig, Simulation};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
