//! Core types and definitions for the SKIRMISH tank simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! transforms, entity ids, messages, commands, templates, state snapshots,
//! and constants. It has no dependency on the simulation engine itself.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod messages;
pub mod state;
pub mod templates;
pub mod types;

#[cfg(test)]
mod tests;
