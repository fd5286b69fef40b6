//! Tank behavior building blocks for SKIRMISH.
//!
//! Pure functions that compute steering corrections, throttle decisions,
//! and target selection for tank entities. No registry or bus dependency —
//! operates on plain data the caller gathers.

pub mod perception;
pub mod steering;

pub use skirmish_core as core;
