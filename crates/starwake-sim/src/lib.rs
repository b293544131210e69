//! Simulation engine for STARWAKE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces MissionSnapshots for presentation.

pub mod alerts;
pub mod clock;
pub mod engine;
pub mod guidance;
pub mod mission;
pub mod registry;
pub mod ship;
pub mod systems;
pub mod world_setup;

pub use engine::{MissionHooks, NoopHooks, SimConfig, Simulation};
pub use starwake_core as core;

#[cfg(test)]
mod tests;
