//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only) plus the explicit state they touch. They own no state.

pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod resources;
pub mod snapshot;
pub mod spawner;
pub mod weapons;
