//! Enemy AI for STARWAKE.
//!
//! Implements per-kind steering, boss evasion, enemy fire decisions,
//! and mine laying as pure functions over plain data.

pub mod boss;
pub mod fire;
pub mod mines;
pub mod profiles;
pub mod steering;

pub use starwake_core as core;
