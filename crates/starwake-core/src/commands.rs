//! Player input consumed by the simulation.
//!
//! `InputSnapshot` is sampled once per tick; `PlayerCommand`s are out-of-band
//! requests queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Abstract per-tick input. `Default` means "no input".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Thrust axes in -1..=1; +y points down the screen.
    pub thrust_x: f64,
    pub thrust_y: f64,
    pub fire_primary: bool,
    pub fire_secondary: bool,
    pub fire_tertiary: bool,
    /// Fire held slots in burst mode.
    pub burst: bool,
    pub fire_missile: bool,
    pub drop_mine: bool,
    /// Mega-shot released this tick after charging for the given ms.
    pub mega_shot_release: Option<f64>,
    /// Flip the shield enable switch.
    pub toggle_shields: bool,
    pub manual: ManualActions,
}

/// Explicit resource operation triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualActions {
    pub refuel: bool,
    pub reload: bool,
    pub repair: bool,
    pub energize: bool,
    pub rehydrate: bool,
}

impl InputSnapshot {
    /// Fire requests as (slot, held) pairs.
    pub fn fire_slots(&self) -> [(usize, bool); 3] {
        [
            (0, self.fire_primary),
            (1, self.fire_secondary),
            (2, self.fire_tertiary),
        ]
    }
}

/// Out-of-band player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Freeze the simulation clock.
    Pause,
    /// Continue after a pause.
    Resume,
    /// Abandon the mission; produces a normal mission outcome.
    Abort,
    /// Set the travel speed multiplier (clamped to the supported range).
    SetTravelSpeed { multiplier: f64 },
}
