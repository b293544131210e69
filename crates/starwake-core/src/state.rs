//! Mission snapshot: the complete visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::components::CargoStack;
use crate::enums::*;
use crate::events::{Alert, CombatEvent};
use crate::types::{Position, SimTime};

/// Owned copy of everything the renderer and HUD need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub time: SimTime,
    /// Display frames seen, including paused ones.
    pub frame: u64,
    pub run_state: RunState,
    pub phase: MissionPhase,
    /// Remaining ticks in a countdown phase.
    pub phase_countdown: u64,
    /// Travel progress (0.0 - 1.0).
    pub travel_progress: f64,
    pub travel_speed: f64,
    pub score: u64,
    pub ship: ShipView,
    pub boss: Option<BossView>,
    /// Sorted by kind, then position, for stable rendering.
    pub contacts: Vec<ContactView>,
    pub alert: Option<Alert>,
    pub events: Vec<CombatEvent>,
    /// Present from the tick the mission ends.
    pub outcome: Option<MissionOutcome>,
}

/// Player ship HUD state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    pub hull: f64,
    pub shields: Vec<ShieldView>,
    pub shields_enabled: bool,
    pub energy: f64,
    pub max_energy: f64,
    pub energy_depleted: bool,
    pub capacitor: f64,
    pub capacitor_locked: bool,
    pub fuel: f64,
    pub max_fuel: f64,
    pub weapons: Vec<WeaponView>,
    pub missiles: u32,
    pub mines: u32,
    pub cargo: Vec<CargoStack>,
    pub operations: Vec<OperationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldView {
    pub pool: usize,
    pub color: ShieldColor,
    pub current: f64,
    pub capacity: f64,
    /// Regeneration blocked by a recent shatter.
    pub shattered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub slot: usize,
    pub weapon_id: String,
    /// `None` for energy weapons.
    pub rounds: Option<u32>,
    pub reloading: bool,
    pub heat: f64,
}

/// Resource operation in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationView {
    pub op: ResourceOp,
    pub manual: bool,
    /// Completion fraction (0.0 - 1.0).
    pub progress: f64,
}

/// Boss health bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub def_id: String,
    pub hp_ratio: f64,
    pub shield_ratio: f64,
}

/// Anything drawable on the playfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactView {
    pub kind: ContactKind,
    pub position: Position,
    pub radius: f64,
}

/// Terminal mission result handed to the lifecycle collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub kind: OutcomeKind,
    pub success: bool,
    pub aborted: bool,
    pub final_score: u64,
    pub resources: ResourceReturn,
}

/// Resources carried back from the mission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceReturn {
    /// Rounds left per weapon slot (`None` for empty or energy slots).
    pub ammo: [Option<u32>; 3],
    pub weapons: [Option<String>; 3],
    pub missiles: u32,
    pub mines: u32,
    pub fuel: f64,
    pub hull: f64,
    pub cargo: Vec<CargoStack>,
}
