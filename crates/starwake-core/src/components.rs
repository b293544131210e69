//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks the player's ship entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks a hostile ship (any enemy kind, boss included).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Marks the phase boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boss;

/// One of the player's shield pools, bound to a shield definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldPool {
    pub def_id: String,
    pub color: ShieldColor,
    pub current: f64,
    pub capacity: f64,
    pub immunity: ShieldImmunity,
    /// Fraction of incoming damage mitigated while the pool holds (0..1).
    pub resistance: f64,
    pub regen_per_sec: f64,
    /// Main energy drawn per shield point regenerated.
    pub energy_cost_per_point: f64,
    /// Regeneration is blocked until this simulation time (ms).
    pub regen_blocked_until_ms: f64,
}

/// Ammo magazine for an ammo-based weapon slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magazine {
    pub rounds: u32,
    pub capacity: u32,
    /// Set while a reload is in progress.
    pub reload_deadline_ms: Option<f64>,
}

/// An equipped weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSlot {
    pub weapon_id: String,
    /// Present for ammo-based weapons only.
    pub magazine: Option<Magazine>,
    pub last_fire_ms: Option<f64>,
    /// Presentation-only heat accumulator (0..HEAT_MAX).
    pub heat: f64,
}

/// A stack of one cargo item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoStack {
    pub kind: CargoKind,
    pub quantity: u32,
}

/// Missiles and mines carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ordnance {
    pub missiles: u32,
    pub mines: u32,
    pub last_launch_ms: Option<f64>,
}

/// A timed resource operation in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveOperation {
    pub op: ResourceOp,
    /// Started by an explicit player trigger rather than a threshold.
    pub manual: bool,
    pub started_ms: f64,
    pub completes_ms: f64,
    /// Weapon slot being reloaded (Reload only).
    pub slot: Option<usize>,
}

/// The player vessel and all of its resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub def_id: String,
    pub radius: f64,
    /// Hull integrity, 0..=HULL_MAX.
    pub hull: f64,
    /// Index 0 is the primary pool, index 1 the secondary.
    pub shields: [Option<ShieldPool>; 2],
    pub shields_enabled: bool,
    pub energy: f64,
    pub max_energy: f64,
    pub energy_depleted: bool,
    /// Power-shot charge pool, 0..=CAPACITOR_MAX.
    pub capacitor: f64,
    pub capacitor_locked: bool,
    pub fuel: f64,
    pub max_fuel: f64,
    pub weapons: [Option<WeaponSlot>; 3],
    pub cargo: Vec<CargoStack>,
    /// Total cargo units the hold can carry.
    pub cargo_capacity: u32,
    pub ordnance: Ordnance,
    pub operations: Vec<ActiveOperation>,
    pub last_hit_ms: Option<f64>,
}

/// Hostile ship state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    pub kind: EnemyKind,
    pub def_id: String,
    pub ai_state: AiState,
    /// Ticks remaining in a timed AI state (retreat, dodge).
    pub state_ticks: u32,
    pub speed: f64,
    pub radius: f64,
    pub base_score: u64,
    /// Weapon used for attacks, if armed.
    pub weapon_id: Option<String>,
    pub lays_mines: bool,
    pub last_fired_ms: Option<f64>,
    pub last_damaged_ms: Option<f64>,
    /// Continuous time spent within mine-drop range of the player.
    pub near_player_ms: f64,
}

/// Hit points of a destructible ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
    pub max_hp: f64,
}

/// Enemy shield pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyShield {
    pub current: f64,
    pub capacity: f64,
    pub immunity: ShieldImmunity,
    pub regen_per_sec: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub kind: ProjectileKind,
    pub damage: f64,
    pub damage_type: DamageType,
    /// Remaining life in ticks; culled at <= 0.
    pub life_ticks: i32,
    pub radius: f64,
    pub length: f64,
    pub width: f64,
}

/// Loot descriptor carried by an asteroid or pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub kind: CargoKind,
    pub quantity: u32,
}

/// Destructible obstacle and resource node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub hp: f64,
    pub max_hp: f64,
    pub size: AsteroidSize,
    pub variant: AsteroidVariant,
    pub radius: f64,
    pub loot: Option<Loot>,
}

/// Collectible dropped by a destroyed asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub loot: Loot,
    pub life_ticks: i32,
    pub radius: f64,
}
