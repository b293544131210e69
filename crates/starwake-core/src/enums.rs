//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{GAP_TICKS, OBSERVATION_TICKS, SCAVENGE_TICKS};

/// Mission stage. Entered once each, in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MissionPhase {
    #[default]
    Travel,
    Scavenge,
    Gap,
    Observation,
    BossFight,
}

impl MissionPhase {
    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<MissionPhase> {
        match self {
            MissionPhase::Travel => Some(MissionPhase::Scavenge),
            MissionPhase::Scavenge => Some(MissionPhase::Gap),
            MissionPhase::Gap => Some(MissionPhase::Observation),
            MissionPhase::Observation => Some(MissionPhase::BossFight),
            MissionPhase::BossFight => None,
        }
    }

    /// Countdown loaded on entering this phase (ticks). Travel is time-driven
    /// and the boss fight is open-ended, so both start at zero.
    pub fn initial_countdown(self) -> u64 {
        match self {
            MissionPhase::Scavenge => SCAVENGE_TICKS,
            MissionPhase::Gap => GAP_TICKS,
            MissionPhase::Observation => OBSERVATION_TICKS,
            MissionPhase::Travel | MissionPhase::BossFight => 0,
        }
    }

    /// Short HUD banner for the phase.
    pub fn banner(self) -> &'static str {
        match self {
            MissionPhase::Travel => "IN TRANSIT",
            MissionPhase::Scavenge => "ENTERING SCAVENGE FIELD",
            MissionPhase::Gap => "CLEAR SPACE AHEAD",
            MissionPhase::Observation => "STAR SYSTEM IN SIGHT",
            MissionPhase::BossFight => "HOSTILE CAPITAL SHIP INBOUND",
        }
    }
}

/// Top-level run state of the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Active,
    Paused,
    Ended,
}

/// Damage type carried by a weapon or projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    #[default]
    Kinetic,
    Projectile,
    Energy,
    Emp,
    Explosive,
    Thermal,
}

/// Broad damage category used by shield immunity and multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCategory {
    Kinetic,
    Energy,
    Other,
}

impl DamageType {
    pub fn category(self) -> DamageCategory {
        match self {
            DamageType::Kinetic | DamageType::Projectile => DamageCategory::Kinetic,
            DamageType::Energy | DamageType::Emp => DamageCategory::Energy,
            DamageType::Explosive | DamageType::Thermal => DamageCategory::Other,
        }
    }
}

/// Which damage category a shield fully blocks while it is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShieldImmunity {
    #[default]
    None,
    Kinetic,
    Energy,
}

impl ShieldImmunity {
    pub fn blocks(self, category: DamageCategory) -> bool {
        matches!(
            (self, category),
            (ShieldImmunity::Kinetic, DamageCategory::Kinetic)
                | (ShieldImmunity::Energy, DamageCategory::Energy)
        )
    }
}

/// Shield color key shown by the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShieldColor {
    #[default]
    Blue,
    Red,
    Green,
    Gold,
}

/// Enemy hull class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Scout,
    Fighter,
    Heavy,
    Boss,
}

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Pressing forward toward the player.
    #[default]
    Advance,
    /// Brief pull-back away from the player.
    Retreat,
    /// Boss hovering and tracking.
    Hover,
    /// Boss dodge impulse in progress.
    Dodge,
}

/// Weapon fire mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Normal,
    /// Capacitor-charged power shot.
    Overcharge,
    /// Fan of projectiles at a reduced rate.
    Burst,
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    #[default]
    Player,
    Enemy,
}

/// Projectile body type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Bolt,
    Missile,
    Mine,
}

/// Asteroid size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Size step (1..=3) used for radius, hit points and ram damage.
    pub fn scale(self) -> f64 {
        match self {
            AsteroidSize::Small => 1.0,
            AsteroidSize::Medium => 2.0,
            AsteroidSize::Large => 3.0,
        }
    }
}

/// Asteroid material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidVariant {
    #[default]
    Rock,
    Ice,
    Metal,
    Crystal,
}

/// Stackable cargo item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoKind {
    Fuel,
    EnergyCell,
    RepairKit,
    Ammo,
    Ordnance,
    Coolant,
    Commodity,
}

/// Timed cargo-driven resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceOp {
    Refuel,
    Energize,
    Repair,
    Reload,
    Rehydrate,
}

impl ResourceOp {
    /// Cargo item consumed when the operation completes.
    pub fn cargo(self) -> CargoKind {
        match self {
            ResourceOp::Refuel => CargoKind::Fuel,
            ResourceOp::Energize => CargoKind::EnergyCell,
            ResourceOp::Repair => CargoKind::RepairKit,
            ResourceOp::Reload => CargoKind::Ammo,
            ResourceOp::Rehydrate => CargoKind::Coolant,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceOp::Refuel => "REFUEL",
            ResourceOp::Energize => "ENERGY INJECTION",
            ResourceOp::Repair => "HULL REPAIR",
            ResourceOp::Reload => "RELOAD",
            ResourceOp::Rehydrate => "SHIELD REHYDRATION",
        }
    }
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// How a mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Terminal boss destroyed.
    Victory,
    /// Hull reached zero; the pilot is recovered.
    Rescue,
    /// Player abandoned the mission.
    Aborted,
}

/// Contact category for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContactKind {
    Enemy,
    Boss,
    Asteroid,
    PlayerProjectile,
    EnemyProjectile,
    Pickup,
}
