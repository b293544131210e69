//! Static definition data: weapons, shields, enemies, ships, and loadouts.
//!
//! A `Catalog` is loaded once before a mission (built-in or from JSON) and is
//! read-only for the lifetime of the simulation. Lookups return `Option`;
//! a missing definition is treated by callers as "nothing equipped".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::components::CargoStack;
use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::enums::*;
use crate::error::ConfigError;

/// How a weapon is powered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PowerSource {
    /// Finite magazine reloaded from cargo.
    Ammo { magazine: u32, reload_ms: f64 },
    /// Draws capacitor first, main energy as an imprecise fallback.
    Energy { cost: f64 },
}

/// A weapon definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    pub damage_type: DamageType,
    pub damage: f64,
    /// Shots per second.
    pub fire_rate: f64,
    pub projectile_speed: f64,
    pub projectile_life_ticks: i32,
    pub radius: f64,
    pub length: f64,
    pub width: f64,
    pub power: PowerSource,
    pub heat_per_shot: f64,
    /// Projectiles per attack (enemy patterns); players fire one per shot.
    #[serde(default = "default_pattern_count")]
    pub pattern_count: u32,
    /// Total fan angle of a multi-projectile pattern (radians).
    #[serde(default)]
    pub pattern_spread: f64,
}

fn default_pattern_count() -> u32 {
    1
}

/// A shield definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldDef {
    pub id: String,
    pub color: ShieldColor,
    pub capacity: f64,
    pub regen_per_sec: f64,
    pub energy_cost_per_point: f64,
    #[serde(default)]
    pub immunity: ShieldImmunity,
    #[serde(default)]
    pub resistance: f64,
}

/// Shield carried by an enemy definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyShieldDef {
    pub capacity: f64,
    pub immunity: ShieldImmunity,
    pub regen_per_sec: f64,
}

/// An enemy definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: String,
    pub kind: EnemyKind,
    pub hp: f64,
    #[serde(default)]
    pub shield: Option<EnemyShieldDef>,
    pub speed: f64,
    pub radius: f64,
    pub base_score: u64,
    #[serde(default)]
    pub weapon_id: Option<String>,
    #[serde(default)]
    pub lays_mines: bool,
}

/// A player hull definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDef {
    pub id: String,
    pub max_energy: f64,
    pub max_fuel: f64,
    pub radius: f64,
    pub cargo_capacity: u32,
}

/// All definitions available to a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub ships: Vec<ShipDef>,
    pub weapons: Vec<WeaponDef>,
    pub shields: Vec<ShieldDef>,
    pub enemies: Vec<EnemyDef>,
}

/// What the player brings into a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub ship_id: String,
    pub weapons: [Option<String>; 3],
    /// Index 0 primary, index 1 secondary.
    pub shields: [Option<String>; 2],
    pub cargo: Vec<CargoStack>,
    pub missiles: u32,
    pub mines: u32,
    /// Starting fuel as a fraction of the tank.
    #[serde(default = "default_fill")]
    pub fuel_fill: f64,
}

fn default_fill() -> f64 {
    1.0
}

impl Catalog {
    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponDef> {
        self.weapons.iter().find(|w| w.id == id)
    }

    pub fn shield(&self, id: &str) -> Option<&ShieldDef> {
        self.shields.iter().find(|s| s.id == id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyDef> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn ship(&self, id: &str) -> Option<&ShipDef> {
        self.ships.iter().find(|s| s.id == id)
    }

    /// Non-boss enemies eligible for travel spawns.
    pub fn regular_enemies(&self) -> Vec<&EnemyDef> {
        self.enemies
            .iter()
            .filter(|e| e.kind != EnemyKind::Boss)
            .collect()
    }

    /// Boss roster for the final phase.
    pub fn boss_roster(&self) -> Vec<&EnemyDef> {
        self.enemies
            .iter()
            .filter(|e| e.kind == EnemyKind::Boss)
            .collect()
    }

    /// Check ids are unique, values are in range and references resolve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unique_ids("ship", self.ships.iter().map(|s| s.id.as_str()))?;
        unique_ids("weapon", self.weapons.iter().map(|w| w.id.as_str()))?;
        unique_ids("shield", self.shields.iter().map(|s| s.id.as_str()))?;
        unique_ids("enemy", self.enemies.iter().map(|e| e.id.as_str()))?;

        for w in &self.weapons {
            positive(&w.id, "fire_rate", w.fire_rate)?;
            non_negative(&w.id, "damage", w.damage)?;
            positive(&w.id, "projectile_speed", w.projectile_speed)?;
            match w.power {
                PowerSource::Ammo { magazine, reload_ms } => {
                    positive(&w.id, "magazine", magazine as f64)?;
                    non_negative(&w.id, "reload_ms", reload_ms)?;
                }
                PowerSource::Energy { cost } => non_negative(&w.id, "cost", cost)?,
            }
        }
        for s in &self.shields {
            positive(&s.id, "capacity", s.capacity)?;
            if !(0.0..1.0).contains(&s.resistance) {
                return Err(ConfigError::InvalidValue {
                    id: s.id.clone(),
                    field: "resistance",
                    value: s.resistance,
                });
            }
        }
        for e in &self.enemies {
            positive(&e.id, "hp", e.hp)?;
            positive(&e.id, "radius", e.radius)?;
            if let Some(weapon_id) = &e.weapon_id {
                if self.weapon(weapon_id).is_none() {
                    return Err(ConfigError::UnknownReference {
                        id: e.id.clone(),
                        field: "weapon_id",
                        target: weapon_id.clone(),
                    });
                }
            }
        }
        for s in &self.ships {
            positive(&s.id, "max_energy", s.max_energy)?;
            positive(&s.id, "max_fuel", s.max_fuel)?;
            positive(&s.id, "radius", s.radius)?;
            if s.radius >= FIELD_WIDTH.min(FIELD_HEIGHT) / 2.0 {
                return Err(ConfigError::InvalidValue {
                    id: s.id.clone(),
                    field: "radius",
                    value: s.radius,
                });
            }
        }
        if self.boss_roster().is_empty() {
            return Err(ConfigError::EmptyBossRoster);
        }
        Ok(())
    }
}

fn unique_ids<'a>(
    family: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                family,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn positive(id: &str, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            id: id.to_string(),
            field,
            value,
        })
    }
}

fn non_negative(id: &str, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            id: id.to_string(),
            field,
            value,
        })
    }
}

impl Default for Catalog {
    /// Built-in roster used when no catalog file is supplied.
    fn default() -> Self {
        Self {
            ships: vec![ShipDef {
                id: "corvette".into(),
                max_energy: 100.0,
                max_fuel: 100.0,
                radius: 18.0,
                cargo_capacity: 30,
            }],
            weapons: vec![
                WeaponDef {
                    id: "pulse-laser".into(),
                    name: "Pulse Laser".into(),
                    damage_type: DamageType::Energy,
                    damage: 4.0,
                    fire_rate: 6.0,
                    projectile_speed: 700.0,
                    projectile_life_ticks: 60,
                    radius: 4.0,
                    length: 14.0,
                    width: 2.0,
                    power: PowerSource::Energy { cost: 3.0 },
                    heat_per_shot: 4.0,
                    pattern_count: 1,
                    pattern_spread: 0.0,
                },
                WeaponDef {
                    id: "autocannon".into(),
                    name: "Autocannon".into(),
                    damage_type: DamageType::Kinetic,
                    damage: 3.0,
                    fire_rate: 8.0,
                    projectile_speed: 650.0,
                    projectile_life_ticks: 60,
                    radius: 3.0,
                    length: 6.0,
                    width: 3.0,
                    power: PowerSource::Ammo {
                        magazine: 40,
                        reload_ms: 2000.0,
                    },
                    heat_per_shot: 3.0,
                    pattern_count: 1,
                    pattern_spread: 0.0,
                },
                WeaponDef {
                    id: "ion-lance".into(),
                    name: "Ion Lance".into(),
                    damage_type: DamageType::Emp,
                    damage: 8.0,
                    fire_rate: 1.5,
                    projectile_speed: 800.0,
                    projectile_life_ticks: 50,
                    radius: 6.0,
                    length: 24.0,
                    width: 4.0,
                    power: PowerSource::Energy { cost: 12.0 },
                    heat_per_shot: 15.0,
                    pattern_count: 1,
                    pattern_spread: 0.0,
                },
                WeaponDef {
                    id: "rail-driver".into(),
                    name: "Rail Driver".into(),
                    damage_type: DamageType::Projectile,
                    damage: 12.0,
                    fire_rate: 2.0,
                    projectile_speed: 900.0,
                    projectile_life_ticks: 45,
                    radius: 4.0,
                    length: 18.0,
                    width: 3.0,
                    power: PowerSource::Ammo {
                        magazine: 8,
                        reload_ms: 3000.0,
                    },
                    heat_per_shot: 10.0,
                    pattern_count: 1,
                    pattern_spread: 0.0,
                },
                WeaponDef {
                    id: "raider-blaster".into(),
                    name: "Raider Blaster".into(),
                    damage_type: DamageType::Energy,
                    damage: 2.0,
                    fire_rate: 0.8,
                    projectile_speed: 320.0,
                    projectile_life_ticks: 150,
                    radius: 4.0,
                    length: 10.0,
                    width: 3.0,
                    power: PowerSource::Energy { cost: 0.0 },
                    heat_per_shot: 0.0,
                    pattern_count: 1,
                    pattern_spread: 0.0,
                },
                WeaponDef {
                    id: "dreadnought-battery".into(),
                    name: "Dreadnought Battery".into(),
                    damage_type: DamageType::Kinetic,
                    damage: 3.0,
                    fire_rate: 1.2,
                    projectile_speed: 300.0,
                    projectile_life_ticks: 180,
                    radius: 5.0,
                    length: 8.0,
                    width: 5.0,
                    power: PowerSource::Energy { cost: 0.0 },
                    heat_per_shot: 0.0,
                    pattern_count: 5,
                    pattern_spread: 0.6,
                },
                WeaponDef {
                    id: "warden-array".into(),
                    name: "Warden Array".into(),
                    damage_type: DamageType::Energy,
                    damage: 2.5,
                    fire_rate: 2.0,
                    projectile_speed: 360.0,
                    projectile_life_ticks: 160,
                    radius: 4.0,
                    length: 12.0,
                    width: 3.0,
                    power: PowerSource::Energy { cost: 0.0 },
                    heat_per_shot: 0.0,
                    pattern_count: 3,
                    pattern_spread: 0.3,
                },
            ],
            shields: vec![
                ShieldDef {
                    id: "aegis-blue".into(),
                    color: ShieldColor::Blue,
                    capacity: 100.0,
                    regen_per_sec: 5.0,
                    energy_cost_per_point: 0.5,
                    immunity: ShieldImmunity::Kinetic,
                    resistance: 0.0,
                },
                ShieldDef {
                    id: "ember-red".into(),
                    color: ShieldColor::Red,
                    capacity: 80.0,
                    regen_per_sec: 6.0,
                    energy_cost_per_point: 0.5,
                    immunity: ShieldImmunity::Energy,
                    resistance: 0.0,
                },
                ShieldDef {
                    id: "prism-green".into(),
                    color: ShieldColor::Green,
                    capacity: 120.0,
                    regen_per_sec: 4.0,
                    energy_cost_per_point: 0.4,
                    immunity: ShieldImmunity::None,
                    resistance: 0.25,
                },
            ],
            enemies: vec![
                EnemyDef {
                    id: "scout".into(),
                    kind: EnemyKind::Scout,
                    hp: 20.0,
                    shield: None,
                    speed: 140.0,
                    radius: 14.0,
                    base_score: 100,
                    weapon_id: None,
                    lays_mines: false,
                },
                EnemyDef {
                    id: "fighter".into(),
                    kind: EnemyKind::Fighter,
                    hp: 40.0,
                    shield: Some(EnemyShieldDef {
                        capacity: 20.0,
                        immunity: ShieldImmunity::Kinetic,
                        regen_per_sec: 2.0,
                    }),
                    speed: 110.0,
                    radius: 16.0,
                    base_score: 150,
                    weapon_id: Some("raider-blaster".into()),
                    lays_mines: false,
                },
                EnemyDef {
                    id: "heavy".into(),
                    kind: EnemyKind::Heavy,
                    hp: 120.0,
                    shield: Some(EnemyShieldDef {
                        capacity: 60.0,
                        immunity: ShieldImmunity::Energy,
                        regen_per_sec: 3.0,
                    }),
                    speed: 70.0,
                    radius: 24.0,
                    base_score: 300,
                    weapon_id: Some("raider-blaster".into()),
                    lays_mines: true,
                },
                EnemyDef {
                    id: "dreadnought".into(),
                    kind: EnemyKind::Boss,
                    hp: 2000.0,
                    shield: Some(EnemyShieldDef {
                        capacity: 800.0,
                        immunity: ShieldImmunity::Energy,
                        regen_per_sec: 10.0,
                    }),
                    speed: 90.0,
                    radius: 60.0,
                    base_score: 5000,
                    weapon_id: Some("dreadnought-battery".into()),
                    lays_mines: false,
                },
                EnemyDef {
                    id: "warden".into(),
                    kind: EnemyKind::Boss,
                    hp: 1600.0,
                    shield: Some(EnemyShieldDef {
                        capacity: 1000.0,
                        immunity: ShieldImmunity::Kinetic,
                        regen_per_sec: 12.0,
                    }),
                    speed: 110.0,
                    radius: 55.0,
                    base_score: 5000,
                    weapon_id: Some("warden-array".into()),
                    lays_mines: false,
                },
            ],
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            ship_id: "corvette".into(),
            weapons: [
                Some("pulse-laser".into()),
                Some("autocannon".into()),
                Some("ion-lance".into()),
            ],
            shields: [Some("prism-green".into()), Some("aegis-blue".into())],
            cargo: vec![
                CargoStack {
                    kind: CargoKind::Fuel,
                    quantity: 2,
                },
                CargoStack {
                    kind: CargoKind::EnergyCell,
                    quantity: 2,
                },
                CargoStack {
                    kind: CargoKind::RepairKit,
                    quantity: 1,
                },
                CargoStack {
                    kind: CargoKind::Ammo,
                    quantity: 3,
                },
                CargoStack {
                    kind: CargoKind::Coolant,
                    quantity: 1,
                },
            ],
            missiles: 6,
            mines: 3,
            fuel_fill: 1.0,
        }
    }
}
