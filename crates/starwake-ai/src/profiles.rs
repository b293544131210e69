//! Kind-specific behavioral profiles.
//!
//! Speed, radius and hit points come from enemy definitions; the profile
//! carries how a kind behaves.

use starwake_core::constants::*;
use starwake_core::enums::EnemyKind;

/// Behavioral profile for an enemy kind.
pub struct EnemyBehaviorProfile {
    /// Per-tick chance of starting a retreat while advancing.
    pub retreat_chance: f64,
    /// Forward speed factor inside the camping radius.
    pub camping_speed_factor: f64,
    /// Minimum time between shots (ms); `None` for kinds that never shoot.
    pub fire_interval_ms: Option<f64>,
    /// Weight of peer separation.
    pub separation_weight: f64,
    /// Whether the kind may use the pre-emptive depth dodge.
    pub can_depth_dodge: bool,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: EnemyKind) -> EnemyBehaviorProfile {
    match kind {
        EnemyKind::Scout => EnemyBehaviorProfile {
            retreat_chance: AI_RETREAT_CHANCE * 2.0,
            camping_speed_factor: AI_CAMPING_SPEED_FACTOR * 1.5,
            fire_interval_ms: None,
            separation_weight: 1.0,
            can_depth_dodge: true,
        },
        EnemyKind::Fighter => EnemyBehaviorProfile {
            retreat_chance: AI_RETREAT_CHANCE,
            camping_speed_factor: AI_CAMPING_SPEED_FACTOR,
            fire_interval_ms: Some(1800.0),
            separation_weight: 1.0,
            can_depth_dodge: true,
        },
        EnemyKind::Heavy => EnemyBehaviorProfile {
            retreat_chance: AI_RETREAT_CHANCE * 0.5,
            camping_speed_factor: AI_CAMPING_SPEED_FACTOR * 0.5,
            fire_interval_ms: Some(2600.0),
            separation_weight: 1.5,
            can_depth_dodge: false,
        },
        // Bosses steer through `boss::steer_boss` and fire their weapon's
        // own rate; only the separation weight applies to them.
        EnemyKind::Boss => EnemyBehaviorProfile {
            retreat_chance: 0.0,
            camping_speed_factor: 1.0,
            fire_interval_ms: None,
            separation_weight: 0.0,
            can_depth_dodge: false,
        },
    }
}
