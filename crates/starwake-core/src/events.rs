//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Player weapon discharged.
    ShotFired {
        slot: usize,
        mode: FireMode,
        projectiles: u32,
    },
    MissileLaunched,
    MineDropped,
    /// A player shield pool hit zero.
    ShieldShattered { pool: usize },
    /// Player took damage (after shields).
    PlayerHit { hull_damage: f64, absorbed: f64 },
    PlayerDestroyed,
    EnemyDestroyed {
        kind: EnemyKind,
        score: u64,
        /// Killed by chain-reaction splash.
        chain: bool,
    },
    BossDefeated { def_id: String },
    AsteroidDestroyed { size: AsteroidSize },
    PickupCollected { kind: CargoKind, quantity: u32 },
    PhaseChanged { from: MissionPhase, to: MissionPhase },
    OperationStarted { op: ResourceOp, manual: bool },
    OperationCompleted { op: ResourceOp },
}

/// Transient message for the HUD alert line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
    pub tick: u64,
}
