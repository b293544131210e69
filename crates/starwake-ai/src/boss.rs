//! Boss evasive maneuvering.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use starwake_core::constants::*;
use starwake_core::enums::AiState;

use crate::steering::SteeringUpdate;

/// Ticks a dodge impulse lasts before the boss resumes tracking.
pub const BOSS_DODGE_TICKS: u32 = 20;

/// Input to the boss steering function.
pub struct BossContext {
    pub state: AiState,
    pub state_ticks: u32,
    pub position: DVec2,
    pub velocity: DVec2,
    pub player: DVec2,
    /// Mission time, drives the hover oscillation.
    pub elapsed_secs: f64,
}

/// Lateral tracking, dodge impulse, vertical hover and edge bounce.
pub fn steer_boss(ctx: &BossContext, rng: &mut impl Rng) -> SteeringUpdate {
    let dx = ctx.player.x - ctx.position.x;
    let mut vx = ctx.velocity.x;
    let (mut state, mut state_ticks) = (ctx.state, ctx.state_ticks);

    match ctx.state {
        AiState::Dodge if ctx.state_ticks > 1 => state_ticks -= 1,
        AiState::Dodge => {
            state = AiState::Hover;
            state_ticks = 0;
        }
        _ => {
            state = AiState::Hover;
            if dx.abs() < BOSS_DODGE_ALIGN && rng.gen::<f64>() < BOSS_DODGE_CHANCE {
                // Break toward the roomier side of the field.
                let dir = if ctx.position.x < FIELD_WIDTH / 2.0 { 1.0 } else { -1.0 };
                vx = dir * BOSS_DODGE_IMPULSE;
                state = AiState::Dodge;
                state_ticks = BOSS_DODGE_TICKS;
            } else {
                let target = (dx * BOSS_TRACK_GAIN * TICK_RATE as f64)
                    .clamp(-BOSS_MAX_LATERAL_SPEED, BOSS_MAX_LATERAL_SPEED);
                vx += (target - vx) * AI_STEER_GAIN;
            }
        }
    }

    if (ctx.position.x < BOSS_EDGE_MARGIN && vx < 0.0)
        || (ctx.position.x > FIELD_WIDTH - BOSS_EDGE_MARGIN && vx > 0.0)
    {
        vx = -vx;
    }

    let phase = TAU * ctx.elapsed_secs / BOSS_HOVER_PERIOD_SECS;
    let hover_y = BOSS_HOVER_Y + BOSS_HOVER_AMPLITUDE * phase.sin();
    let vy = (hover_y - ctx.position.y) * BOSS_HOVER_GAIN * TICK_RATE as f64;

    let vx = if state == AiState::Dodge { vx } else { vx * AI_FRICTION };

    SteeringUpdate {
        velocity: DVec2::new(vx, vy),
        depth_velocity: 0.0,
        state,
        state_ticks,
    }
}
