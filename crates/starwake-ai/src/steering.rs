//! Non-boss enemy steering.
//!
//! Down-field advance with a bounded lean toward the player, brief retreats, peer separation, asteroid avoidance and
//! a depth dodge are summed into one force; the result is damped by
//! `AI_FRICTION` before the caller integrates it.

use glam::DVec2;
use rand::Rng;

use starwake_core::constants::*;
use starwake_core::enums::{AiState, EnemyKind};

use crate::profiles::get_profile;

/// An asteroid seen by the steering pass.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub position: DVec2,
    pub depth: f64,
    pub velocity: DVec2,
    pub radius: f64,
}

/// Input to the steering function for a single enemy.
pub struct EnemyContext<'a> {
    pub kind: EnemyKind,
    pub state: AiState,
    pub state_ticks: u32,
    pub position: DVec2,
    pub depth: f64,
    pub velocity: DVec2,
    pub player: DVec2,
    pub player_depth: f64,
    /// Base speed from the enemy definition (px/s).
    pub speed: f64,
    pub difficulty: u32,
    /// Positions of other enemies in the same plane.
    pub peers: &'a [DVec2],
    pub obstacles: &'a [Obstacle],
}

/// Output of one steering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringUpdate {
    pub velocity: DVec2,
    /// Depth rate (units/s).
    pub depth_velocity: f64,
    pub state: AiState,
    pub state_ticks: u32,
}

/// Compute the next velocity and behavior state for one enemy.
pub fn steer(ctx: &EnemyContext, rng: &mut impl Rng) -> SteeringUpdate {
    let profile = get_profile(ctx.kind);
    let (state, state_ticks) = next_state(ctx, profile.retreat_chance, rng);

    let distance = ctx.position.distance(ctx.player);

    let desired = match state {
        AiState::Retreat => DVec2::new(0.0, -ctx.speed),
        _ => {
            let factor = if distance < AI_CAMPING_RADIUS {
                profile.camping_speed_factor
            } else {
                1.0
            };
            DVec2::new(lateral_bias(ctx), ctx.speed * factor)
        }
    };

    let mut force = (desired - ctx.velocity) * AI_STEER_GAIN;
    force += separation(ctx.position, ctx.peers) * profile.separation_weight;
    force += avoidance(ctx.position, ctx.depth, ctx.obstacles, ctx.difficulty);

    let dodge = if profile.can_depth_dodge && ctx.difficulty >= AI_DEPTH_DODGE_MIN_DIFFICULTY {
        depth_dodge(ctx.position, ctx.depth, ctx.obstacles)
    } else {
        None
    };
    let depth_velocity = dodge.unwrap_or_else(|| depth_return(ctx.depth, ctx.player_depth));

    SteeringUpdate {
        velocity: (ctx.velocity + force) * AI_FRICTION,
        depth_velocity,
        state,
        state_ticks,
    }
}

/// Bounded sideways drift toward the player's x while still ahead of the
/// ship. Once past it the enemy keeps its line and leaves the field.
fn lateral_bias(ctx: &EnemyContext) -> f64 {
    if ctx.position.y >= ctx.player.y {
        return 0.0;
    }
    let pull = ((ctx.player.x - ctx.position.x) * AI_LATERAL_GAIN).clamp(-1.0, 1.0);
    pull * ctx.speed * AI_LATERAL_BIAS
}

fn next_state(ctx: &EnemyContext, retreat_chance: f64, rng: &mut impl Rng) -> (AiState, u32) {
    match ctx.state {
        AiState::Retreat if ctx.state_ticks > 1 => (AiState::Retreat, ctx.state_ticks - 1),
        AiState::Retreat => (AiState::Advance, 0),
        _ => {
            if rng.gen::<f64>() < retreat_chance {
                (AiState::Retreat, AI_RETREAT_TICKS)
            } else {
                (AiState::Advance, 0)
            }
        }
    }
}

/// Push away from nearby peers, stronger when closer.
pub fn separation(position: DVec2, peers: &[DVec2]) -> DVec2 {
    let mut force = DVec2::ZERO;
    for &peer in peers {
        let offset = position - peer;
        let d = offset.length();
        if d > 0.0 && d < AI_SEPARATION_RADIUS {
            force += offset / d * AI_SEPARATION_STRENGTH * (1.0 - d / AI_SEPARATION_RADIUS);
        }
    }
    force
}

/// Push away from same-plane asteroids; stronger at higher difficulty.
pub fn avoidance(position: DVec2, depth: f64, obstacles: &[Obstacle], difficulty: u32) -> DVec2 {
    let scale = 1.0 + AI_AVOID_DIFFICULTY_STEP * difficulty.saturating_sub(1) as f64;
    let mut force = DVec2::ZERO;
    for obstacle in obstacles {
        if (obstacle.depth - depth).abs() >= DEPTH_BAND {
            continue;
        }
        let reach = AI_AVOID_RADIUS + obstacle.radius;
        let offset = position - obstacle.position;
        let d = offset.length();
        if d > 0.0 && d < reach {
            force += offset / d * AI_AVOID_STRENGTH * scale * (1.0 - d / reach);
        }
    }
    force
}

/// Depth rate that clears a fast asteroid about to pass through this
/// position, if any.
pub fn depth_dodge(position: DVec2, depth: f64, obstacles: &[Obstacle]) -> Option<f64> {
    obstacles
        .iter()
        .filter(|o| o.velocity.length() >= AI_FAST_ASTEROID_SPEED)
        .filter(|o| (o.depth - depth).abs() < DEPTH_BAND)
        .find(|o| {
            let predicted = o.position + o.velocity * AI_DEPTH_DODGE_LOOKAHEAD_SECS;
            closest_approach(o.position, predicted, position) < AI_AVOID_RADIUS + o.radius
        })
        .map(|o| {
            let rate = AI_DEPTH_DODGE_SHIFT / AI_DEPTH_DODGE_LOOKAHEAD_SECS;
            if o.depth >= depth {
                -rate
            } else {
                rate
            }
        })
}

/// Drift back toward the player's plane without overshooting it.
pub fn depth_return(depth: f64, target: f64) -> f64 {
    let diff = target - depth;
    let max_rate = diff.abs() / DT;
    diff.signum() * AI_DEPTH_RETURN_RATE.min(max_rate)
}

fn closest_approach(start: DVec2, end: DVec2, point: DVec2) -> f64 {
    let segment = end - start;
    let len_sq = segment.length_squared();
    if len_sq == 0.0 {
        return start.distance(point);
    }
    let t = ((point - start).dot(segment) / len_sq).clamp(0.0, 1.0);
    (start + segment * t).distance(point)
}
