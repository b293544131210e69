//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz), one tick per display frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Playfield ---

/// Playfield width (pixels).
pub const FIELD_WIDTH: f64 = 800.0;

/// Playfield height (pixels).
pub const FIELD_HEIGHT: f64 = 600.0;

/// Distance outside the playfield at which entities spawn and are culled.
pub const FIELD_MARGIN: f64 = 80.0;

/// Maximum absolute depth coordinate.
pub const DEPTH_LIMIT: f64 = 100.0;

/// Two entities collide only if their depth differs by less than this.
pub const DEPTH_BAND: f64 = 30.0;

// --- Player ship ---

/// Fallback hull stats when the loadout names an unknown ship.
pub const DEFAULT_SHIP_RADIUS: f64 = 18.0;
pub const DEFAULT_MAX_ENERGY: f64 = 100.0;
pub const DEFAULT_MAX_FUEL: f64 = 100.0;
pub const DEFAULT_CARGO_CAPACITY: u32 = 20;

/// Player spawn position.
pub const PLAYER_START_X: f64 = FIELD_WIDTH / 2.0;
pub const PLAYER_START_Y: f64 = FIELD_HEIGHT - 80.0;

/// Full-thrust speed (pixels per second).
pub const PLAYER_SPEED: f64 = 300.0;

/// Thrust authority left once the fuel tank is dry.
pub const NO_FUEL_THRUST_FACTOR: f64 = 0.25;

/// Maximum hull integrity.
pub const HULL_MAX: f64 = 100.0;

/// Maximum capacitor charge.
pub const CAPACITOR_MAX: f64 = 100.0;

/// A locked capacitor unlocks once recharged to this level.
pub const CAPACITOR_UNLOCK_LEVEL: f64 = 25.0;

/// Capacitor recharge per second.
pub const CAPACITOR_RECHARGE_PER_SEC: f64 = 6.0;

/// Main energy regeneration per second.
pub const ENERGY_REGEN_PER_SEC: f64 = 4.0;

/// Regeneration factor while energy-depleted and under fire.
pub const ENERGY_REGEN_UNDER_FIRE_FACTOR: f64 = 0.25;

/// A hit within this window counts as "under fire".
pub const UNDER_FIRE_WINDOW_MS: f64 = 1500.0;

/// Shield regeneration is blocked for this long after a shatter.
pub const SHIELD_SHATTER_COOLDOWN_MS: f64 = 4000.0;

/// Weapon heat ceiling and decay.
pub const HEAT_MAX: f64 = 100.0;
pub const HEAT_DECAY_PER_SEC: f64 = 25.0;

/// Fuel burned per second at full thrust.
pub const THRUST_FUEL_PER_SEC: f64 = 0.5;

/// Fuel burned per second of travel at speed multiplier 1.0.
pub const TRAVEL_FUEL_PER_SEC: f64 = 0.2;

// --- Weapons ---

/// Projectiles per burst.
pub const BURST_COUNT: u32 = 3;

/// Angle between burst projectiles (radians).
pub const BURST_FAN_RAD: f64 = 0.12;

/// Burst mode fires at this fraction of the weapon's rate.
pub const BURST_RATE_FACTOR: f64 = 0.5;

/// Half-width of the uniform spread on the imprecise (main-energy) path.
pub const IMPRECISE_SPREAD_RAD: f64 = 0.18;

/// Overcharge damage: `1 + OVERCHARGE_DAMAGE_FACTOR * charge / 100`.
pub const OVERCHARGE_DAMAGE_FACTOR: f64 = 9.0;

/// Overcharge projectile size growth at full charge.
pub const OVERCHARGE_LENGTH_FACTOR: f64 = 2.0;
pub const OVERCHARGE_WIDTH_FACTOR: f64 = 1.0;

/// Overcharge capacitor drain: `base + variable * (charge / 100)^2`.
pub const OVERCHARGE_BASE_COST: f64 = 5.0;
pub const OVERCHARGE_VARIABLE_COST: f64 = 45.0;

/// Mega-shot charge duration that yields a full 100 charge.
pub const MEGA_SHOT_FULL_CHARGE_MS: f64 = 1500.0;

/// Minimum time between ordnance launches.
pub const ORDNANCE_COOLDOWN_MS: f64 = 400.0;

/// Homing missile parameters.
pub const MISSILE_LAUNCH_SPEED: f64 = 220.0;
pub const MISSILE_MAX_SPEED: f64 = 520.0;
pub const MISSILE_ACCEL: f64 = 600.0;
pub const MISSILE_TURN_RATE: f64 = 4.0;
pub const MISSILE_DAMAGE: f64 = 60.0;
pub const MISSILE_LIFE_TICKS: i32 = 240;
pub const MISSILE_RADIUS: f64 = 5.0;

/// Player mine parameters.
pub const MINE_DAMAGE: f64 = 90.0;
pub const MINE_LOCK_RANGE: f64 = 160.0;
pub const MINE_MAX_SPEED: f64 = 180.0;
pub const MINE_ACCEL: f64 = 240.0;
pub const MINE_TURN_RATE: f64 = 3.0;
pub const MINE_LIFE_TICKS: i32 = 900;
pub const MINE_RADIUS: f64 = 9.0;

/// Missiles restocked per cargo ordnance unit.
pub const ORDNANCE_MISSILES_PER_UNIT: u32 = 4;

// --- Combat ---

/// Damage multiplier for energy and EMP weapons.
pub const ENERGY_DAMAGE_MULTIPLIER: f64 = 6.0;

/// Damage multiplier for kinetic and projectile weapons.
pub const KINETIC_DAMAGE_MULTIPLIER: f64 = 2.23;

/// Chain reaction splash radius and peak damage.
pub const CHAIN_REACTION_RADIUS: f64 = 90.0;
pub const CHAIN_REACTION_DAMAGE: f64 = 20.0;

/// Splash damage floor at the edge of the chain radius (fraction of peak).
pub const CHAIN_REACTION_MIN_FRACTION: f64 = 0.25;

/// Score scaling per difficulty step above 1.
pub const KILL_SCORE_DIFFICULTY_STEP: f64 = 0.5;

/// Score for destroying an asteroid.
pub const ASTEROID_SCORE: u64 = 10;

/// Ram damage per asteroid size step.
pub const ASTEROID_RAM_DAMAGE: f64 = 4.0;

/// Ram damage from a non-boss enemy hull.
pub const ENEMY_RAM_DAMAGE: f64 = 6.0;

// --- Enemy AI ---

/// Per-tick velocity damping applied after forces are summed.
pub const AI_FRICTION: f64 = 0.9;

/// Gain pulling velocity toward the desired advance velocity.
pub const AI_STEER_GAIN: f64 = 0.3;

/// Within this range of the player, forward speed is reduced.
pub const AI_CAMPING_RADIUS: f64 = 160.0;
pub const AI_CAMPING_SPEED_FACTOR: f64 = 0.35;

/// Sideways lean toward the player: gain per px of x offset, and the cap as
/// a fraction of base speed.
pub const AI_LATERAL_GAIN: f64 = 0.01;
pub const AI_LATERAL_BIAS: f64 = 0.3;

/// Per-tick chance of starting a brief retreat.
pub const AI_RETREAT_CHANCE: f64 = 0.002;
pub const AI_RETREAT_TICKS: u32 = 45;

/// Peer separation.
pub const AI_SEPARATION_RADIUS: f64 = 60.0;
pub const AI_SEPARATION_STRENGTH: f64 = 12.0;

/// Asteroid avoidance.
pub const AI_AVOID_RADIUS: f64 = 70.0;
pub const AI_AVOID_STRENGTH: f64 = 10.0;
pub const AI_AVOID_DIFFICULTY_STEP: f64 = 0.5;

/// Pre-emptive depth dodge against fast asteroids.
pub const AI_DEPTH_DODGE_MIN_DIFFICULTY: u32 = 3;
pub const AI_FAST_ASTEROID_SPEED: f64 = 140.0;
pub const AI_DEPTH_DODGE_LOOKAHEAD_SECS: f64 = 1.0;
pub const AI_DEPTH_DODGE_SHIFT: f64 = 40.0;

/// Depth drifts back toward the player's plane at this rate (units/s).
pub const AI_DEPTH_RETURN_RATE: f64 = 20.0;

/// Enemy shield regeneration.
pub const ENEMY_SHIELD_REGEN_MIN_DIFFICULTY: u32 = 2;
pub const ENEMY_SHIELD_REGEN_GRACE_MS: f64 = 3000.0;

/// Enemy fire alignment window (horizontal pixels).
pub const ENEMY_FIRE_ALIGN: f64 = 120.0;

/// Mine laying.
pub const MINE_DROP_RANGE: f64 = 220.0;
pub const MINE_DROP_DWELL_MS: f64 = 1500.0;
pub const MINE_DROP_CHANCE: f64 = 0.02;
pub const ENEMY_MINE_DAMAGE: f64 = 6.0;
pub const ENEMY_MINE_LIFE_TICKS: i32 = 720;

// --- Boss AI ---

pub const BOSS_TRACK_GAIN: f64 = 0.02;
pub const BOSS_MAX_LATERAL_SPEED: f64 = 160.0;
pub const BOSS_DODGE_ALIGN: f64 = 40.0;
pub const BOSS_DODGE_CHANCE: f64 = 0.04;
pub const BOSS_DODGE_IMPULSE: f64 = 220.0;
pub const BOSS_HOVER_Y: f64 = 130.0;
pub const BOSS_HOVER_AMPLITUDE: f64 = 40.0;
pub const BOSS_HOVER_PERIOD_SECS: f64 = 4.0;
pub const BOSS_HOVER_GAIN: f64 = 0.05;
pub const BOSS_EDGE_MARGIN: f64 = 60.0;

// --- Mission ---

/// Travel duration at difficulty 1.
pub const BASE_TRAVEL_MS: f64 = 90_000.0;

/// Travel duration growth per difficulty step.
pub const TRAVEL_DIFFICULTY_STEP: f64 = 0.25;

/// Fixed phase countdowns (ticks).
pub const SCAVENGE_TICKS: u64 = 1200;
pub const GAP_TICKS: u64 = 600;
pub const OBSERVATION_TICKS: u64 = 360;

/// Player-controlled travel speed multiplier range.
pub const TRAVEL_SPEED_MIN: f64 = 0.5;
pub const TRAVEL_SPEED_MAX: f64 = 3.0;

/// Supported difficulty range.
pub const DIFFICULTY_MIN: u32 = 1;
pub const DIFFICULTY_MAX: u32 = 4;

/// Enemy spawn interval during travel: `max(MIN, BASE / difficulty)`.
pub const ENEMY_SPAWN_BASE_TICKS: u64 = 240;
pub const ENEMY_SPAWN_MIN_TICKS: u64 = 60;

/// Enemy population cap: `BASE + PER_DIFFICULTY * difficulty`.
pub const ENEMY_CAP_BASE: usize = 4;
pub const ENEMY_CAP_PER_DIFFICULTY: usize = 2;

/// Asteroid spawn intervals (ticks).
pub const ASTEROID_SPAWN_TICKS: u64 = 180;
pub const SCAVENGE_ASTEROID_SPAWN_TICKS: u64 = 40;

/// Boss hit point and shield scaling per difficulty step.
pub const BOSS_DIFFICULTY_STEP: f64 = 0.5;

// --- Resources ---

pub const REFUEL_THRESHOLD: f64 = 0.20;
pub const REFUEL_DURATION_MS: f64 = 3000.0;
pub const FUEL_PER_UNIT: f64 = 40.0;

pub const ENERGIZE_THRESHOLD: f64 = 0.15;
pub const ENERGIZE_DURATION_MS: f64 = 2000.0;

pub const REPAIR_THRESHOLD: f64 = 20.0;
pub const REPAIR_DURATION_MS: f64 = 4000.0;
pub const REPAIR_AMOUNT: f64 = 40.0;

pub const REHYDRATE_THRESHOLD: f64 = 0.20;
pub const REHYDRATE_DURATION_MS: f64 = 2500.0;
pub const REHYDRATE_FRACTION: f64 = 0.5;

// --- Pickups & alerts ---

pub const PICKUP_LIFE_TICKS: i32 = 600;
/// Chance an asteroid carries loot, outside and inside the scavenge field.
pub const ASTEROID_LOOT_CHANCE: f64 = 0.3;
pub const SCAVENGE_LOOT_CHANCE: f64 = 0.7;
/// Asteroid radius and hit points per size step.
pub const ASTEROID_RADIUS_STEP: f64 = 12.0;
pub const ASTEROID_HP_STEP: f64 = 15.0;
/// Asteroid drift speed range (px/s).
pub const ASTEROID_SPEED_MIN: f64 = 60.0;
pub const ASTEROID_SPEED_MAX: f64 = 180.0;
pub const PICKUP_RADIUS: f64 = 10.0;
pub const PICKUP_DRIFT_SPEED: f64 = 40.0;

/// How long an alert stays visible (ticks).
pub const ALERT_DURATION_TICKS: u64 = 120;
