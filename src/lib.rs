//! Neon Drift - a dodge-and-collect arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation engine (tick pipeline, entities, collisions, game state)
//! - `session`: Frame driver that persists best score on game over
//! - `persistence`: Key/value storage backends
//! - `settings`: Feedback settings and run modifiers
//! - `highscores`: Persisted best score

pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::BestScore;
pub use session::Session;
pub use settings::{Modifiers, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest wall-clock delta accepted per update (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default field dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_TINY_RADIUS: f32 = 8.0;
    pub const PLAYER_SPEED: f32 = 320.0;

    /// Dash tuning
    pub const DASH_DURATION: f32 = 0.24;
    pub const DASH_COOLDOWN: f32 = 4.2;
    pub const DASH_MULTIPLIER: f32 = 2.6;
    /// Cooldown slack allowed when triggering a dash
    pub const DASH_READY_EPSILON: f32 = 0.05;

    /// Power-up durations (seconds)
    pub const SHIELD_DURATION: f32 = 6.0;
    pub const MAGNET_DURATION: f32 = 8.0;
    pub const SIZE_DOWN_DURATION: f32 = 10.0;
    pub const FREEZE_DURATION: f32 = 3.0;

    /// Slow motion
    pub const SLOW_MOTION_FACTOR: f32 = 0.3;
    pub const SLOW_MOTION_RECOVERY: f32 = 2.0;
    pub const LAST_CHANCE_DURATION: f32 = 1.5;
    pub const COMBO_BROKEN_DURATION: f32 = 1.0;

    /// Lives
    pub const MAX_LIVES: u8 = 5;
    pub const STARTING_LIVES: u8 = 3;
    pub const HARDCORE_LIVES: u8 = 1;

    /// Multiplier bounds and steps
    pub const MIN_MULTIPLIER: f32 = 1.0;
    pub const MAX_MULTIPLIER: f32 = 4.0;
    pub const ORB_MULTIPLIER_STEP: f32 = 0.2;
    pub const SHIELD_MULTIPLIER_PENALTY: f32 = 0.4;

    /// Score rates and awards
    pub const SCORE_PER_SECOND: f64 = 12.0;
    pub const ORB_SCORE: f64 = 60.0;
    pub const GHOST_KILL_SCORE: f64 = 100.0;
    /// Every Nth streak grants a life
    pub const STREAK_LIFE_INTERVAL: u32 = 10;

    /// Camera shake amplitude requested on damage
    pub const DAMAGE_SHAKE: f32 = 10.0;
    pub const SHAKE_DECAY: f32 = 5.0;
}

/// Direction from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Clamp a point into a field so a circle of `radius` stays fully inside
#[inline]
pub fn clamp_to_field(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.min(width - radius).max(radius),
        pos.y.min(height - radius).max(radius),
    )
}
