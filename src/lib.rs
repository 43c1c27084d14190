//! Pose Volley - a two-player, pose-controlled volleyball arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, players, match flow)
//! - `config`: Match configuration and the spatial scale factor
//! - `input`: Latest-sample pose buffer shared with an inference thread
//! - `view`: Per-tick snapshot for a presentation shell

pub mod config;
pub mod error;
pub mod input;
pub mod sim;
pub mod view;

pub use config::{GameConfig, ScaleConfig};
pub use error::ConfigError;
pub use input::{PoseFeed, assign_poses};
pub use view::FrameView;

/// Game configuration constants
///
/// Spatial values are for the reference 800x600 field at scale 1 and are
/// multiplied by [`ScaleConfig`] where used. Speeds are per tick.
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Reference field size
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Match rules
    pub const WIN_SCORE: u32 = 15;
    pub const GAME_TIME_SECS: f32 = 20.0;
    pub const READY_COUNTDOWN_SECS: f32 = 3.0;
    pub const WIN_COUNTDOWN_SECS: f32 = 3.0;

    /// Pose samples must beat this confidence to move a player
    pub const MIN_CONFIDENCE: f32 = 0.3;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 36.4;
    pub const GRAVITY: f32 = 0.4;
    /// Velocity kept after a floor or ceiling bounce
    pub const BOUNCE_COEFFICIENT: f32 = 0.75;
    pub const BALL_MAX_SPEED: f32 = 21.0;
    pub const TRAIL_LENGTH: usize = 8;
    pub const CRASH_EFFECT_TICKS: u32 = 20;
    pub const HIT_COOLDOWN_MS: f32 = 200.0;

    /// Serve launch: horizontal speed range and upward speed
    pub const SERVE_SPEED_X_MIN: f32 = 3.0;
    pub const SERVE_SPEED_X_MAX: f32 = 5.0;
    pub const SERVE_SPEED_Y: f32 = -8.0;

    /// Rally hit: fixed upward speed, horizontal boost range
    pub const HIT_SPEED_Y: f32 = -10.0;
    pub const HIT_BOOST_MIN: f32 = 1.2;
    pub const HIT_BOOST_MAX: f32 = 1.5;
    /// Horizontal base speed used when a hit lands on a ball with no x motion
    pub const MIN_HIT_SPEED_X: f32 = 3.0;

    /// Court geometry
    pub const FLOOR_OFFSET: f32 = 50.0;
    pub const NET_WIDTH: f32 = 20.0;
    pub const NET_HEIGHT: f32 = 240.0;
    pub const NET_CLEARANCE: f32 = 5.0;
    pub const NET_BOUNCE: f32 = 0.8;
    pub const NET_FRICTION: f32 = 0.9;

    /// Serve anchors and start zones, as fractions of the field
    pub const SERVE_X_FRAC: f32 = 0.25;
    pub const SERVE_Y_FRAC: f32 = 0.35;
    pub const ZONE_Y_FRAC: f32 = 0.5;
    pub const START_ZONE_RADIUS: f32 = 100.0;

    /// Player contact circle (the drawn head marker)
    pub const PLAYER_RADIUS: f32 = 42.0;
}

/// Whole seconds left on a countdown, rounded up
#[inline]
pub fn remaining_secs(elapsed_ticks: u32, limit_ticks: u32, tick_rate: u32) -> u32 {
    limit_ticks.saturating_sub(elapsed_ticks).div_ceil(tick_rate.max(1))
}
