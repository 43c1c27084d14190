//! Match configuration
//!
//! Fixed at construction. Loaded from JSON by the native runner, with every
//! field defaulted so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Linear scale applied to every spatial constant (radii, speeds, zones).
///
/// Only constructible through [`ScaleConfig::new`], so a held value is
/// always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleConfig {
    factor: f32,
}

impl ScaleConfig {
    pub fn new(factor: f32) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "scale",
                value: factor as f64,
            });
        }
        Ok(Self { factor })
    }

    /// Scale factor 1 (the reference 800x600 layout)
    pub fn unit() -> Self {
        Self { factor: 1.0 }
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Scale a base-resolution length or per-tick speed
    #[inline]
    pub fn scaled(&self, base: f32) -> f32 {
        base * self.factor
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self::unit()
    }
}

/// Recognized options for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playing field width, in input coordinate units
    pub field_width: f32,
    /// Playing field height
    pub field_height: f32,
    /// Spatial scale factor
    pub scale: f32,
    /// Points needed to win outright
    pub win_score: u32,
    /// Match length before it ends on time
    pub game_time_secs: f32,
    /// "Get ready" countdown shown before the first match
    pub ready_countdown_secs: f32,
    /// Result screen duration before the match resets
    pub win_countdown_secs: f32,
    /// Minimum time between two registered hits
    pub hit_cooldown_ms: f32,
    /// Fixed simulation rate
    pub tick_rate: u32,
    /// Pose samples at or below this confidence are ignored
    pub min_confidence: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            scale: 1.0,
            win_score: WIN_SCORE,
            game_time_secs: GAME_TIME_SECS,
            ready_countdown_secs: READY_COUNTDOWN_SECS,
            win_countdown_secs: WIN_COUNTDOWN_SECS,
            hit_cooldown_ms: HIT_COOLDOWN_MS,
            tick_rate: TICK_RATE,
            min_confidence: MIN_CONFIDENCE,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("scale", self.scale),
            ("game_time_secs", self.game_time_secs),
            ("ready_countdown_secs", self.ready_countdown_secs),
            ("win_countdown_secs", self.win_countdown_secs),
            ("hit_cooldown_ms", self.hit_cooldown_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.win_score == 0 {
            return Err(ConfigError::Zero { field: "win_score" });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Zero { field: "tick_rate" });
        }
        if !(0.0..1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Confidence(self.min_confidence));
        }

        // The net has to stand on a floor inside the field, and the ball has
        // to fit between the side walls
        let too_small = |what: &'static str| ConfigError::CourtTooSmall {
            what,
            width: self.field_width,
            height: self.field_height,
            scale: self.scale,
        };
        let floor_y = self.field_height - FLOOR_OFFSET * self.scale;
        if floor_y <= NET_HEIGHT * self.scale {
            return Err(too_small("net"));
        }
        if self.field_width <= 2.0 * BALL_RADIUS * self.scale {
            return Err(too_small("ball"));
        }

        let durations = [
            ("ready_countdown_secs", self.ready_ticks()),
            ("win_countdown_secs", self.win_ticks()),
            ("game_time_secs", self.game_ticks()),
        ];
        for (field, ticks) in durations {
            if ticks == 0 {
                return Err(ConfigError::SubTick {
                    field,
                    tick_rate: self.tick_rate,
                });
            }
        }
        Ok(())
    }

    pub fn scale_config(&self) -> Result<ScaleConfig, ConfigError> {
        ScaleConfig::new(self.scale)
    }

    /// Convert a duration in seconds to whole ticks
    pub fn secs_to_ticks(&self, secs: f32) -> u32 {
        (secs * self.tick_rate as f32).round() as u32
    }

    /// Hit cooldown in ticks (at least one)
    pub fn hit_cooldown_ticks(&self) -> u64 {
        let ticks = (self.hit_cooldown_ms * self.tick_rate as f32 / 1000.0).ceil() as u64;
        ticks.max(1)
    }

    pub fn ready_ticks(&self) -> u32 {
        self.secs_to_ticks(self.ready_countdown_secs)
    }

    pub fn win_ticks(&self) -> u32 {
        self.secs_to_ticks(self.win_countdown_secs)
    }

    pub fn game_ticks(&self) -> u32 {
        self.secs_to_ticks(self.game_time_secs)
    }
}
