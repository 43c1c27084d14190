//! Construction-time errors
//!
//! The simulation itself never fails; only building it from bad
//! configuration does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    #[error("min_confidence must be in [0, 1), got {0}")]
    Confidence(f32),

    #[error("{width}x{height} at scale {scale} leaves no room for the {what}")]
    CourtTooSmall {
        what: &'static str,
        width: f32,
        height: f32,
        scale: f32,
    },

    #[error("{field} is shorter than one tick at {tick_rate} Hz")]
    SubTick { field: &'static str, tick_rate: u32 },
}
