//! Court geometry
//!
//! Everything positional the ball and the controller agree on: floor line,
//! net hit-box, serve anchors and the two start zones. Derived from the
//! field size and the scale factor once, at construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ScaleConfig;
use crate::consts::*;

/// Which half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A circular start region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub center: Vec2,
    pub radius: f32,
}

impl Zone {
    /// Strictly inside the circle
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub width: f32,
    pub height: f32,
    pub scale: ScaleConfig,
}

impl Court {
    pub fn new(width: f32, height: f32, scale: ScaleConfig) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Reference 800x600 court at scale 1
    pub fn reference() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT, ScaleConfig::unit())
    }

    /// Y of the floor line (ball scores when it touches this)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - self.scale.scaled(FLOOR_OFFSET)
    }

    /// X of the court midline / net centerline
    #[inline]
    pub fn net_x(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn net_half_width(&self) -> f32 {
        self.scale.scaled(NET_WIDTH) / 2.0
    }

    /// Y of the top of the net
    #[inline]
    pub fn net_top(&self) -> f32 {
        self.floor_y() - self.scale.scaled(NET_HEIGHT)
    }

    /// Which half a point lies in; the midline belongs to the right half
    pub fn side_of(&self, x: f32) -> Side {
        if x < self.net_x() { Side::Left } else { Side::Right }
    }

    /// Where the ball waits before a serve from `side`
    pub fn serve_anchor(&self, side: Side) -> Vec2 {
        let x_frac = match side {
            Side::Left => SERVE_X_FRAC,
            Side::Right => 1.0 - SERVE_X_FRAC,
        };
        Vec2::new(self.width * x_frac, self.height * SERVE_Y_FRAC)
    }

    /// Start circle a player must enter to ready the match
    pub fn start_zone(&self, side: Side) -> Zone {
        let x_frac = match side {
            Side::Left => SERVE_X_FRAC,
            Side::Right => 1.0 - SERVE_X_FRAC,
        };
        Zone {
            center: Vec2::new(self.width * x_frac, self.height * ZONE_Y_FRAC),
            radius: self.scale.scaled(START_ZONE_RADIUS),
        }
    }
}
