//! Pose-tracked players
//!
//! A player is a single tracked anchor (the head) fed by an external pose
//! estimator. Tracking is sticky: once seen, a player keeps its last known
//! position until a better sample arrives.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::court::{Side, Zone};
use crate::config::ScaleConfig;
use crate::consts::*;

/// Player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Left court
    One,
    /// Right court
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Home half of the court
    pub fn side(self) -> Side {
        match self {
            PlayerId::One => Side::Left,
            PlayerId::Two => Side::Right,
        }
    }
}

/// One pose-estimator reading for a player slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Tracked keypoint, already mirrored into field coordinates
    pub position: Vec2,
    /// Keypoint confidence in [0, 1]
    pub confidence: f32,
}

impl PoseSample {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Last accepted position; `None` until the first good sample
    tracked: Option<Vec2>,
    collision_radius: f32,
    min_confidence: f32,
}

impl Player {
    pub fn new(id: PlayerId, scale: ScaleConfig, min_confidence: f32) -> Self {
        Self {
            id,
            tracked: None,
            collision_radius: scale.scaled(PLAYER_RADIUS),
            min_confidence,
        }
    }

    /// Feed the latest sample for this slot (or `None` if the estimator lost it)
    ///
    /// A sample is accepted only when its confidence is strictly above the
    /// threshold. Anything else leaves the last known position in place.
    pub fn update_from_sample(&mut self, sample: Option<PoseSample>) {
        let threshold = self.min_confidence;
        if let Some(sample) = sample.filter(|s| s.confidence > threshold) {
            self.tracked = Some(sample.position);
        }
    }

    /// Contact points the ball collides with (currently the head only)
    pub fn contact_points(&self) -> &[Vec2] {
        self.tracked.as_slice()
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    #[inline]
    pub fn detected(&self) -> bool {
        self.tracked.is_some()
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.tracked
    }

    /// Drop tracking entirely (e.g. the shell lost the camera)
    pub fn forget(&mut self) {
        self.tracked = None;
    }

    /// Detected and strictly inside `zone`
    pub fn in_zone(&self, zone: &Zone) -> bool {
        self.tracked.is_some_and(|pos| zone.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerId::One, ScaleConfig::unit(), MIN_CONFIDENCE)
    }

    #[test]
    fn test_starts_undetected() {
        let mut p = player();
        assert!(!p.detected());
        assert!(p.contact_points().is_empty());

        p.update_from_sample(None);
        assert!(!p.detected());
        assert_eq!(p.position(), None);
    }

    #[test]
    fn test_low_confidence_never_detects() {
        let mut p = player();
        p.update_from_sample(Some(PoseSample::new(100.0, 100.0, 0.2)));
        assert!(!p.detected());
        // Threshold itself is rejected
        p.update_from_sample(Some(PoseSample::new(100.0, 100.0, 0.3)));
        assert!(!p.detected());
    }

    #[test]
    fn test_sticky_fallback() {
        let mut p = player();
        p.update_from_sample(Some(PoseSample::new(120.0, 240.0, 0.9)));
        assert_eq!(p.position(), Some(Vec2::new(120.0, 240.0)));

        // Lost sample keeps the last position
        p.update_from_sample(None);
        assert!(p.detected());
        assert_eq!(p.contact_points(), &[Vec2::new(120.0, 240.0)]);

        // Weak sample also keeps it
        p.update_from_sample(Some(PoseSample::new(500.0, 500.0, 0.1)));
        assert_eq!(p.position(), Some(Vec2::new(120.0, 240.0)));

        // Good sample moves it
        p.update_from_sample(Some(PoseSample::new(130.0, 250.0, 0.31)));
        assert_eq!(p.position(), Some(Vec2::new(130.0, 250.0)));

        p.forget();
        assert!(!p.detected());
    }

    #[test]
    fn test_in_zone() {
        let zone = Zone {
            center: Vec2::new(200.0, 300.0),
            radius: 100.0,
        };
        let mut p = player();
        assert!(!p.in_zone(&zone));
        p.update_from_sample(Some(PoseSample::new(210.0, 310.0, 0.8)));
        assert!(p.in_zone(&zone));
        p.update_from_sample(Some(PoseSample::new(350.0, 310.0, 0.8)));
        assert!(!p.in_zone(&zone));
    }

    #[test]
    fn test_scaled_radius() {
        let p = Player::new(PlayerId::Two, ScaleConfig::new(0.5).unwrap(), 0.3);
        assert_eq!(p.collision_radius(), 21.0);
        assert_eq!(p.id.side(), Side::Right);
    }
}
