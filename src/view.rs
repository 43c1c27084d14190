//! Per-tick snapshot for a presentation shell
//!
//! Everything a renderer needs to draw one frame, detached from the
//! simulation so it can be shipped across a thread or serialized.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{CrashEffect, GameController, GamePhase, MatchOutcome, PlayerId, WinReason, Zone};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub position: Option<Vec2>,
    pub detected: bool,
    pub radius: f32,
    pub zone: Zone,
    pub in_zone: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub position: Vec2,
    pub radius: f32,
    pub serving: bool,
    /// Oldest first
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub scores: [u32; 2],
    pub players: [PlayerView; 2],
    /// Hidden while waiting for players
    pub ball: Option<BallView>,
    pub crash_effects: Vec<CrashEffect>,
    /// Seconds left on the ready, match or result countdown
    pub countdown_secs: Option<u32>,
    /// Set on the result screen
    pub outcome: Option<MatchOutcome>,
    pub end_reason: Option<WinReason>,
}

impl FrameView {
    pub fn capture(game: &GameController) -> Self {
        let players = PlayerId::BOTH.map(|id| {
            let player = game.player(id);
            PlayerView {
                id,
                position: player.position(),
                detected: player.detected(),
                radius: player.collision_radius(),
                zone: game.start_zone(id),
                in_zone: game.in_zone(id),
            }
        });

        let visible_ball = game.ball().filter(|_| game.phase() != GamePhase::Waiting);
        let ball = visible_ball.map(|ball| BallView {
            position: ball.pos,
            radius: ball.radius(),
            serving: ball.is_serving(),
            trail: ball.trail().collect(),
        });
        let crash_effects = visible_ball
            .map(|ball| ball.crash_effects().to_vec())
            .unwrap_or_default();

        let outcome = (game.phase() == GamePhase::Win).then(|| game.outcome());

        Self {
            phase: game.phase(),
            scores: game.scores(),
            players,
            ball,
            crash_effects,
            countdown_secs: game.countdown_secs(),
            outcome,
            end_reason: game.end_reason(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
