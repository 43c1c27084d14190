//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically, plus the
//! demo autopilot that stands in for the pose feed.

use glam::Vec2;

use super::court::Side;
use super::player::{PlayerId, PoseSample};
use super::state::{GameController, GamePhase};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pose sample per slot, player one first
    pub samples: [Option<PoseSample>; 2],
    /// Force a full match reset before this tick
    pub reset: bool,
}

/// Advance the match by one fixed timestep
///
/// Players take their samples first, then the controller runs its phase.
pub fn tick(game: &mut GameController, input: &TickInput) {
    if input.reset {
        log::info!("Reset requested");
        game.reset();
    }
    game.update_players(input.samples);
    game.update();
}

/// Max head travel per tick at scale 1
const AUTOPILOT_STEP: f32 = 9.0;
/// Confidence reported for synthetic samples
const AUTOPILOT_CONFIDENCE: f32 = 0.95;

/// Idle/demo mode - two synthetic players
///
/// Each head walks into its start circle, then chases the ball whenever it
/// is on that player's half, approaching from behind so the hit sends the
/// ball toward the net. Head speed is capped, so fast balls get missed.
#[derive(Debug, Clone)]
pub struct Autopilot {
    heads: [Vec2; 2],
    ticks: u64,
}

impl Autopilot {
    /// Heads start just below their start circles
    pub fn new(game: &GameController) -> Self {
        let heads = PlayerId::BOTH.map(|id| {
            let zone = game.start_zone(id);
            zone.center + Vec2::new(0.0, zone.radius * 1.5)
        });
        Self { heads, ticks: 0 }
    }

    /// Produce this tick's input from the current match state
    pub fn next_input(&mut self, game: &GameController) -> TickInput {
        self.ticks += 1;
        let max_step = game.court().scale.scaled(AUTOPILOT_STEP);

        for id in PlayerId::BOTH {
            let target = self.target(game, id);
            let head = &mut self.heads[id.index()];
            *head += (target - *head).clamp_length_max(max_step);
        }

        TickInput {
            samples: self.heads.map(|pos| {
                Some(PoseSample {
                    position: pos,
                    confidence: AUTOPILOT_CONFIDENCE,
                })
            }),
            reset: false,
        }
    }

    fn target(&self, game: &GameController, id: PlayerId) -> Vec2 {
        let home = game.start_zone(id).center;
        if game.phase() != GamePhase::Playing {
            return home;
        }
        let Some(ball) = game.ball() else {
            return home;
        };

        let court = game.court();
        if court.side_of(ball.pos.x) != id.side() {
            return home;
        }

        // Oscillating offset so rallies don't loop forever
        let time_factor = self.ticks as f32 * 0.05;
        let wobble = time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15;

        let behind = match id.side() {
            Side::Left => -1.0,
            Side::Right => 1.0,
        };
        let r = ball.radius();
        let target = ball.pos + Vec2::new(behind * r * (0.5 + wobble), r * 0.8);

        // Stay on our own half
        let (min_x, max_x) = match id.side() {
            Side::Left => (0.0, court.net_x()),
            Side::Right => (court.net_x(), court.width),
        };
        Vec2::new(
            target.x.clamp(min_x, max_x),
            target.y.clamp(0.0, court.floor_y().max(0.0)),
        )
    }
}
