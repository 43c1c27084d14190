//! Ball physics
//!
//! Gravity, the speed cap, floor/ceiling/wall bounces, the net, and the
//! debounced hits from player contact points. Speeds are per tick.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{
    ball_ceiling_collision, ball_contact_collision, ball_in_net, ball_side_wall_collision,
    reflect_velocity,
};
use super::court::{Court, Side};
use super::player::{Player, PlayerId};
use crate::consts::*;

/// The ball touched the floor; `scorer` wins the point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub scorer: PlayerId,
}

/// A registered (not debounced) contact hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallHit {
    pub player: PlayerId,
    /// Ball center at the moment of the hit
    pub position: Vec2,
    /// Contact point that struck the ball
    pub contact: Vec2,
    /// The hit launched a serve rather than returning a rally ball
    pub serve: bool,
}

/// Impact flash left where the ball was struck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrashEffect {
    pub pos: Vec2,
    pub remaining_ticks: u32,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    gravity: f32,
    bounce: f32,
    max_speed: f32,
    court: Court,
    /// Recent positions, oldest first
    trail: VecDeque<Vec2>,
    crash_effects: Vec<CrashEffect>,
    serving: bool,
    serve_pos: Option<Vec2>,
    serve_side: Option<Side>,
    /// Ticks seen by this ball, used as the clock for the hit cooldown
    ticks: u64,
    last_hit_tick: Option<u64>,
    cooldown_ticks: u64,
}

impl Ball {
    /// Ball dropped from above the net with a random leftward toss
    pub fn new<R: Rng>(court: Court, cooldown_ticks: u64, rng: &mut R) -> Self {
        let scale = court.scale;
        Self {
            pos: Vec2::new(court.net_x(), scale.scaled(100.0)),
            vel: Vec2::new(
                scale.scaled(rng.random_range(-3.0..-1.8)),
                scale.scaled(-6.0),
            ),
            radius: scale.scaled(BALL_RADIUS),
            gravity: scale.scaled(GRAVITY),
            bounce: BOUNCE_COEFFICIENT,
            max_speed: scale.scaled(BALL_MAX_SPEED),
            court,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            crash_effects: Vec::new(),
            serving: false,
            serve_pos: None,
            serve_side: None,
            ticks: 0,
            last_hit_tick: None,
            cooldown_ticks,
        }
    }

    /// Advance one tick
    ///
    /// Returns a score when the ball reaches the floor. The floor is checked
    /// before the ceiling and walls, so a scoring tick never also bounces.
    pub fn update(&mut self) -> Option<ScoreEvent> {
        self.ticks += 1;
        self.crash_effects.retain_mut(|effect| {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            effect.remaining_ticks > 0
        });

        if self.serving {
            if let Some(anchor) = self.serve_pos {
                self.pos = anchor;
            }
            self.vel = Vec2::ZERO;
            return None;
        }

        self.record_trail();

        self.vel.y += self.gravity;
        self.vel = self.vel.clamp_length_max(self.max_speed);
        self.pos += self.vel;

        if self.pos.y + self.radius >= self.court.floor_y() {
            return Some(self.handle_floor_collision());
        }

        let ceiling = ball_ceiling_collision(self.pos, self.radius);
        if ceiling.hit {
            self.pos += ceiling.normal * ceiling.penetration;
            self.vel = reflect_velocity(self.vel, ceiling.normal);
            self.vel.y *= self.bounce;
        }

        let wall = ball_side_wall_collision(self.pos, self.radius, self.court.width);
        if wall.hit {
            self.pos += wall.normal * wall.penetration;
            self.vel = reflect_velocity(self.vel, wall.normal);
        }

        None
    }

    /// Clamp to the floor, bounce, and award the point to the far side
    fn handle_floor_collision(&mut self) -> ScoreEvent {
        self.pos.y = self.court.floor_y() - self.radius;
        self.vel.y *= -self.bounce;

        let scorer = match self.court.side_of(self.pos.x) {
            Side::Left => PlayerId::Two,
            Side::Right => PlayerId::One,
        };
        ScoreEvent { scorer }
    }

    /// Bounce off the net if the ball overlaps it
    pub fn check_net_collision(&mut self) {
        if !ball_in_net(self.pos, self.radius, &self.court) {
            return;
        }

        self.vel.x *= -NET_BOUNCE;

        let clearance =
            self.radius + self.court.net_half_width() + self.court.scale.scaled(NET_CLEARANCE);
        let net_x = self.court.net_x();
        self.pos.x = if self.pos.x < net_x {
            net_x - clearance
        } else {
            net_x + clearance
        };

        self.vel.y *= NET_FRICTION;
    }

    /// Test every contact point of both players, player one first
    ///
    /// The first overlapping point gets the hit and checking stops there,
    /// even when the cooldown swallows it.
    pub fn check_hand_collision<R: Rng>(
        &mut self,
        players: [&Player; 2],
        rng: &mut R,
    ) -> Option<BallHit> {
        for player in players {
            let reach = player.collision_radius();
            for &contact in player.contact_points() {
                if ball_contact_collision(self.pos, self.radius, contact, reach) {
                    let serve = self.serving;
                    let position = self.pos;
                    return self.hit_by_hand(contact.x, rng).then_some(BallHit {
                        player: player.id,
                        position,
                        contact,
                        serve,
                    });
                }
            }
        }
        None
    }

    /// Strike the ball from a contact at `contact_x`
    ///
    /// Returns `false` if the hit fell inside the cooldown window.
    pub fn hit_by_hand<R: Rng>(&mut self, contact_x: f32, rng: &mut R) -> bool {
        if self
            .last_hit_tick
            .is_some_and(|last| self.ticks - last < self.cooldown_ticks)
        {
            return false;
        }
        self.last_hit_tick = Some(self.ticks);

        self.crash_effects.push(CrashEffect {
            pos: self.pos,
            remaining_ticks: CRASH_EFFECT_TICKS,
        });

        let scale = self.court.scale;

        if self.serving {
            self.serving = false;
            let side = self
                .serve_side
                .unwrap_or_else(|| self.court.side_of(self.pos.x));
            let speed = scale.scaled(rng.random_range(SERVE_SPEED_X_MIN..SERVE_SPEED_X_MAX));
            // Serve crosses the net toward the other half
            self.vel.x = match side {
                Side::Left => speed,
                Side::Right => -speed,
            };
            self.vel.y = scale.scaled(SERVE_SPEED_Y);
            self.trail.clear();
            return true;
        }

        self.vel.y = scale.scaled(HIT_SPEED_Y);

        let base = if self.vel.x.abs() < 1e-3 {
            scale.scaled(MIN_HIT_SPEED_X)
        } else {
            self.vel.x.abs()
        };
        let speed = base * rng.random_range(HIT_BOOST_MIN..HIT_BOOST_MAX);
        // Kick away from the contact
        self.vel.x = if self.pos.x - contact_x > 0.0 {
            speed
        } else {
            -speed
        };
        true
    }

    /// Pin the ball at a serve anchor until someone hits it
    pub fn serve(&mut self, from_right: bool) {
        let side = if from_right { Side::Right } else { Side::Left };
        let anchor = self.court.serve_anchor(side);
        self.serving = true;
        self.vel = Vec2::ZERO;
        self.serve_side = Some(side);
        self.serve_pos = Some(anchor);
        self.pos = anchor;
        self.trail.clear();
    }

    /// Reset to a serve (same as [`Ball::serve`])
    pub fn reset(&mut self, from_right: bool) {
        self.serve(from_right);
    }

    /// Record current position to trail, dropping the oldest past the cap
    fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn is_serving(&self) -> bool {
        self.serving
    }

    pub fn serve_side(&self) -> Option<Side> {
        self.serve_side
    }

    pub fn serve_pos(&self) -> Option<Vec2> {
        self.serve_pos
    }

    /// Trail positions, oldest first
    pub fn trail(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.trail.iter().copied()
    }

    pub fn crash_effects(&self) -> &[CrashEffect] {
        &self.crash_effects
    }
}
