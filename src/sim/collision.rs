//! Collision detection and response for the volleyball court
//!
//! Everything here is axis-aligned or circle-vs-circle: the net is a
//! vertical band rising from the floor, the walls are the field edges and
//! player contacts are circles.

use glam::Vec2;

use super::court::Court;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a ball against the left and right field edges
pub fn ball_side_wall_collision(ball_pos: Vec2, ball_radius: f32, width: f32) -> CollisionResult {
    if ball_pos.x - ball_radius <= 0.0 {
        return CollisionResult {
            hit: true,
            normal: Vec2::X,
            penetration: ball_radius - ball_pos.x,
        };
    }
    if ball_pos.x + ball_radius >= width {
        return CollisionResult {
            hit: true,
            normal: Vec2::NEG_X,
            penetration: ball_pos.x + ball_radius - width,
        };
    }
    CollisionResult::miss()
}

/// Check a ball against the top of the field
pub fn ball_ceiling_collision(ball_pos: Vec2, ball_radius: f32) -> CollisionResult {
    if ball_pos.y - ball_radius <= 0.0 {
        return CollisionResult {
            hit: true,
            normal: Vec2::Y,
            penetration: ball_radius - ball_pos.y,
        };
    }
    CollisionResult::miss()
}

/// Whether the ball overlaps the net band
///
/// Horizontal overlap with the net (ball radius plus half the net width)
/// and a center below the top of the net.
pub fn ball_in_net(ball_pos: Vec2, ball_radius: f32, court: &Court) -> bool {
    (ball_pos.x - court.net_x()).abs() < ball_radius + court.net_half_width()
        && ball_pos.y > court.net_top()
}

/// Circle-vs-circle overlap between the ball and a contact point
#[inline]
pub fn ball_contact_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    contact: Vec2,
    contact_radius: f32,
) -> bool {
    ball_pos.distance(contact) < ball_radius + contact_radius
}
