//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or pose-estimation dependencies

pub mod ball;
pub mod collision;
pub mod court;
pub mod player;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallHit, CrashEffect, ScoreEvent};
pub use collision::{CollisionResult, ball_contact_collision, ball_in_net, reflect_velocity};
pub use court::{Court, Side, Zone};
pub use player::{Player, PlayerId, PoseSample};
pub use state::{GameController, GameEvent, GamePhase, MatchOutcome, WinReason};
pub use tick::{Autopilot, TickInput, tick};
