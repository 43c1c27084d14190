//! Match state and flow
//!
//! `GameController` owns the ball, both players and the seeded RNG, and
//! walks the match through Waiting → Ready → Playing → Win and back.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallHit, ScoreEvent};
use super::court::{Court, Zone};
use super::player::{Player, PlayerId, PoseSample};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::remaining_secs;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for both players to stand in their start circles
    Waiting,
    /// Countdown before the very first match
    Ready,
    /// Active rally
    Playing,
    /// Result screen before the match resets
    Win,
}

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    ScoreReached,
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(PlayerId),
    Draw,
}

/// One-shot notifications for audio/FX collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    BallHit(BallHit),
    PointScored { scorer: PlayerId, scores: [u32; 2] },
    MatchWon {
        outcome: MatchOutcome,
        reason: WinReason,
        scores: [u32; 2],
    },
}

#[derive(Debug, Clone)]
pub struct GameController {
    config: GameConfig,
    court: Court,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    /// Player one, player two
    scores: [u32; 2],
    last_scorer: Option<PlayerId>,
    end_reason: Option<WinReason>,
    ready_timer: u32,
    win_timer: u32,
    game_timer: u32,
    ready_ticks: u32,
    win_ticks: u32,
    game_ticks: u32,
    hit_cooldown_ticks: u64,
    start_zones: [Zone; 2],
    in_zone: [bool; 2],
    has_started_once: bool,
    /// Created on the first start, then re-created by every reset
    ball: Option<Ball>,
    players: [Player; 2],
    events: Vec<GameEvent>,
}

impl GameController {
    /// Build a controller from a validated config and an RNG seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = config.scale_config()?;
        let court = Court::new(config.field_width, config.field_height, scale);

        let players = PlayerId::BOTH.map(|id| Player::new(id, scale, config.min_confidence));
        let start_zones = PlayerId::BOTH.map(|id| court.start_zone(id.side()));

        log::debug!(
            "Match configured: {}x{} scale {} win at {} seed {}",
            config.field_width,
            config.field_height,
            config.scale,
            config.win_score,
            seed
        );

        Ok(Self {
            court,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Waiting,
            scores: [0; 2],
            last_scorer: None,
            end_reason: None,
            ready_timer: 0,
            win_timer: 0,
            game_timer: 0,
            ready_ticks: config.ready_ticks(),
            win_ticks: config.win_ticks(),
            game_ticks: config.game_ticks(),
            hit_cooldown_ticks: config.hit_cooldown_ticks(),
            start_zones,
            in_zone: [false; 2],
            has_started_once: false,
            ball: None,
            players,
            events: Vec::new(),
            config,
        })
    }

    /// Feed the latest pose sample for each slot
    pub fn update_players(&mut self, samples: [Option<PoseSample>; 2]) {
        for (player, sample) in self.players.iter_mut().zip(samples) {
            player.update_from_sample(sample);
        }
    }

    /// Advance the match by one tick
    pub fn update(&mut self) {
        match self.phase {
            GamePhase::Waiting => self.update_waiting(),
            GamePhase::Ready => {
                self.ready_timer += 1;
                if self.ready_timer > self.ready_ticks {
                    self.start_game();
                }
            }
            GamePhase::Playing => self.update_playing(),
            GamePhase::Win => {
                self.win_timer += 1;
                if self.win_timer > self.win_ticks {
                    self.reset();
                }
            }
        }
    }

    fn update_waiting(&mut self) {
        for (i, player) in self.players.iter().enumerate() {
            self.in_zone[i] = player.in_zone(&self.start_zones[i]);
        }

        if self.in_zone.iter().all(|&inside| inside) {
            if self.has_started_once {
                self.start_game();
            } else {
                self.ready_timer = 0;
                self.set_phase(GamePhase::Ready);
            }
        }
    }

    fn update_playing(&mut self) {
        self.game_timer += 1;
        if self.game_timer >= self.game_ticks {
            self.end_match(WinReason::TimeUp);
            return;
        }

        let Some(ball) = self.ball.as_mut() else {
            log::warn!("Playing without a ball, spawning one");
            self.init_ball();
            return;
        };

        let scored = ball.update();
        ball.check_net_collision();

        let [p1, p2] = &self.players;
        if let Some(hit) = ball.check_hand_collision([p1, p2], &mut self.rng) {
            log::debug!("{:?} hit the ball at {}", hit.player, hit.position);
            self.events.push(GameEvent::BallHit(hit));
        }

        if let Some(event) = scored {
            self.handle_score(event);
        }
    }

    /// Award a point, then either end the match or re-serve
    ///
    /// The next serve starts on the scorer's side and travels toward the
    /// side that conceded.
    pub fn handle_score(&mut self, event: ScoreEvent) {
        let scorer = event.scorer;
        self.scores[scorer.index()] += 1;
        self.last_scorer = Some(scorer);
        log::debug!(
            "{:?} scores ({} - {})",
            scorer,
            self.scores[0],
            self.scores[1]
        );
        self.events.push(GameEvent::PointScored {
            scorer,
            scores: self.scores,
        });

        if self.scores.iter().any(|&s| s >= self.config.win_score) {
            self.end_match(WinReason::ScoreReached);
        } else if let Some(ball) = self.ball.as_mut() {
            ball.reset(scorer == PlayerId::Two);
        }
    }

    fn start_game(&mut self) {
        self.has_started_once = true;
        self.game_timer = 0;
        self.end_reason = None;
        if self.ball.is_none() {
            self.init_ball();
        }
        self.set_phase(GamePhase::Playing);
    }

    fn end_match(&mut self, reason: WinReason) {
        self.win_timer = 0;
        self.end_reason = Some(reason);
        self.set_phase(GamePhase::Win);

        let outcome = self.outcome();
        log::info!(
            "Match over ({:?}): {:?}, {} - {}",
            reason,
            outcome,
            self.scores[0],
            self.scores[1]
        );
        self.events.push(GameEvent::MatchWon {
            outcome,
            reason,
            scores: self.scores,
        });
    }

    /// New ball waiting on a randomly chosen side
    fn init_ball(&mut self) {
        let mut ball = Ball::new(self.court, self.hit_cooldown_ticks, &mut self.rng);
        ball.serve(self.rng.random_bool(0.5));
        self.ball = Some(ball);
    }

    /// Full match reset: scores cleared, back to Waiting with a fresh ball
    ///
    /// Whether a match has ever started survives, so the next start skips
    /// the Ready countdown.
    pub fn reset(&mut self) {
        self.scores = [0; 2];
        self.last_scorer = None;
        self.end_reason = None;
        self.ready_timer = 0;
        self.win_timer = 0;
        self.game_timer = 0;
        self.in_zone = [false; 2];
        self.init_ball();
        self.set_phase(GamePhase::Waiting);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leader by score, or a draw when level
    pub fn outcome(&self) -> MatchOutcome {
        let [one, two] = self.scores;
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => MatchOutcome::Winner(PlayerId::One),
            std::cmp::Ordering::Less => MatchOutcome::Winner(PlayerId::Two),
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn score(&self, id: PlayerId) -> u32 {
        self.scores[id.index()]
    }

    pub fn last_scorer(&self) -> Option<PlayerId> {
        self.last_scorer
    }

    pub fn end_reason(&self) -> Option<WinReason> {
        self.end_reason
    }

    pub fn has_started_once(&self) -> bool {
        self.has_started_once
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn start_zone(&self, id: PlayerId) -> Zone {
        self.start_zones[id.index()]
    }

    pub fn in_zone(&self, id: PlayerId) -> bool {
        self.in_zone[id.index()]
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn court(&self) -> &Court {
        &self.court
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ready_remaining_secs(&self) -> u32 {
        remaining_secs(self.ready_timer, self.ready_ticks, self.config.tick_rate)
    }

    pub fn win_remaining_secs(&self) -> u32 {
        remaining_secs(self.win_timer, self.win_ticks, self.config.tick_rate)
    }

    pub fn game_remaining_secs(&self) -> u32 {
        remaining_secs(self.game_timer, self.game_ticks, self.config.tick_rate)
    }

    /// Seconds left on whichever countdown the current phase shows
    pub fn countdown_secs(&self) -> Option<u32> {
        match self.phase {
            GamePhase::Waiting => None,
            GamePhase::Ready => Some(self.ready_remaining_secs()),
            GamePhase::Playing => Some(self.game_remaining_secs()),
            GamePhase::Win => Some(self.win_remaining_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::court::Side;
    use glam::Vec2;

    fn controller(config: GameConfig) -> GameController {
        GameController::new(config, 12345).unwrap()
    }

    fn zone_samples(game: &GameController) -> [Option<PoseSample>; 2] {
        PlayerId::BOTH.map(|id| {
            let c = game.start_zone(id).center;
            Some(PoseSample::new(c.x, c.y, 0.9))
        })
    }

    /// Drive a fresh controller through Waiting and Ready into Playing
    fn start_match(game: &mut GameController) {
        let samples = zone_samples(game);
        game.update_players(samples);
        game.update();
        assert_eq!(game.phase(), GamePhase::Ready);
        for _ in 0..=game.ready_ticks {
            game.update();
        }
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_starts_waiting_without_ball() {
        let game = controller(GameConfig::default());
        assert_eq!(game.phase(), GamePhase::Waiting);
        assert!(game.ball().is_none());
        assert_eq!(game.scores(), [0, 0]);
        assert_eq!(game.countdown_secs(), None);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            scale: -1.0,
            ..Default::default()
        };
        assert!(GameController::new(config, 1).is_err());
    }

    #[test]
    fn test_one_player_never_starts() {
        let mut game = controller(GameConfig::default());
        let c = game.start_zone(PlayerId::One).center;
        game.update_players([Some(PoseSample::new(c.x, c.y, 0.9)), None]);

        for _ in 0..10_000 {
            game.update_players([None, None]);
            game.update();
            assert_eq!(game.phase(), GamePhase::Waiting);
        }
        assert!(game.in_zone(PlayerId::One));
        assert!(!game.in_zone(PlayerId::Two));
    }

    #[test]
    fn test_ready_countdown_then_playing() {
        let mut game = controller(GameConfig::default());
        let samples = zone_samples(&game);
        game.update_players(samples);
        game.update();
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.countdown_secs(), Some(3));

        for _ in 0..game.ready_ticks {
            game.update();
        }
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.ready_remaining_secs(), 0);

        game.update();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.has_started_once());
        let ball = game.ball().unwrap();
        assert!(ball.is_serving());
    }

    #[test]
    fn test_score_to_win_and_reset() {
        let mut game = controller(GameConfig {
            win_score: 1,
            ..Default::default()
        });
        start_match(&mut game);
        game.drain_events();

        game.handle_score(ScoreEvent {
            scorer: PlayerId::One,
        });
        assert_eq!(game.phase(), GamePhase::Win);
        assert_eq!(game.score(PlayerId::One), 1);
        assert_eq!(game.end_reason(), Some(WinReason::ScoreReached));
        assert_eq!(game.outcome(), MatchOutcome::Winner(PlayerId::One));

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PointScored {
            scorer: PlayerId::One,
            scores: [1, 0],
        }));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::MatchWon {
                outcome: MatchOutcome::Winner(PlayerId::One),
                reason: WinReason::ScoreReached,
                ..
            }
        )));
        // Fire once
        assert!(game.drain_events().is_empty());

        for _ in 0..game.win_ticks {
            game.update();
        }
        assert_eq!(game.phase(), GamePhase::Win);
        game.update();
        assert_eq!(game.phase(), GamePhase::Waiting);
        assert_eq!(game.scores(), [0, 0]);
        assert_eq!(game.last_scorer(), None);
        assert!(game.ball().unwrap().is_serving());
    }

    #[test]
    fn test_time_limit_ends_match() {
        let mut game = controller(GameConfig::default());
        start_match(&mut game);
        game.scores = [3, 2];
        game.game_timer = game.game_ticks - 1;
        let ball_before = game.ball().unwrap().pos;

        game.update();
        assert_eq!(game.phase(), GamePhase::Win);
        assert_eq!(game.scores(), [3, 2]);
        assert_eq!(game.end_reason(), Some(WinReason::TimeUp));
        assert_eq!(game.outcome(), MatchOutcome::Winner(PlayerId::One));
        // No physics ran on the ending tick
        assert_eq!(game.ball().unwrap().pos, ball_before);
    }

    #[test]
    fn test_draw_on_time() {
        let mut game = controller(GameConfig::default());
        start_match(&mut game);
        game.scores = [4, 4];
        game.game_timer = game.game_ticks - 1;
        game.update();
        assert_eq!(game.outcome(), MatchOutcome::Draw);
    }

    #[test]
    fn test_point_reserves_from_scorer_side() {
        let mut game = controller(GameConfig::default());
        start_match(&mut game);

        game.handle_score(ScoreEvent {
            scorer: PlayerId::Two,
        });
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.last_scorer(), Some(PlayerId::Two));
        let ball = game.ball().unwrap();
        assert!(ball.is_serving());
        assert_eq!(ball.serve_side(), Some(Side::Right));

        game.handle_score(ScoreEvent {
            scorer: PlayerId::One,
        });
        assert_eq!(game.ball().unwrap().serve_side(), Some(Side::Left));
        assert_eq!(game.scores(), [1, 1]);
    }

    #[test]
    fn test_floor_landing_scores_through_update() {
        let cases = [
            (200.0, PlayerId::Two, [0, 1], Side::Right),
            (600.0, PlayerId::One, [1, 1], Side::Left),
        ];

        let mut game = controller(GameConfig::default());
        start_match(&mut game);

        for (x, scorer, scores, serve_from) in cases {
            // Swap in a free ball falling onto one half, away from both players
            let court = *game.court();
            let mut ball = Ball::new(court, game.hit_cooldown_ticks, &mut game.rng);
            ball.pos = Vec2::new(x, court.floor_y() - ball.radius() - 0.5);
            ball.vel = Vec2::new(0.0, 3.0);
            game.ball = Some(ball);
            game.drain_events();

            game.update();

            assert_eq!(game.phase(), GamePhase::Playing);
            assert_eq!(game.scores(), scores);
            assert_eq!(game.last_scorer(), Some(scorer));
            assert_eq!(
                game.drain_events(),
                vec![GameEvent::PointScored { scorer, scores }]
            );
            let ball = game.ball().unwrap();
            assert!(ball.is_serving());
            assert_eq!(ball.serve_side(), Some(serve_from));
            assert_eq!(ball.pos, court.serve_anchor(serve_from));
        }
    }

    #[test]
    fn test_restart_skips_ready() {
        let mut game = controller(GameConfig::default());
        start_match(&mut game);
        game.reset();
        assert_eq!(game.phase(), GamePhase::Waiting);

        // Players still stand in their circles
        game.update();
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_waiting_runs_no_physics() {
        let mut game = controller(GameConfig::default());
        start_match(&mut game);
        game.reset();
        // Player one stays put, player two steps out of the circle
        let far = game.start_zone(PlayerId::Two).center + glam::Vec2::new(0.0, 200.0);
        game.update_players([None, Some(PoseSample::new(far.x, far.y, 0.9))]);
        let pos = game.ball().unwrap().pos;
        for _ in 0..50 {
            game.update();
        }
        assert_eq!(game.phase(), GamePhase::Waiting);
        assert_eq!(game.ball().unwrap().pos, pos);
    }

    #[test]
    fn test_rally_hit_raises_event() {
        let mut game = controller(GameConfig::default());
        start_match(&mut game);
        game.drain_events();

        // Put player one's head on the serving ball
        let ball_pos = game.ball().unwrap().pos;
        game.update_players([
            Some(PoseSample::new(ball_pos.x - 10.0, ball_pos.y + 20.0, 0.9)),
            None,
        ]);
        game.update();

        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::BallHit(BallHit {
                player: PlayerId::One,
                serve: true,
                ..
            })
        )));
        assert!(!game.ball().unwrap().is_serving());
    }

    #[test]
    fn test_same_seed_same_match() {
        let mut a = controller(GameConfig::default());
        let mut b = controller(GameConfig::default());
        start_match(&mut a);
        start_match(&mut b);
        assert_eq!(
            a.ball().unwrap().serve_side(),
            b.ball().unwrap().serve_side()
        );
        for _ in 0..300 {
            a.update();
            b.update();
        }
        assert_eq!(a.ball().unwrap().pos, b.ball().unwrap().pos);
        assert_eq!(a.scores(), b.scores());
    }
}
