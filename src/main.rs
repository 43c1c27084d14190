//! Pose Volley headless runner
//!
//! Plays demo matches with the autopilot standing in for the pose feed and
//! logs match events. Prints the final frame snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use pose_volley::{
    ConfigError, FrameView, GameConfig, PoseFeed,
    sim::{Autopilot, GameController, GameEvent, tick},
};
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "pose-volley")]
#[command(about = "Run autopilot volleyball matches without a display", long_about = None)]
struct Cli {
    /// Match config JSON file (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 60 * 60)]
    ticks: u64,

    /// RNG seed for serves and hits
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Pose Volley (headless) starting...");

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by a browser shell; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
fn run(cli: Cli) -> Result<(), ConfigError> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut game = GameController::new(config, cli.seed)?;
    let mut pilot = Autopilot::new(&game);
    // Route synthetic samples through the same buffer a pose thread would use
    let feed = PoseFeed::new();

    let mut hits = 0u32;
    let mut points = 0u32;
    let mut matches = 0u32;

    for _ in 0..cli.ticks {
        feed.publish(pilot.next_input(&game).samples);
        tick(&mut game, &feed.tick_input());

        for event in game.drain_events() {
            match event {
                GameEvent::BallHit(_) => hits += 1,
                GameEvent::PointScored { scorer, scores } => {
                    points += 1;
                    log::info!("Point to {:?}: {} - {}", scorer, scores[0], scores[1]);
                }
                GameEvent::MatchWon { .. } => matches += 1,
                GameEvent::PhaseChanged { .. } => {}
            }
        }
    }

    log::info!(
        "Ran {} ticks (seed {}): {} matches, {} points, {} hits",
        cli.ticks,
        game.seed(),
        matches,
        points,
        hits
    );

    match FrameView::capture(&game).to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {e}"),
    }
    Ok(())
}
