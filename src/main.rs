//! # Hedgerow Main Entry Point
//!
//! Builds a session from the command line, plays a scripted sequence of
//! moves headlessly and prints the board after each one.

use clap::Parser;
use hedgerow::config::TARGET_FPS;
use hedgerow::{
    AsciiRenderer, GameConfig, GameSession, HedgerowError, HedgerowResult, InputHandler,
    PlayerInput,
};
use log::{debug, error, info, LevelFilter};
use std::path::PathBuf;
use std::str::FromStr;

/// Command line arguments for Hedgerow.
#[derive(Parser, Debug)]
#[command(name = "hedgerow")]
#[command(about = "Turn-based movement and enemy pathfinding on a walled grid")]
#[command(version)]
struct Args {
    /// Random seed for wall and enemy placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cells per grid side
    #[arg(short, long)]
    dimension: Option<i32>,

    /// Interior walls to generate
    #[arg(short, long)]
    walls: Option<usize>,

    /// Enemies spawned around the grid
    #[arg(short, long)]
    enemies: Option<usize>,

    /// Moves to play, as typed keys (w, a, s, d; q quits)
    #[arg(short, long, default_value = "")]
    moves: String,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    info!("Starting Hedgerow v{}", hedgerow::VERSION);

    if let Err(e) = run(&args) {
        error!("Game error: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> HedgerowResult<()> {
    let level = LevelFilter::from_str(log_level).map_err(|_| {
        HedgerowError::InvalidConfig(format!("Unknown log level {:?}", log_level))
    })?;
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
    Ok(())
}

fn build_config(args: &Args) -> HedgerowResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dimension) = args.dimension {
        config.dimension = dimension;
        config.player_start = None;
    }
    if let Some(walls) = args.walls {
        config.wall_count = walls;
    }
    if let Some(enemies) = args.enemies {
        config.enemy_count = enemies;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> HedgerowResult<()> {
    let config = build_config(args)?;
    let mut session = GameSession::new(config)?;
    let renderer = AsciiRenderer::new();
    let frame = 1.0 / TARGET_FPS as f32;

    println!("{}\n", renderer.render(session.grid()));

    for input in InputHandler::new().parse_keys(&args.moves) {
        if input == PlayerInput::Quit {
            session.handle_input(input)?;
            break;
        }

        let outcome = session.handle_input(input)?;
        while !(session.controller().is_ready() && session.controller().is_idle()) {
            session.advance(frame)?;
        }
        for event in session.drain_events() {
            debug!("{:?}", event);
        }

        if let (PlayerInput::Move(direction), Some(outcome)) = (input, outcome) {
            println!(
                "turn {}: {:?} {}",
                session.controller().turn_number(),
                direction,
                if outcome.did_move { "moved" } else { "blocked" }
            );
        }
        println!("{}\n", renderer.render(session.grid()));
    }

    if let Some(player) = session.player() {
        info!(
            "Finished after {} turns with the player at {}",
            session.controller().turn_number(),
            player.coords
        );
    }
    Ok(())
}
