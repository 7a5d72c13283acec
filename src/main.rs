//! Snake Engine - Headless Runner
//!
//! Loads level 1, runs a fixed number of ticks with an optional steering
//! script and prints a JSON summary of the run. Useful for checking level
//! files and tuning without a renderer.

use clap::Parser;
use serde::Serialize;
use snake_engine::core::config::EngineConfig;
use snake_engine::core::error::Result;
use snake_engine::core::types::Direction;
use snake_engine::simulation::Simulation;
use std::collections::HashMap;
use std::path::PathBuf;

/// Headless Snake Engine runner
#[derive(Parser, Debug)]
#[command(name = "snake-engine")]
#[command(about = "Run the simulation core without a renderer and print a JSON summary")]
struct Args {
    /// Engine config (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding level<n>.eng files (overrides the config)
    #[arg(long)]
    level_dir: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Seconds of frame time fed to each tick
    #[arg(long, default_value_t = 0.05)]
    dt: f32,

    /// Steering script entries as TICK:DIR, e.g. 12:up (repeatable)
    #[arg(long = "move", value_parser = parse_move)]
    moves: Vec<(u64, Direction)>,

    /// Keep running after game over by restarting from level 1
    #[arg(long)]
    restart_on_death: bool,
}

fn parse_move(raw: &str) -> std::result::Result<(u64, Direction), String> {
    let (tick, dir) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected TICK:DIR, got '{}'", raw))?;
    let tick = tick
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad tick '{}': {}", tick, e))?;
    let direction = match dir.trim().to_ascii_lowercase().as_str() {
        "up" | "u" => Direction::Up,
        "down" | "d" => Direction::Down,
        "left" | "l" => Direction::Left,
        "right" | "r" => Direction::Right,
        other => return Err(format!("unknown direction '{}'", other)),
    };
    Ok((tick, direction))
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    ticks_run: u64,
    score: i32,
    level: u32,
    target_score: i32,
    game_over: bool,
    deaths: u32,
    levels_completed: u32,
    pickups_consumed: usize,
    body_length: usize,
    head: Option<(f32, f32)>,
    active_entities: usize,
    events_dropped: usize,
    grid_saturated_max: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &args.level_dir {
        config.level_dir = dir.clone();
    }
    let script: HashMap<u64, Direction> = args.moves.iter().copied().collect();

    let mut sim = Simulation::new(config)?;
    if let Err(e) = sim.start() {
        tracing::warn!("Starting with an empty world: {}", e);
    }

    let mut deaths = 0;
    let mut levels_completed = 0;
    let mut pickups_consumed = 0;
    let mut events_dropped = 0;
    let mut grid_saturated_max = 0;
    let mut ticks_run = 0;

    for tick in 0..args.ticks {
        if sim.is_game_over() {
            if !args.restart_on_death {
                break;
            }
            if let Err(e) = sim.restart() {
                tracing::warn!("Restart failed: {}", e);
            }
        }

        let report = sim.tick(args.dt, script.get(&tick).copied());
        ticks_run += 1;

        if report.rules.game_over_triggered {
            deaths += 1;
        }
        pickups_consumed += report.rules.pickups_consumed;
        events_dropped += report.detection.events_dropped;
        grid_saturated_max = grid_saturated_max.max(report.grid_saturated);
        if report.transition.is_some() {
            levels_completed += 1;
        }
    }

    let world = &sim.world;
    let summary = RunSummary {
        ticks_run,
        score: world.score,
        level: world.current_level,
        target_score: world.level_target_score,
        game_over: world.game_over,
        deaths,
        levels_completed,
        pickups_consumed,
        body_length: world.actor_body().map_or(0, <[_]>::len),
        head: world.actor().map(|a| {
            let head = a.body.head();
            (head.x, head.y)
        }),
        active_entities: world.active_entities().count(),
        events_dropped,
        grid_saturated_max,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
