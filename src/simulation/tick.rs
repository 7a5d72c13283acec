//! Tick system - orchestrates simulation updates
//!
//! This is the core loop that ties together:
//! input -> movement -> grid rebuild -> collision detection -> event drain -> progression
//!
//! Each tick runs to completion before anything reads the world. The event
//! queue is empty again when a tick returns.

use crate::core::types::{Direction, Tick};
use crate::rules::processor::{process_events, RuleOutcome};
use crate::rules::progression::{check_progression, LevelTransition};
use crate::simulation::input::steer_actors;
use crate::spatial::broad_phase::{detect_collisions, DetectionStats};
use crate::spatial::grid::SpatialGrid;
use crate::world::state::WorldState;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// False when the tick was skipped because the run is over
    pub ran: bool,
    pub actors_stepped: usize,
    /// Entities that hit at least one full grid cell
    pub grid_saturated: usize,
    pub detection: DetectionStats,
    pub rules: RuleOutcome,
    pub transition: Option<LevelTransition>,
}

/// Advance every active actor's move timer, stepping those that are due
///
/// A stepped actor's entity position follows its head so the grid indexes
/// the head's box.
fn move_actors(world: &mut WorldState, dt: f32) -> usize {
    let interval = world.level_base_speed;
    let cell_size = world.config().cell_size;
    let bounds = world.bounds();

    let mut stepped = 0;
    for (_, entity) in world.entities.iter_mut() {
        if !entity.active {
            continue;
        }
        let Some(actor) = entity.as_actor_mut() else {
            continue;
        };
        if actor.advance(dt, interval, cell_size, bounds) {
            let head = actor.body.head();
            entity.position = head;
            stepped += 1;
        }
    }
    stepped
}

/// Run one full simulation tick
///
/// `dt` is the elapsed frame time in seconds; `input` is this frame's
/// steering request, if any. Does nothing while the run is over.
pub fn run_simulation_tick(
    world: &mut WorldState,
    grid: &mut SpatialGrid,
    dt: f32,
    input: Option<Direction>,
) -> TickReport {
    let mut report = TickReport {
        tick: world.current_tick,
        ..TickReport::default()
    };
    if world.game_over {
        return report;
    }
    report.ran = true;

    if let Some(direction) = input {
        steer_actors(world, direction);
    }

    report.actors_stepped = move_actors(world, dt);
    report.grid_saturated = grid.rebuild(&world.entities);
    report.detection = detect_collisions(grid, &world.entities, &mut world.events);
    report.rules = process_events(world);
    report.transition = check_progression(world);

    tracing::trace!(
        "Tick {}: {} pairs tested, {} events, score {}",
        world.current_tick,
        report.detection.pairs_tested,
        report.rules.events_processed,
        world.score
    );

    world.current_tick += 1;
    report
}
