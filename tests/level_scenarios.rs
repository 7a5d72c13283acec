//! Integration tests for level files driving whole ticks
//!
//! These tests run the engine end to end from level files on disk:
//! - Pickup consumption grows the actor and scores
//! - Hitting the play-area edge pins the head
//! - Reaching the target loads the next level with the score kept
//! - A missing level file leaves an empty, still-running world

use glam::Vec2;
use snake_engine::core::config::EngineConfig;
use snake_engine::core::types::{Direction, EntityKind};
use snake_engine::simulation::Simulation;
use snake_engine::world::loader::{load_level, LoadError};
use snake_engine::world::state::WorldState;
use std::path::Path;

fn write_levels(dir: &Path, levels: &[&str]) {
    for (i, content) in levels.iter().enumerate() {
        std::fs::write(dir.join(format!("level{}.eng", i + 1)), content).unwrap();
    }
}

fn simulation(dir: &Path) -> Simulation {
    Simulation::new(EngineConfig {
        level_dir: dir.to_path_buf(),
        ..EngineConfig::default()
    })
    .unwrap()
}

#[test]
fn test_single_pickup_tick() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(dir.path(), &["P 0 0\nA 20 0\n"]);
    let mut sim = simulation(dir.path());
    sim.start().unwrap();

    sim.tick(0.15, None);

    let world = &sim.world;
    assert_eq!(world.score, 10);
    let body = world.actor_body().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0], Vec2::new(20.0, 0.0));

    let pickup = world
        .entities
        .iter()
        .find(|(_, e)| e.kind == EntityKind::PickupConsumable)
        .map(|(_, e)| e)
        .unwrap();
    assert!(!pickup.active);
    assert!(world.events.is_empty());
}

#[test]
fn test_left_edge_pins_head() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(dir.path(), &["P 0 0 20 20 10 3\n"]);
    let mut sim = simulation(dir.path());
    sim.start().unwrap();

    for _ in 0..3 {
        sim.tick(0.15, None);
        assert_eq!(sim.world.actor_body().unwrap()[0], Vec2::ZERO);
    }
    assert!(!sim.is_game_over());
}

#[test]
fn test_bottom_right_clamp() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(dir.path(), &["P 760 560\n"]);
    let mut sim = simulation(dir.path());
    sim.start().unwrap();

    sim.tick(0.15, None);
    sim.tick(0.15, None);
    assert_eq!(sim.world.actor_body().unwrap()[0], Vec2::new(780.0, 560.0));

    sim.tick(0.15, Some(Direction::Down));
    sim.tick(0.15, None);
    assert_eq!(sim.world.actor_body().unwrap()[0], Vec2::new(780.0, 580.0));
}

#[test]
fn test_progression_at_exact_target() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(
        dir.path(),
        &[
            "META TARGET 30\nP 0 0\nA 20 0\nA 40 0\nA 60 0\n",
            "META TARGET 100\nMETA SPEED 0.1\nP 200 200\nA 400 400\n",
        ],
    );
    let mut sim = simulation(dir.path());
    sim.start().unwrap();

    let first = sim.tick(0.15, None);
    let second = sim.tick(0.15, None);
    assert!(first.transition.is_none());
    assert!(second.transition.is_none());
    assert_eq!(sim.world.score, 20);

    let third = sim.tick(0.15, None);
    let transition = third.transition.unwrap();
    assert_eq!(transition.level, 2);
    assert_eq!(transition.summary.map(|s| s.spawned), Some(2));

    let world = &sim.world;
    assert_eq!(world.current_level, 2);
    assert_eq!(world.score, 30);
    assert_eq!(world.level_target_score, 100);
    assert_eq!(world.level_base_speed, 0.1);
    assert_eq!(world.actor_body().unwrap(), &[Vec2::new(200.0, 200.0)][..]);
}

#[test]
fn test_huge_pickup_values_saturate_score() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(
        dir.path(),
        &["P 0 0\nA 20 0 20 20 2147483647\nA 20 0 20 20 2147483647\n"],
    );
    let mut sim = simulation(dir.path());
    sim.start().unwrap();

    let report = sim.tick(0.15, None);
    assert_eq!(report.rules.pickups_consumed, 2);
    assert_eq!(sim.world.score, i32::MAX);
    assert!(!sim.is_game_over());
}

#[test]
fn test_enemy_contact_ends_run() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(dir.path(), &["P 100 100\nE 120 100 20 20 0 0 1.5\nA 300 300\n"]);
    let mut sim = simulation(dir.path());
    sim.start().unwrap();

    let report = sim.tick(0.15, None);
    assert!(report.rules.game_over_triggered);
    assert!(sim.is_game_over());

    let report = sim.tick(0.15, Some(Direction::Up));
    assert!(!report.ran);
    assert_eq!(sim.world.actor().unwrap().direction, Direction::Right);
}

#[test]
fn test_nonexistent_level_file() {
    let mut world = WorldState::default();
    let result = load_level(&mut world, Path::new("no/such/dir/level1.eng"));

    assert!(matches!(result, Err(LoadError::Io { .. })));
    assert_eq!(world.entity_count(), 0);
    assert_eq!(world.level_target_score, 999);
    assert_eq!(world.level_base_speed, 0.15);
}

#[test]
fn test_bundled_levels_parse_cleanly() {
    let level_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/levels");
    let config = EngineConfig {
        level_dir: level_dir.clone(),
        ..EngineConfig::default()
    };

    for level in 1..=3 {
        let mut world = WorldState::new(config.clone());
        let summary = load_level(&mut world, &config.level_path(level)).unwrap();

        assert!(summary.skipped.is_empty(), "level {} has bad lines", level);
        assert_eq!(summary.inert, 0);
        assert!(world.actor().is_some(), "level {} has no actor", level);
        assert!(world.level_target_score < 999);
    }
}

#[test]
fn test_entity_ids_keep_increasing_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    write_levels(dir.path(), &["P 0 0\nW 200 200\n"]);
    let mut sim = simulation(dir.path());

    sim.start().unwrap();
    let first_ids: Vec<_> = sim.world.entities.iter().map(|(_, e)| e.id).collect();

    sim.reload_level().unwrap();
    let second_ids: Vec<_> = sim.world.entities.iter().map(|(_, e)| e.id).collect();

    assert_eq!(first_ids.len(), 2);
    assert!(second_ids.iter().all(|id| first_ids.iter().all(|old| id > old)));
}
