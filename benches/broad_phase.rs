use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use snake_engine::core::config::EngineConfig;
use snake_engine::core::types::EntityKind;
use snake_engine::entity::registry::EntityRegistry;
use snake_engine::events::queue::EventQueue;
use snake_engine::spatial::broad_phase::{all_pairs_overlaps, detect_collisions};
use snake_engine::spatial::grid::SpatialGrid;

/// Deterministic scatter of cell-sized boxes over the play area
fn populate(count: usize, config: &EngineConfig) -> EntityRegistry {
    let mut registry = EntityRegistry::new(count);
    let cols = (config.play_width / config.cell_size) as usize;
    let rows = (config.play_height / config.cell_size) as usize;
    let size = Vec2::splat(config.cell_size);

    for i in 0..count {
        // Stride coprime with the cell count spreads entities without an RNG
        let slot = (i * 7919) % (cols * rows);
        let position = Vec2::new(
            (slot % cols) as f32 * config.cell_size,
            (slot / cols) as f32 * config.cell_size,
        );
        let _ = registry.spawn(EntityKind::Wall, position, size);
    }
    registry
}

fn bench_broad_phase(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("broad_phase");

    for &count in &[100usize, 500, 1000] {
        let registry = populate(count, &config);

        group.bench_with_input(BenchmarkId::new("grid", count), &registry, |b, registry| {
            let mut grid = SpatialGrid::from_config(&config);
            let mut queue = EventQueue::new(config.max_events);
            b.iter(|| {
                grid.rebuild(registry);
                let stats = detect_collisions(&grid, registry, &mut queue);
                queue.clear();
                black_box(stats)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("all_pairs", count),
            &registry,
            |b, registry| b.iter(|| black_box(all_pairs_overlaps(registry))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_broad_phase);
criterion_main!(benches);
