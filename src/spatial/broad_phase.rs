//! Candidate pair generation over the spatial grid
//!
//! Every cell with two or more entries has each unordered pair of entries
//! tested once with a strict AABB overlap. Entities sharing several cells
//! are tested (and reported) once per shared cell, so duplicate collision
//! events are expected and the rule processor must tolerate them.

use crate::core::types::EntityIndex;
use crate::entity::registry::EntityRegistry;
use crate::events::queue::{EventKind, EventQueue};
use crate::spatial::grid::SpatialGrid;

/// Counters from one detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Pairs that reached the AABB test
    pub pairs_tested: usize,
    /// Collision events accepted by the queue
    pub events_pushed: usize,
    /// Collision events dropped because the queue was full
    pub events_dropped: usize,
}

/// Call `f` for every overlapping pair found in shared grid cells
///
/// Pairs come out in row-major cell order, then registry order within a
/// cell, so the sequence is deterministic for a given registry.
pub fn for_each_overlap<F>(grid: &SpatialGrid, registry: &EntityRegistry, mut f: F) -> usize
where
    F: FnMut(EntityIndex, EntityIndex),
{
    let mut tested = 0;

    for cell in grid.shared_cells() {
        let entries = cell.entries();
        for (i, &a) in entries.iter().enumerate() {
            let Some(first) = registry.get_active(a) else {
                continue;
            };
            let first_bounds = first.bounds();

            for &b in &entries[i + 1..] {
                let Some(second) = registry.get_active(b) else {
                    continue;
                };
                tested += 1;
                if first_bounds.overlaps(&second.bounds()) {
                    f(a, b);
                }
            }
        }
    }

    tested
}

/// Push one Collision event per overlapping pair per shared cell
pub fn detect_collisions(
    grid: &SpatialGrid,
    registry: &EntityRegistry,
    queue: &mut EventQueue,
) -> DetectionStats {
    let mut pushed = 0;
    let mut dropped = 0;

    let tested = for_each_overlap(grid, registry, |a, b| {
        match queue.push(EventKind::Collision, a, b) {
            Ok(()) => pushed += 1,
            Err(_) => dropped += 1,
        }
    });

    if dropped > 0 {
        tracing::debug!("Event queue saturated: {} collision events dropped", dropped);
    }

    DetectionStats {
        pairs_tested: tested,
        events_pushed: pushed,
        events_dropped: dropped,
    }
}

/// Overlapping active pairs by exhaustive O(n²) testing
///
/// Reference for the grid path; each pair appears once with the lower
/// index first.
pub fn all_pairs_overlaps(registry: &EntityRegistry) -> Vec<(EntityIndex, EntityIndex)> {
    let active: Vec<_> = registry.iter_active().collect();
    let mut pairs = Vec::new();

    for (i, (a, first)) in active.iter().enumerate() {
        let first_bounds = first.bounds();
        for (b, second) in &active[i + 1..] {
            if first_bounds.overlaps(&second.bounds()) {
                pairs.push((*a, *b));
            }
        }
    }

    pairs
}
