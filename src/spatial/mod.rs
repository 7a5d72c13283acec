//! Broad-phase collision detection

pub mod broad_phase;
pub mod grid;

pub use broad_phase::{all_pairs_overlaps, detect_collisions, for_each_overlap, DetectionStats};
pub use grid::{GridCell, SpatialGrid};
