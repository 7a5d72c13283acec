//! Snake Engine - Tile-based arcade simulation core
//!
//! Fixed-capacity entity registry, per-tick uniform-grid broad phase,
//! bounded event queue and the rules that consume it. Rendering, audio and
//! raw input stay with the host; it reads [`world::WorldState`] after each
//! tick and feeds steering requests in.

pub mod core;
pub mod entity;
pub mod events;
pub mod rules;
pub mod simulation;
pub mod spatial;
pub mod world;
