//! Growable body buffer for the snake actor

use crate::core::types::Direction;
use glam::Vec2;

/// Segments reserved up front; growth beyond this doubles the allocation
const INITIAL_CAPACITY: usize = 10;

/// Ordered body segments, head at index 0
///
/// Never empty: construction places the head and segments are only ever
/// appended at the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyBuffer {
    segments: Vec<Vec2>,
}

impl BodyBuffer {
    pub fn new(start: Vec2) -> Self {
        let mut segments = Vec::with_capacity(INITIAL_CAPACITY);
        segments.push(start);
        Self { segments }
    }

    /// Add a tail segment (amortized O(1), the backing storage doubles when full)
    pub fn append(&mut self, position: Vec2) {
        self.segments.push(position);
    }

    /// Advance one cell in `direction`
    ///
    /// Every segment takes its predecessor's previous value, then the head
    /// moves one cell and is clamped into `[0, bounds - cell_size]` on both
    /// axes. The clamp pins the head at the edge; it never wraps.
    pub fn step(&mut self, direction: Direction, cell_size: f32, bounds: Vec2) {
        let count = self.segments.len();
        self.segments.copy_within(0..count - 1, 1);

        let max = (bounds - Vec2::splat(cell_size)).max(Vec2::ZERO);
        let head = self.segments[0] + direction.unit() * cell_size;
        self.segments[0] = head.clamp(Vec2::ZERO, max);
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    pub fn tail(&self) -> Vec2 {
        self.segments[self.segments.len() - 1]
    }

    /// Number of segments, always at least 1
    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Vec2] {
        &self.segments
    }

    pub fn capacity(&self) -> usize {
        self.segments.capacity()
    }
}
