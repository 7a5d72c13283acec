//! Uniform grid for broad-phase collision detection

use crate::core::config::EngineConfig;
use crate::core::error::CapacityError;
use crate::core::types::{Aabb, EntityIndex};
use crate::entity::registry::EntityRegistry;
use std::ops::RangeInclusive;

/// Bucket of entity references overlapping one cell
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    entries: Vec<EntityIndex>,
}

impl GridCell {
    pub fn entries(&self) -> &[EntityIndex] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fixed-size square cells covering the play area
///
/// Rebuilt from scratch every tick. Buckets have a fixed capacity and
/// inserts past it are dropped.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
    cell_capacity: usize,
    cells: Vec<GridCell>,
}

impl SpatialGrid {
    /// `cell_size` must be finite and positive; [`EngineConfig::validate`]
    /// enforces this for configs
    pub fn new(width: f32, height: f32, cell_size: f32, cell_capacity: usize) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        let cells = (0..cols * rows)
            .map(|_| GridCell {
                entries: Vec::with_capacity(cell_capacity),
            })
            .collect();

        Self {
            cols,
            rows,
            cell_size,
            cell_capacity,
            cells,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.play_width,
            config.play_height,
            config.grid_cell_size,
            config.grid_cell_capacity,
        )
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<&GridCell> {
        if col < self.cols && row < self.rows {
            Some(&self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn cell_capacity(&self) -> usize {
        self.cell_capacity
    }

    /// Inclusive column and row ranges covered by `bounds`, clamped to the grid
    pub fn cell_range(&self, bounds: &Aabb) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
        let col = |v: f32| self.axis_cell(v, self.cols);
        let row = |v: f32| self.axis_cell(v, self.rows);
        (
            col(bounds.min.x)..=col(bounds.max.x),
            row(bounds.min.y)..=row(bounds.max.y),
        )
    }

    #[inline]
    fn axis_cell(&self, v: f32, cells: usize) -> usize {
        let c = (v / self.cell_size).floor() as i64;
        c.clamp(0, cells as i64 - 1) as usize
    }

    /// Empty every bucket, keeping allocations
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.entries.clear();
        }
    }

    /// Insert `index` into every cell its bounds cover
    ///
    /// Cells that are already full skip the entry; the error names the last
    /// such cell but the remaining cells still receive it.
    pub fn insert(&mut self, index: EntityIndex, bounds: &Aabb) -> Result<(), CapacityError> {
        let (cols, rows) = self.cell_range(bounds);
        let mut result = Ok(());

        for row in rows {
            for col in cols.clone() {
                let cell = &mut self.cells[row * self.cols + col];
                if cell.entries.len() >= self.cell_capacity {
                    result = Err(CapacityError::CellFull {
                        col,
                        row,
                        capacity: self.cell_capacity,
                    });
                    continue;
                }
                cell.entries.push(index);
            }
        }

        result
    }

    /// Re-index every active entity; returns how many inserts hit a full cell
    pub fn rebuild(&mut self, registry: &EntityRegistry) -> usize {
        self.clear();

        let mut saturated = 0;
        for (index, entity) in registry.iter_active() {
            if let Err(err) = self.insert(index, &entity.bounds()) {
                tracing::trace!("Grid insert for {:?} partially dropped: {}", entity.id, err);
                saturated += 1;
            }
        }

        if saturated > 0 {
            tracing::debug!("{} entities hit full grid cells this tick", saturated);
        }
        saturated
    }

    /// Cells holding at least two entries, row-major order
    pub fn shared_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.entries.len() >= 2)
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}
