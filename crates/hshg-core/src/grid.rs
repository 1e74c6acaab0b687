// SPDX-License-Identifier: Apache-2.0
//! The hierarchy manager and public operation surface.

use crate::error::GridError;
use crate::handle::EntityHandle;
use crate::level::{CellCoord, GridLevel};
use crate::store::{EntityRecord, EntityStore};
use crate::telemetry;
use crate::types::aabb::Aabb;

/// Construction parameters for [`Hshg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Cell size of the finest level. Entities whose longest edge is
    /// at most this land on level 0.
    pub base_cell_size: f64,
    /// Ratio between consecutive level cell sizes. Must be finite and
    /// greater than 1.
    pub growth_factor: f64,
    /// Entity slots reserved up front; the store grows past this
    /// freely.
    pub initial_capacity: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_cell_size: 1.0,
            growth_factor: 2.0,
            initial_capacity: 256,
        }
    }
}

impl GridConfig {
    fn is_valid(&self) -> bool {
        self.base_cell_size > 0.0
            && self.base_cell_size.is_finite()
            && self.growth_factor > 1.0
            && self.growth_factor.is_finite()
    }
}

/// Counters describing the grid's current shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridStats {
    /// Live entities.
    pub entities: usize,
    /// Levels instantiated so far.
    pub levels: usize,
    /// Occupied cells summed across levels.
    pub occupied_cells: usize,
}

/// Hierarchical spatial hash grid.
///
/// An ordered sequence of [`GridLevel`]s at geometrically increasing
/// cell sizes; each entity lives at the smallest level whose cell size
/// is at least its AABB's longest edge, registered in every cell that
/// AABB covers. Levels are created lazily on demand and persist for
/// the grid's lifetime; an AABB larger than the coarsest level grows
/// new top levels rather than clamping.
///
/// All operations are synchronous and single-threaded; the intended
/// cadence is insert/remove/update calls, then [`Hshg::step`], then
/// [`Hshg::collision_pairs`](crate::Hshg::collision_pairs), once per
/// simulation tick.
#[derive(Debug)]
pub struct Hshg {
    config: GridConfig,
    pub(crate) levels: Vec<GridLevel>,
    pub(crate) store: EntityStore,
    /// Recycled cell-key vectors, so steady-state update churn does
    /// not allocate.
    spare_cells: Vec<Vec<CellCoord>>,
}

impl Default for Hshg {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl Hshg {
    /// Creates an empty grid.
    ///
    /// # Panics
    /// Panics if `config.base_cell_size` is not a positive finite
    /// number or `config.growth_factor` is not a finite value greater
    /// than 1.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        assert!(config.is_valid(), "invalid grid config: {config:?}");
        Self {
            config,
            levels: Vec::new(),
            store: EntityStore::with_capacity(config.initial_capacity),
            spare_cells: Vec::new(),
        }
    }

    /// Tracks a new entity and returns its handle.
    ///
    /// Rejects the box with [`GridError::InvalidBounds`] before any
    /// state changes. The entity is registered in every cell its AABB
    /// covers at its level.
    pub fn insert(&mut self, aabb: Aabb, active: bool) -> Result<EntityHandle, GridError> {
        if !aabb.is_valid() {
            return Err(GridError::InvalidBounds {
                min: aabb.min(),
                max: aabb.max(),
            });
        }
        let level = self.level_for(aabb.longest_edge());
        self.ensure_level(level);
        let mut cells = self.lease_cells();
        self.levels[level].coords_covering(&aabb, &mut cells);
        let handle = self.store.insert(EntityRecord {
            aabb,
            active,
            level,
            cells,
        });
        self.levels[level].insert(handle, self.store.cells_of(handle));
        telemetry::entity_event("insert", handle.value(), self.store.len());
        Ok(handle)
    }

    /// Stops tracking an entity, purging it from its level's cell map
    /// and releasing the handle for reuse by a later insert.
    pub fn remove(&mut self, handle: EntityHandle) -> Result<(), GridError> {
        let record = self.store.remove(handle)?;
        self.levels[record.level].remove(handle, &record.cells);
        self.recycle_cells(record.cells);
        telemetry::entity_event("remove", handle.value(), self.store.len());
        Ok(())
    }

    /// Replaces an entity's AABB and active flag.
    ///
    /// Recomputes the owning level (migrating between levels when the
    /// size class changed) and the exact cell-membership delta: stale
    /// keys are removed and new keys added in the same call, so no
    /// residual membership from the prior AABB survives. Cost is
    /// proportional to the cells touched, not the entity count.
    pub fn update(
        &mut self,
        handle: EntityHandle,
        aabb: Aabb,
        active: bool,
    ) -> Result<(), GridError> {
        if !aabb.is_valid() {
            return Err(GridError::InvalidBounds {
                min: aabb.min(),
                max: aabb.max(),
            });
        }
        if !self.store.contains(handle) {
            return Err(GridError::UnknownHandle(handle));
        }
        let new_level = self.level_for(aabb.longest_edge());
        self.ensure_level(new_level);
        let mut new_cells = self.lease_cells();
        self.levels[new_level].coords_covering(&aabb, &mut new_cells);

        let record = self.store.get_mut(handle)?;
        let old_level = record.level;
        record.aabb = aabb;
        record.active = active;
        if old_level == new_level && record.cells == new_cells {
            self.recycle_cells(new_cells);
            return Ok(());
        }
        record.level = new_level;
        let old_cells = core::mem::replace(&mut record.cells, new_cells);
        self.levels[old_level].remove(handle, &old_cells);
        self.levels[new_level].insert(handle, self.store.cells_of(handle));
        self.recycle_cells(old_cells);
        Ok(())
    }

    /// Per-tick maintenance pass: compacts freed handle slots and
    /// releases excess cell capacity.
    ///
    /// This is a consistency pass only. The grid has no independent
    /// notion of motion, so `step` never re-derives positions; new
    /// AABBs arrive exclusively through [`Hshg::update`].
    pub fn step(&mut self) {
        self.store.compact();
        for level in &mut self.levels {
            level.compact();
        }
        self.spare_cells.truncate(64);
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no entities are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Returns `true` if `handle` refers to a live entity.
    #[must_use]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.store.contains(handle)
    }

    /// Current bounding box of a live entity.
    pub fn aabb(&self, handle: EntityHandle) -> Result<Aabb, GridError> {
        self.store.get(handle).map(|record| record.aabb)
    }

    /// Current active flag of a live entity.
    pub fn is_active(&self, handle: EntityHandle) -> Result<bool, GridError> {
        self.store.get(handle).map(|record| record.active)
    }

    /// Shape counters for observability.
    #[must_use]
    pub fn stats(&self) -> GridStats {
        GridStats {
            entities: self.store.len(),
            levels: self.levels.len(),
            occupied_cells: self
                .levels
                .iter()
                .map(GridLevel::occupied_cell_count)
                .sum(),
        }
    }

    /// Smallest level index whose cell size is at least `edge`.
    fn level_for(&self, edge: f64) -> usize {
        let mut index = 0;
        let mut size = self.config.base_cell_size;
        while size < edge {
            size *= self.config.growth_factor;
            index += 1;
        }
        index
    }

    /// Instantiates levels up to and including `index`. Existing
    /// levels are never resized or destroyed.
    fn ensure_level(&mut self, index: usize) {
        while self.levels.len() <= index {
            let mut size = self.config.base_cell_size;
            for _ in 0..self.levels.len() {
                size *= self.config.growth_factor;
            }
            debug_assert!(
                self.levels
                    .last()
                    .is_none_or(|level| level.cell_size() < size),
                "level sizes must increase"
            );
            self.levels.push(GridLevel::new(size));
        }
    }

    fn lease_cells(&mut self) -> Vec<CellCoord> {
        self.spare_cells.pop().unwrap_or_default()
    }

    fn recycle_cells(&mut self, mut cells: Vec<CellCoord>) {
        cells.clear();
        self.spare_cells.push(cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_selection_uses_longest_edge() {
        let grid = Hshg::default();
        assert_eq!(grid.level_for(0.0), 0);
        assert_eq!(grid.level_for(1.0), 0);
        assert_eq!(grid.level_for(1.1), 1);
        assert_eq!(grid.level_for(4.0), 2);
        assert_eq!(grid.level_for(4.1), 3);
    }

    #[test]
    fn levels_grow_lazily_and_persist() {
        let mut grid = Hshg::default();
        let big = grid
            .insert(Aabb::new([0.0, 0.0], [30.0, 30.0]), true)
            .expect("insert big");
        assert_eq!(grid.stats().levels, 6); // 1, 2, 4, 8, 16, 32
        grid.remove(big).expect("remove big");
        assert_eq!(grid.stats().levels, 6, "levels are never destroyed");
    }

    #[test]
    fn update_migrates_between_levels() {
        let mut grid = Hshg::default();
        let h = grid
            .insert(Aabb::new([0.0, 0.0], [0.5, 0.5]), true)
            .expect("insert");
        let stats = grid.stats();
        assert_eq!(stats.levels, 1);
        grid.update(h, Aabb::new([0.0, 0.0], [2.0, 2.0]), true)
            .expect("grow");
        assert_eq!(grid.stats().levels, 2);
        // The fine level must hold no residue after migration.
        assert!(grid.levels[0].is_empty());
        grid.update(h, Aabb::new([0.0, 0.0], [0.5, 0.5]), true)
            .expect("shrink");
        assert!(grid.levels[1].is_empty());
    }

    #[test]
    fn invalid_bounds_are_rejected_without_side_effects() {
        let mut grid = Hshg::default();
        let bad = Aabb::new([1.0, 0.0], [0.0, 1.0]);
        assert!(matches!(
            grid.insert(bad, true),
            Err(GridError::InvalidBounds { .. })
        ));
        assert!(grid.is_empty());
        let h = grid
            .insert(Aabb::new([0.0, 0.0], [1.0, 1.0]), true)
            .expect("insert");
        assert!(grid.update(h, bad, true).is_err());
        // The prior box is untouched.
        assert_eq!(grid.aabb(h).expect("live").max(), [1.0, 1.0]);
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let mut grid = Hshg::default();
        let h = grid
            .insert(Aabb::new([0.0, 0.0], [1.0, 1.0]), true)
            .expect("insert");
        grid.remove(h).expect("remove");
        assert_eq!(grid.remove(h), Err(GridError::UnknownHandle(h)));
        assert_eq!(
            grid.update(h, Aabb::new([0.0, 0.0], [1.0, 1.0]), true),
            Err(GridError::UnknownHandle(h))
        );
    }

    #[test]
    #[should_panic(expected = "invalid grid config")]
    fn zero_base_cell_size_is_refused() {
        let _ = Hshg::new(GridConfig {
            base_cell_size: 0.0,
            ..GridConfig::default()
        });
    }
}
