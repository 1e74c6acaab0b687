// SPDX-License-Identifier: Apache-2.0
//! One hash grid at a fixed cell resolution.
//!
//! Cells are stored sparsely: only occupied coordinates have a map
//! entry, so iteration during queries touches occupied cells only and
//! the coordinate domain is unbounded (no wrap-around aliasing).

use rustc_hash::FxHashMap;

use crate::handle::EntityHandle;
use crate::types::aabb::Aabb;

/// Integer coordinate of one cell within a level.
///
/// Computed by flooring a world coordinate divided by the level's cell
/// size; a pure function of `(point, cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CellCoord {
    pub x: i64,
    pub y: i64,
}

/// A single level of the hierarchy: a sparse map from cell coordinate
/// to the handles of every entity whose AABB covers that cell.
#[derive(Debug)]
pub(crate) struct GridLevel {
    cell_size: f64,
    inv_cell_size: f64,
    cells: FxHashMap<CellCoord, Vec<EntityHandle>>,
}

impl GridLevel {
    pub fn new(cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0 && cell_size.is_finite());
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn axis_coord(&self, v: f64) -> i64 {
        (v * self.inv_cell_size).floor() as i64
    }

    /// Inclusive coordinate rectangle the AABB covers at this
    /// resolution, as `(min, max)` corner coordinates.
    pub fn coord_bounds(&self, aabb: &Aabb) -> (CellCoord, CellCoord) {
        let lo = CellCoord {
            x: self.axis_coord(aabb.min()[0]),
            y: self.axis_coord(aabb.min()[1]),
        };
        let hi = CellCoord {
            x: self.axis_coord(aabb.max()[0]),
            y: self.axis_coord(aabb.max()[1]),
        };
        (lo, hi)
    }

    /// Appends every cell coordinate the AABB covers to `out`.
    ///
    /// An entity whose longest edge fits its level's cell size covers
    /// at most a 2×2 block here.
    pub fn coords_covering(&self, aabb: &Aabb, out: &mut Vec<CellCoord>) {
        let (lo, hi) = self.coord_bounds(aabb);
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                out.push(CellCoord { x, y });
            }
        }
    }

    /// Registers `handle` under every coordinate in `coords`.
    pub fn insert(&mut self, handle: EntityHandle, coords: &[CellCoord]) {
        for &coord in coords {
            self.cells.entry(coord).or_default().push(handle);
        }
    }

    /// Unregisters `handle` from every coordinate in `coords`,
    /// dropping map entries that empty out so no orphan cells linger.
    pub fn remove(&mut self, handle: EntityHandle, coords: &[CellCoord]) {
        for &coord in coords {
            let Some(occupants) = self.cells.get_mut(&coord) else {
                debug_assert!(false, "stale cell key {coord:?} for {handle}");
                continue;
            };
            if let Some(position) = occupants.iter().position(|&h| h == handle) {
                occupants.swap_remove(position);
            } else {
                debug_assert!(false, "{handle} missing from cell {coord:?}");
            }
            if occupants.is_empty() {
                self.cells.remove(&coord);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Handles registered at `coord`, if the cell is occupied.
    pub fn occupants(&self, coord: CellCoord) -> Option<&[EntityHandle]> {
        self.cells.get(&coord).map(Vec::as_slice)
    }

    /// Occupied cells in map order (deterministic for a given sequence
    /// of insertions and removals).
    pub fn occupied_cells(&self) -> impl Iterator<Item = &[EntityHandle]> {
        self.cells.values().map(Vec::as_slice)
    }

    /// Releases capacity held by cells that have shrunk well below
    /// their high-water mark. Part of the per-tick consistency pass.
    pub fn compact(&mut self) {
        for occupants in self.cells.values_mut() {
            if occupants.capacity() > 8 && occupants.capacity() > occupants.len() * 4 {
                occupants.shrink_to_fit();
            }
        }
    }
}
