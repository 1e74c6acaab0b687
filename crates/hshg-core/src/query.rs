// SPDX-License-Identifier: Apache-2.0
//! Broad-phase pair enumeration.
//!
//! Two passes over the hierarchy:
//! 1. Same-level: every occupied cell contributes its in-cell pairs.
//!    Entities register in every cell their AABB covers, so two
//!    overlapping entities on the same level always share at least one
//!    cell; no neighbor-cell walk is needed.
//! 2. Cross-level: each entity is tested against the occupants of
//!    every coarser-level cell its AABB covers at that resolution. If
//!    a fine and a coarse AABB overlap, the overlap region lies inside
//!    some coarse cell covered by both, so this rule cannot miss a
//!    pair. An entity covers at most a 2×2 block at any coarser level.
//!
//! Candidates are confirmed with the exact AABB test, self-pairs are
//! skipped, inactive-inactive pairs are suppressed, and duplicates are
//! removed with a canonical packed-key seen-set. The result is sorted
//! ascending by `(a, b)` with `a < b`, so the output is a pure
//! function of the grid's contents.

use rustc_hash::FxHashSet;

use crate::grid::Hshg;
use crate::handle::EntityHandle;
use crate::level::CellCoord;
use crate::telemetry;

/// Canonical dedup key: low handle in the high bits.
fn pair_key(lo: EntityHandle, hi: EntityHandle) -> u64 {
    (u64::from(lo.value()) << 32) | u64::from(hi.value())
}

impl Hshg {
    /// Returns every candidate collision pair.
    ///
    /// Each unordered pair appears at most once, canonicalized with
    /// the smaller handle first, and the list is sorted ascending.
    /// Pairs where both entities are inactive are suppressed, as are
    /// self-pairs. Calling this twice without intervening mutation
    /// yields identical results.
    #[must_use]
    pub fn collision_pairs(&self) -> Vec<(EntityHandle, EntityHandle)> {
        let mut seen: FxHashSet<u64> = FxHashSet::default();
        let mut out: Vec<(EntityHandle, EntityHandle)> = Vec::new();

        // Pass 1: in-cell pairs, finest level first.
        for level in &self.levels {
            for occupants in level.occupied_cells() {
                for (i, &a) in occupants.iter().enumerate() {
                    for &b in &occupants[i + 1..] {
                        self.consider(a, b, &mut seen, &mut out);
                    }
                }
            }
        }

        // Pass 2: fine entity vs. enclosing coarser cells.
        for (handle, record) in self.store.iter() {
            for level in self.levels.iter().skip(record.level + 1) {
                if level.is_empty() {
                    continue;
                }
                let (lo, hi) = level.coord_bounds(&record.aabb);
                for y in lo.y..=hi.y {
                    for x in lo.x..=hi.x {
                        let Some(occupants) = level.occupants(CellCoord { x, y }) else {
                            continue;
                        };
                        for &other in occupants {
                            self.consider(handle, other, &mut seen, &mut out);
                        }
                    }
                }
            }
        }

        out.sort_unstable();
        telemetry::query_event(out.len());
        out
    }

    /// Applies the pair filters and pushes survivors.
    fn consider(
        &self,
        a: EntityHandle,
        b: EntityHandle,
        seen: &mut FxHashSet<u64>,
        out: &mut Vec<(EntityHandle, EntityHandle)>,
    ) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if !seen.insert(pair_key(lo, hi)) {
            return;
        }
        let (Ok(rec_lo), Ok(rec_hi)) = (self.store.get(lo), self.store.get(hi)) else {
            debug_assert!(false, "cell map held stale handle {lo} or {hi}");
            return;
        };
        // Two static bodies never need a narrow-phase look.
        if !rec_lo.active && !rec_hi.active {
            return;
        }
        if rec_lo.aabb.overlaps(&rec_hi.aabb) {
            out.push((lo, hi));
        }
    }
}
