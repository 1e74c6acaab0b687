// SPDX-License-Identifier: Apache-2.0

/// Axis-aligned bounding box in world coordinates (2-D, `f64`).
///
/// Invariants for boxes accepted by the grid:
/// - `min` components are less than or equal to `max` components.
/// - All components are finite.
///
/// Degenerate boxes of zero width or height are legal. Construction
/// itself is unchecked; the grid rejects invalid boxes at `insert` and
/// `update` via [`Aabb::is_valid`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: [f64; 2],
    max: [f64; 2],
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    #[must_use]
    pub const fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy`.
    #[must_use]
    pub fn from_center_half_extents(center: [f64; 2], hx: f64, hy: f64) -> Self {
        Self {
            min: [center[0] - hx, center[1] - hy],
            max: [center[0] + hx, center[1] + hy],
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub const fn min(&self) -> [f64; 2] {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub const fn max(&self) -> [f64; 2] {
        self.max
    }

    /// Returns `true` if the box satisfies the grid's bounds contract:
    /// finite components with `min <= max` per axis.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min[0].is_finite()
            && self.min[1].is_finite()
            && self.max[0].is_finite()
            && self.max[1].is_finite()
            && self.min[0] <= self.max[0]
            && self.min[1] <= self.max[1]
    }

    /// Extent along the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    /// Extent along the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Length of the longest edge; the metric that selects an entity's
    /// hierarchy level.
    #[must_use]
    pub fn longest_edge(&self) -> f64 {
        self.width().max(self.height())
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        // Inclusive to treat touching faces as overlap for broad-phase pairing.
        !(self.max[0] < other.min[0]
            || self.min[0] > other.max[0]
            || self.max[1] < other.min[1]
            || self.min[1] > other.max[1])
    }
}
