// SPDX-License-Identifier: Apache-2.0
//! Geometric primitives used by the grid.

/// Axis-aligned bounding boxes.
pub mod aabb;
