// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    rust_2018_idioms,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![doc = r"Hierarchical spatial hash grid (HSHG) broad-phase.

This crate tracks many moving axis-aligned bounding boxes and reports
candidate collision pairs each simulation step without testing every
box against every other. Entities are bucketed into hash-grid cells at
one of several resolutions; each level's cell size is a geometric step
above the previous, and an entity lives at the smallest level whose
cells can contain its longest edge.

Design notes:
- Deterministic: no ambient RNG; pair output is canonical (`a < b`,
  sorted ascending), so identical operation sequences yield identical
  results across runs.
- Single-threaded: the grid owns no locks. One insert/remove/update
  phase followed by one query per simulation tick is the intended
  cadence.
- Handles are opaque `u32` slot indices, recycled through a freelist
  after removal. A handle is valid until `remove` is called for it.
- Rustdoc is treated as part of the contract; public items are
  documented.
"]

mod error;
mod grid;
mod handle;
mod level;
mod query;
mod store;
mod telemetry;
/// Foundational geometric types.
pub mod types;

pub use error::GridError;
pub use grid::{GridConfig, GridStats, Hshg};
pub use handle::EntityHandle;
pub use types::aabb::Aabb;
