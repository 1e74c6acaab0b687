// SPDX-License-Identifier: Apache-2.0
//! Error types surfaced by grid operations.
//!
//! Every failure is a synchronous caller-contract violation reported
//! at the call that caused it; nothing is retried internally and
//! nothing is deferred to the next query.

use thiserror::Error;

use crate::handle::EntityHandle;

/// Errors returned by [`Hshg`](crate::Hshg) operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    /// An AABB whose minimum exceeds its maximum on some axis, or with
    /// a non-finite component. Rejected at `insert`/`update` before any
    /// state changes; never partially applied.
    #[error("invalid bounds: min {min:?}, max {max:?}")]
    InvalidBounds {
        /// Minimum corner of the offending box.
        min: [f64; 2],
        /// Maximum corner of the offending box.
        max: [f64; 2],
    },
    /// The operation referenced a handle that is not currently live.
    /// Surfaced rather than silently ignored so use-after-remove bugs
    /// are caught at the offending call.
    #[error("unknown entity handle {0}")]
    UnknownHandle(EntityHandle),
}
