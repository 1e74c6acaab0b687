// SPDX-License-Identifier: Apache-2.0
//! Opaque entity identifiers.

/// Stable identifier for an entity tracked by the grid.
///
/// `EntityHandle` wraps the entity's slot index in the record store.
/// Using a dedicated wrapper prevents accidental mixing with other
/// integer quantities. Handles are plain copyable values with no
/// ownership semantics; a handle is valid from the `insert` that
/// produced it until the matching `remove`, after which the store may
/// recycle it for a later insert.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// Returns the raw integer value of this handle.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    pub(crate) const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
