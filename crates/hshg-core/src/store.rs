// SPDX-License-Identifier: Apache-2.0
//! Dense entity record storage.
//!
//! Records live in a slot vector indexed directly by handle value, with
//! vacated slots chained into a freelist for reuse. This replaces the
//! hash-keyed global object table of classic HSHG bindings with O(1)
//! lookup and bounded growth.

use crate::error::GridError;
use crate::handle::EntityHandle;
use crate::level::CellCoord;
use crate::types::aabb::Aabb;

/// Per-entity state owned by the grid.
#[derive(Debug)]
pub(crate) struct EntityRecord {
    /// Current bounding box.
    pub aabb: Aabb,
    /// Inactive entities still collide with active ones, but an
    /// inactive-inactive pair is never reported.
    pub active: bool,
    /// Index of the hierarchy level that owns this entity.
    pub level: usize,
    /// Every cell coordinate the AABB covers at its level's resolution.
    pub cells: Vec<CellCoord>,
}

#[derive(Debug)]
enum Slot {
    Occupied(EntityRecord),
    Vacant { next_free: Option<u32> },
}

/// Slot storage with a freelist of recycled handles.
#[derive(Debug, Default)]
pub(crate) struct EntityStore {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    live: usize,
}

impl EntityStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    /// Stores a record, reusing a vacated slot when one is available.
    pub fn insert(&mut self, record: EntityRecord) -> EntityHandle {
        self.live += 1;
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            if let Slot::Vacant { next_free } = *slot {
                self.free_head = next_free;
            }
            *slot = Slot::Occupied(record);
            return EntityHandle::from_index(index);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot::Occupied(record));
        EntityHandle::from_index(index)
    }

    pub fn get(&self, handle: EntityHandle) -> Result<&EntityRecord, GridError> {
        match self.slots.get(handle.index()) {
            Some(Slot::Occupied(record)) => Ok(record),
            _ => Err(GridError::UnknownHandle(handle)),
        }
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Result<&mut EntityRecord, GridError> {
        match self.slots.get_mut(handle.index()) {
            Some(Slot::Occupied(record)) => Ok(record),
            _ => Err(GridError::UnknownHandle(handle)),
        }
    }

    /// Vacates the slot and chains it onto the freelist.
    pub fn remove(&mut self, handle: EntityHandle) -> Result<EntityRecord, GridError> {
        match self.slots.get_mut(handle.index()) {
            Some(slot @ Slot::Occupied(_)) => {
                let vacated = core::mem::replace(
                    slot,
                    Slot::Vacant {
                        next_free: self.free_head,
                    },
                );
                self.free_head = Some(handle.value());
                self.live -= 1;
                match vacated {
                    Slot::Occupied(record) => Ok(record),
                    Slot::Vacant { .. } => Err(GridError::UnknownHandle(handle)),
                }
            }
            _ => Err(GridError::UnknownHandle(handle)),
        }
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        matches!(self.slots.get(handle.index()), Some(Slot::Occupied(_)))
    }

    /// Cell keys of a live entity; empty for vacant slots.
    pub fn cells_of(&self, handle: EntityHandle) -> &[CellCoord] {
        match self.slots.get(handle.index()) {
            Some(Slot::Occupied(record)) => &record.cells,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    /// Live records in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &EntityRecord)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let Slot::Occupied(record) = slot else {
                return None;
            };
            Some((EntityHandle::from_index(index as u32), record))
        })
    }

    /// Drops trailing vacant slots and rebuilds the freelist so future
    /// handle reuse favors low indices. Part of the per-tick
    /// consistency pass; O(slots), no effect on live records.
    pub fn compact(&mut self) {
        let trailing_vacant = self
            .slots
            .iter()
            .rev()
            .take_while(|slot| matches!(slot, Slot::Vacant { .. }))
            .count();
        if trailing_vacant == 0 {
            return;
        }
        self.slots.truncate(self.slots.len() - trailing_vacant);
        self.free_head = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if let Slot::Vacant { next_free } = slot {
                *next_free = self.free_head;
                self.free_head = Some(index as u32);
            }
        }
    }
}
