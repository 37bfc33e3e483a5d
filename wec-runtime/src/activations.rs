// WEC - wec-runtime
// Module: Activation Region
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Bump-allocated activation region for external references.
//!
//! References produced during execution (a `table.get` result, for example)
//! are recorded here so they stay alive while they sit on the operand stack.
//! The region is a fixed-capacity slot array with a bump cursor. When the
//! cursor reaches capacity, a synchronous collection runs: every slot whose
//! reference is still reachable from the root set (the table's non-null
//! slots, plus the reference currently in flight) is kept and compacted to
//! the front; everything else is dropped, releasing its count.
//!
//! Collection is exact and synchronous. It runs only inside [`insert`], so
//! there is no point during execution where a rooted reference can be
//! reclaimed.
//!
//! [`insert`]: ActivationsTable::insert

use log::debug;

use crate::prelude::{codes, Error, ErrorCategory, ExternRef, Result, Table};

/// Default slot capacity of the activation region.
///
/// Sized so that long reference-churning loops exercise the collector
/// without making every small program pay for a collection.
pub const DEFAULT_ACTIVATIONS_CAPACITY: usize = 4_096;

/// The activation region: a bump allocator over reference slots.
#[derive(Debug)]
pub struct ActivationsTable {
    /// Slot storage; only `slots[..cursor]` is occupied
    slots: Vec<Option<ExternRef>>,
    /// Next free slot
    cursor: usize,
    /// Number of collections run so far
    collections: u64,
}

impl ActivationsTable {
    /// Create a region with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ACTIVATIONS_CAPACITY)
    }

    /// Create a region with an explicit slot capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: vec![None; capacity], cursor: 0, collections: 0 }
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Whether no slots are occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Total slot capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Collections run so far.
    #[must_use]
    pub fn collections(&self) -> u64 {
        self.collections
    }

    /// Record a reference in the region, collecting first if it is full.
    ///
    /// `roots` is the table whose non-null slots anchor liveness; `pending`
    /// is a reference in flight (fetched but not yet reachable from any
    /// root) that must survive the collection this call may trigger.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the region is still full after a
    /// collection, i.e. every slot is reachable from the roots.
    pub fn insert(
        &mut self,
        value: ExternRef,
        roots: &Table,
        pending: Option<&ExternRef>,
    ) -> Result<()> {
        if self.cursor == self.slots.len() {
            self.collect(roots, pending);
            if self.cursor == self.slots.len() {
                return Err(Error::new(
                    ErrorCategory::Resource,
                    codes::ACTIVATIONS_EXHAUSTED,
                    "Activation region exhausted",
                ));
            }
        }
        self.slots[self.cursor] = Some(value);
        self.cursor += 1;
        Ok(())
    }

    /// Run a synchronous collection.
    ///
    /// Keeps one slot per reference identical to one reachable from the
    /// root set, compacts the survivors to the front and resets the cursor
    /// past them. Duplicate slots for the same payload are redundant (the
    /// root already anchors it), so repeated fetches of a rooted reference
    /// collapse to a single slot instead of filling the region.
    pub fn collect(&mut self, roots: &Table, pending: Option<&ExternRef>) {
        let before = self.cursor;
        let mut kept = 0;
        for index in 0..self.cursor {
            let live = match &self.slots[index] {
                Some(reference) => {
                    let reachable = roots.live_refs().any(|root| root.same_identity(reference))
                        || pending.is_some_and(|p| p.same_identity(reference));
                    let duplicate = self.slots[..kept]
                        .iter()
                        .any(|slot| slot.as_ref().is_some_and(|s| s.same_identity(reference)));
                    reachable && !duplicate
                }
                None => false,
            };
            if live {
                self.slots.swap(kept, index);
                kept += 1;
            } else {
                self.slots[index] = None;
            }
        }
        self.cursor = kept;
        self.collections += 1;
        debug!("activations: collected, {before} -> {kept} live slots");
    }
}

impl Default for ActivationsTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{Limits, TableType, ValueType};

    fn table_of(size: u32) -> Table {
        Table::new(TableType {
            element_type: ValueType::ExternRef,
            limits: Limits { min: size, max: None },
        })
        .unwrap()
    }

    #[test]
    fn insert_bumps_the_cursor() {
        let table = table_of(2);
        let mut activations = ActivationsTable::with_capacity(4);
        activations.insert(ExternRef::new(1), &table, None).unwrap();
        activations.insert(ExternRef::new(2), &table, None).unwrap();
        assert_eq!(activations.len(), 2);
    }

    #[test]
    fn collection_drops_unreachable_slots() {
        let mut table = table_of(2);
        let mut activations = ActivationsTable::with_capacity(4);

        let rooted = ExternRef::new(1);
        let rooted_weak = rooted.downgrade();
        table.set(0, Some(rooted.clone())).unwrap();
        activations.insert(rooted, &table, None).unwrap();

        let garbage = ExternRef::new(2);
        let garbage_weak = garbage.downgrade();
        activations.insert(garbage, &table, None).unwrap();

        activations.collect(&table, None);
        assert_eq!(activations.len(), 1);
        assert!(rooted_weak.is_live());
        assert!(!garbage_weak.is_live());
        assert_eq!(activations.collections(), 1);
    }

    #[test]
    fn a_full_region_collects_on_insert() {
        let table = table_of(1);
        let mut activations = ActivationsTable::with_capacity(2);
        // neither reference is rooted, so the triggered collection frees both
        activations.insert(ExternRef::new(1), &table, None).unwrap();
        activations.insert(ExternRef::new(2), &table, None).unwrap();
        activations.insert(ExternRef::new(3), &table, None).unwrap();
        assert_eq!(activations.collections(), 1);
        assert_eq!(activations.len(), 1);
    }

    #[test]
    fn the_pending_reference_survives_collection() {
        let table = table_of(1);
        let mut activations = ActivationsTable::with_capacity(1);
        let pending = ExternRef::new(7);
        let weak = pending.downgrade();
        activations.insert(pending.clone(), &table, Some(&pending)).unwrap();
        // region is full; a second insert of the same pending ref collects
        // but must keep the pending slot alive
        activations.insert(pending.clone(), &table, Some(&pending)).unwrap_err();
        drop(pending);
        assert!(weak.is_live());
    }

    #[test]
    fn duplicates_of_a_rooted_reference_collapse_to_one_slot() {
        let mut table = table_of(1);
        let mut activations = ActivationsTable::with_capacity(4);
        let rooted = ExternRef::new(3);
        table.set(0, Some(rooted.clone())).unwrap();
        for _ in 0..4 {
            activations.insert(rooted.clone(), &table, None).unwrap();
        }
        // region is full of copies of one rooted payload; the triggered
        // collection keeps a single slot and makes room
        activations.insert(rooted.clone(), &table, None).unwrap();
        assert_eq!(activations.collections(), 1);
        assert_eq!(activations.len(), 2);
    }

    #[test]
    fn exhaustion_is_an_error_not_a_panic() {
        let mut table = table_of(2);
        let mut activations = ActivationsTable::with_capacity(2);
        for i in 0..2 {
            let reference = ExternRef::new(i);
            table.set(i as u32, Some(reference.clone())).unwrap();
            activations.insert(reference, &table, None).unwrap();
        }
        let err = activations.insert(ExternRef::new(9), &table, None).unwrap_err();
        assert_eq!(err.code, codes::ACTIVATIONS_EXHAUSTED);
    }
}
