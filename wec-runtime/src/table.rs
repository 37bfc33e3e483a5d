// WEC - wec-runtime
// Module: ExternRef Table
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Externref table implementation.
//!
//! A [`Table`] holds nullable external references. Slots hold counted
//! handles, so a reference stored in a table stays alive for as long as the
//! slot does; table slots are the root set the activation-region collector
//! traces from.

use log::debug;

use crate::prelude::{Error, ExternRef, Result, TableType};

/// An externref table instance
#[derive(Debug, Clone)]
pub struct Table {
    /// The table type (element type and limits)
    ty: TableType,
    /// Element slots; `None` is the null reference
    elements: Vec<Option<ExternRef>>,
}

impl Table {
    /// Create a table from its type, filled with null references.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the element type is not a reference
    /// type or the limits are inconsistent.
    pub fn new(ty: TableType) -> Result<Self> {
        if !ty.element_type.is_ref() {
            return Err(Error::validation_error("Table element type must be a reference"));
        }
        if let Some(max) = ty.limits.max {
            if ty.limits.min > max {
                return Err(Error::validation_error("Table minimum exceeds maximum"));
            }
        }
        debug!("table: created with {} elements", ty.limits.min);
        Ok(Self { ty, elements: vec![None; ty.limits.min as usize] })
    }

    /// The table's type.
    #[must_use]
    pub fn ty(&self) -> &TableType {
        &self.ty
    }

    /// Current number of elements.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.elements.len() as u32
    }

    /// Get the element at `index`.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds table access if `index` is at or past the
    /// current size.
    pub fn get(&self, index: u32) -> Result<Option<ExternRef>> {
        self.elements
            .get(index as usize)
            .cloned()
            .ok_or_else(Error::trap_table_out_of_bounds)
    }

    /// Set the element at `index`.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds table access if `index` is at or past the
    /// current size.
    pub fn set(&mut self, index: u32, value: Option<ExternRef>) -> Result<()> {
        let slot = self
            .elements
            .get_mut(index as usize)
            .ok_or_else(Error::trap_table_out_of_bounds)?;
        *slot = value;
        Ok(())
    }

    /// Grow the table by `delta` elements initialized to `init`, returning
    /// the previous size.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the new size would exceed the declared
    /// maximum; the caller translates the failure into the -1 result
    /// `table.grow` reports to WebAssembly code.
    pub fn grow(&mut self, delta: u32, init: Option<ExternRef>) -> Result<u32> {
        let prev = self.size();
        let new_size = prev.checked_add(delta).ok_or_else(|| {
            Error::new(
                wec_error::ErrorCategory::Capacity,
                wec_error::codes::TABLE_TOO_LARGE,
                "Table size overflow",
            )
        })?;
        if let Some(max) = self.ty.limits.max {
            if new_size > max {
                return Err(Error::new(
                    wec_error::ErrorCategory::Capacity,
                    wec_error::codes::TABLE_TOO_LARGE,
                    "Growth exceeds table limit",
                ));
            }
        }
        self.elements.resize(new_size as usize, init);
        debug!("table: grew from {prev} to {new_size} elements");
        Ok(prev)
    }

    /// Iterate over the non-null slots. This is the collector's root set.
    pub fn live_refs(&self) -> impl Iterator<Item = &ExternRef> {
        self.elements.iter().filter_map(Option::as_ref)
    }
}
