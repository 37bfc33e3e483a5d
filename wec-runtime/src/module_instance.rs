// WEC - wec-runtime
// Module: Module Instance
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Mutable state produced by instantiating a [`Module`].
//!
//! The instance owns the linear memory, the externref table and the
//! activation region. Hosts reach the table through the accessors to seed
//! references before invoking code.

use crate::module::Module;
use crate::prelude::{ActivationsTable, Error, Memory, Result, Table};

/// The mutable state of an instantiated module.
#[derive(Debug)]
pub struct ModuleInstance {
    memory: Option<Memory>,
    table: Option<Table>,
    activations: ActivationsTable,
}

impl ModuleInstance {
    /// Instantiate a module: build the memory, apply data segments and
    /// build the table.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a declaration is inconsistent or a
    /// data segment does not fit in the initial memory.
    pub fn new(module: &Module) -> Result<Self> {
        let mut memory = match module.memory() {
            Some(ty) => Some(Memory::new(*ty)?),
            None => None,
        };
        if let Some(memory) = memory.as_mut() {
            for segment in module.data_segments() {
                memory.init_data(segment.offset, &segment.bytes)?;
            }
        }
        let table = match module.table() {
            Some(ty) => Some(Table::new(*ty)?),
            None => None,
        };
        Ok(Self { memory, table, activations: ActivationsTable::new() })
    }

    /// Replace the activation region, e.g. to shrink its capacity in tests.
    pub fn set_activations(&mut self, activations: ActivationsTable) {
        self.activations = activations;
    }

    /// The linear memory, if declared.
    #[must_use]
    pub fn memory(&self) -> Option<&Memory> {
        self.memory.as_ref()
    }

    /// Mutable access to the linear memory, if declared.
    pub fn memory_mut(&mut self) -> Option<&mut Memory> {
        self.memory.as_mut()
    }

    /// The externref table, if declared.
    #[must_use]
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Mutable access to the externref table, if declared.
    pub fn table_mut(&mut self) -> Option<&mut Table> {
        self.table.as_mut()
    }

    /// The activation region.
    #[must_use]
    pub fn activations(&self) -> &ActivationsTable {
        &self.activations
    }

    /// Mutable access to the activation region.
    pub fn activations_mut(&mut self) -> &mut ActivationsTable {
        &mut self.activations
    }

    /// The memory, or the error `memory.size`/loads raise without one.
    pub(crate) fn require_memory(&self) -> Result<&Memory> {
        self.memory.as_ref().ok_or(Error::new(
            wec_error::ErrorCategory::Resource,
            wec_error::codes::MEMORY_NOT_FOUND,
            "Module declares no memory",
        ))
    }

    /// Mutable variant of [`Self::require_memory`].
    pub(crate) fn require_memory_mut(&mut self) -> Result<&mut Memory> {
        self.memory.as_mut().ok_or(Error::new(
            wec_error::ErrorCategory::Resource,
            wec_error::codes::MEMORY_NOT_FOUND,
            "Module declares no memory",
        ))
    }

    /// Split borrow of the table and the activation region, as table
    /// operations need both at once.
    pub(crate) fn table_and_activations_mut(
        &mut self,
    ) -> Result<(&mut Table, &mut ActivationsTable)> {
        match self.table.as_mut() {
            Some(table) => Ok((table, &mut self.activations)),
            None => Err(Error::new(
                wec_error::ErrorCategory::Resource,
                wec_error::codes::TABLE_NOT_FOUND,
                "Module declares no table",
            )),
        }
    }
}
