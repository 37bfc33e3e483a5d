// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Table operations for WebAssembly instructions.
//!
//! Pure implementations of externref table access: get, set, size and grow.
//! The context owns the table (and the activation region behind it), so
//! rooting a fetched reference is the context's responsibility; this module
//! only handles operand movement and index interpretation.
//!
//! Index operands are i32 values reinterpreted as unsigned; an index at or
//! past the table size traps with "out of bounds table access".

use crate::prelude::{Error, PureInstruction, Result, Value};

/// Represents a pure table operation for WebAssembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOp {
    /// Get an element from the table
    TableGet,
    /// Set an element in the table
    TableSet,
    /// Get the current size of the table
    TableSize,
    /// Grow the table by a given number of elements
    TableGrow,
}

/// Execution context for table operations
pub trait TableContext {
    /// Get a reference from the table.
    ///
    /// Takes `&mut self`: fetching an element roots the returned reference
    /// in the context's activation region before it is handed back, so a
    /// collection between fetch and push cannot reclaim it.
    fn get_table_element(&mut self, elem_index: u32) -> Result<Value>;

    /// Set a reference in the table
    fn set_table_element(&mut self, elem_index: u32, value: Value) -> Result<()>;

    /// Current number of table elements
    fn table_size(&self) -> u32;

    /// Grow the table by `delta` elements initialized to `init`.
    ///
    /// Returns the previous size, or -1 if the table cannot grow.
    fn grow_table(&mut self, delta: u32, init: Value) -> Result<i32>;

    /// Push a value to the context
    fn push_table_value(&mut self, value: Value) -> Result<()>;

    /// Pop a value from the context
    fn pop_table_value(&mut self) -> Result<Value>;
}

impl<T: TableContext> PureInstruction<T, Error> for TableOp {
    fn execute(&self, context: &mut T) -> Result<()> {
        match self {
            Self::TableGet => {
                let index = context
                    .pop_table_value()?
                    .as_u32()
                    .ok_or_else(|| Error::type_error("Expected I32 for table.get index"))?;
                let value = context.get_table_element(index)?;
                context.push_table_value(value)
            }
            Self::TableSet => {
                let value = context.pop_table_value()?;
                let index = context
                    .pop_table_value()?
                    .as_u32()
                    .ok_or_else(|| Error::type_error("Expected I32 for table.set index"))?;
                if value.as_extern_ref().is_none() {
                    return Err(Error::type_error("Expected ExternRef for table.set value"));
                }
                context.set_table_element(index, value)
            }
            Self::TableSize => {
                let size = context.table_size();
                context.push_table_value(Value::I32(size as i32))
            }
            Self::TableGrow => {
                let delta = context
                    .pop_table_value()?
                    .as_u32()
                    .ok_or_else(|| Error::type_error("Expected I32 for table.grow delta"))?;
                let init = context.pop_table_value()?;
                if init.as_extern_ref().is_none() {
                    return Err(Error::type_error("Expected ExternRef for table.grow init"));
                }
                let prev_size = context.grow_table(delta, init)?;
                context.push_table_value(Value::I32(prev_size))
            }
        }
    }
}
