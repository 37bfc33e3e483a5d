// WEC - wec-runtime
// Module: Module Representation
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Static module representation.
//!
//! A [`Module`] is immutable code plus declarations: functions with typed
//! signatures, at most one linear memory, at most one externref table, data
//! segments and named function exports. Instantiating a module produces the
//! mutable state ([`crate::module_instance::ModuleInstance`]); the module
//! itself is shared and never changes after [`ModuleBuilder::build`].
//!
//! Function bodies are trees: `block`, `loop` and `if` own their nested
//! instruction sequences directly, so branch depths in `br`/`br_if`/
//! `br_table` count enclosing constructs, exactly as in the binary format.

use std::collections::HashMap;

use crate::prelude::{
    ArithmeticOp, BlockType, ComparisonOp, Error, FloatBits32, FloatBits64, FuncType, MemoryLoad,
    MemoryStore, MemoryType, Result, TableOp, TableType, ValueType,
};

/// A single instruction in a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Do nothing
    Nop,
    /// Trap unconditionally
    Unreachable,
    /// Push a constant i32
    I32Const(i32),
    /// Push a constant i64
    I64Const(i64),
    /// Push a constant f32 bit pattern
    F32Const(FloatBits32),
    /// Push a constant f64 bit pattern
    F64Const(FloatBits64),
    /// Push a null external reference
    RefNull,
    /// Push the value of a local
    LocalGet(u32),
    /// Pop into a local
    LocalSet(u32),
    /// Copy the top of stack into a local without popping
    LocalTee(u32),
    /// A block: branches targeting it jump past its end
    Block {
        /// Result type of the block
        block_type: BlockType,
        /// Nested body
        body: Vec<Instruction>,
    },
    /// A loop: branches targeting it jump back to its start
    Loop {
        /// Result type of the loop (branches to it carry nothing)
        block_type: BlockType,
        /// Nested body
        body: Vec<Instruction>,
    },
    /// Two-armed conditional; the condition is popped on entry
    If {
        /// Result type of either arm
        block_type: BlockType,
        /// Arm taken on a nonzero condition
        then_body: Vec<Instruction>,
        /// Arm taken on a zero condition (may be empty)
        else_body: Vec<Instruction>,
    },
    /// Unconditional branch to the construct `depth` levels out
    Br(u32),
    /// Conditional branch; pops an i32 condition either way
    BrIf(u32),
    /// Multi-way branch on an i32 index, treated as unsigned
    BrTable {
        /// In-range branch targets
        targets: Vec<u32>,
        /// Target for any out-of-range index
        default: u32,
    },
    /// Branch to the function's outermost level
    Return,
    /// Discard the top operand
    Drop,
    /// Pick one of two operands by an i32 condition
    Select,
    /// A pure arithmetic operator
    Arithmetic(ArithmeticOp),
    /// A pure comparison operator
    Comparison(ComparisonOp),
    /// A bounds-checked memory load
    Load(MemoryLoad),
    /// A bounds-checked memory store
    Store(MemoryStore),
    /// Push the current memory size in pages
    MemorySize,
    /// Grow memory, pushing the previous size or -1
    MemoryGrow,
    /// A table operator (get, set, size, grow)
    Table(TableOp),
}

/// A function: signature, extra locals and a body tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Parameter and result types
    pub ty: FuncType,
    /// Types of locals beyond the parameters, zero-initialized on entry
    pub locals: Vec<ValueType>,
    /// Body instructions
    pub body: Vec<Instruction>,
}

/// A data segment applied to memory at instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSegment {
    /// Byte offset into memory
    pub offset: u64,
    /// Bytes to copy
    pub bytes: Vec<u8>,
}

/// An immutable module.
#[derive(Debug, Clone)]
pub struct Module {
    functions: Vec<Function>,
    memory: Option<MemoryType>,
    table: Option<TableType>,
    data: Vec<DataSegment>,
    exports: HashMap<String, u32>,
}

impl Module {
    /// Start building a module.
    #[must_use]
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder::new()
    }

    /// The function at `index`, if any.
    #[must_use]
    pub fn function(&self, index: u32) -> Option<&Function> {
        self.functions.get(index as usize)
    }

    /// The declared memory type, if any.
    #[must_use]
    pub fn memory(&self) -> Option<&MemoryType> {
        self.memory.as_ref()
    }

    /// The declared table type, if any.
    #[must_use]
    pub fn table(&self) -> Option<&TableType> {
        self.table.as_ref()
    }

    /// The data segments, applied at instantiation.
    #[must_use]
    pub fn data_segments(&self) -> &[DataSegment] {
        &self.data
    }

    /// Resolve an exported function by name.
    ///
    /// # Errors
    ///
    /// Returns a function-not-found error if no export has this name.
    pub fn exported_function(&self, name: &str) -> Result<u32> {
        self.exports.get(name).copied().ok_or(Error::new(
            wec_error::ErrorCategory::Core,
            wec_error::codes::FUNCTION_NOT_FOUND,
            "No exported function with this name",
        ))
    }
}

/// Builder for [`Module`].
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    functions: Vec<Function>,
    memory: Option<MemoryType>,
    table: Option<TableType>,
    data: Vec<DataSegment>,
    exports: HashMap<String, u32>,
}

impl ModuleBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function, returning its index.
    pub fn add_function(&mut self, function: Function) -> u32 {
        let index = self.functions.len() as u32;
        self.functions.push(function);
        index
    }

    /// Declare the module's single memory.
    #[must_use]
    pub fn with_memory(mut self, ty: MemoryType) -> Self {
        self.memory = Some(ty);
        self
    }

    /// Declare the module's single externref table.
    #[must_use]
    pub fn with_table(mut self, ty: TableType) -> Self {
        self.table = Some(ty);
        self
    }

    /// Add a data segment.
    #[must_use]
    pub fn with_data(mut self, offset: u64, bytes: Vec<u8>) -> Self {
        self.data.push(DataSegment { offset, bytes });
        self
    }

    /// Export a function under a name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is already exported or the
    /// index does not refer to a function.
    pub fn export(&mut self, name: &str, function_index: u32) -> Result<()> {
        if function_index as usize >= self.functions.len() {
            return Err(Error::validation_error("Export refers to an unknown function"));
        }
        if self.exports.contains_key(name) {
            return Err(Error::validation_error("Duplicate export name"));
        }
        self.exports.insert(name.to_owned(), function_index);
        Ok(())
    }

    /// Finish the module.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a data segment is declared without a
    /// memory.
    pub fn build(self) -> Result<Module> {
        if !self.data.is_empty() && self.memory.is_none() {
            return Err(Error::validation_error("Data segment without a memory"));
        }
        Ok(Module {
            functions: self.functions,
            memory: self.memory,
            table: self.table,
            data: self.data,
            exports: self.exports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Limits;

    fn empty_function() -> Function {
        Function {
            ty: FuncType { params: vec![], results: vec![] },
            locals: vec![],
            body: vec![Instruction::Nop],
        }
    }

    #[test]
    fn exports_resolve_by_name() {
        let mut builder = Module::builder();
        let index = builder.add_function(empty_function());
        builder.export("main", index).unwrap();
        let module = builder.build().unwrap();
        assert_eq!(module.exported_function("main").unwrap(), index);
        assert!(module.exported_function("missing").is_err());
    }

    #[test]
    fn duplicate_exports_are_rejected() {
        let mut builder = Module::builder();
        let index = builder.add_function(empty_function());
        builder.export("main", index).unwrap();
        assert!(builder.export("main", index).is_err());
    }

    #[test]
    fn export_of_unknown_function_is_rejected() {
        let mut builder = Module::builder();
        assert!(builder.export("main", 0).is_err());
    }

    #[test]
    fn data_needs_a_memory() {
        let builder = Module::builder().with_data(0, vec![1, 2, 3]);
        assert!(builder.build().is_err());

        let builder = Module::builder()
            .with_memory(MemoryType { limits: Limits { min: 1, max: None } })
            .with_data(0, vec![1, 2, 3]);
        assert!(builder.build().is_ok());
    }
}
