// WEC - wec-runtime
// Module: Runtime Library
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)]

//! WebAssembly execution engine for the WEC execution core.
//!
//! This crate ties the pure instruction implementations from
//! `wec-instructions` to concrete runtime state: bounds-checked linear
//! [`Memory`], the externref [`Table`] with its bump-allocated
//! [`ActivationsTable`] and synchronous collector, static [`Module`]s built
//! through [`ModuleBuilder`], and the [`StacklessEngine`] that drives
//! structured control flow over explicit operand and control stacks.
//!
//! # Example
//!
//! ```
//! use wec_foundation::{FuncType, Value, ValueType};
//! use wec_runtime::{
//!     ArithmeticOp, Function, Instruction, Module, ModuleInstance, StacklessEngine,
//! };
//!
//! let mut builder = Module::builder();
//! let add = builder.add_function(Function {
//!     ty: FuncType::new(vec![ValueType::I32, ValueType::I32], vec![ValueType::I32]),
//!     locals: vec![],
//!     body: vec![
//!         Instruction::LocalGet(0),
//!         Instruction::LocalGet(1),
//!         Instruction::Arithmetic(ArithmeticOp::I32Add),
//!     ],
//! });
//! builder.export("add", add).unwrap();
//! let module = builder.build().unwrap();
//!
//! let mut instance = ModuleInstance::new(&module).unwrap();
//! let mut engine = StacklessEngine::new();
//! let results = engine
//!     .invoke(&module, &mut instance, "add", &[Value::I32(2), Value::I32(3)])
//!     .unwrap();
//! assert_eq!(results, vec![Value::I32(5)]);
//! ```

#![deny(missing_docs)]
#![warn(clippy::missing_panics_doc)]

pub mod prelude;

pub mod activations;
pub mod memory;
pub mod module;
pub mod module_instance;
pub mod stackless;
pub mod table;

pub use prelude::*;
pub use wec_error::{Error, Result};

pub use crate::{
    activations::{ActivationsTable, DEFAULT_ACTIVATIONS_CAPACITY},
    memory::{Memory, MAX_PAGES, PAGE_SIZE},
    module::{DataSegment, Function, Instruction, Module, ModuleBuilder},
    module_instance::ModuleInstance,
    stackless::{ControlFrame, EngineLimits, ExecutionStats, StacklessEngine},
    table::Table,
};
