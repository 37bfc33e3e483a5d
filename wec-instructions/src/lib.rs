// WEC - wec-instructions
// Module: WebAssembly Instruction Implementations
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)]

//! WebAssembly instruction implementations for the WEC execution core.
//!
//! This crate provides pure, stateless implementations of the instructions
//! the core supports, decoupled from any particular execution engine through
//! small context traits.
//!
//! # Architecture
//!
//! The crate is organized into modules for different instruction categories:
//!
//! - `arithmetic_ops`: Arithmetic operations (add, subtract, multiply, trapping divide/remainder, float sign manipulation)
//! - `comparison_ops`: Comparison operations (equality, relational)
//! - `parametric_ops`: Parametric operations (drop, select)
//! - `memory_ops`: Memory operations (bounds-checked load and store)
//! - `table_ops`: Table operations (get, set, size, grow)
//! - `control_ops`: Control-flow building blocks (block kinds, `br_table` selection)
//!
//! Each module implements its operators against the traits defined in
//! `instruction_traits`, so the same semantics are shared between the engine
//! and mock-context unit tests.

#![deny(missing_docs)]
#![warn(clippy::missing_panics_doc)]

pub mod prelude;

pub mod arithmetic_ops;
pub mod comparison_ops;
pub mod control_ops;
pub mod instruction_traits;
pub mod memory_ops;
pub mod parametric_ops;
pub mod table_ops;

pub use prelude::*;
pub use wec_error::{Error, Result};

pub use crate::{
    arithmetic_ops::{ArithmeticContext, ArithmeticOp},
    comparison_ops::{ComparisonContext, ComparisonOp},
    control_ops::{br_table_select, BlockKind},
    instruction_traits::PureInstruction,
    memory_ops::{MemoryLoad, MemoryOperations, MemoryStore},
    parametric_ops::{ParametricContext, ParametricOp},
    table_ops::{TableContext, TableOp},
};
