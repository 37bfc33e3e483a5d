// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wec-instructions
//!
//! Re-exports the types and traits the instruction modules share, so the
//! individual modules keep a single import line.

pub use core::fmt::{self, Debug, Display};

pub use wec_error::{codes, Error, ErrorCategory, Result};
pub use wec_foundation::{
    BlockType, ExternRef, FloatBits32, FloatBits64, FuncType, Limits, MemoryType, TableType,
    Value, ValueType,
};

pub use crate::{
    arithmetic_ops::ArithmeticOp,
    comparison_ops::ComparisonOp,
    control_ops::BlockKind,
    instruction_traits::PureInstruction,
    memory_ops::{MemoryLoad, MemoryStore},
    parametric_ops::ParametricOp,
    table_ops::TableOp,
};
