// WEC - wec-runtime
// Module: Runtime Prelude
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wec-runtime
//!
//! Single import surface for the types the runtime modules share.

pub use core::fmt::{self, Debug};

pub use wec_error::{codes, Error, ErrorCategory, Result};
pub use wec_foundation::{
    BlockType, ExternRef, FloatBits32, FloatBits64, FuncType, Limits, MemoryType, TableType,
    Value, ValueType, WeakExternRef,
};
pub use wec_instructions::{
    ArithmeticContext, ArithmeticOp, BlockKind, ComparisonContext, ComparisonOp, MemoryLoad,
    MemoryOperations, MemoryStore, ParametricContext, ParametricOp, PureInstruction,
    TableContext, TableOp,
};

pub use crate::{
    activations::{ActivationsTable, DEFAULT_ACTIVATIONS_CAPACITY},
    memory::{Memory, PAGE_SIZE},
    table::Table,
};
