// WEC - wec-foundation
// Module: Foundation Library
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Foundation library providing the core value and type model for the WEC
//! execution core.
//!
//! This crate owns the representations shared by every layer above it:
//! the [`Value`] tagged union, the [`ValueType`] lattice, opaque
//! [`ExternRef`] host handles, and the structural types (limits, memory and
//! table types, block and function signatures).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core structural types (value types, limits, block/function signatures)
pub mod types;
/// Runtime values and external references
pub mod values;

pub use types::{BlockType, FuncType, Limits, MemoryType, TableType, ValueType};
pub use values::{ExternRef, Value, WeakExternRef};
// Re-export the float bit wrappers so dependents need only one import path.
pub use wec_math::{FloatBits32, FloatBits64};
