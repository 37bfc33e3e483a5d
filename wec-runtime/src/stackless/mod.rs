// WEC - wec-runtime
// Module: Stackless Execution
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Stackless WebAssembly execution engine.
//!
//! The engine drives execution from an explicit control stack instead of the
//! host call stack: entering a `block`, `loop` or `if` pushes a
//! [`frame::ControlFrame`], and branches unwind frames and the shared operand
//! stack directly. Nesting depth is therefore bounded by a configurable
//! limit, not by host stack space.

pub mod engine;
pub mod frame;

pub use engine::{EngineLimits, ExecutionStats, StacklessEngine};
pub use frame::ControlFrame;
