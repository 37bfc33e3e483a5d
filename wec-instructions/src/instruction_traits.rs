// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Common traits for instruction implementations.

/// A pure instruction: executes against a context without holding any
/// execution state of its own.
///
/// Contexts are small trait surfaces (pop/push values, touch a memory or
/// table) so the same operator semantics are shared between the engine and
/// mock-context unit tests.
pub trait PureInstruction<C, E> {
    /// Execute the instruction against the given context.
    fn execute(&self, context: &mut C) -> Result<(), E>;
}
