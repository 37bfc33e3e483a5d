// WEC - wec-error
// Module: WEC Error Types
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error type for the WEC execution core.
//!
//! Errors carry a category, a stable `u16` code and a static message. Traps
//! are errors in the `RuntimeTrap` category whose messages use the canonical
//! WebAssembly wording ("integer divide by zero", "out of bounds memory
//! access", ...), so an assert_trap-style harness can match them verbatim.

use core::fmt;

use crate::codes;

/// `Error` categories for WEC operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Core execution errors (stack discipline, dispatch)
    Core = 1,
    /// Resource errors (memory, tables, activation slots)
    Resource = 3,
    /// Memory errors
    Memory = 4,
    /// Validation errors
    Validation = 5,
    /// Type errors
    Type = 6,
    /// Runtime errors (general)
    Runtime = 7,
    /// Parse errors (loader collaborator)
    Parse = 10,
    /// Capacity errors
    Capacity = 12,
    /// WebAssembly trap errors (specific runtime errors defined by the Wasm spec)
    RuntimeTrap = 13,
}

/// WEC `Error` type
///
/// Categorized error with a stable code and a static message. `Copy` so it
/// can propagate through the engine without allocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code: u16,
    /// `Error` message
    pub message: &'static str,
}

impl Error {
    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self { category, code, message }
    }

    /// Create a general runtime error
    #[must_use]
    pub const fn runtime_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Runtime, codes::EXECUTION_ERROR, message)
    }

    /// Create a type mismatch error
    #[must_use]
    pub const fn type_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Type, codes::INVALID_TYPE, message)
    }

    /// Create a stack underflow error
    #[must_use]
    pub const fn stack_underflow() -> Self {
        Self::new(ErrorCategory::Core, codes::STACK_UNDERFLOW, "Stack underflow")
    }

    /// Create a validation error
    #[must_use]
    pub const fn validation_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, codes::VALIDATION_ERROR, message)
    }

    /// Create an invalid argument error
    #[must_use]
    pub const fn invalid_argument(message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, codes::INVALID_ARGUMENT, message)
    }

    /// Create a resource error
    #[must_use]
    pub const fn resource_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Resource, codes::RESOURCE_ERROR, message)
    }

    /// Create a memory grow error
    #[must_use]
    pub const fn memory_grow_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Memory, codes::MEMORY_GROW_ERROR, message)
    }

    /// Create a parse error (loader collaborator classification)
    #[must_use]
    pub const fn parse_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Parse, codes::PARSE_ERROR, message)
    }

    // Trap constructors. Messages are the canonical Wasm trap strings.

    /// Create a trap integer divide by zero error
    #[must_use]
    pub const fn trap_divide_by_zero() -> Self {
        Self::new(
            ErrorCategory::RuntimeTrap,
            codes::DIVISION_BY_ZERO,
            "integer divide by zero",
        )
    }

    /// Create a trap integer overflow error
    #[must_use]
    pub const fn trap_integer_overflow() -> Self {
        Self::new(
            ErrorCategory::RuntimeTrap,
            codes::INTEGER_OVERFLOW,
            "integer overflow",
        )
    }

    /// Create a trap unreachable error
    #[must_use]
    pub const fn trap_unreachable() -> Self {
        Self::new(ErrorCategory::RuntimeTrap, codes::UNREACHABLE, "unreachable")
    }

    /// Create a trap out of bounds memory access error
    #[must_use]
    pub const fn trap_memory_out_of_bounds() -> Self {
        Self::new(
            ErrorCategory::RuntimeTrap,
            codes::MEMORY_ACCESS_OUT_OF_BOUNDS,
            "out of bounds memory access",
        )
    }

    /// Create a trap out of bounds table access error
    #[must_use]
    pub const fn trap_table_out_of_bounds() -> Self {
        Self::new(
            ErrorCategory::RuntimeTrap,
            codes::TABLE_ACCESS_OUT_OF_BOUNDS,
            "out of bounds table access",
        )
    }

    /// Check if this error is a runtime trap
    #[must_use]
    pub fn is_trap(&self) -> bool {
        self.category == ErrorCategory::RuntimeTrap
    }

    /// Check if this is a memory error
    #[must_use]
    pub fn is_memory_error(&self) -> bool {
        self.category == ErrorCategory::Memory
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.category == ErrorCategory::Validation
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] Error {}: {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trap_constructors_use_canonical_messages() {
        assert_eq!(Error::trap_divide_by_zero().message, "integer divide by zero");
        assert_eq!(Error::trap_integer_overflow().message, "integer overflow");
        assert_eq!(Error::trap_unreachable().message, "unreachable");
        assert_eq!(
            Error::trap_memory_out_of_bounds().message,
            "out of bounds memory access"
        );
        assert_eq!(
            Error::trap_table_out_of_bounds().message,
            "out of bounds table access"
        );
    }

    #[test]
    fn trap_classification() {
        assert!(Error::trap_unreachable().is_trap());
        assert!(!Error::stack_underflow().is_trap());
        assert!(Error::validation_error("x").is_validation_error());
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = Error::trap_divide_by_zero();
        let rendered = format!("{err}");
        assert!(rendered.contains("integer divide by zero"));
        assert!(rendered.contains("6000"));
    }
}
