// WEC - wec-error
// Module: WEC Error Codes
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for WEC

// Core execution error codes (1000-1999)
/// Stack underflow error
pub const STACK_UNDERFLOW: u16 = 1000;
/// Stack overflow error
pub const STACK_OVERFLOW: u16 = 1001;
/// General execution error
pub const EXECUTION_ERROR: u16 = 1002;
/// Invalid branch target depth
pub const INVALID_BRANCH_TARGET: u16 = 1003;
/// Exported function not found
pub const FUNCTION_NOT_FOUND: u16 = 1004;
/// Control stack depth limit exceeded
pub const CONTROL_STACK_EXHAUSTED: u16 = 1005;

// Type error codes (2000-2999)
/// Type mismatch error
pub const TYPE_MISMATCH: u16 = 2000;
/// Invalid value type for the operation
pub const INVALID_TYPE: u16 = 2001;

// Resource error codes (3000-3999)
/// Resource error
pub const RESOURCE_ERROR: u16 = 3000;
/// Memory not present in the instance
pub const MEMORY_NOT_FOUND: u16 = 3001;
/// Table not present in the instance
pub const TABLE_NOT_FOUND: u16 = 3002;
/// Table grow exceeds its declared maximum
pub const TABLE_TOO_LARGE: u16 = 3003;
/// Activations region exhausted even after a collection pass
pub const ACTIVATIONS_EXHAUSTED: u16 = 3004;

// Memory error codes (4000-4999)
/// Memory grow error
pub const MEMORY_GROW_ERROR: u16 = 4000;
/// Effective address arithmetic overflowed
pub const ADDRESS_OVERFLOW: u16 = 4001;

// Validation error codes (5000-5999)
/// Validation error
pub const VALIDATION_ERROR: u16 = 5000;
/// Invalid argument error
pub const INVALID_ARGUMENT: u16 = 5001;
/// Parse error (loader collaborator classification)
pub const PARSE_ERROR: u16 = 5002;
/// Malformed module (loader collaborator classification)
pub const MALFORMED_MODULE: u16 = 5003;

// Trap codes (6000-6999): runtime traps defined by the Wasm spec
/// Integer division by zero trap
pub const DIVISION_BY_ZERO: u16 = 6000;
/// Integer overflow trap
pub const INTEGER_OVERFLOW: u16 = 6001;
/// Unreachable instruction executed trap
pub const UNREACHABLE: u16 = 6002;
/// Out of bounds linear memory access trap
pub const MEMORY_ACCESS_OUT_OF_BOUNDS: u16 = 6003;
/// Out of bounds table access trap
pub const TABLE_ACCESS_OUT_OF_BOUNDS: u16 = 6004;
