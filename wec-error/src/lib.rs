// WEC - wec-error
// Module: WEC Error Handling
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WEC error handling library
//!
//! Provides the error type shared by every crate in the WEC execution core.
//!
//! # Error Categories
//!
//! Errors are organized into categories, each with its own range of error
//! codes:
//!
//! - Core errors (1000+): stack discipline, dispatch, exports
//! - Type errors (2000+): operand/type mismatches
//! - Resource errors (3000+): missing memories/tables, activation slots
//! - Memory errors (4000+): grow failures, address arithmetic
//! - Validation errors (5000+): invoke-boundary and loader classification
//! - Traps (6000+): the runtime traps defined by the WebAssembly spec
//!
//! # Usage
//!
//! ```
//! use wec_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Core,
//!     codes::FUNCTION_NOT_FOUND,
//!     "Unknown export",
//! );
//! let trap = Error::trap_divide_by_zero();
//! assert!(trap.is_trap());
//! assert!(!error.is_trap());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

/// Error codes for WEC
pub mod codes;
/// Error and error handling types
pub mod errors;

pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for WEC operations.
pub type Result<T> = core::result::Result<T, Error>;
