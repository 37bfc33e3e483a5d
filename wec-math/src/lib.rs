// WEC - wec-math
// Module: Numeric Operations
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Mathematical operations and types for WEC.
//! Provides implementations for WebAssembly numeric instructions.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

#[cfg(feature = "std")]
extern crate std;

// Modules
pub mod float_bits;
pub mod ops;

// Re-export key types and operations for easier access
pub use float_bits::{FloatBits32, FloatBits64};
pub use ops::*;
pub use wec_error::Result as WecMathResult;
