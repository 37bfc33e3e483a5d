// WEC - wec-math
// Module: Numeric Operations
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Implementations of WebAssembly numeric instructions.
//!
//! Integer division and remainder follow the trapping semantics of the Wasm
//! spec: division by zero traps for every div/rem variant, and signed
//! division of `MIN / -1` traps with integer overflow. Signed remainder of
//! `MIN % -1` yields 0 instead of trapping; that asymmetry is deliberate and
//! tested.
//!
//! Floating-point sign operations work on the raw bit patterns so that NaN
//! payloads and negative zero survive unchanged.

use wec_error::{Error, Result};

use crate::float_bits::{FloatBits32, FloatBits64};

// ---- i32 arithmetic ----

/// i32.add (wrapping)
#[must_use]
pub const fn i32_add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// i32.sub (wrapping)
#[must_use]
pub const fn i32_sub(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

/// i32.mul (wrapping)
#[must_use]
pub const fn i32_mul(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

/// i32.div_s with trapping semantics.
///
/// Traps on a zero divisor and on `i32::MIN / -1` (the quotient 2^31 is not
/// representable).
pub fn i32_div_s(a: i32, b: i32) -> Result<i32> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    if a == i32::MIN && b == -1 {
        return Err(Error::trap_integer_overflow());
    }
    Ok(a.wrapping_div(b))
}

/// i32.div_u with trapping semantics (zero divisor only).
pub fn i32_div_u(a: u32, b: u32) -> Result<u32> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    Ok(a / b)
}

/// i32.rem_s with trapping semantics.
///
/// Traps on a zero divisor. `i32::MIN % -1` is defined to be 0; unlike
/// division there is no overflow trap.
pub fn i32_rem_s(a: i32, b: i32) -> Result<i32> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    Ok(a.wrapping_rem(b))
}

/// i32.rem_u with trapping semantics (zero divisor only).
pub fn i32_rem_u(a: u32, b: u32) -> Result<u32> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    Ok(a % b)
}

// ---- i64 arithmetic ----

/// i64.add (wrapping)
#[must_use]
pub const fn i64_add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

/// i64.sub (wrapping)
#[must_use]
pub const fn i64_sub(a: i64, b: i64) -> i64 {
    a.wrapping_sub(b)
}

/// i64.mul (wrapping)
#[must_use]
pub const fn i64_mul(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

/// i64.div_s with trapping semantics.
pub fn i64_div_s(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    if a == i64::MIN && b == -1 {
        return Err(Error::trap_integer_overflow());
    }
    Ok(a.wrapping_div(b))
}

/// i64.div_u with trapping semantics (zero divisor only).
pub fn i64_div_u(a: u64, b: u64) -> Result<u64> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    Ok(a / b)
}

/// i64.rem_s with trapping semantics. `i64::MIN % -1` yields 0.
pub fn i64_rem_s(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    Ok(a.wrapping_rem(b))
}

/// i64.rem_u with trapping semantics (zero divisor only).
pub fn i64_rem_u(a: u64, b: u64) -> Result<u64> {
    if b == 0 {
        return Err(Error::trap_divide_by_zero());
    }
    Ok(a % b)
}

// ---- floating-point sign operations ----
//
// All of these operate directly on bits. Going through host-float arithmetic
// would risk NaN canonicalization; a pure mask-and-or cannot.

/// f32.abs: clear the sign bit.
#[must_use]
pub const fn f32_abs(a: FloatBits32) -> FloatBits32 {
    FloatBits32(a.0 & !FloatBits32::SIGN_MASK)
}

/// f32.neg: flip the sign bit.
#[must_use]
pub const fn f32_neg(a: FloatBits32) -> FloatBits32 {
    FloatBits32(a.0 ^ FloatBits32::SIGN_MASK)
}

/// f32.copysign: magnitude from `a`, sign bit from `b`.
#[must_use]
pub const fn f32_copysign(a: FloatBits32, b: FloatBits32) -> FloatBits32 {
    FloatBits32((a.0 & !FloatBits32::SIGN_MASK) | (b.0 & FloatBits32::SIGN_MASK))
}

/// f64.abs: clear the sign bit.
#[must_use]
pub const fn f64_abs(a: FloatBits64) -> FloatBits64 {
    FloatBits64(a.0 & !FloatBits64::SIGN_MASK)
}

/// f64.neg: flip the sign bit.
#[must_use]
pub const fn f64_neg(a: FloatBits64) -> FloatBits64 {
    FloatBits64(a.0 ^ FloatBits64::SIGN_MASK)
}

/// f64.copysign: magnitude from `a`, sign bit from `b`, bit-exact.
#[must_use]
pub const fn f64_copysign(a: FloatBits64, b: FloatBits64) -> FloatBits64 {
    FloatBits64((a.0 & !FloatBits64::SIGN_MASK) | (b.0 & FloatBits64::SIGN_MASK))
}

// ---- comparisons (result is an i32 boolean, 0 or 1) ----

/// i32.eqz
#[must_use]
pub const fn i32_eqz(a: i32) -> i32 {
    (a == 0) as i32
}

/// i32.eq
#[must_use]
pub const fn i32_eq(a: i32, b: i32) -> i32 {
    (a == b) as i32
}

/// i32.ne
#[must_use]
pub const fn i32_ne(a: i32, b: i32) -> i32 {
    (a != b) as i32
}

/// i32.lt_s
#[must_use]
pub const fn i32_lt_s(a: i32, b: i32) -> i32 {
    (a < b) as i32
}

/// i32.lt_u
#[must_use]
pub const fn i32_lt_u(a: u32, b: u32) -> i32 {
    (a < b) as i32
}

/// i32.gt_s
#[must_use]
pub const fn i32_gt_s(a: i32, b: i32) -> i32 {
    (a > b) as i32
}

/// i32.gt_u
#[must_use]
pub const fn i32_gt_u(a: u32, b: u32) -> i32 {
    (a > b) as i32
}

/// i32.le_s
#[must_use]
pub const fn i32_le_s(a: i32, b: i32) -> i32 {
    (a <= b) as i32
}

/// i32.ge_s
#[must_use]
pub const fn i32_ge_s(a: i32, b: i32) -> i32 {
    (a >= b) as i32
}

/// i64.eqz
#[must_use]
pub const fn i64_eqz(a: i64) -> i32 {
    (a == 0) as i32
}

/// i64.eq
#[must_use]
pub const fn i64_eq(a: i64, b: i64) -> i32 {
    (a == b) as i32
}

/// i64.ne
#[must_use]
pub const fn i64_ne(a: i64, b: i64) -> i32 {
    (a != b) as i32
}

/// i64.lt_s
#[must_use]
pub const fn i64_lt_s(a: i64, b: i64) -> i32 {
    (a < b) as i32
}

/// f64.eq (IEEE comparison, NaN is never equal)
#[must_use]
pub fn f64_eq(a: FloatBits64, b: FloatBits64) -> i32 {
    (a.value() == b.value()) as i32
}

/// f64.ne
#[must_use]
pub fn f64_ne(a: FloatBits64, b: FloatBits64) -> i32 {
    (a.value() != b.value()) as i32
}

/// f64.lt
#[must_use]
pub fn f64_lt(a: FloatBits64, b: FloatBits64) -> i32 {
    (a.value() < b.value()) as i32
}

/// f64.gt
#[must_use]
pub fn f64_gt(a: FloatBits64, b: FloatBits64) -> i32 {
    (a.value() > b.value()) as i32
}

/// f64.le
#[must_use]
pub fn f64_le(a: FloatBits64, b: FloatBits64) -> i32 {
    (a.value() <= b.value()) as i32
}

/// f64.ge
#[must_use]
pub fn f64_ge(a: FloatBits64, b: FloatBits64) -> i32 {
    (a.value() >= b.value()) as i32
}
