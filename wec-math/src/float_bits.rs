// WEC - wec-math
// Module: Float Bit Patterns
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Wrapper types for f32 and f64 ensuring bit-pattern based equality and
//! hashing.

use core::hash::{Hash, Hasher};

/// Wrapper for f32 that implements Hash, `PartialEq`, and Eq based on bit
/// patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct FloatBits32(pub u32);

impl FloatBits32 {
    /// Represents a canonical Not-a-Number (`NaN`) value for f32.
    /// (Sign bit 0, exponent all 1s, significand MSB 1, rest 0.)
    pub const NAN: Self = FloatBits32(0x7fc0_0000);
    /// Bit mask of the f32 sign bit.
    pub const SIGN_MASK: u32 = 0x8000_0000;

    /// Creates a new `FloatBits32` from an `f32` value.
    #[must_use]
    pub fn from_float(val: f32) -> Self {
        Self(val.to_bits())
    }

    /// Returns the `f32` value represented by this `FloatBits32`.
    #[must_use]
    pub const fn value(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Returns the underlying `u32` bits of this `FloatBits32`.
    #[must_use]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Creates a `FloatBits32` from raw `u32` bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

impl Hash for FloatBits32 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Wrapper for f64 that implements Hash, `PartialEq`, and Eq based on bit
/// patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct FloatBits64(pub u64);

impl FloatBits64 {
    /// Represents a canonical Not-a-Number (`NaN`) value for f64.
    /// (Sign bit 0, exponent all 1s, significand MSB 1, rest 0.)
    pub const NAN: Self = FloatBits64(0x7ff8_0000_0000_0000);
    /// Bit mask of the f64 sign bit.
    pub const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

    /// Creates a new `FloatBits64` from an `f64` value.
    #[must_use]
    pub fn from_float(val: f64) -> Self {
        Self(val.to_bits())
    }

    /// Returns the `f64` value represented by this `FloatBits64`.
    #[must_use]
    pub const fn value(self) -> f64 {
        f64::from_bits(self.0)
    }

    /// Returns the underlying `u64` bits of this `FloatBits64`.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Creates a `FloatBits64` from raw `u64` bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
}

impl Hash for FloatBits64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_pattern_equality_distinguishes_zero_signs() {
        let pos = FloatBits64::from_float(0.0);
        let neg = FloatBits64::from_float(-0.0);
        assert_ne!(pos, neg);
        assert_eq!(neg.to_bits(), FloatBits64::SIGN_MASK);
    }

    #[test]
    fn nan_payloads_are_preserved() {
        let quiet = FloatBits32::NAN;
        let other = FloatBits32::from_bits(0x7fc0_0001);
        assert_ne!(quiet, other);
        assert!(quiet.value().is_nan());
        assert!(other.value().is_nan());
    }
}
