// WEC - wec-foundation
// Module: Core Types
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Core WebAssembly types used across the WEC execution core.

use core::fmt;

use wec_error::{Error, Result};

/// WebAssembly value types
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum ValueType {
    /// 32-bit integer
    #[default]
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// External reference
    ExternRef,
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32 => write!(f, "I32"),
            Self::I64 => write!(f, "I64"),
            Self::F32 => write!(f, "F32"),
            Self::F64 => write!(f, "F64"),
            Self::ExternRef => write!(f, "ExternRef"),
        }
    }
}

impl ValueType {
    /// Create a value type from its binary representation
    pub fn from_binary(byte: u8) -> Result<Self> {
        match byte {
            0x7F => Ok(ValueType::I32),
            0x7E => Ok(ValueType::I64),
            0x7D => Ok(ValueType::F32),
            0x7C => Ok(ValueType::F64),
            0x6F => Ok(ValueType::ExternRef),
            _ => Err(Error::parse_error("Invalid value type byte")),
        }
    }

    /// Convert to the WebAssembly binary format value
    #[must_use]
    pub const fn to_binary(self) -> u8 {
        match self {
            ValueType::I32 => 0x7F,
            ValueType::I64 => 0x7E,
            ValueType::F32 => 0x7D,
            ValueType::F64 => 0x7C,
            ValueType::ExternRef => 0x6F,
        }
    }

    /// Byte width of a value of this type in linear memory.
    /// Reference types have no memory representation in this core.
    #[must_use]
    pub const fn byte_width(self) -> Option<u32> {
        match self {
            ValueType::I32 | ValueType::F32 => Some(4),
            ValueType::I64 | ValueType::F64 => Some(8),
            ValueType::ExternRef => None,
        }
    }

    /// Whether this is a reference type
    #[must_use]
    pub const fn is_ref(self) -> bool {
        matches!(self, ValueType::ExternRef)
    }
}

/// Size limits for memories and tables, in pages or elements respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Minimum (and initial) size
    pub min: u32,
    /// Optional maximum size
    pub max: Option<u32>,
}

/// Type of a linear memory: limits counted in 64 KiB pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryType {
    /// Memory limits in pages
    pub limits: Limits,
}

/// Type of a table: element type plus limits counted in elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableType {
    /// Element type; this core stores only externref tables
    pub element_type: ValueType,
    /// Table limits in elements
    pub limits: Limits,
}

/// Result type of a structured control block.
///
/// Block parameters are a loader-validated feature outside this core, so a
/// block either yields nothing or a single typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockType {
    /// Block yields no values
    #[default]
    Empty,
    /// Block yields one value of the given type
    Value(ValueType),
}

impl BlockType {
    /// Number of values flowing out of the block on normal exit.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            BlockType::Empty => 0,
            BlockType::Value(_) => 1,
        }
    }
}

/// Function signature: parameter and result types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    /// Parameter types in order
    pub params: Vec<ValueType>,
    /// Result types in order
    pub results: Vec<ValueType>,
}

impl FuncType {
    /// Create a new function type
    #[must_use]
    pub fn new(params: Vec<ValueType>, results: Vec<ValueType>) -> Self {
        Self { params, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_binary_round_trip() {
        for ty in [
            ValueType::I32,
            ValueType::I64,
            ValueType::F32,
            ValueType::F64,
            ValueType::ExternRef,
        ] {
            assert_eq!(ValueType::from_binary(ty.to_binary()).unwrap(), ty);
        }
        assert!(ValueType::from_binary(0x7B).is_err());
    }

    #[test]
    fn block_arity() {
        assert_eq!(BlockType::Empty.arity(), 0);
        assert_eq!(BlockType::Value(ValueType::I64).arity(), 1);
    }

    #[test]
    fn ref_types_have_no_byte_width() {
        assert_eq!(ValueType::ExternRef.byte_width(), None);
        assert_eq!(ValueType::F64.byte_width(), Some(8));
    }
}
