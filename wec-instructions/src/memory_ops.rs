// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Memory operations for WebAssembly instructions.
//!
//! This module separates memory access semantics from the underlying memory
//! implementation. [`MemoryLoad`] and [`MemoryStore`] describe a typed access
//! (value type, static offset, width, signedness) and execute against
//! anything implementing [`MemoryOperations`], so the engine and unit tests
//! share the same access code.
//!
//! # Bounds and alignment
//!
//! Every access is bounds-checked against the current memory size at
//! execution time; an access whose last byte falls outside memory traps with
//! "out of bounds memory access". The `align` field is an advisory hint
//! carried from the instruction encoding: misaligned accesses are legal and
//! never trap, alignment affects performance only.
//!
//! # Check placement
//!
//! Operand evaluation is strict. A load feeding either arm of a `select`
//! executes, and performs its bounds check, before the condition is
//! consulted. A bounds check may therefore be sunk below a condition only
//! when the access executes on both paths; the dispatch loop never moves a
//! check across a point where a trap would be skipped or newly introduced.

// WebAssembly value semantics require bit reinterpretation casts.
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]

use crate::prelude::{Error, Result, Value, ValueType};

/// Memory trait defining the requirements for memory operations.
///
/// Offsets use `u64` so effective-address arithmetic cannot overflow the
/// index type before the bounds check runs.
pub trait MemoryOperations {
    /// Read exactly `buffer.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds memory access if the read exceeds the
    /// current memory size.
    fn read_bytes(&self, offset: u64, buffer: &mut [u8]) -> Result<()>;

    /// Write all of `bytes` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds memory access if the write exceeds the
    /// current memory size.
    fn write_bytes(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;

    /// Current size of memory in bytes.
    fn size_in_bytes(&self) -> u64;
}

/// Memory load operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLoad {
    /// Static offset added to the dynamic address operand
    pub offset: u64,
    /// Advisory alignment hint (a power of two, never enforced)
    pub align: u32,
    /// Value type to load
    pub value_type: ValueType,
    /// Whether a narrower-than-register load sign-extends
    pub signed: bool,
    /// Access width in bits (8, 16, 32, 64)
    pub width: u32,
}

/// Memory store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    /// Static offset added to the dynamic address operand
    pub offset: u64,
    /// Advisory alignment hint (a power of two, never enforced)
    pub align: u32,
    /// Value type to store
    pub value_type: ValueType,
    /// Access width in bits (8, 16, 32, 64)
    pub width: u32,
}

impl MemoryLoad {
    /// Creates a new i32 load operation
    #[must_use]
    pub fn i32(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I32, signed: false, width: 32 }
    }

    /// Creates a new i64 load operation
    #[must_use]
    pub fn i64(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I64, signed: false, width: 64 }
    }

    /// Creates a new f32 load operation
    #[must_use]
    pub fn f32(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::F32, signed: false, width: 32 }
    }

    /// Creates a new f64 load operation
    #[must_use]
    pub fn f64(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::F64, signed: false, width: 64 }
    }

    /// Creates a new i32 load8 operation
    #[must_use]
    pub fn i32_load8(offset: u64, align: u32, signed: bool) -> Self {
        Self { offset, align, value_type: ValueType::I32, signed, width: 8 }
    }

    /// Creates a new i32 load16 operation
    #[must_use]
    pub fn i32_load16(offset: u64, align: u32, signed: bool) -> Self {
        Self { offset, align, value_type: ValueType::I32, signed, width: 16 }
    }

    /// Creates a new i64 load8 operation
    #[must_use]
    pub fn i64_load8(offset: u64, align: u32, signed: bool) -> Self {
        Self { offset, align, value_type: ValueType::I64, signed, width: 8 }
    }

    /// Creates a new i64 load16 operation
    #[must_use]
    pub fn i64_load16(offset: u64, align: u32, signed: bool) -> Self {
        Self { offset, align, value_type: ValueType::I64, signed, width: 16 }
    }

    /// Creates a new i64 load32 operation
    #[must_use]
    pub fn i64_load32(offset: u64, align: u32, signed: bool) -> Self {
        Self { offset, align, value_type: ValueType::I64, signed, width: 32 }
    }

    /// Execute the memory load operation.
    ///
    /// The dynamic address operand is treated as unsigned and extended to
    /// `u64` before the static offset is added; on effective-address
    /// overflow the access is out of bounds by definition.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds memory access if any byte of the access
    /// falls outside the current memory size. An access whose last byte is
    /// the last valid byte of memory succeeds.
    pub fn execute(
        &self,
        memory: &(impl MemoryOperations + ?Sized),
        addr_arg: &Value,
    ) -> Result<Value> {
        let addr: u64 = match addr_arg {
            Value::I32(a) => u64::from(*a as u32),
            Value::I64(a) => *a as u64,
            _ => {
                return Err(Error::type_error("Memory load expects an integer address"));
            }
        };

        let effective_addr = addr
            .checked_add(self.offset)
            .ok_or_else(Error::trap_memory_out_of_bounds)?;

        match (self.value_type, self.width) {
            (ValueType::I32, 32) => {
                let mut bytes = [0u8; 4];
                memory.read_bytes(effective_addr, &mut bytes)?;
                Ok(Value::I32(i32::from_le_bytes(bytes)))
            }
            (ValueType::I64, 64) => {
                let mut bytes = [0u8; 8];
                memory.read_bytes(effective_addr, &mut bytes)?;
                Ok(Value::I64(i64::from_le_bytes(bytes)))
            }
            (ValueType::F32, 32) => {
                let mut bytes = [0u8; 4];
                memory.read_bytes(effective_addr, &mut bytes)?;
                Ok(Value::F32(crate::prelude::FloatBits32::from_bits(
                    u32::from_le_bytes(bytes),
                )))
            }
            (ValueType::F64, 64) => {
                let mut bytes = [0u8; 8];
                memory.read_bytes(effective_addr, &mut bytes)?;
                Ok(Value::F64(crate::prelude::FloatBits64::from_bits(
                    u64::from_le_bytes(bytes),
                )))
            }
            (ValueType::I32, 8) => {
                let mut bytes = [0u8; 1];
                memory.read_bytes(effective_addr, &mut bytes)?;
                let value = if self.signed {
                    i32::from(bytes[0] as i8)
                } else {
                    i32::from(bytes[0])
                };
                Ok(Value::I32(value))
            }
            (ValueType::I32, 16) => {
                let mut bytes = [0u8; 2];
                memory.read_bytes(effective_addr, &mut bytes)?;
                let value = if self.signed {
                    i32::from(i16::from_le_bytes(bytes))
                } else {
                    i32::from(u16::from_le_bytes(bytes))
                };
                Ok(Value::I32(value))
            }
            (ValueType::I64, 8) => {
                let mut bytes = [0u8; 1];
                memory.read_bytes(effective_addr, &mut bytes)?;
                let value = if self.signed {
                    i64::from(bytes[0] as i8)
                } else {
                    i64::from(bytes[0])
                };
                Ok(Value::I64(value))
            }
            (ValueType::I64, 16) => {
                let mut bytes = [0u8; 2];
                memory.read_bytes(effective_addr, &mut bytes)?;
                let value = if self.signed {
                    i64::from(i16::from_le_bytes(bytes))
                } else {
                    i64::from(u16::from_le_bytes(bytes))
                };
                Ok(Value::I64(value))
            }
            (ValueType::I64, 32) => {
                let mut bytes = [0u8; 4];
                memory.read_bytes(effective_addr, &mut bytes)?;
                let value = if self.signed {
                    i64::from(i32::from_le_bytes(bytes))
                } else {
                    i64::from(u32::from_le_bytes(bytes))
                };
                Ok(Value::I64(value))
            }
            _ => Err(Error::validation_error("Unsupported memory load shape")),
        }
    }
}

impl MemoryStore {
    /// Creates a new i32 store operation
    #[must_use]
    pub fn i32(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I32, width: 32 }
    }

    /// Creates a new i64 store operation
    #[must_use]
    pub fn i64(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I64, width: 64 }
    }

    /// Creates a new f32 store operation
    #[must_use]
    pub fn f32(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::F32, width: 32 }
    }

    /// Creates a new f64 store operation
    #[must_use]
    pub fn f64(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::F64, width: 64 }
    }

    /// Creates a new i32 store8 operation
    #[must_use]
    pub fn i32_store8(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I32, width: 8 }
    }

    /// Creates a new i32 store16 operation
    #[must_use]
    pub fn i32_store16(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I32, width: 16 }
    }

    /// Creates a new i64 store8 operation
    #[must_use]
    pub fn i64_store8(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I64, width: 8 }
    }

    /// Creates a new i64 store16 operation
    #[must_use]
    pub fn i64_store16(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I64, width: 16 }
    }

    /// Creates a new i64 store32 operation
    #[must_use]
    pub fn i64_store32(offset: u64, align: u32) -> Self {
        Self { offset, align, value_type: ValueType::I64, width: 32 }
    }

    /// Execute the memory store operation.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds memory access if any byte of the access
    /// falls outside the current memory size, and returns a type error if
    /// the value does not match the store's value type.
    pub fn execute(
        &self,
        memory: &mut (impl MemoryOperations + ?Sized),
        addr_arg: &Value,
        value: &Value,
    ) -> Result<()> {
        let addr: u64 = match addr_arg {
            Value::I32(a) => u64::from(*a as u32),
            Value::I64(a) => *a as u64,
            _ => {
                return Err(Error::type_error("Memory store expects an integer address"));
            }
        };

        let effective_addr = addr
            .checked_add(self.offset)
            .ok_or_else(Error::trap_memory_out_of_bounds)?;

        match (self.value_type, self.width) {
            (ValueType::I32, 32) => {
                let v = value
                    .as_i32()
                    .ok_or_else(|| Error::type_error("Expected I32 for i32.store value"))?;
                memory.write_bytes(effective_addr, &v.to_le_bytes())
            }
            (ValueType::I64, 64) => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| Error::type_error("Expected I64 for i64.store value"))?;
                memory.write_bytes(effective_addr, &v.to_le_bytes())
            }
            (ValueType::F32, 32) => {
                let bits = value
                    .as_f32_bits()
                    .ok_or_else(|| Error::type_error("Expected F32 for f32.store value"))?;
                memory.write_bytes(effective_addr, &bits.to_bits().to_le_bytes())
            }
            (ValueType::F64, 64) => {
                let bits = value
                    .as_f64_bits()
                    .ok_or_else(|| Error::type_error("Expected F64 for f64.store value"))?;
                memory.write_bytes(effective_addr, &bits.to_bits().to_le_bytes())
            }
            (ValueType::I32, 8) => {
                let v = value
                    .as_i32()
                    .ok_or_else(|| Error::type_error("Expected I32 for i32.store8 value"))?;
                memory.write_bytes(effective_addr, &[(v & 0xFF) as u8])
            }
            (ValueType::I32, 16) => {
                let v = value
                    .as_i32()
                    .ok_or_else(|| Error::type_error("Expected I32 for i32.store16 value"))?;
                memory.write_bytes(effective_addr, &((v & 0xFFFF) as u16).to_le_bytes())
            }
            (ValueType::I64, 8) => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| Error::type_error("Expected I64 for i64.store8 value"))?;
                memory.write_bytes(effective_addr, &[(v & 0xFF) as u8])
            }
            (ValueType::I64, 16) => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| Error::type_error("Expected I64 for i64.store16 value"))?;
                memory.write_bytes(effective_addr, &((v & 0xFFFF) as u16).to_le_bytes())
            }
            (ValueType::I64, 32) => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| Error::type_error("Expected I64 for i64.store32 value"))?;
                memory.write_bytes(effective_addr, &(v as u32).to_le_bytes())
            }
            _ => Err(Error::validation_error("Unsupported memory store shape")),
        }
    }
}
