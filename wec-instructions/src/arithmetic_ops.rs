// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Arithmetic operations for WebAssembly instructions.
//!
//! Pure implementations of the arithmetic operators this core supports:
//! wrapping integer add/sub/mul, trapping division and remainder, and the
//! floating-point sign-manipulation family. Trapping semantics live in
//! `wec-math`; this module only moves operands between the context and the
//! math functions, so the engine and the mock-context tests see identical
//! behavior.

use crate::prelude::{Error, PureInstruction, Result, Value};
use wec_math as math;

/// Represents a pure arithmetic operation for WebAssembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// Add two 32-bit integers (wrapping)
    I32Add,
    /// Subtract one 32-bit integer from another (wrapping)
    I32Sub,
    /// Multiply two 32-bit integers (wrapping)
    I32Mul,
    /// Divide two 32-bit integers (signed, trapping)
    I32DivS,
    /// Divide two 32-bit integers (unsigned, trapping)
    I32DivU,
    /// Remainder of two 32-bit integers (signed, trapping on zero divisor)
    I32RemS,
    /// Remainder of two 32-bit integers (unsigned, trapping on zero divisor)
    I32RemU,
    /// Add two 64-bit integers (wrapping)
    I64Add,
    /// Subtract one 64-bit integer from another (wrapping)
    I64Sub,
    /// Multiply two 64-bit integers (wrapping)
    I64Mul,
    /// Divide two 64-bit integers (signed, trapping)
    I64DivS,
    /// Divide two 64-bit integers (unsigned, trapping)
    I64DivU,
    /// Remainder of two 64-bit integers (signed, trapping on zero divisor)
    I64RemS,
    /// Remainder of two 64-bit integers (unsigned, trapping on zero divisor)
    I64RemU,
    /// Absolute value of a 32-bit float
    F32Abs,
    /// Negate a 32-bit float
    F32Neg,
    /// Copy sign from one 32-bit float to another
    F32Copysign,
    /// Absolute value of a 64-bit float
    F64Abs,
    /// Negate a 64-bit float
    F64Neg,
    /// Copy sign from one 64-bit float to another, bit-exact
    F64Copysign,
}

/// Execution context for arithmetic operations
pub trait ArithmeticContext {
    /// Pop a value from the context
    fn pop_arithmetic_value(&mut self) -> Result<Value>;

    /// Push a value to the context
    fn push_arithmetic_value(&mut self, value: Value) -> Result<()>;
}

fn pop_i32(context: &mut impl ArithmeticContext, op_name: &'static str) -> Result<i32> {
    context
        .pop_arithmetic_value()?
        .as_i32()
        .ok_or_else(|| Error::type_error(op_name))
}

fn pop_i64(context: &mut impl ArithmeticContext, op_name: &'static str) -> Result<i64> {
    context
        .pop_arithmetic_value()?
        .as_i64()
        .ok_or_else(|| Error::type_error(op_name))
}

fn pop_f32(
    context: &mut impl ArithmeticContext,
    op_name: &'static str,
) -> Result<math::FloatBits32> {
    context
        .pop_arithmetic_value()?
        .as_f32_bits()
        .ok_or_else(|| Error::type_error(op_name))
}

fn pop_f64(
    context: &mut impl ArithmeticContext,
    op_name: &'static str,
) -> Result<math::FloatBits64> {
    context
        .pop_arithmetic_value()?
        .as_f64_bits()
        .ok_or_else(|| Error::type_error(op_name))
}

impl<T: ArithmeticContext> PureInstruction<T, Error> for ArithmeticOp {
    fn execute(&self, context: &mut T) -> Result<()> {
        match self {
            Self::I32Add => {
                let b = pop_i32(context, "Expected I32 for i32.add operand")?;
                let a = pop_i32(context, "Expected I32 for i32.add operand")?;
                context.push_arithmetic_value(Value::I32(math::i32_add(a, b)))
            }
            Self::I32Sub => {
                let b = pop_i32(context, "Expected I32 for i32.sub operand")?;
                let a = pop_i32(context, "Expected I32 for i32.sub operand")?;
                context.push_arithmetic_value(Value::I32(math::i32_sub(a, b)))
            }
            Self::I32Mul => {
                let b = pop_i32(context, "Expected I32 for i32.mul operand")?;
                let a = pop_i32(context, "Expected I32 for i32.mul operand")?;
                context.push_arithmetic_value(Value::I32(math::i32_mul(a, b)))
            }
            Self::I32DivS => {
                let b = pop_i32(context, "Expected I32 for i32.div_s operand")?;
                let a = pop_i32(context, "Expected I32 for i32.div_s operand")?;
                let result = math::i32_div_s(a, b)?;
                context.push_arithmetic_value(Value::I32(result))
            }
            Self::I32DivU => {
                let b = pop_i32(context, "Expected I32 for i32.div_u operand")? as u32;
                let a = pop_i32(context, "Expected I32 for i32.div_u operand")? as u32;
                let result = math::i32_div_u(a, b)?;
                context.push_arithmetic_value(Value::I32(result as i32))
            }
            Self::I32RemS => {
                let b = pop_i32(context, "Expected I32 for i32.rem_s operand")?;
                let a = pop_i32(context, "Expected I32 for i32.rem_s operand")?;
                let result = math::i32_rem_s(a, b)?;
                context.push_arithmetic_value(Value::I32(result))
            }
            Self::I32RemU => {
                let b = pop_i32(context, "Expected I32 for i32.rem_u operand")? as u32;
                let a = pop_i32(context, "Expected I32 for i32.rem_u operand")? as u32;
                let result = math::i32_rem_u(a, b)?;
                context.push_arithmetic_value(Value::I32(result as i32))
            }
            Self::I64Add => {
                let b = pop_i64(context, "Expected I64 for i64.add operand")?;
                let a = pop_i64(context, "Expected I64 for i64.add operand")?;
                context.push_arithmetic_value(Value::I64(math::i64_add(a, b)))
            }
            Self::I64Sub => {
                let b = pop_i64(context, "Expected I64 for i64.sub operand")?;
                let a = pop_i64(context, "Expected I64 for i64.sub operand")?;
                context.push_arithmetic_value(Value::I64(math::i64_sub(a, b)))
            }
            Self::I64Mul => {
                let b = pop_i64(context, "Expected I64 for i64.mul operand")?;
                let a = pop_i64(context, "Expected I64 for i64.mul operand")?;
                context.push_arithmetic_value(Value::I64(math::i64_mul(a, b)))
            }
            Self::I64DivS => {
                let b = pop_i64(context, "Expected I64 for i64.div_s operand")?;
                let a = pop_i64(context, "Expected I64 for i64.div_s operand")?;
                let result = math::i64_div_s(a, b)?;
                context.push_arithmetic_value(Value::I64(result))
            }
            Self::I64DivU => {
                let b = pop_i64(context, "Expected I64 for i64.div_u operand")? as u64;
                let a = pop_i64(context, "Expected I64 for i64.div_u operand")? as u64;
                let result = math::i64_div_u(a, b)?;
                context.push_arithmetic_value(Value::I64(result as i64))
            }
            Self::I64RemS => {
                let b = pop_i64(context, "Expected I64 for i64.rem_s operand")?;
                let a = pop_i64(context, "Expected I64 for i64.rem_s operand")?;
                let result = math::i64_rem_s(a, b)?;
                context.push_arithmetic_value(Value::I64(result))
            }
            Self::I64RemU => {
                let b = pop_i64(context, "Expected I64 for i64.rem_u operand")? as u64;
                let a = pop_i64(context, "Expected I64 for i64.rem_u operand")? as u64;
                let result = math::i64_rem_u(a, b)?;
                context.push_arithmetic_value(Value::I64(result as i64))
            }
            Self::F32Abs => {
                let a = pop_f32(context, "Expected F32 for f32.abs operand")?;
                context.push_arithmetic_value(Value::F32(math::f32_abs(a)))
            }
            Self::F32Neg => {
                let a = pop_f32(context, "Expected F32 for f32.neg operand")?;
                context.push_arithmetic_value(Value::F32(math::f32_neg(a)))
            }
            Self::F32Copysign => {
                let b = pop_f32(context, "Expected F32 for f32.copysign operand")?;
                let a = pop_f32(context, "Expected F32 for f32.copysign operand")?;
                context.push_arithmetic_value(Value::F32(math::f32_copysign(a, b)))
            }
            Self::F64Abs => {
                let a = pop_f64(context, "Expected F64 for f64.abs operand")?;
                context.push_arithmetic_value(Value::F64(math::f64_abs(a)))
            }
            Self::F64Neg => {
                let a = pop_f64(context, "Expected F64 for f64.neg operand")?;
                context.push_arithmetic_value(Value::F64(math::f64_neg(a)))
            }
            Self::F64Copysign => {
                let b = pop_f64(context, "Expected F64 for f64.copysign operand")?;
                let a = pop_f64(context, "Expected F64 for f64.copysign operand")?;
                context.push_arithmetic_value(Value::F64(math::f64_copysign(a, b)))
            }
        }
    }
}
