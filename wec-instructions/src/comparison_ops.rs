// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Comparison operations for WebAssembly instructions.
//!
//! Every comparison produces an `I32` boolean (0 or 1). Floating-point
//! comparisons follow IEEE semantics through the carried bit patterns, so
//! NaN compares unequal to everything including itself.

use crate::prelude::{Error, PureInstruction, Result, Value};
use wec_math as math;

/// Represents a pure comparison operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Test if a 32-bit integer is zero
    I32Eqz,
    /// Equality of two 32-bit integers
    I32Eq,
    /// Inequality of two 32-bit integers
    I32Ne,
    /// Signed less-than for 32-bit integers
    I32LtS,
    /// Unsigned less-than for 32-bit integers
    I32LtU,
    /// Signed greater-than for 32-bit integers
    I32GtS,
    /// Unsigned greater-than for 32-bit integers
    I32GtU,
    /// Signed less-than-or-equal for 32-bit integers
    I32LeS,
    /// Signed greater-than-or-equal for 32-bit integers
    I32GeS,
    /// Test if a 64-bit integer is zero
    I64Eqz,
    /// Equality of two 64-bit integers
    I64Eq,
    /// Inequality of two 64-bit integers
    I64Ne,
    /// Signed less-than for 64-bit integers
    I64LtS,
    /// Equality of two 64-bit floats
    F64Eq,
    /// Inequality of two 64-bit floats
    F64Ne,
    /// Less-than for 64-bit floats
    F64Lt,
    /// Greater-than for 64-bit floats
    F64Gt,
    /// Less-than-or-equal for 64-bit floats
    F64Le,
    /// Greater-than-or-equal for 64-bit floats
    F64Ge,
}

/// Execution context for comparison operations
pub trait ComparisonContext {
    /// Pop a value from the context
    fn pop_comparison_value(&mut self) -> Result<Value>;

    /// Push a value to the context
    fn push_comparison_value(&mut self, value: Value) -> Result<()>;
}

fn pop_i32(context: &mut impl ComparisonContext, op_name: &'static str) -> Result<i32> {
    context
        .pop_comparison_value()?
        .as_i32()
        .ok_or_else(|| Error::type_error(op_name))
}

fn pop_i64(context: &mut impl ComparisonContext, op_name: &'static str) -> Result<i64> {
    context
        .pop_comparison_value()?
        .as_i64()
        .ok_or_else(|| Error::type_error(op_name))
}

fn pop_f64(
    context: &mut impl ComparisonContext,
    op_name: &'static str,
) -> Result<math::FloatBits64> {
    context
        .pop_comparison_value()?
        .as_f64_bits()
        .ok_or_else(|| Error::type_error(op_name))
}

impl<T: ComparisonContext> PureInstruction<T, Error> for ComparisonOp {
    fn execute(&self, context: &mut T) -> Result<()> {
        let result = match self {
            Self::I32Eqz => {
                let a = pop_i32(context, "Expected I32 for i32.eqz operand")?;
                math::i32_eqz(a)
            }
            Self::I32Eq => {
                let b = pop_i32(context, "Expected I32 for i32.eq operand")?;
                let a = pop_i32(context, "Expected I32 for i32.eq operand")?;
                math::i32_eq(a, b)
            }
            Self::I32Ne => {
                let b = pop_i32(context, "Expected I32 for i32.ne operand")?;
                let a = pop_i32(context, "Expected I32 for i32.ne operand")?;
                math::i32_ne(a, b)
            }
            Self::I32LtS => {
                let b = pop_i32(context, "Expected I32 for i32.lt_s operand")?;
                let a = pop_i32(context, "Expected I32 for i32.lt_s operand")?;
                math::i32_lt_s(a, b)
            }
            Self::I32LtU => {
                let b = pop_i32(context, "Expected I32 for i32.lt_u operand")? as u32;
                let a = pop_i32(context, "Expected I32 for i32.lt_u operand")? as u32;
                math::i32_lt_u(a, b)
            }
            Self::I32GtS => {
                let b = pop_i32(context, "Expected I32 for i32.gt_s operand")?;
                let a = pop_i32(context, "Expected I32 for i32.gt_s operand")?;
                math::i32_gt_s(a, b)
            }
            Self::I32GtU => {
                let b = pop_i32(context, "Expected I32 for i32.gt_u operand")? as u32;
                let a = pop_i32(context, "Expected I32 for i32.gt_u operand")? as u32;
                math::i32_gt_u(a, b)
            }
            Self::I32LeS => {
                let b = pop_i32(context, "Expected I32 for i32.le_s operand")?;
                let a = pop_i32(context, "Expected I32 for i32.le_s operand")?;
                math::i32_le_s(a, b)
            }
            Self::I32GeS => {
                let b = pop_i32(context, "Expected I32 for i32.ge_s operand")?;
                let a = pop_i32(context, "Expected I32 for i32.ge_s operand")?;
                math::i32_ge_s(a, b)
            }
            Self::I64Eqz => {
                let a = pop_i64(context, "Expected I64 for i64.eqz operand")?;
                math::i64_eqz(a)
            }
            Self::I64Eq => {
                let b = pop_i64(context, "Expected I64 for i64.eq operand")?;
                let a = pop_i64(context, "Expected I64 for i64.eq operand")?;
                math::i64_eq(a, b)
            }
            Self::I64Ne => {
                let b = pop_i64(context, "Expected I64 for i64.ne operand")?;
                let a = pop_i64(context, "Expected I64 for i64.ne operand")?;
                math::i64_ne(a, b)
            }
            Self::I64LtS => {
                let b = pop_i64(context, "Expected I64 for i64.lt_s operand")?;
                let a = pop_i64(context, "Expected I64 for i64.lt_s operand")?;
                math::i64_lt_s(a, b)
            }
            Self::F64Eq => {
                let b = pop_f64(context, "Expected F64 for f64.eq operand")?;
                let a = pop_f64(context, "Expected F64 for f64.eq operand")?;
                math::f64_eq(a, b)
            }
            Self::F64Ne => {
                let b = pop_f64(context, "Expected F64 for f64.ne operand")?;
                let a = pop_f64(context, "Expected F64 for f64.ne operand")?;
                math::f64_ne(a, b)
            }
            Self::F64Lt => {
                let b = pop_f64(context, "Expected F64 for f64.lt operand")?;
                let a = pop_f64(context, "Expected F64 for f64.lt operand")?;
                math::f64_lt(a, b)
            }
            Self::F64Gt => {
                let b = pop_f64(context, "Expected F64 for f64.gt operand")?;
                let a = pop_f64(context, "Expected F64 for f64.gt operand")?;
                math::f64_gt(a, b)
            }
            Self::F64Le => {
                let b = pop_f64(context, "Expected F64 for f64.le operand")?;
                let a = pop_f64(context, "Expected F64 for f64.le operand")?;
                math::f64_le(a, b)
            }
            Self::F64Ge => {
                let b = pop_f64(context, "Expected F64 for f64.ge operand")?;
                let a = pop_f64(context, "Expected F64 for f64.ge operand")?;
                math::f64_ge(a, b)
            }
        };
        context.push_comparison_value(Value::I32(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::FloatBits64;

    struct MockComparisonContext {
        stack: Vec<Value>,
    }

    impl MockComparisonContext {
        fn with(values: &[Value]) -> Self {
            Self { stack: values.to_vec() }
        }
    }

    impl ComparisonContext for MockComparisonContext {
        fn pop_comparison_value(&mut self) -> Result<Value> {
            self.stack.pop().ok_or_else(Error::stack_underflow)
        }

        fn push_comparison_value(&mut self, value: Value) -> Result<()> {
            self.stack.push(value);
            Ok(())
        }
    }

    #[test]
    fn test_i32_lt_u_treats_negative_as_large() {
        // -1 reinterpreted as u32 is the maximum value
        let mut context = MockComparisonContext::with(&[Value::I32(-1), Value::I32(1)]);
        ComparisonOp::I32LtU.execute(&mut context).unwrap();
        assert_eq!(context.stack, vec![Value::I32(0)]);

        let mut context = MockComparisonContext::with(&[Value::I32(1), Value::I32(-1)]);
        ComparisonOp::I32LtU.execute(&mut context).unwrap();
        assert_eq!(context.stack, vec![Value::I32(1)]);
    }

    #[test]
    fn test_eqz() {
        let mut context = MockComparisonContext::with(&[Value::I32(0)]);
        ComparisonOp::I32Eqz.execute(&mut context).unwrap();
        assert_eq!(context.stack, vec![Value::I32(1)]);
    }

    #[test]
    fn test_f64_nan_compares_unequal() {
        let nan = Value::F64(FloatBits64::NAN);
        let mut context = MockComparisonContext::with(&[nan.clone(), nan.clone()]);
        ComparisonOp::F64Eq.execute(&mut context).unwrap();
        assert_eq!(context.stack, vec![Value::I32(0)]);

        let mut context = MockComparisonContext::with(&[nan.clone(), nan]);
        ComparisonOp::F64Ne.execute(&mut context).unwrap();
        assert_eq!(context.stack, vec![Value::I32(1)]);
    }

    #[test]
    fn test_f64_lt_orders_operands() {
        let mut context =
            MockComparisonContext::with(&[Value::f64(1.0), Value::f64(2.0)]);
        ComparisonOp::F64Lt.execute(&mut context).unwrap();
        assert_eq!(context.stack, vec![Value::I32(1)]);
    }
}
