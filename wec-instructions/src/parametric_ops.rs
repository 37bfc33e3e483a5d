// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Parametric operations (`drop` and `select`).
//!
//! `select` consumes the condition and then both candidate values; the
//! operand stack is strict, so both candidates have already been produced
//! (and any traps their producers could raise have already fired) before the
//! condition is consulted.

use crate::prelude::{Error, PureInstruction, Result, Value};

/// Represents a pure parametric operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricOp {
    /// Discard the top operand
    Drop,
    /// Pick one of two operands based on an i32 condition
    Select,
}

/// Execution context for parametric operations
pub trait ParametricContext {
    /// Pop a value from the context
    fn pop_parametric_value(&mut self) -> Result<Value>;

    /// Push a value to the context
    fn push_parametric_value(&mut self, value: Value) -> Result<()>;
}

impl<T: ParametricContext> PureInstruction<T, Error> for ParametricOp {
    fn execute(&self, context: &mut T) -> Result<()> {
        match self {
            Self::Drop => {
                context.pop_parametric_value()?;
                Ok(())
            }
            Self::Select => {
                let condition = context
                    .pop_parametric_value()?
                    .as_i32()
                    .ok_or_else(|| Error::type_error("Expected I32 for select condition"))?;
                let val2 = context.pop_parametric_value()?;
                let val1 = context.pop_parametric_value()?;
                if val1.value_type() != val2.value_type() {
                    return Err(Error::type_error("select operands must share a type"));
                }
                // Nonzero selects the first (deeper) operand.
                context.push_parametric_value(if condition != 0 { val1 } else { val2 })
            }
        }
    }
}
