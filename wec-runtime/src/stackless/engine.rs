// WEC - wec-runtime
// Module: Stackless Engine
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The stackless execution engine.
//!
//! Execution is a single dispatch loop over an explicit control stack.
//! Entering a structured construct pushes a [`ControlFrame`]; falling off
//! the end of one pops it and splices the construct's results onto the
//! parent's operand region. A branch resolves its relative depth to a
//! frame, carries that label's values, truncates the operand stack to the
//! frame's base height and unwinds the control stack; a branch to a `loop`
//! keeps the loop frame and restarts it instead.
//!
//! Operand evaluation is strict: every operand an instruction pops was
//! already produced, and any trap its producer could raise has already
//! fired. No check is deferred or hoisted across control flow.

use log::{debug, trace};

use crate::module::{Instruction, Module};
use crate::module_instance::ModuleInstance;
use crate::prelude::{
    codes, ActivationsTable, ArithmeticContext, BlockKind, ComparisonContext, Error,
    ErrorCategory, ExternRef, ParametricContext, ParametricOp, PureInstruction, Result, Table,
    TableContext, Value,
};
use crate::stackless::frame::ControlFrame;

/// Depth limits for a single invocation.
#[derive(Debug, Clone, Copy)]
pub struct EngineLimits {
    /// Maximum operand stack height
    pub max_operand_depth: usize,
    /// Maximum control stack (construct nesting) depth
    pub max_control_depth: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self { max_operand_depth: 65_536, max_control_depth: 1_024 }
    }
}

/// Counters accumulated across invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecutionStats {
    /// Instructions dispatched
    pub instructions_executed: u64,
    /// Exported functions invoked
    pub function_calls: u64,
}

/// The stackless execution engine.
#[derive(Debug, Default)]
pub struct StacklessEngine {
    limits: EngineLimits,
    /// Execution statistics
    pub stats: ExecutionStats,
}

/// Operand-stack view handed to the pure value operators.
struct StackContext<'a> {
    stack: &'a mut Vec<Value>,
    max_depth: usize,
}

impl StackContext<'_> {
    fn pop(&mut self) -> Result<Value> {
        self.stack.pop().ok_or_else(Error::stack_underflow)
    }

    fn push(&mut self, value: Value) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(Error::new(
                ErrorCategory::Core,
                codes::STACK_OVERFLOW,
                "Operand stack limit exceeded",
            ));
        }
        self.stack.push(value);
        Ok(())
    }
}

impl ArithmeticContext for StackContext<'_> {
    fn pop_arithmetic_value(&mut self) -> Result<Value> {
        self.pop()
    }

    fn push_arithmetic_value(&mut self, value: Value) -> Result<()> {
        self.push(value)
    }
}

impl ComparisonContext for StackContext<'_> {
    fn pop_comparison_value(&mut self) -> Result<Value> {
        self.pop()
    }

    fn push_comparison_value(&mut self, value: Value) -> Result<()> {
        self.push(value)
    }
}

impl ParametricContext for StackContext<'_> {
    fn pop_parametric_value(&mut self) -> Result<Value> {
        self.pop()
    }

    fn push_parametric_value(&mut self, value: Value) -> Result<()> {
        self.push(value)
    }
}

/// Table view handed to the pure table operators. Fetched references are
/// rooted in the activation region before being returned, so a collection
/// triggered by the rooting itself cannot reclaim them.
struct TableExecContext<'a> {
    stack: StackContext<'a>,
    table: &'a mut Table,
    activations: &'a mut ActivationsTable,
}

impl TableContext for TableExecContext<'_> {
    fn get_table_element(&mut self, elem_index: u32) -> Result<Value> {
        let fetched = self.table.get(elem_index)?;
        if let Some(reference) = &fetched {
            self.activations.insert(reference.clone(), self.table, Some(reference))?;
        }
        Ok(Value::ExternRef(fetched))
    }

    fn set_table_element(&mut self, elem_index: u32, value: Value) -> Result<()> {
        match value {
            Value::ExternRef(reference) => self.table.set(elem_index, reference),
            _ => Err(Error::type_error("Expected ExternRef for table element")),
        }
    }

    fn table_size(&self) -> u32 {
        self.table.size()
    }

    fn grow_table(&mut self, delta: u32, init: Value) -> Result<i32> {
        let init: Option<ExternRef> = match init {
            Value::ExternRef(reference) => reference,
            _ => return Err(Error::type_error("Expected ExternRef for table.grow init")),
        };
        match self.table.grow(delta, init) {
            Ok(prev) => Ok(prev as i32),
            // growth failure is reported as -1, not an error
            Err(_) => Ok(-1),
        }
    }

    fn push_table_value(&mut self, value: Value) -> Result<()> {
        self.stack.push(value)
    }

    fn pop_table_value(&mut self) -> Result<Value> {
        self.stack.pop()
    }
}

/// Splice the top `arity` values down onto `stack_base`, discarding the
/// construct's intermediate operands.
fn carry_values(stack: &mut Vec<Value>, stack_base: usize, arity: usize) -> Result<()> {
    if stack.len() < arity || stack.len() - arity < stack_base {
        return Err(Error::stack_underflow());
    }
    let carried = stack.split_off(stack.len() - arity);
    stack.truncate(stack_base);
    stack.extend(carried);
    Ok(())
}

/// Resolve and take a branch: unwind to the frame `depth` levels out,
/// carrying that label's values.
fn branch(frames: &mut Vec<ControlFrame<'_>>, stack: &mut Vec<Value>, depth: u32) -> Result<()> {
    let target_index = frames
        .len()
        .checked_sub(1 + depth as usize)
        .ok_or(Error::new(
            ErrorCategory::Core,
            codes::INVALID_BRANCH_TARGET,
            "Branch depth exceeds construct nesting",
        ))?;
    let (arity, stack_base, to_start) = {
        let target = &frames[target_index];
        (target.label_arity(), target.stack_base, target.kind.branches_to_start())
    };
    carry_values(stack, stack_base, arity)?;
    if to_start {
        frames.truncate(target_index + 1);
        frames[target_index].pc = 0;
    } else {
        frames.truncate(target_index);
    }
    Ok(())
}

impl StacklessEngine {
    /// Create an engine with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit limits.
    #[must_use]
    pub fn with_limits(limits: EngineLimits) -> Self {
        Self { limits, stats: ExecutionStats::default() }
    }

    /// Invoke an exported function by name.
    ///
    /// Arguments are checked against the function signature before any code
    /// runs; results come back in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a type error on an argument mismatch, a trap raised by the
    /// code, or a limit error if a depth bound is exceeded.
    pub fn invoke(
        &mut self,
        module: &Module,
        instance: &mut ModuleInstance,
        name: &str,
        args: &[Value],
    ) -> Result<Vec<Value>> {
        let index = module.exported_function(name)?;
        debug!("invoke: {name} (function {index}) with {} args", args.len());
        self.call_function(module, instance, index, args)
    }

    /// Invoke a function by index.
    ///
    /// # Errors
    ///
    /// As for [`Self::invoke`].
    pub fn call_function(
        &mut self,
        module: &Module,
        instance: &mut ModuleInstance,
        index: u32,
        args: &[Value],
    ) -> Result<Vec<Value>> {
        let function = module.function(index).ok_or(Error::new(
            ErrorCategory::Core,
            codes::FUNCTION_NOT_FOUND,
            "Function index out of range",
        ))?;

        if args.len() != function.ty.params.len() {
            return Err(Error::type_error("Argument count does not match signature"));
        }
        for (arg, param) in args.iter().zip(&function.ty.params) {
            if !arg.matches_type(param) {
                return Err(Error::type_error("Argument type does not match signature"));
            }
        }

        let mut locals: Vec<Value> = Vec::with_capacity(args.len() + function.locals.len());
        locals.extend_from_slice(args);
        locals.extend(function.locals.iter().map(|ty| Value::default_for_type(*ty)));

        self.stats.function_calls += 1;
        self.run(instance, function.ty.results.len(), &function.body, locals)
    }

    fn run(
        &mut self,
        instance: &mut ModuleInstance,
        result_arity: usize,
        body: &[Instruction],
        mut locals: Vec<Value>,
    ) -> Result<Vec<Value>> {
        let mut stack: Vec<Value> = Vec::new();
        let mut frames: Vec<ControlFrame<'_>> =
            vec![ControlFrame::for_function(body, result_arity)];

        while let Some(frame) = frames.last_mut() {
            let code = frame.code;
            if frame.pc >= code.len() {
                let finished = match frames.pop() {
                    Some(frame) => frame,
                    None => break,
                };
                carry_values(&mut stack, finished.stack_base, finished.result_arity)?;
                continue;
            }
            let instruction = &code[frame.pc];
            frame.pc += 1;
            self.stats.instructions_executed += 1;
            trace!("exec: {instruction:?}");

            let mut ctx = StackContext { stack: &mut stack, max_depth: self.limits.max_operand_depth };
            match instruction {
                Instruction::Nop => {}
                Instruction::Unreachable => return Err(Error::trap_unreachable()),

                Instruction::I32Const(v) => ctx.push(Value::I32(*v))?,
                Instruction::I64Const(v) => ctx.push(Value::I64(*v))?,
                Instruction::F32Const(bits) => ctx.push(Value::F32(*bits))?,
                Instruction::F64Const(bits) => ctx.push(Value::F64(*bits))?,
                Instruction::RefNull => ctx.push(Value::ExternRef(None))?,

                Instruction::LocalGet(i) => {
                    let value = locals
                        .get(*i as usize)
                        .cloned()
                        .ok_or_else(|| Error::validation_error("Local index out of range"))?;
                    ctx.push(value)?;
                }
                Instruction::LocalSet(i) => {
                    let value = ctx.pop()?;
                    let slot = locals
                        .get_mut(*i as usize)
                        .ok_or_else(|| Error::validation_error("Local index out of range"))?;
                    *slot = value;
                }
                Instruction::LocalTee(i) => {
                    let value = ctx
                        .stack
                        .last()
                        .cloned()
                        .ok_or_else(Error::stack_underflow)?;
                    let slot = locals
                        .get_mut(*i as usize)
                        .ok_or_else(|| Error::validation_error("Local index out of range"))?;
                    *slot = value;
                }

                Instruction::Block { block_type, body } => {
                    Self::enter(&mut frames, &self.limits, body, BlockKind::Block, block_type.arity(), stack.len())?;
                }
                Instruction::Loop { block_type, body } => {
                    Self::enter(&mut frames, &self.limits, body, BlockKind::Loop, block_type.arity(), stack.len())?;
                }
                Instruction::If { block_type, then_body, else_body } => {
                    let condition = ctx
                        .pop()?
                        .as_i32()
                        .ok_or_else(|| Error::type_error("Expected I32 for if condition"))?;
                    let arm = if condition != 0 { then_body } else { else_body };
                    Self::enter(&mut frames, &self.limits, arm, BlockKind::If, block_type.arity(), stack.len())?;
                }

                Instruction::Br(depth) => branch(&mut frames, &mut stack, *depth)?,
                Instruction::BrIf(depth) => {
                    // the condition is consumed whether or not the branch is taken
                    let condition = ctx
                        .pop()?
                        .as_i32()
                        .ok_or_else(|| Error::type_error("Expected I32 for br_if condition"))?;
                    if condition != 0 {
                        branch(&mut frames, &mut stack, *depth)?;
                    }
                }
                Instruction::BrTable { targets, default } => {
                    let index = ctx
                        .pop()?
                        .as_i32()
                        .ok_or_else(|| Error::type_error("Expected I32 for br_table index"))?;
                    let depth = wec_instructions::br_table_select(targets, *default, index);
                    branch(&mut frames, &mut stack, depth)?;
                }
                Instruction::Return => {
                    let depth = frames.len() as u32 - 1;
                    branch(&mut frames, &mut stack, depth)?;
                }

                Instruction::Drop => ParametricOp::Drop.execute(&mut ctx)?,
                Instruction::Select => ParametricOp::Select.execute(&mut ctx)?,

                Instruction::Arithmetic(op) => op.execute(&mut ctx)?,
                Instruction::Comparison(op) => op.execute(&mut ctx)?,

                Instruction::Load(load) => {
                    let addr = ctx.pop()?;
                    let memory = instance.require_memory()?;
                    let value = load.execute(memory, &addr)?;
                    let mut ctx = StackContext { stack: &mut stack, max_depth: self.limits.max_operand_depth };
                    ctx.push(value)?;
                }
                Instruction::Store(store) => {
                    let value = ctx.pop()?;
                    let addr = ctx.pop()?;
                    let memory = instance.require_memory_mut()?;
                    store.execute(memory, &addr, &value)?;
                }
                Instruction::MemorySize => {
                    let pages = instance.require_memory()?.size();
                    ctx.push(Value::I32(pages as i32))?;
                }
                Instruction::MemoryGrow => {
                    let delta = ctx
                        .pop()?
                        .as_u32()
                        .ok_or_else(|| Error::type_error("Expected I32 for memory.grow delta"))?;
                    let memory = instance.require_memory_mut()?;
                    let result = match memory.grow(delta) {
                        Ok(prev) => prev as i32,
                        // growth failure is reported as -1, not an error
                        Err(_) => -1,
                    };
                    let mut ctx = StackContext { stack: &mut stack, max_depth: self.limits.max_operand_depth };
                    ctx.push(Value::I32(result))?;
                }

                Instruction::Table(op) => {
                    drop(ctx);
                    let (table, activations) = instance.table_and_activations_mut()?;
                    let mut table_ctx = TableExecContext {
                        stack: StackContext {
                            stack: &mut stack,
                            max_depth: self.limits.max_operand_depth,
                        },
                        table,
                        activations,
                    };
                    op.execute(&mut table_ctx)?;
                }
            }
        }

        debug!("invoke: finished with {} result(s)", stack.len());
        Ok(stack)
    }

    fn enter<'m>(
        frames: &mut Vec<ControlFrame<'m>>,
        limits: &EngineLimits,
        code: &'m [Instruction],
        kind: BlockKind,
        result_arity: usize,
        stack_base: usize,
    ) -> Result<()> {
        if frames.len() >= limits.max_control_depth {
            return Err(Error::new(
                ErrorCategory::Core,
                codes::CONTROL_STACK_EXHAUSTED,
                "Construct nesting limit exceeded",
            ));
        }
        frames.push(ControlFrame { code, pc: 0, kind, result_arity, stack_base });
        Ok(())
    }
}
