// WEC - wec-runtime
// Module: Control Frame
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Control frames for the stackless engine.
//!
//! Each entered construct (the function body itself, a `block`, a `loop`, an
//! `if` arm) pushes one frame. The frame records where its operands start on
//! the shared operand stack, so a branch can discard everything the
//! construct produced and re-push only the values the label carries.

use wec_instructions::BlockKind;

use crate::module::Instruction;

/// One entry on the control stack.
#[derive(Debug)]
pub struct ControlFrame<'m> {
    /// The construct's instruction sequence
    pub code: &'m [Instruction],
    /// Next instruction to execute within `code`
    pub pc: usize,
    /// What kind of construct this is; decides where branches land
    pub kind: BlockKind,
    /// Number of result values the construct leaves behind
    pub result_arity: usize,
    /// Operand stack height when the construct was entered
    pub stack_base: usize,
}

impl<'m> ControlFrame<'m> {
    /// Frame for a function body. Branches to it behave like branches to a
    /// block whose results are the function results.
    #[must_use]
    pub fn for_function(code: &'m [Instruction], result_arity: usize) -> Self {
        Self { code, pc: 0, kind: BlockKind::Block, result_arity, stack_base: 0 }
    }

    /// Number of values a branch targeting this frame carries.
    #[must_use]
    pub fn label_arity(&self) -> usize {
        self.kind.label_arity(self.result_arity)
    }
}
