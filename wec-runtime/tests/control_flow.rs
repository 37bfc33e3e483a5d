// WEC - wec-runtime
// Module: Control Flow Tests
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Structured control flow: br, br_if, br_table, loops and nesting limits.

use proptest::prelude::*;

use wec_foundation::{BlockType, FuncType, Value, ValueType};
use wec_runtime::{
    ArithmeticOp, ComparisonOp, EngineLimits, Function, Instruction, Module, ModuleInstance,
    StacklessEngine,
};

fn single_export(function: Function) -> Module {
    let mut builder = Module::builder();
    let index = builder.add_function(function);
    builder.export("run", index).unwrap();
    builder.build().unwrap()
}

fn invoke_i32(module: &Module, args: &[Value]) -> Result<i32, wec_runtime::Error> {
    let mut instance = ModuleInstance::new(module).unwrap();
    let mut engine = StacklessEngine::new();
    let results = engine.invoke(module, &mut instance, "run", args)?;
    Ok(results[0].as_i32().expect("i32 result"))
}

#[test]
fn brif_block_passthru() {
    // block (result i32)
    //   i32.const 3
    //   local.get 0
    //   br_if 0            ;; taken: the block yields 3
    //   i32.const 3
    //   i32.add            ;; fallthrough: 3 + 3
    // end
    let module = single_export(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![],
        body: vec![Instruction::Block {
            block_type: BlockType::Value(ValueType::I32),
            body: vec![
                Instruction::I32Const(3),
                Instruction::LocalGet(0),
                Instruction::BrIf(0),
                Instruction::I32Const(3),
                Instruction::Arithmetic(ArithmeticOp::I32Add),
            ],
        }],
    });
    assert_eq!(invoke_i32(&module, &[Value::I32(0)]).unwrap(), 6);
    assert_eq!(invoke_i32(&module, &[Value::I32(3)]).unwrap(), 3);
}

#[test]
fn br_discards_values_pushed_after_the_branch_operand() {
    // Everything pushed inside the block beyond the carried value is gone
    // after the branch, not just the topmost entry.
    let module = single_export(Function {
        ty: FuncType::new(vec![], vec![ValueType::I32]),
        locals: vec![],
        body: vec![
            Instruction::Block {
                block_type: BlockType::Value(ValueType::I32),
                body: vec![
                    Instruction::I32Const(11),
                    Instruction::I32Const(22),
                    Instruction::I32Const(7),
                    Instruction::Br(0),
                ],
            },
            // if 11 or 22 leaked, this add would see the wrong operands
            Instruction::I32Const(1),
            Instruction::Arithmetic(ArithmeticOp::I32Add),
        ],
    });
    assert_eq!(invoke_i32(&module, &[]).unwrap(), 8);
}

/// The nested-add `br_table` fixture: each enclosing block adds a constant
/// to whatever the selected label carries out.
///
/// block $2 (result i32)                    ;; + 10
///   block $1 (result i32)                  ;; + 100
///     block $0 (result i32)                ;; + 1000
///       block $default (result i32)
///         (br_table $0 $1 $2 $default
///           (i32.mul (i32.const 2) (local.get 0))
///           (i32.rem_u (local.get 0) (i32.const 4)))
fn br_table_fixture() -> Module {
    single_export(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![],
        body: vec![Instruction::Block {
            block_type: BlockType::Value(ValueType::I32),
            body: vec![
                Instruction::I32Const(10),
                Instruction::Block {
                    block_type: BlockType::Value(ValueType::I32),
                    body: vec![
                        Instruction::I32Const(100),
                        Instruction::Block {
                            block_type: BlockType::Value(ValueType::I32),
                            body: vec![
                                Instruction::I32Const(1000),
                                Instruction::Block {
                                    block_type: BlockType::Value(ValueType::I32),
                                    body: vec![
                                        // carried value: 2 * i
                                        Instruction::I32Const(2),
                                        Instruction::LocalGet(0),
                                        Instruction::Arithmetic(ArithmeticOp::I32Mul),
                                        // index: i % 4 (unsigned)
                                        Instruction::LocalGet(0),
                                        Instruction::I32Const(4),
                                        Instruction::Arithmetic(ArithmeticOp::I32RemU),
                                        Instruction::BrTable {
                                            targets: vec![1, 2, 3],
                                            default: 0,
                                        },
                                    ],
                                },
                                Instruction::Arithmetic(ArithmeticOp::I32Add),
                            ],
                        },
                        Instruction::Arithmetic(ArithmeticOp::I32Add),
                    ],
                },
                Instruction::Arithmetic(ArithmeticOp::I32Add),
            ],
        }],
    })
}

#[test]
fn br_table_nine_way_selection() {
    let module = br_table_fixture();
    let expected = [110, 12, 4, 1116, 118, 20, 12, 1124, 126];
    for (i, want) in expected.iter().enumerate() {
        assert_eq!(
            invoke_i32(&module, &[Value::I32(i as i32)]).unwrap(),
            *want,
            "input {i}"
        );
    }
}

proptest! {
    // The fixture reduces every input to an unsigned index mod 4, so all
    // four labels are reachable from arbitrary i32 inputs, negatives
    // included. Each label's result is the carried 2*i plus the constants
    // of the blocks the branch does not exit.
    #[test]
    fn br_table_selection_matches_the_label_model(input in any::<i32>()) {
        let module = br_table_fixture();
        let carried = input.wrapping_mul(2);
        let expected = match (input as u32) % 4 {
            0 => carried.wrapping_add(110),
            1 => carried.wrapping_add(10),
            2 => carried,
            _ => carried.wrapping_add(1110),
        };
        prop_assert_eq!(invoke_i32(&module, &[Value::I32(input)]).unwrap(), expected);
    }
}

#[test]
fn br_table_out_of_range_index_selects_default() {
    // index 0 exits only the inner block and picks up the +100 on the way
    // out; any other index, including negative-as-unsigned, exits the outer
    // block directly with the bare value.
    let module = single_export(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![],
        body: vec![Instruction::Block {
            block_type: BlockType::Value(ValueType::I32),
            body: vec![
                Instruction::Block {
                    block_type: BlockType::Value(ValueType::I32),
                    body: vec![
                        Instruction::I32Const(5),
                        Instruction::LocalGet(0),
                        Instruction::BrTable { targets: vec![0], default: 1 },
                    ],
                },
                Instruction::I32Const(100),
                Instruction::Arithmetic(ArithmeticOp::I32Add),
            ],
        }],
    });
    assert_eq!(invoke_i32(&module, &[Value::I32(0)]).unwrap(), 105);
    assert_eq!(invoke_i32(&module, &[Value::I32(1)]).unwrap(), 5);
    assert_eq!(invoke_i32(&module, &[Value::I32(2)]).unwrap(), 5);
    // negative is a huge unsigned index, never a small signed one
    assert_eq!(invoke_i32(&module, &[Value::I32(-1)]).unwrap(), 5);
    assert_eq!(invoke_i32(&module, &[Value::I32(i32::MIN)]).unwrap(), 5);
}

#[test]
fn loop_counts_down_and_terminates() {
    // local 1 accumulates, local 0 counts down to zero
    let module = single_export(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![ValueType::I32],
        body: vec![
            Instruction::Loop {
                block_type: BlockType::Empty,
                body: vec![
                    // acc += counter
                    Instruction::LocalGet(1),
                    Instruction::LocalGet(0),
                    Instruction::Arithmetic(ArithmeticOp::I32Add),
                    Instruction::LocalSet(1),
                    // counter -= 1
                    Instruction::LocalGet(0),
                    Instruction::I32Const(1),
                    Instruction::Arithmetic(ArithmeticOp::I32Sub),
                    Instruction::LocalTee(0),
                    // back edge while counter != 0
                    Instruction::I32Const(0),
                    Instruction::Comparison(ComparisonOp::I32Ne),
                    Instruction::BrIf(0),
                ],
            },
            Instruction::LocalGet(1),
        ],
    });
    assert_eq!(invoke_i32(&module, &[Value::I32(10)]).unwrap(), 55);
    assert_eq!(invoke_i32(&module, &[Value::I32(1)]).unwrap(), 1);
}

#[test]
fn if_selects_an_arm_and_yields_its_value() {
    let module = single_export(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![],
        body: vec![
            Instruction::LocalGet(0),
            Instruction::If {
                block_type: BlockType::Value(ValueType::I32),
                then_body: vec![Instruction::I32Const(1)],
                else_body: vec![Instruction::I32Const(-1)],
            },
        ],
    });
    assert_eq!(invoke_i32(&module, &[Value::I32(7)]).unwrap(), 1);
    assert_eq!(invoke_i32(&module, &[Value::I32(0)]).unwrap(), -1);
}

#[test]
fn return_exits_from_deep_nesting() {
    let module = single_export(Function {
        ty: FuncType::new(vec![], vec![ValueType::I32]),
        locals: vec![],
        body: vec![
            Instruction::Block {
                block_type: BlockType::Empty,
                body: vec![Instruction::Block {
                    block_type: BlockType::Empty,
                    body: vec![Instruction::I32Const(42), Instruction::Return],
                }],
            },
            Instruction::I32Const(0),
        ],
    });
    assert_eq!(invoke_i32(&module, &[]).unwrap(), 42);
}

#[test]
fn unreachable_traps_with_the_canonical_message() {
    let module = single_export(Function {
        ty: FuncType::new(vec![], vec![]),
        locals: vec![],
        body: vec![Instruction::Unreachable],
    });
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();
    let err = engine.invoke(&module, &mut instance, "run", &[]).unwrap_err();
    assert!(err.is_trap());
    assert_eq!(err.message, "unreachable");
}

#[test]
fn nesting_deeper_than_the_limit_is_an_error_not_a_crash() {
    let mut body = vec![Instruction::Nop];
    for _ in 0..64 {
        body = vec![Instruction::Block { block_type: BlockType::Empty, body }];
    }
    let module = single_export(Function {
        ty: FuncType::new(vec![], vec![]),
        locals: vec![],
        body,
    });
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::with_limits(EngineLimits {
        max_operand_depth: 1024,
        max_control_depth: 16,
    });
    let err = engine.invoke(&module, &mut instance, "run", &[]).unwrap_err();
    assert!(!err.is_trap());
}

#[test]
fn branch_depth_past_the_nesting_is_rejected() {
    let module = single_export(Function {
        ty: FuncType::new(vec![], vec![]),
        locals: vec![],
        body: vec![Instruction::Br(3)],
    });
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();
    assert!(engine.invoke(&module, &mut instance, "run", &[]).is_err());
}

#[test]
fn argument_types_are_checked_before_execution() {
    let module = single_export(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![],
        body: vec![Instruction::LocalGet(0)],
    });
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();
    assert!(engine.invoke(&module, &mut instance, "run", &[Value::I64(1)]).is_err());
    assert!(engine.invoke(&module, &mut instance, "run", &[]).is_err());
    assert!(engine.invoke(&module, &mut instance, "missing", &[]).is_err());
}
