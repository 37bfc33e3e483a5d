// WEC - wec-runtime
// Module: ExternRef and GC Tests
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Externref tables and the activation-region collector: identity
//! preservation across collections, long round-trip loops, and reclamation
//! of unrooted references.

use wec_foundation::{
    BlockType, ExternRef, FuncType, Limits, TableType, Value, ValueType,
};
use wec_runtime::{
    ActivationsTable, ArithmeticOp, ComparisonOp, Function, Instruction, Module,
    ModuleInstance, StacklessEngine, TableOp,
};

fn table_module() -> Module {
    let mut builder = Module::builder().with_table(TableType {
        element_type: ValueType::ExternRef,
        limits: Limits { min: 4, max: Some(8) },
    });

    // set(index, ref)
    let set = builder.add_function(Function {
        ty: FuncType::new(vec![ValueType::I32, ValueType::ExternRef], vec![]),
        locals: vec![],
        body: vec![
            Instruction::LocalGet(0),
            Instruction::LocalGet(1),
            Instruction::Table(TableOp::TableSet),
        ],
    });
    builder.export("set", set).unwrap();

    // get(index) -> ref
    let get = builder.add_function(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::ExternRef]),
        locals: vec![],
        body: vec![Instruction::LocalGet(0), Instruction::Table(TableOp::TableGet)],
    });
    builder.export("get", get).unwrap();

    // roundtrip(ref) -> ref: store into slot 0, read it back
    let roundtrip = builder.add_function(Function {
        ty: FuncType::new(vec![ValueType::ExternRef], vec![ValueType::ExternRef]),
        locals: vec![],
        body: vec![
            Instruction::I32Const(0),
            Instruction::LocalGet(0),
            Instruction::Table(TableOp::TableSet),
            Instruction::I32Const(0),
            Instruction::Table(TableOp::TableGet),
        ],
    });
    builder.export("roundtrip", roundtrip).unwrap();

    // churn(n): n iterations of table.set(0, table.get(0)), counting down
    let churn = builder.add_function(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![]),
        locals: vec![],
        body: vec![Instruction::Loop {
            block_type: BlockType::Empty,
            body: vec![
                // table.set(0, table.get(0)) is observably a no-op
                Instruction::I32Const(0),
                Instruction::I32Const(0),
                Instruction::Table(TableOp::TableGet),
                Instruction::Table(TableOp::TableSet),
                // counter -= 1; loop while counter != 0
                Instruction::LocalGet(0),
                Instruction::I32Const(1),
                Instruction::Arithmetic(ArithmeticOp::I32Sub),
                Instruction::LocalTee(0),
                Instruction::I32Const(0),
                Instruction::Comparison(ComparisonOp::I32Ne),
                Instruction::BrIf(0),
            ],
        }],
    });
    builder.export("churn", churn).unwrap();

    builder.build().unwrap()
}

fn returned_ref(results: Vec<Value>) -> Option<ExternRef> {
    match results.into_iter().next() {
        Some(Value::ExternRef(reference)) => reference,
        other => panic!("expected an externref result, got {other:?}"),
    }
}

#[test]
fn table_round_trip_preserves_identity() {
    let module = table_module();
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();

    let reference = ExternRef::new(7);
    let results = engine
        .invoke(&module, &mut instance, "roundtrip", &[Value::extern_ref(reference.clone())])
        .unwrap();
    let back = returned_ref(results).expect("non-null");
    assert!(back.same_identity(&reference));
}

#[test]
fn null_reference_round_trips_as_null() {
    let module = table_module();
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();

    let results = engine
        .invoke(&module, &mut instance, "roundtrip", &[Value::ExternRef(None)])
        .unwrap();
    assert!(returned_ref(results).is_none());
}

#[test]
fn eight_thousand_round_trips_survive_forced_collections() {
    let module = table_module();
    let mut instance = ModuleInstance::new(&module).unwrap();
    // small region so the loop forces many collection passes
    instance.set_activations(ActivationsTable::with_capacity(256));
    let mut engine = StacklessEngine::new();

    let reference = ExternRef::new(99);
    for i in 0..8_192u32 {
        let results = engine
            .invoke(
                &module,
                &mut instance,
                "roundtrip",
                &[Value::extern_ref(reference.clone())],
            )
            .unwrap();
        let back = returned_ref(results).expect("non-null");
        assert!(back.same_identity(&reference), "iteration {i}");
    }
    assert!(instance.activations().collections() > 0);
    assert!(instance.activations().len() <= instance.activations().capacity());
}

#[test]
fn in_module_churn_loop_terminates_normally() {
    let module = table_module();
    let mut instance = ModuleInstance::new(&module).unwrap();
    instance.set_activations(ActivationsTable::with_capacity(512));
    let mut engine = StacklessEngine::new();

    // seed the slot from the host side
    let reference = ExternRef::new(1);
    instance.table_mut().unwrap().set(0, Some(reference.clone())).unwrap();

    // 8192 get/set round-trips inside one invocation
    engine.invoke(&module, &mut instance, "churn", &[Value::I32(8_192)]).unwrap();
    assert!(instance.activations().collections() > 0);

    // the slot still holds the same reference afterwards
    let results = engine.invoke(&module, &mut instance, "get", &[Value::I32(0)]).unwrap();
    let back = returned_ref(results).expect("non-null");
    assert!(back.same_identity(&reference));
}

#[test]
fn unrooted_references_are_reclaimed_by_collection() {
    let module = table_module();
    let mut instance = ModuleInstance::new(&module).unwrap();
    instance.set_activations(ActivationsTable::with_capacity(8));
    let mut engine = StacklessEngine::new();

    let transient = ExternRef::new(5);
    let weak = transient.downgrade();
    engine
        .invoke(&module, &mut instance, "set", &[Value::I32(1), Value::extern_ref(transient)])
        .unwrap();
    // fetching the element roots a copy in the activation region
    engine.invoke(&module, &mut instance, "get", &[Value::I32(1)]).unwrap();
    assert!(weak.is_live());

    // overwrite the slot; the region copy keeps the payload alive until
    // the next collection pass
    engine
        .invoke(&module, &mut instance, "set", &[Value::I32(1), Value::ExternRef(None)])
        .unwrap();
    assert!(weak.is_live());
    let keeper = ExternRef::new(6);
    engine
        .invoke(&module, &mut instance, "set", &[Value::I32(0), Value::extern_ref(keeper.clone())])
        .unwrap();
    engine.invoke(&module, &mut instance, "churn", &[Value::I32(64)]).unwrap();

    assert!(!weak.is_live(), "overwritten reference must be reclaimed");
    assert!(keeper.downgrade().is_live());
}

#[test]
fn out_of_bounds_table_access_traps_through_the_engine() {
    let module = table_module();
    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();

    let err = engine
        .invoke(&module, &mut instance, "get", &[Value::I32(4)])
        .unwrap_err();
    assert!(err.is_trap());
    assert_eq!(err.message, "out of bounds table access");

    // negative index is a huge unsigned index
    let err = engine
        .invoke(&module, &mut instance, "get", &[Value::I32(-1)])
        .unwrap_err();
    assert_eq!(err.message, "out of bounds table access");
}

#[test]
fn table_size_and_grow_through_the_engine() {
    let mut builder = Module::builder().with_table(TableType {
        element_type: ValueType::ExternRef,
        limits: Limits { min: 2, max: Some(3) },
    });
    let size = builder.add_function(Function {
        ty: FuncType::new(vec![], vec![ValueType::I32]),
        locals: vec![],
        body: vec![Instruction::Table(TableOp::TableSize)],
    });
    builder.export("size", size).unwrap();
    let grow = builder.add_function(Function {
        ty: FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
        locals: vec![],
        body: vec![
            Instruction::RefNull,
            Instruction::LocalGet(0),
            Instruction::Table(TableOp::TableGrow),
        ],
    });
    builder.export("grow", grow).unwrap();
    let module = builder.build().unwrap();

    let mut instance = ModuleInstance::new(&module).unwrap();
    let mut engine = StacklessEngine::new();
    assert_eq!(
        engine.invoke(&module, &mut instance, "size", &[]).unwrap()[0],
        Value::I32(2)
    );
    assert_eq!(
        engine.invoke(&module, &mut instance, "grow", &[Value::I32(1)]).unwrap()[0],
        Value::I32(2)
    );
    // past the maximum: -1, not an error
    assert_eq!(
        engine.invoke(&module, &mut instance, "grow", &[Value::I32(1)]).unwrap()[0],
        Value::I32(-1)
    );
}
