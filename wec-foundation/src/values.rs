// WEC - wec-foundation
// Module: Runtime Values
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Runtime value representation.
//!
//! `Value` is the tagged union flowing through the operand stack. Floats are
//! carried as bit patterns (`FloatBits32`/`FloatBits64`) so that equality and
//! memory round-trips are bit-exact. There is no implicit coercion between
//! variants anywhere; every accessor is typed.

use core::fmt;
use std::sync::{Arc, Weak};

use wec_math::{FloatBits32, FloatBits64};

use crate::types::ValueType;

/// Opaque host reference.
///
/// The payload (here just a host-chosen id) is owned by the host; table
/// entries and activation-region slots hold counted references to it.
/// Identity is reference identity, not id equality: two calls to
/// `ExternRef::new(7)` produce distinct references.
#[derive(Clone)]
pub struct ExternRef {
    data: Arc<ExternRefData>,
}

#[derive(Debug)]
struct ExternRefData {
    id: u64,
}

impl ExternRef {
    /// Host entry point: construct an opaque handle around a host id
    /// (`ref.extern id`).
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self { data: Arc::new(ExternRefData { id }) }
    }

    /// The host id this reference wraps.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.data.id
    }

    /// Reference identity: true only for clones of the same handle.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Downgrade to a weak handle, for host-side liveness observation.
    #[must_use]
    pub fn downgrade(&self) -> WeakExternRef {
        WeakExternRef { data: Arc::downgrade(&self.data) }
    }

    /// Number of live counted references to this payload.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl fmt::Debug for ExternRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExternRef(id={})", self.data.id)
    }
}

impl PartialEq for ExternRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for ExternRef {}

/// Weak counterpart of [`ExternRef`], used by hosts (and tests) to observe
/// whether a payload is still referenced by the engine.
#[derive(Debug, Clone)]
pub struct WeakExternRef {
    data: Weak<ExternRefData>,
}

impl WeakExternRef {
    /// Attempt to upgrade back to a counted reference.
    #[must_use]
    pub fn upgrade(&self) -> Option<ExternRef> {
        self.data.upgrade().map(|data| ExternRef { data })
    }

    /// Whether the payload is still referenced somewhere.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.data.strong_count() > 0
    }
}

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 32-bit float, stored as its bit pattern
    F32(FloatBits32),
    /// 64-bit float, stored as its bit pattern
    F64(FloatBits64),
    /// Nullable external reference
    ExternRef(Option<ExternRef>),
}

impl Value {
    /// The type of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::ExternRef(_) => ValueType::ExternRef,
        }
    }

    /// Whether this value has the given type.
    #[must_use]
    pub fn matches_type(&self, ty: &ValueType) -> bool {
        self.value_type() == *ty
    }

    /// Type-appropriate default: zero for numerics, null for references.
    #[must_use]
    pub fn default_for_type(ty: ValueType) -> Self {
        match ty {
            ValueType::I32 => Value::I32(0),
            ValueType::I64 => Value::I64(0),
            ValueType::F32 => Value::F32(FloatBits32::from_bits(0)),
            ValueType::F64 => Value::F64(FloatBits64::from_bits(0)),
            ValueType::ExternRef => Value::ExternRef(None),
        }
    }

    /// Construct an f32 value from a host float.
    #[must_use]
    pub fn f32(val: f32) -> Self {
        Value::F32(FloatBits32::from_float(val))
    }

    /// Construct an f64 value from a host float.
    #[must_use]
    pub fn f64(val: f64) -> Self {
        Value::F64(FloatBits64::from_float(val))
    }

    /// Construct a non-null externref value.
    #[must_use]
    pub fn extern_ref(reference: ExternRef) -> Self {
        Value::ExternRef(Some(reference))
    }

    /// As a signed i32, if this is an I32.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// As an unsigned u32, if this is an I32 (bit reinterpretation).
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        self.as_i32().map(|v| v as u32)
    }

    /// As a signed i64, if this is an I64.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// As an unsigned u64, if this is an I64 (bit reinterpretation).
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().map(|v| v as u64)
    }

    /// As f32 bits, if this is an F32.
    #[must_use]
    pub fn as_f32_bits(&self) -> Option<FloatBits32> {
        match self {
            Value::F32(bits) => Some(*bits),
            _ => None,
        }
    }

    /// As f64 bits, if this is an F64.
    #[must_use]
    pub fn as_f64_bits(&self) -> Option<FloatBits64> {
        match self {
            Value::F64(bits) => Some(*bits),
            _ => None,
        }
    }

    /// As a nullable externref, if this is an ExternRef.
    #[must_use]
    pub fn as_extern_ref(&self) -> Option<Option<&ExternRef>> {
        match self {
            Value::ExternRef(opt) => Some(opt.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "i32:{v}"),
            Value::I64(v) => write!(f, "i64:{v}"),
            Value::F32(bits) => write!(f, "f32:{}", bits.value()),
            Value::F64(bits) => write!(f, "f64:{}", bits.value()),
            Value::ExternRef(None) => write!(f, "externref:null"),
            Value::ExternRef(Some(r)) => write!(f, "externref:{}", r.id()),
        }
    }
}
