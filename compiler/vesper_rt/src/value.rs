//! The dynamic value model.
//!
//! A closed tagged union with an explicit discriminant; no reflection or
//! ambient type introspection anywhere. Conversions between `Value` and
//! host-native representations go through the explicit `as_*` accessors,
//! which produce a `TypeMismatch` error on the wrong kind.
//!
//! Aggregate semantics follow the host language: slices share backing
//! storage (an index write is visible through every alias), arrays and
//! structs copy on clone.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::bridge::NativeFn;
use crate::errors::{index_out_of_range, type_mismatch, RuntimeError};
use crate::Name;

/// Shared heap allocation wrapper.
///
/// Enforces that shared values go through one factory method instead of
/// ad hoc `Arc::new` calls. `#[repr(transparent)]` keeps the layout
/// identical to `Arc<T>`.
#[repr(transparent)]
#[derive(Debug)]
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    /// Allocate a value on the shared heap.
    #[inline]
    pub fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Slice value: an ordered sequence with shared backing storage.
///
/// Cloning a `SliceValue` produces an alias of the same storage; an index
/// assignment through one alias is observed by all of them.
#[derive(Clone, Debug)]
pub struct SliceValue(Heap<RwLock<Vec<Value>>>);

impl SliceValue {
    /// Create a slice backed by the given elements.
    pub fn new(elems: Vec<Value>) -> Self {
        SliceValue(Heap::new(RwLock::new(elems)))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// Whether the slice has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Read the element at `index`.
    pub fn get(&self, index: i64) -> Result<Value, RuntimeError> {
        let elems = self.0.read();
        usize::try_from(index)
            .ok()
            .and_then(|i| elems.get(i))
            .cloned()
            .ok_or_else(|| index_out_of_range(index, elems.len()))
    }

    /// Write the element at `index`, visible through every alias.
    pub fn set(&self, index: i64, value: Value) -> Result<(), RuntimeError> {
        let mut elems = self.0.write();
        let len = elems.len();
        match usize::try_from(index).ok().and_then(|i| elems.get_mut(i)) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(index_out_of_range(index, len)),
        }
    }

    /// Snapshot the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    /// Whether two slices alias the same backing storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

/// Array value: an ordered sequence with value/copy semantics.
///
/// Cloning copies the elements; two copies never observe each other's
/// writes.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue(Vec<Value>);

impl ArrayValue {
    /// Create an array from the given elements.
    pub fn new(elems: Vec<Value>) -> Self {
        ArrayValue(elems)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read the element at `index`.
    pub fn get(&self, index: i64) -> Result<Value, RuntimeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.0.get(i))
            .cloned()
            .ok_or_else(|| index_out_of_range(index, self.0.len()))
    }

    /// The elements in order.
    pub fn elements(&self) -> &[Value] {
        &self.0
    }
}

/// Struct value: a named-field record with value/copy semantics.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StructValue {
    fields: FxHashMap<Name, Value>,
}

impl StructValue {
    /// Create a struct from named fields.
    pub fn new(fields: FxHashMap<Name, Value>) -> Self {
        StructValue { fields }
    }

    /// Read a field by name.
    pub fn get_field(&self, name: Name) -> Option<&Value> {
        self.fields.get(&name)
    }

    /// Write a field by name, creating it if absent.
    pub fn set_field(&mut self, name: Name, value: Value) {
        self.fields.insert(name, value);
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate the fields in unspecified order.
    pub fn fields(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Whether the struct has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The dynamic runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// 64-bit integer.
    Int(i64),
    /// String.
    Str(Heap<String>),
    /// Boolean.
    Bool(bool),
    /// Host-callable native function handle.
    Native(NativeFn),
    /// Reference to a package-level user function (no captured
    /// environment; functions are package-level only).
    Func(Name),
    /// Slice with shared backing storage.
    Slice(SliceValue),
    /// Array with copy semantics.
    Array(ArrayValue),
    /// Named-field record.
    Struct(StructValue),
    /// Absence of a value: the observation of a zero-result call in
    /// expression position.
    Void,
}

impl Value {
    /// Integer constructor.
    #[inline]
    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    /// String constructor.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Slice constructor (shared backing).
    #[inline]
    pub fn slice(elems: Vec<Value>) -> Self {
        Value::Slice(SliceValue::new(elems))
    }

    /// Array constructor (copy semantics).
    #[inline]
    pub fn array(elems: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(elems))
    }

    /// The value's kind name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Native(_) => "native function",
            Value::Func(_) => "function",
            Value::Slice(_) => "slice",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Void => "void",
        }
    }

    /// Convert to a host `i64`, or fail with `TypeMismatch`.
    pub fn as_int(&self) -> Result<i64, RuntimeError> {
        match self {
            Value::Int(v) => Ok(*v),
            other => Err(type_mismatch("int", other.type_name())),
        }
    }

    /// Convert to a host `&str`, or fail with `TypeMismatch`.
    pub fn as_str(&self) -> Result<&str, RuntimeError> {
        match self {
            Value::Str(s) => Ok(s.as_str()),
            other => Err(type_mismatch("string", other.type_name())),
        }
    }

    /// Convert to a host `bool`, or fail with `TypeMismatch`.
    pub fn as_bool(&self) -> Result<bool, RuntimeError> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => Err(type_mismatch("bool", other.type_name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a.ptr_eq(b),
            (Value::Func(a), Value::Func(b)) => a == b,
            // Slices compare by alias identity; they share mutable
            // backing storage and have no stable content to compare.
            (Value::Slice(a), Value::Slice(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

impl fmt::Display for Value {
    /// Interner-free rendering: identifiers and struct fields print as raw
    /// `Name` indexes. `format::format_value` resolves them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Native(n) => write!(f, "<native {}>", n.name()),
            Value::Func(name) => write!(f, "<func #{}>", name.raw()),
            Value::Slice(s) => {
                write!(f, "[")?;
                for (i, elem) in s.to_vec().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, "]")
            }
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, elem) in a.elements().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, "]")
            }
            Value::Struct(s) => write!(f, "<struct with {} field(s)>", s.len()),
            Value::Void => Ok(()),
        }
    }
}
