//! Native bridge: host-callable functions, packages, and globals.
//!
//! The bridge adapts between dynamic [`Value`]s and statically typed host
//! code. It is built once, before any compilation or evaluation, and
//! threaded as an explicit parameter into both the lowering compiler (name
//! resolution, compile time only) and the evaluator (invocation, run time
//! only). Nothing here is ambient process state.
//!
//! Globals are the one mutable exception: a [`GlobalCell`] may be read and
//! written by invoked native functions and persists for the lifetime of the
//! registry instance. Concurrent evaluator runs sharing one registry must
//! coordinate writes themselves; the cells are individually locked but the
//! engine assumes a single writer at a time.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::RuntimeError;
use crate::{StringInterner, Value};

/// Result of a native invocation: zero or more values, or a runtime error.
pub type NativeResult = Result<Vec<Value>, RuntimeError>;

type NativeImpl = dyn Fn(&NativeCtx<'_>, &[Value]) -> NativeResult + Send + Sync;

/// Context handed to every native invocation.
///
/// Exposes the registry (for global-cell access) and the interner (for
/// rendering values that carry interned names).
pub struct NativeCtx<'a> {
    /// The registry the invoking evaluator was constructed with.
    pub registry: &'a NativeRegistry,
    /// Interner shared with the compiler and evaluator.
    pub interner: &'a StringInterner,
}

/// Handle to a host-callable function.
///
/// Invocation is synchronous: the host function runs to completion before
/// control returns to the evaluator. Argument conversion happens inside the
/// host closure via the explicit `Value::as_*` accessors.
#[derive(Clone)]
pub struct NativeFn {
    name: &'static str,
    imp: Arc<NativeImpl>,
}

impl NativeFn {
    /// Wrap a host closure as a callable handle.
    pub fn new(
        name: &'static str,
        imp: impl Fn(&NativeCtx<'_>, &[Value]) -> NativeResult + Send + Sync + 'static,
    ) -> Self {
        NativeFn {
            name,
            imp: Arc::new(imp),
        }
    }

    /// Display name used in error messages and value formatting.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the host function.
    #[inline]
    pub fn invoke(&self, ctx: &NativeCtx<'_>, args: &[Value]) -> NativeResult {
        (self.imp)(ctx, args)
    }

    /// Whether two handles wrap the same host closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.imp, &other.imp)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn").field("name", &self.name).finish()
    }
}

/// Mutable storage cell for a package global.
///
/// Cloning produces another handle to the same cell.
#[derive(Clone)]
pub struct GlobalCell(Arc<RwLock<Value>>);

impl GlobalCell {
    /// Create a cell holding `value`.
    pub fn new(value: Value) -> Self {
        GlobalCell(Arc::new(RwLock::new(value)))
    }

    /// Read the current value.
    pub fn get(&self) -> Value {
        self.0.read().clone()
    }

    /// Replace the current value.
    pub fn set(&self, value: Value) {
        *self.0.write() = value;
    }
}

impl fmt::Debug for GlobalCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobalCell").field(&self.get()).finish()
    }
}

/// A named bundle of host functions and globals.
#[derive(Debug, Default)]
pub struct NativePackage {
    name: String,
    funcs: FxHashMap<String, NativeFn>,
    globals: FxHashMap<String, GlobalCell>,
}

impl NativePackage {
    /// Create an empty package.
    pub fn new(name: impl Into<String>) -> Self {
        NativePackage {
            name: name.into(),
            funcs: FxHashMap::default(),
            globals: FxHashMap::default(),
        }
    }

    /// Add a function. Chainable.
    #[must_use]
    pub fn func(mut self, name: impl Into<String>, f: NativeFn) -> Self {
        self.funcs.insert(name.into(), f);
        self
    }

    /// Add a global cell. Chainable.
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.insert(name.into(), GlobalCell::new(value));
        self
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a function by exact name.
    pub fn lookup_func(&self, name: &str) -> Option<&NativeFn> {
        self.funcs.get(name)
    }

    /// Look up a global cell by exact name.
    pub fn lookup_global(&self, name: &str) -> Option<&GlobalCell> {
        self.globals.get(name)
    }
}

/// The native bridge configuration: packages plus operator tables.
///
/// Immutable after construction. The operator tables are consulted only by
/// the lowering compiler, never at evaluation time; operators become
/// ordinary call expressions whose callee is a literal wrapping the builtin
/// function.
#[derive(Debug, Default)]
pub struct NativeRegistry {
    packages: FxHashMap<String, NativePackage>,
    binary_ops: FxHashMap<&'static str, Value>,
    compound_ops: FxHashMap<&'static str, Value>,
}

impl NativeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package under its own name.
    pub fn register(&mut self, package: NativePackage) {
        self.packages.insert(package.name().to_owned(), package);
    }

    /// Register a binary operator builtin under its symbol (e.g. `"+"`).
    pub fn register_binary_op(&mut self, symbol: &'static str, f: NativeFn) {
        self.binary_ops.insert(symbol, Value::Native(f));
    }

    /// Register a compound-assignment builtin under its symbol (e.g. `"+="`).
    pub fn register_compound_op(&mut self, symbol: &'static str, f: NativeFn) {
        self.compound_ops.insert(symbol, Value::Native(f));
    }

    /// Look up a package by exact name.
    pub fn package(&self, name: &str) -> Option<&NativePackage> {
        self.packages.get(name)
    }

    /// Look up `pkg.name` as a function. Compile-time resolution only.
    pub fn lookup_func(&self, package: &str, name: &str) -> Option<&NativeFn> {
        self.packages.get(package)?.lookup_func(name)
    }

    /// Look up `pkg.name` as a global cell.
    pub fn lookup_global(&self, package: &str, name: &str) -> Option<&GlobalCell> {
        self.packages.get(package)?.lookup_global(name)
    }

    /// Builtin for a binary operator symbol, if registered.
    pub fn binary_op(&self, symbol: &str) -> Option<&Value> {
        self.binary_ops.get(symbol)
    }

    /// Builtin for a compound-assignment symbol, if registered.
    pub fn compound_op(&self, symbol: &str) -> Option<&Value> {
        self.compound_ops.get(symbol)
    }
}
