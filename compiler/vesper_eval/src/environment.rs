//! Lexical scope frames for the evaluator.
//!
//! Uses a scope stack (not cloning) for efficient scope management. A
//! frame is created on entering a block, loop, or call and destroyed when
//! that construct's execution completes: strict stack discipline; there
//! are no closures, so no frame outlives its creator.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use vesper_rt::{Name, Value};

/// A single-threaded scope wrapper for reference-counted interior
/// mutability.
///
/// Wraps `Rc<RefCell<T>>` so all scope allocations go through one factory
/// method. Scopes are per-evaluation and single-threaded; `Rc` is
/// intentional (the shared, thread-safe state lives in the native bridge,
/// not here).
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Create a new `LocalScope` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

/// A single scope frame: identifier bindings plus a non-owning link to the
/// parent frame.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, shadowing nothing and asking no
    /// questions.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up `name`, walking the chain outward.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Update the nearest existing binding of `name`, walking the chain
    /// outward. Returns `false` if no frame binds it.
    pub fn update(&mut self, name: Name, value: Value) -> bool {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return true;
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().update(name, value);
        }
        false
    }
}

/// The evaluator's scope stack for one function activation.
///
/// The bottom frame is the call frame (parameter bindings); blocks and
/// loops push child frames on entry and pop them on every exit path.
#[derive(Debug)]
pub struct Environment {
    /// Stack of frames, with the current frame at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Root call frame (always at the bottom).
    root: LocalScope<Scope>,
}

impl Environment {
    /// Create an environment with a single root frame and no parent,
    /// a fresh top-level call frame.
    pub fn new() -> Self {
        let root = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![root.clone()],
            root,
        }
    }

    /// Current frame depth.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a child frame.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current frame. The root frame is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.root)
    }

    /// Bind `name` in the current frame.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current().borrow_mut().define(name, value);
    }

    /// Look up `name`, walking the scope chain outward.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    /// Assignment policy: update the innermost existing binding of
    /// `name`; if no enclosing frame binds it, create it in the current
    /// frame.
    pub fn assign_or_define(&mut self, name: Name, value: Value) {
        let current = self.current();
        if !current.borrow_mut().update(name, value.clone()) {
            current.borrow_mut().define(name, value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
