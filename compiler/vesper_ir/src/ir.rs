//! The lowered intermediate representation.
//!
//! A deliberately small, operator-free tree: operators and package
//! selectors were already resolved into call expressions and native-handle
//! literals during lowering. Nodes are pure data with no parent pointers
//! and no evaluation state; a tree is built once, never mutated, and may be
//! evaluated repeatedly and concurrently.

use rustc_hash::FxHashMap;
use vesper_rt::{Name, Value};

/// A lowered compilation unit: function name → declaration.
///
/// Immutable after construction; safely shared by any number of concurrent
/// evaluations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Package {
    funcs: FxHashMap<Name, FuncDecl>,
}

impl Package {
    /// Build a package from lowered declarations.
    pub fn new(funcs: FxHashMap<Name, FuncDecl>) -> Self {
        Package { funcs }
    }

    /// Look up a function by name.
    pub fn func(&self, name: Name) -> Option<&FuncDecl> {
        self.funcs.get(&name)
    }

    /// Whether the package declares `name`.
    pub fn contains(&self, name: Name) -> bool {
        self.funcs.contains_key(&name)
    }

    /// Number of declared functions.
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    /// Whether the package declares no functions.
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

/// A lowered function declaration.
///
/// Parameters are ordered; a parameter may be the `_` placeholder, meaning
/// the argument is accepted and ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    pub params: Vec<Name>,
    pub body: Stmt,
}

/// Lowered statements.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Evaluate and discard.
    Expr(Expr),
    /// Parallel assignment. The IR does not distinguish "introduce a new
    /// binding" from "update an existing one"; the evaluator's scoping
    /// policy decides.
    Assign { lhs: Vec<Expr>, rhs: Vec<Expr> },
    /// Statement sequence; order is semantically significant.
    Block(Vec<Stmt>),
    /// No-op.
    Empty,
    /// Conditional. All fields are required; the lowering substitutes
    /// `Empty` for absent init/else.
    If(Box<IfStmt>),
    /// Loop. All fields are required; the lowering substitutes `Empty`
    /// for absent init/post and a `true` literal for an absent condition.
    For(Box<ForStmt>),
    /// Terminate the nearest enclosing loop.
    Break,
    /// Return the evaluated results; zero results is valid.
    Return(Vec<Expr>),
}

/// Conditional statement. All fields are required.
#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub init: Stmt,
    pub cond: Expr,
    pub body: Stmt,
    pub els: Stmt,
}

/// Loop statement. All fields are required.
#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub init: Stmt,
    pub cond: Expr,
    pub post: Stmt,
    pub body: Stmt,
}

/// Lowered expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Call of any callable: user functions, natives, and desugared
    /// operators all take this shape.
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// Identifier, resolved at evaluation time.
    Ident(Name),
    /// A value embedded at lowering time: parsed number/string literals
    /// and compile-time-resolved native handles.
    Literal(Value),
    /// Slice literal; elements evaluate into shared backing storage.
    SliceLit(Vec<Expr>),
    /// Array literal; elements evaluate into a copy-semantics aggregate.
    ArrayLit(Vec<Expr>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn packages_are_shareable_across_threads() {
        assert_send_sync::<Package>();
    }

    #[test]
    fn package_lookup() {
        let name = Name::from_raw(3);
        let mut funcs = FxHashMap::default();
        funcs.insert(
            name,
            FuncDecl {
                params: vec![],
                body: Stmt::Empty,
            },
        );
        let package = Package::new(funcs);
        assert!(package.contains(name));
        assert_eq!(package.func(Name::from_raw(4)), None);
        assert_eq!(package.len(), 1);
    }
}
