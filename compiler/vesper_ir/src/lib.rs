//! Vesper IR: syntax tree and intermediate representation types.
//!
//! Pipeline:
//!
//! ```text
//! host tree ([`ast::SourceUnit`], from an external parser)
//!   → vesper_lower → [`ir::Package`] → vesper_eval
//! ```
//!
//! Both tree families are pure data. The host [`ast`] is what a producer
//! hands the compiler: string identifiers, literal tokens tagged by kind,
//! optional if/for clauses. The lowered [`ir`] is what the evaluator
//! consumes: interned names, embedded [`vesper_rt::Value`] literals, no
//! operators, and every if/for clause made required by default
//! substitution.

pub mod ast;
pub mod ir;

pub use ir::{Expr, ForStmt, FuncDecl, IfStmt, Package, Stmt};
