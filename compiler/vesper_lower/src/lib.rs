//! Vesper lowering compiler.
//!
//! Translates a host syntax tree ([`vesper_ir::ast`]) into the IR
//! ([`vesper_ir::ir`]), resolving package-qualified names against the
//! native registry and desugaring operators into ordinary calls, both at
//! compile time. The produced package is operator-free and selector-free.
//!
//! ```text
//! ast::SourceUnit + NativeRegistry → lower_unit → ir::Package
//! ```
//!
//! Lowering either covers a node completely or fails with a typed
//! [`CompileError`]; there are no panics on unsupported shapes and no
//! partial packages.

mod errors;
mod literals;
mod lower;


pub use errors::{
    compound_arity, malformed_int_literal, malformed_string_literal, unknown_member,
    unknown_package, unregistered_operator, unsupported_expr, unsupported_literal,
    unsupported_stmt, CompileError, CompileErrorKind,
};
pub use lower::lower_unit;
