//! Vesper Eval - tree-walking evaluator for the lowered IR.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - [`Environment`]: lexical scoping with a scope stack; one environment
//!   per function activation, no parent across calls (no closures)
//! - [`Signal`]: the explicit `Completed | Break | Return` outcome of
//!   every statement execution, propagated by every caller and never
//!   represented through the error channel
//! - [`vesper_rt::Value`] and the native bridge for dynamic values and
//!   host-function invocation
//!
//! Evaluation is single-threaded, synchronous, recursive descent. The IR
//! package and the registry are read-only; any number of evaluator runs
//! may share them concurrently. The only cross-run mutable state is the
//! bridge's global cells.
//!
//! # Re-exports
//!
//! Runtime error constructors live in `vesper_rt::errors` and are
//! re-exported here for convenience.

mod environment;
mod evaluator;
mod signal;

#[cfg(test)]
mod tests;

pub use environment::{Environment, LocalScope, Scope};
pub use evaluator::{run, Evaluator};
pub use signal::Signal;

// Re-export the runtime error surface (canonical path is
// vesper_rt::errors::*).
pub use vesper_rt::errors::{
    arity_mismatch, assertion_failed, assign_mismatch, break_outside_loop, division_by_zero,
    index_out_of_range, not_callable, recursion_limit, type_mismatch, undefined_function,
    undefined_identifier, unsupported_assignment_target,
};
pub use vesper_rt::{RuntimeError, RuntimeErrorKind, Value};
