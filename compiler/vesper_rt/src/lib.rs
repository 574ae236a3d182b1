//! Vesper runtime: the dynamic value model and the native bridge.
//!
//! This crate is the bottom of the stack. It defines:
//!
//! - [`Value`]: the closed tagged union the evaluator manipulates
//! - [`NativeRegistry`] / [`NativePackage`]: host-callable functions and
//!   mutable globals, grouped into named packages, plus the builtin
//!   operator tables consulted by the lowering compiler
//! - [`RuntimeError`]: the evaluation-time error family
//! - [`Name`] / [`StringInterner`]: interned identifiers shared by the
//!   compiler and evaluator
//!
//! The registry is an explicitly constructed, immutable configuration
//! object: it is built once at startup and passed as a parameter into both
//! the compiler and the evaluator. There are no process-wide tables.

mod bridge;
pub mod errors;
mod format;
mod interner;
mod name;
mod operators;
mod packages;
mod value;

pub use bridge::{GlobalCell, NativeCtx, NativeFn, NativePackage, NativeRegistry, NativeResult};
pub use errors::{RuntimeError, RuntimeErrorKind};
pub use format::format_value;
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use operators::install_operators;
pub use packages::{default_registry, fmt_package, testing_package};
pub use value::{ArrayValue, Heap, SliceValue, StructValue, Value};
