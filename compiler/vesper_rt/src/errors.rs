//! Runtime error type and factory functions.
//!
//! Every evaluation failure is a [`RuntimeError`]: a structured
//! [`RuntimeErrorKind`] plus a human-readable message computed from it.
//! Factory functions are the only way errors are built outside this module,
//! keeping message wording in one place.
//!
//! Control-flow signals (break/return) are NOT errors and never travel
//! through this type; see the evaluator's `Signal`.

use std::fmt;

/// Structured error category for a runtime failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// Identifier not found in any scope or the package function table.
    UndefinedIdentifier { name: String },
    /// Entry or sibling function name not present in the package.
    UndefinedFunction { name: String },
    /// Call argument count does not match the parameter count.
    ArityMismatch {
        func: String,
        expected: usize,
        found: usize,
    },
    /// Assignment target count does not match the value count.
    AssignMismatch { targets: usize, values: usize },
    /// Assignment to anything other than an identifier.
    UnsupportedAssignmentTarget { target: String },
    /// Operator or native call applied to an incompatible value kind.
    TypeMismatch { expected: String, got: String },
    /// Call of a value that is neither a native nor a user function.
    NotCallable { type_name: String },
    /// Slice/array index outside the backing storage.
    IndexOutOfRange { index: i64, len: usize },
    /// Integer division or remainder by zero.
    DivisionByZero,
    /// A break signal escaped every enclosing loop.
    BreakOutsideLoop,
    /// Interpreted call depth exceeded the evaluator's ceiling.
    RecursionLimit { depth: usize },
    /// Native assertion failure (`testing.AssertEqual`).
    AssertionFailed { expected: String, got: String },
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedIdentifier { name } => write!(f, "undefined identifier: {name}"),
            Self::UndefinedFunction { name } => write!(f, "undefined function: {name}"),
            Self::ArityMismatch {
                func,
                expected,
                found,
            } => write!(
                f,
                "{func} expects {expected} argument(s), got {found}"
            ),
            Self::AssignMismatch { targets, values } => write!(
                f,
                "assignment mismatch: {targets} target(s) but {values} value(s)"
            ),
            Self::UnsupportedAssignmentTarget { target } => {
                write!(f, "unsupported assignment target: {target}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index out of range [{index}] with length {len}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::BreakOutsideLoop => write!(f, "break outside of loop"),
            Self::RecursionLimit { depth } => {
                write!(f, "call depth limit exceeded ({depth} frames)")
            }
            Self::AssertionFailed { expected, got } => {
                write!(f, "assertion failed: expected {expected}, but got {got}")
            }
        }
    }
}

/// Runtime evaluation error.
///
/// Aborts the current `run` call entirely; there is no retry or partial
/// recovery. The message carries enough context to diagnose the offending
/// statement or expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeError {
    /// Structured error category.
    pub kind: RuntimeErrorKind,
    /// Human-readable message (the kind's `Display` output).
    pub message: String,
}

impl RuntimeError {
    fn from_kind(kind: RuntimeErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Identifier not found in any scope or the package function table.
pub fn undefined_identifier(name: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UndefinedIdentifier { name: name.into() })
}

/// Function name not present in the package.
pub fn undefined_function(name: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UndefinedFunction { name: name.into() })
}

/// Call argument count does not match the parameter count.
pub fn arity_mismatch(func: impl Into<String>, expected: usize, found: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::ArityMismatch {
        func: func.into(),
        expected,
        found,
    })
}

/// Assignment target count does not match the value count.
pub fn assign_mismatch(targets: usize, values: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::AssignMismatch { targets, values })
}

/// Assignment to anything other than an identifier.
pub fn unsupported_assignment_target(target: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnsupportedAssignmentTarget {
        target: target.into(),
    })
}

/// Operator or native call applied to an incompatible value kind.
pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    })
}

/// Call of a value that is neither a native nor a user function.
pub fn not_callable(type_name: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::NotCallable {
        type_name: type_name.into(),
    })
}

/// Slice/array index outside the backing storage.
pub fn index_out_of_range(index: i64, len: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::IndexOutOfRange { index, len })
}

/// Integer division or remainder by zero.
pub fn division_by_zero() -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::DivisionByZero)
}

/// A break signal escaped every enclosing loop.
pub fn break_outside_loop() -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::BreakOutsideLoop)
}

/// Interpreted call depth exceeded the evaluator's ceiling.
pub fn recursion_limit(depth: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::RecursionLimit { depth })
}

/// Native assertion failure.
pub fn assertion_failed(expected: impl Into<String>, got: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::AssertionFailed {
        expected: expected.into(),
        got: got.into(),
    })
}
