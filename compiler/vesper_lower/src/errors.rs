//! Compile error type and factory functions.
//!
//! Any `CompileError` aborts lowering of the whole compilation unit; no
//! partial IR is ever returned.

use std::fmt;

/// Structured error category for a lowering failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// Statement shape the lowering declares no support for.
    UnsupportedStmt { what: String },
    /// Expression shape the lowering declares no support for.
    UnsupportedExpr { what: String },
    /// Literal kind the lowering declares no support for.
    UnsupportedLiteral { kind: String },
    /// Integer literal text that does not parse under base-0 rules.
    MalformedIntLiteral { text: String },
    /// String literal text without surrounding quotes.
    MalformedStringLiteral { text: String },
    /// Selector names a package absent from the registry.
    UnknownPackage { name: String },
    /// Selector names a function absent from its package.
    UnknownMember { package: String, name: String },
    /// Operator symbol absent from the builtin table.
    UnregisteredOperator { symbol: String },
    /// Compound assignment with other than one target and one value.
    CompoundArity { targets: usize, values: usize },
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedStmt { what } => {
                write!(f, "statement not supported by lowering: {what}")
            }
            Self::UnsupportedExpr { what } => {
                write!(f, "expression not supported by lowering: {what}")
            }
            Self::UnsupportedLiteral { kind } => {
                write!(f, "literal kind not supported by lowering: {kind}")
            }
            Self::MalformedIntLiteral { text } => {
                write!(f, "malformed integer literal: {text}")
            }
            Self::MalformedStringLiteral { text } => {
                write!(f, "malformed string literal: {text}")
            }
            Self::UnknownPackage { name } => write!(f, "unknown package: {name}"),
            Self::UnknownMember { package, name } => {
                write!(f, "unknown function: {package}.{name}")
            }
            Self::UnregisteredOperator { symbol } => {
                write!(f, "operator not registered: {symbol}")
            }
            Self::CompoundArity { targets, values } => write!(
                f,
                "compound assignment requires one target and one value, got {targets} and {values}"
            ),
        }
    }
}

/// Lowering-time error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError {
    /// Structured error category.
    pub kind: CompileErrorKind,
    /// Human-readable message (the kind's `Display` output).
    pub message: String,
}

impl CompileError {
    fn from_kind(kind: CompileErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompileError {}

/// Statement shape the lowering declares no support for.
pub fn unsupported_stmt(what: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::UnsupportedStmt { what: what.into() })
}

/// Expression shape the lowering declares no support for.
pub fn unsupported_expr(what: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::UnsupportedExpr { what: what.into() })
}

/// Literal kind the lowering declares no support for.
pub fn unsupported_literal(kind: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::UnsupportedLiteral { kind: kind.into() })
}

/// Integer literal text that does not parse under base-0 rules.
pub fn malformed_int_literal(text: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::MalformedIntLiteral { text: text.into() })
}

/// String literal text without surrounding quotes.
pub fn malformed_string_literal(text: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::MalformedStringLiteral { text: text.into() })
}

/// Selector names a package absent from the registry.
pub fn unknown_package(name: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::UnknownPackage { name: name.into() })
}

/// Selector names a function absent from its package.
pub fn unknown_member(package: impl Into<String>, name: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::UnknownMember {
        package: package.into(),
        name: name.into(),
    })
}

/// Operator symbol absent from the builtin table.
pub fn unregistered_operator(symbol: impl Into<String>) -> CompileError {
    CompileError::from_kind(CompileErrorKind::UnregisteredOperator {
        symbol: symbol.into(),
    })
}

/// Compound assignment with other than one target and one value.
pub fn compound_arity(targets: usize, values: usize) -> CompileError {
    CompileError::from_kind(CompileErrorKind::CompoundArity { targets, values })
}
