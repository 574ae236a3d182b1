//! Host-language syntax tree.
//!
//! The shapes a host-tree producer hands to the lowering compiler: one
//! [`SourceUnit`] per compilation unit, already known to compile in the
//! host language. No name resolution or type information is attached; the
//! compiler trusts its input.
//!
//! The tree deserializes with serde so an external parser can deliver
//! units as JSON. Identifiers are plain strings here; the compiler interns
//! them during lowering.
//!
//! The enums deliberately cover more of the host language than the
//! compiler lowers (`go`, `defer`, unary operators, composite literals,
//! indexing). Lowering those shapes is an explicit `CompileError`, not an
//! absent variant.

use serde::{Deserialize, Serialize};

/// One compilation unit: a named package of function declarations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Package name (e.g. `main`).
    pub package: String,
    /// Function declarations, in source order.
    pub funcs: Vec<FuncDecl>,
}

/// A function declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    /// Ordered parameters; an unnamed parameter lowers to `_`.
    pub params: Vec<Param>,
    /// The body statement, typically a block.
    pub body: Stmt,
}

/// A single function parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// `None` for an unnamed parameter.
    pub name: Option<String>,
}

impl Param {
    /// Named parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Param {
            name: Some(name.into()),
        }
    }

    /// Unnamed parameter.
    pub fn unnamed() -> Self {
        Param { name: None }
    }
}

/// Host statement shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression evaluated for its effects.
    Expr(Expr),
    /// Declare/set/compound assignment, distinguished by `op`.
    Assign {
        op: AssignOp,
        lhs: Vec<Expr>,
        rhs: Vec<Expr>,
    },
    /// Return zero or more results.
    Return(Vec<Expr>),
    /// Braced statement sequence.
    Block(Vec<Stmt>),
    /// `if init; cond { body } else els`; init and els optional.
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Box<Stmt>,
        els: Option<Box<Stmt>>,
    },
    /// `for init; cond; post { body }`; all three clauses optional.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Box<Stmt>,
    },
    /// Terminate the nearest enclosing loop.
    Break,
    /// No-op.
    Empty,
    /// `x++` / `x--`. Not lowered.
    IncDec { target: Expr, inc: bool },
    /// `go call`. Not lowered.
    Go { call: Expr },
    /// `defer call`. Not lowered.
    Defer { call: Expr },
}

/// Host expression shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Bare identifier.
    Ident(String),
    /// Literal token, tagged by kind, carrying the raw source text
    /// (quotes and base prefixes included).
    Lit { kind: LitKind, text: String },
    /// `expr.sel`; lowered only when `expr` is a package identifier.
    Selector { expr: Box<Expr>, sel: String },
    /// Binary operator application.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Function call.
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// Unary operator application. Not lowered.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `base[index]`. Not lowered.
    Index { base: Box<Expr>, index: Box<Expr> },
    /// Composite literal (slice/array/struct). Not lowered.
    Composite { elems: Vec<Expr> },
    /// Parenthesized expression. Not lowered.
    Paren(Box<Expr>),
}

/// Unary operator tokens. Present in host trees; not lowered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
    /// `^`
    BitNot,
}

/// Literal token kinds, as tagged by the host tree producer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl LitKind {
    /// Kind name for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            LitKind::Int => "int",
            LitKind::Float => "float",
            LitKind::Imag => "imaginary",
            LitKind::Char => "char",
            LitKind::String => "string",
        }
    }
}

/// Binary operator tokens.
///
/// The set mirrors the host language; whether a given operator actually
/// lowers depends on the registry's builtin table, not on this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    LogicalAnd,
    LogicalOr,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// The operator's source symbol, the key into the builtin table.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

/// Assignment operator tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    /// `:=`
    Define,
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
}

impl AssignOp {
    /// The operator's source symbol, the key into the compound table.
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Define => ":=",
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::RemAssign => "%=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
        }
    }

    /// Whether this is a compound form (`x op= e`), as opposed to plain
    /// declare/set.
    pub fn is_compound(self) -> bool {
        !matches!(self, AssignOp::Define | AssignOp::Assign)
    }
}
