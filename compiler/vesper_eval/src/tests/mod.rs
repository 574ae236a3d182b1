//! End-to-end evaluator tests.
//!
//! Scenarios build host syntax trees, lower them with `vesper_lower`
//! against the default registry, and run the result.

mod assign_tests;
mod runtime_tests;
mod scenario_tests;

use vesper_ir::ast::{self, AssignOp, BinaryOp, LitKind, Param};
use vesper_lower::lower_unit;
use vesper_rt::{default_registry, RuntimeError, SharedInterner, Value};

pub(crate) fn int(n: i64) -> ast::Expr {
    ast::Expr::Lit {
        kind: LitKind::Int,
        text: n.to_string(),
    }
}

pub(crate) fn str_lit(s: &str) -> ast::Expr {
    ast::Expr::Lit {
        kind: LitKind::String,
        text: format!("\"{s}\""),
    }
}

pub(crate) fn ident(name: &str) -> ast::Expr {
    ast::Expr::Ident(name.to_owned())
}

pub(crate) fn bin(op: BinaryOp, lhs: ast::Expr, rhs: ast::Expr) -> ast::Expr {
    ast::Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub(crate) fn call(name: &str, args: Vec<ast::Expr>) -> ast::Expr {
    ast::Expr::Call {
        callee: Box::new(ident(name)),
        args,
    }
}

pub(crate) fn call_native(pkg: &str, sel: &str, args: Vec<ast::Expr>) -> ast::Expr {
    ast::Expr::Call {
        callee: Box::new(ast::Expr::Selector {
            expr: Box::new(ident(pkg)),
            sel: sel.to_owned(),
        }),
        args,
    }
}

/// `name := expr`
pub(crate) fn define(name: &str, expr: ast::Expr) -> ast::Stmt {
    ast::Stmt::Assign {
        op: AssignOp::Define,
        lhs: vec![ident(name)],
        rhs: vec![expr],
    }
}

/// `name = expr`
pub(crate) fn set(name: &str, expr: ast::Expr) -> ast::Stmt {
    ast::Stmt::Assign {
        op: AssignOp::Assign,
        lhs: vec![ident(name)],
        rhs: vec![expr],
    }
}

/// `name op= expr`
pub(crate) fn compound(name: &str, op: AssignOp, expr: ast::Expr) -> ast::Stmt {
    ast::Stmt::Assign {
        op,
        lhs: vec![ident(name)],
        rhs: vec![expr],
    }
}

pub(crate) fn ret(exprs: Vec<ast::Expr>) -> ast::Stmt {
    ast::Stmt::Return(exprs)
}

pub(crate) fn block(stmts: Vec<ast::Stmt>) -> ast::Stmt {
    ast::Stmt::Block(stmts)
}

pub(crate) fn if_stmt(cond: ast::Expr, body: Vec<ast::Stmt>) -> ast::Stmt {
    ast::Stmt::If {
        init: None,
        cond,
        body: Box::new(block(body)),
        els: None,
    }
}

pub(crate) fn func(name: &str, params: &[&str], body: Vec<ast::Stmt>) -> ast::FuncDecl {
    ast::FuncDecl {
        name: name.to_owned(),
        params: params.iter().map(|p| Param::named(*p)).collect(),
        body: block(body),
    }
}

pub(crate) fn unit(funcs: Vec<ast::FuncDecl>) -> ast::SourceUnit {
    ast::SourceUnit {
        package: "main".to_owned(),
        funcs,
    }
}

/// Lower `unit` against the default registry and run `entry`.
pub(crate) fn run_unit(
    unit: &ast::SourceUnit,
    entry: &str,
    args: Vec<Value>,
) -> Result<Vec<Value>, RuntimeError> {
    let registry = default_registry();
    let interner = SharedInterner::new();
    let package = lower_unit(unit, &registry, &interner).expect("unit lowers");
    crate::run(&package, &registry, &interner, entry, args)
}
