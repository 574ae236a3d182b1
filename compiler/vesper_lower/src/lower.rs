//! Host tree → IR lowering.
//!
//! Lowering is total over every node kind it declares support for and
//! fails with a typed [`CompileError`] on anything else. Two resolutions
//! happen here and never at evaluation time:
//!
//! - package selectors (`pkg.Name`) become literals wrapping the native
//!   handle looked up in the registry
//! - binary operators become ordinary calls of the builtin registered
//!   under the operator's symbol
//!
//! The IR requires every if/for clause; absent host clauses are filled by
//! default substitution (`Empty` statements, a `true` condition).

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use vesper_ir::ast;
use vesper_ir::{Expr, ForStmt, FuncDecl, IfStmt, Package, Stmt};
use vesper_rt::{NativeRegistry, StringInterner, Value};

use crate::errors::{
    compound_arity, unknown_member, unknown_package, unregistered_operator, unsupported_expr,
    unsupported_literal, unsupported_stmt, CompileError,
};
use crate::literals::{parse_int_literal, parse_string_literal};

/// Lower one compilation unit into an IR package.
///
/// Fails on the first unsupported construct or unresolved name; no partial
/// IR is produced.
pub fn lower_unit(
    unit: &ast::SourceUnit,
    registry: &NativeRegistry,
    interner: &StringInterner,
) -> Result<Package, CompileError> {
    debug!(package = %unit.package, funcs = unit.funcs.len(), "lowering unit");
    let lowerer = Lowerer { registry, interner };
    let mut funcs = FxHashMap::default();
    for decl in &unit.funcs {
        trace!(func = %decl.name, "lowering function");
        funcs.insert(interner.intern(&decl.name), lowerer.lower_func(decl)?);
    }
    Ok(Package::new(funcs))
}

struct Lowerer<'a> {
    registry: &'a NativeRegistry,
    interner: &'a StringInterner,
}

impl Lowerer<'_> {
    fn lower_func(&self, decl: &ast::FuncDecl) -> Result<FuncDecl, CompileError> {
        let params = decl
            .params
            .iter()
            .map(|param| match &param.name {
                Some(name) => self.interner.intern(name),
                None => self.interner.intern("_"),
            })
            .collect();
        Ok(FuncDecl {
            params,
            body: self.lower_stmt(&decl.body)?,
        })
    }

    fn lower_stmt(&self, stmt: &ast::Stmt) -> Result<Stmt, CompileError> {
        match stmt {
            ast::Stmt::Expr(expr) => Ok(Stmt::Expr(self.lower_expr(expr)?)),
            ast::Stmt::Assign { op, lhs, rhs } => self.lower_assign(*op, lhs, rhs),
            ast::Stmt::Return(results) => Ok(Stmt::Return(self.lower_exprs(results)?)),
            ast::Stmt::Block(stmts) => Ok(Stmt::Block(
                stmts
                    .iter()
                    .map(|s| self.lower_stmt(s))
                    .collect::<Result<_, _>>()?,
            )),
            ast::Stmt::If {
                init,
                cond,
                body,
                els,
            } => Ok(Stmt::If(Box::new(IfStmt {
                init: self.lower_opt_stmt(init.as_deref())?,
                cond: self.lower_expr(cond)?,
                body: self.lower_stmt(body)?,
                els: self.lower_opt_stmt(els.as_deref())?,
            }))),
            ast::Stmt::For {
                init,
                cond,
                post,
                body,
            } => Ok(Stmt::For(Box::new(ForStmt {
                init: self.lower_opt_stmt(init.as_deref())?,
                // An omitted condition loops forever: substitute `true`.
                cond: match cond {
                    Some(cond) => self.lower_expr(cond)?,
                    None => Expr::Literal(Value::Bool(true)),
                },
                post: self.lower_opt_stmt(post.as_deref())?,
                body: self.lower_stmt(body)?,
            }))),
            ast::Stmt::Break => Ok(Stmt::Break),
            ast::Stmt::Empty => Ok(Stmt::Empty),
            ast::Stmt::IncDec { .. } => Err(unsupported_stmt("increment/decrement")),
            ast::Stmt::Go { .. } => Err(unsupported_stmt("go statement")),
            ast::Stmt::Defer { .. } => Err(unsupported_stmt("defer statement")),
        }
    }

    /// Absent optional clauses lower to the empty statement.
    fn lower_opt_stmt(&self, stmt: Option<&ast::Stmt>) -> Result<Stmt, CompileError> {
        match stmt {
            Some(stmt) => self.lower_stmt(stmt),
            None => Ok(Stmt::Empty),
        }
    }

    fn lower_assign(
        &self,
        op: ast::AssignOp,
        lhs: &[ast::Expr],
        rhs: &[ast::Expr],
    ) -> Result<Stmt, CompileError> {
        if !op.is_compound() {
            // Declare and set share one IR shape; the evaluator's scoping
            // policy decides between update and introduce.
            return Ok(Stmt::Assign {
                lhs: self.lower_exprs(lhs)?,
                rhs: self.lower_exprs(rhs)?,
            });
        }

        let ([target], [value]) = (lhs, rhs) else {
            return Err(compound_arity(lhs.len(), rhs.len()));
        };
        let op_fn = self
            .registry
            .compound_op(op.symbol())
            .ok_or_else(|| unregistered_operator(op.symbol()))?;
        let lowered_target = self.lower_expr(target)?;
        // `x op= e` becomes `x := opFn(x, e)`; `e` is lowered (and later
        // evaluated) exactly once.
        Ok(Stmt::Assign {
            lhs: vec![lowered_target.clone()],
            rhs: vec![Expr::Call {
                callee: Box::new(Expr::Literal(op_fn.clone())),
                args: vec![lowered_target, self.lower_expr(value)?],
            }],
        })
    }

    fn lower_exprs(&self, exprs: &[ast::Expr]) -> Result<Vec<Expr>, CompileError> {
        exprs.iter().map(|e| self.lower_expr(e)).collect()
    }

    fn lower_expr(&self, expr: &ast::Expr) -> Result<Expr, CompileError> {
        match expr {
            ast::Expr::Ident(name) => Ok(Expr::Ident(self.interner.intern(name))),
            ast::Expr::Lit { kind, text } => self.lower_literal(*kind, text),
            ast::Expr::Selector { expr, sel } => self.lower_selector(expr, sel),
            ast::Expr::Binary { op, lhs, rhs } => {
                let op_fn = self
                    .registry
                    .binary_op(op.symbol())
                    .ok_or_else(|| unregistered_operator(op.symbol()))?;
                Ok(Expr::Call {
                    callee: Box::new(Expr::Literal(op_fn.clone())),
                    args: vec![self.lower_expr(lhs)?, self.lower_expr(rhs)?],
                })
            }
            ast::Expr::Call { callee, args } => Ok(Expr::Call {
                callee: Box::new(self.lower_expr(callee)?),
                args: self.lower_exprs(args)?,
            }),
            ast::Expr::Unary { op, operand: _ } => {
                Err(unsupported_expr(format!("unary operator {op:?}")))
            }
            ast::Expr::Index { .. } => Err(unsupported_expr("index expression")),
            ast::Expr::Composite { .. } => Err(unsupported_expr("composite literal")),
            ast::Expr::Paren(_) => Err(unsupported_expr("parenthesized expression")),
        }
    }

    fn lower_literal(&self, kind: ast::LitKind, text: &str) -> Result<Expr, CompileError> {
        match kind {
            ast::LitKind::Int => Ok(Expr::Literal(Value::Int(parse_int_literal(text)?))),
            ast::LitKind::String => Ok(Expr::Literal(Value::string(parse_string_literal(text)?))),
            ast::LitKind::Float | ast::LitKind::Imag | ast::LitKind::Char => {
                Err(unsupported_literal(kind.as_str()))
            }
        }
    }

    /// Resolve `pkg.Name` against the registry, at compile time only.
    fn lower_selector(&self, expr: &ast::Expr, sel: &str) -> Result<Expr, CompileError> {
        let ast::Expr::Ident(package) = expr else {
            return Err(unsupported_expr("selector on non-package expression"));
        };
        if self.registry.package(package).is_none() {
            return Err(unknown_package(package.clone()));
        }
        let func = self
            .registry
            .lookup_func(package, sel)
            .ok_or_else(|| unknown_member(package.clone(), sel))?;
        Ok(Expr::Literal(Value::Native(func.clone())))
    }
}
