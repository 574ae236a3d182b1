//! Statement execution and expression evaluation.
//!
//! One logical thread of control walks the IR recursively. Statement
//! execution yields a [`Signal`] that every caller propagates explicitly;
//! expression evaluation yields a [`Value`]. Host stack depth tracks
//! source nesting and interpreted call depth, so every recursion point
//! runs under `ensure_sufficient_stack` and interpreted calls carry an
//! explicit depth ceiling.

use tracing::debug;

use vesper_ir::{Expr, ForStmt, FuncDecl, IfStmt, Package, Stmt};
use vesper_rt::errors::{
    arity_mismatch, assign_mismatch, break_outside_loop, not_callable, recursion_limit,
    type_mismatch, undefined_function, undefined_identifier, unsupported_assignment_target,
    RuntimeError,
};
use vesper_rt::{Name, NativeCtx, NativeRegistry, StringInterner, Value};
use vesper_stack::ensure_sufficient_stack;

use crate::environment::Environment;
use crate::signal::Signal;

/// Interpreted call-depth ceiling. Crossing it is a `RecursionLimit`
/// runtime error, not a process abort.
const MAX_CALL_DEPTH: usize = 10_000;

/// Execute `entry` from `package` with the given argument values.
///
/// Returns the entry function's result values: the payload of its return
/// signal, or the empty sequence if the body falls off the end.
pub fn run(
    package: &Package,
    registry: &NativeRegistry,
    interner: &StringInterner,
    entry: &str,
    args: Vec<Value>,
) -> Result<Vec<Value>, RuntimeError> {
    Evaluator::new(package, registry, interner).run(entry, args)
}

/// Tree-walking evaluator for one IR package.
///
/// Holds only shared read-only state plus the call-depth counter; each
/// function call gets its own [`Environment`].
pub struct Evaluator<'a> {
    package: &'a Package,
    registry: &'a NativeRegistry,
    interner: &'a StringInterner,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over `package`.
    pub fn new(
        package: &'a Package,
        registry: &'a NativeRegistry,
        interner: &'a StringInterner,
    ) -> Self {
        Evaluator {
            package,
            registry,
            interner,
            depth: 0,
        }
    }

    /// Execute the named entry function with the given arguments.
    pub fn run(&mut self, entry: &str, args: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
        debug!(entry, args = args.len(), "running entry function");
        let name = self.interner.intern(entry);
        if !self.package.contains(name) {
            return Err(undefined_function(entry));
        }
        self.call_user(name, args)
    }

    /// Execute one statement, yielding its control-flow signal.
    fn exec_stmt(&mut self, stmt: &Stmt, env: &mut Environment) -> Result<Signal, RuntimeError> {
        ensure_sufficient_stack(|| match stmt {
            Stmt::Expr(expr) => {
                // A call statement may legally discard any number of
                // results; other expressions evaluate to a single value.
                match expr {
                    Expr::Call { callee, args } => {
                        self.eval_call(callee, args, env)?;
                    }
                    _ => {
                        self.eval_expr(expr, env)?;
                    }
                }
                Ok(Signal::Completed)
            }
            Stmt::Assign { lhs, rhs } => self.exec_assign(lhs, rhs, env),
            Stmt::Block(stmts) => self.in_child_scope(env, |this, env| {
                for stmt in stmts {
                    let signal = this.exec_stmt(stmt, env)?;
                    if !signal.is_completed() {
                        // Abort the remaining statements; the signal is
                        // the block's own signal.
                        return Ok(signal);
                    }
                }
                Ok(Signal::Completed)
            }),
            Stmt::Empty => Ok(Signal::Completed),
            Stmt::If(if_stmt) => self.exec_if(if_stmt, env),
            Stmt::For(for_stmt) => self.exec_for(for_stmt, env),
            Stmt::Break => Ok(Signal::Break),
            Stmt::Return(results) => {
                let mut values = Vec::with_capacity(results.len());
                for result in results {
                    values.push(self.eval_expr(result, env)?);
                }
                Ok(Signal::Return(values))
            }
        })
    }

    /// Run `f` inside a fresh child frame, destroying the frame on every
    /// exit path.
    fn in_child_scope<T>(
        &mut self,
        env: &mut Environment,
        f: impl FnOnce(&mut Self, &mut Environment) -> T,
    ) -> T {
        env.push_scope();
        let out = f(self, env);
        env.pop_scope();
        out
    }

    /// Parallel assignment: snapshot every right-hand value first, then
    /// bind the targets left to right.
    fn exec_assign(
        &mut self,
        lhs: &[Expr],
        rhs: &[Expr],
        env: &mut Environment,
    ) -> Result<Signal, RuntimeError> {
        if lhs.len() != rhs.len() {
            return Err(assign_mismatch(lhs.len(), rhs.len()));
        }
        let mut values = Vec::with_capacity(rhs.len());
        for expr in rhs {
            values.push(self.eval_expr(expr, env)?);
        }
        for (target, value) in lhs.iter().zip(values) {
            match target {
                Expr::Ident(name) if name.is_placeholder() => {}
                Expr::Ident(name) => env.assign_or_define(*name, value),
                other => {
                    return Err(unsupported_assignment_target(expr_shape(other)));
                }
            }
        }
        Ok(Signal::Completed)
    }

    /// Init runs in a frame shared with the chosen branch, so bindings it
    /// introduces are visible to the condition and the branch.
    fn exec_if(&mut self, if_stmt: &IfStmt, env: &mut Environment) -> Result<Signal, RuntimeError> {
        self.in_child_scope(env, |this, env| {
            let init_signal = this.exec_stmt(&if_stmt.init, env)?;
            if !init_signal.is_completed() {
                // Propagate without evaluating the condition.
                return Ok(init_signal);
            }
            let cond = this.eval_expr(&if_stmt.cond, env)?.as_bool()?;
            if cond {
                this.exec_stmt(&if_stmt.body, env)
            } else {
                this.exec_stmt(&if_stmt.els, env)
            }
        })
    }

    fn exec_for(
        &mut self,
        for_stmt: &ForStmt,
        env: &mut Environment,
    ) -> Result<Signal, RuntimeError> {
        self.in_child_scope(env, |this, env| {
            let init_signal = this.exec_stmt(&for_stmt.init, env)?;
            if !init_signal.is_completed() {
                return Ok(init_signal);
            }
            loop {
                if !this.eval_expr(&for_stmt.cond, env)?.as_bool()? {
                    return Ok(Signal::Completed);
                }
                let body_signal =
                    this.in_child_scope(env, |this, env| this.exec_stmt(&for_stmt.body, env))?;
                match body_signal {
                    // Break terminates this loop only; the loop itself
                    // completes normally.
                    Signal::Break => return Ok(Signal::Completed),
                    // Return propagates immediately, skipping the post
                    // statement.
                    Signal::Return(values) => return Ok(Signal::Return(values)),
                    Signal::Completed => {}
                }
                let post_signal = this.exec_stmt(&for_stmt.post, env)?;
                if !post_signal.is_completed() {
                    return Ok(post_signal);
                }
            }
        })
    }

    /// Evaluate an expression to a single value.
    fn eval_expr(&mut self, expr: &Expr, env: &mut Environment) -> Result<Value, RuntimeError> {
        ensure_sufficient_stack(|| match expr {
            Expr::Call { callee, args } => {
                let mut values = self.eval_call(callee, args, env)?;
                match values.len() {
                    0 => Ok(Value::Void),
                    1 => Ok(values.remove(0)),
                    n => Err(type_mismatch("single value", format!("{n}-value result"))),
                }
            }
            Expr::Ident(name) => self.resolve_ident(*name, env),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::SliceLit(elems) => Ok(Value::slice(self.eval_exprs(elems, env)?)),
            Expr::ArrayLit(elems) => Ok(Value::array(self.eval_exprs(elems, env)?)),
        })
    }

    fn eval_exprs(
        &mut self,
        exprs: &[Expr],
        env: &mut Environment,
    ) -> Result<Vec<Value>, RuntimeError> {
        exprs.iter().map(|e| self.eval_expr(e, env)).collect()
    }

    /// Scope chain first, then the package function table, then failure.
    fn resolve_ident(&self, name: Name, env: &Environment) -> Result<Value, RuntimeError> {
        if let Some(value) = env.lookup(name) {
            return Ok(value);
        }
        if self.package.contains(name) {
            return Ok(Value::Func(name));
        }
        Err(undefined_identifier(self.interner.lookup(name)))
    }

    /// Evaluate a call, preserving the full result sequence.
    fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        env: &mut Environment,
    ) -> Result<Vec<Value>, RuntimeError> {
        let callee_val = self.eval_expr(callee, env)?;
        let arg_vals = self.eval_exprs(args, env)?;
        match callee_val {
            Value::Native(f) => {
                let ctx = NativeCtx {
                    registry: self.registry,
                    interner: self.interner,
                };
                f.invoke(&ctx, &arg_vals)
            }
            Value::Func(name) => self.call_user(name, arg_vals),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Call a package-level function: bind a fresh top-level frame (no
    /// parent; there are no closures) and execute the body.
    fn call_user(&mut self, name: Name, args: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
        let decl: &FuncDecl = self
            .package
            .func(name)
            .ok_or_else(|| undefined_function(self.interner.lookup(name)))?;
        if decl.params.len() != args.len() {
            return Err(arity_mismatch(
                self.interner.lookup(name),
                decl.params.len(),
                args.len(),
            ));
        }

        if self.depth >= MAX_CALL_DEPTH {
            return Err(recursion_limit(MAX_CALL_DEPTH));
        }
        self.depth += 1;

        let mut env = Environment::new();
        for (&param, arg) in decl.params.iter().zip(args) {
            if !param.is_placeholder() {
                env.define(param, arg);
            }
        }

        let signal = self.exec_stmt(&decl.body, &mut env);
        self.depth -= 1;

        match signal? {
            Signal::Return(values) => Ok(values),
            // Falling off the end returns zero values.
            Signal::Completed => Ok(vec![]),
            // Unreachable when nesting discipline is respected, but fatal
            // if observed.
            Signal::Break => Err(break_outside_loop()),
        }
    }
}

/// Shape name for assignment-target diagnostics.
fn expr_shape(expr: &Expr) -> &'static str {
    match expr {
        Expr::Call { .. } => "call expression",
        Expr::Ident(_) => "identifier",
        Expr::Literal(_) => "literal",
        Expr::SliceLit(_) => "slice literal",
        Expr::ArrayLit(_) => "array literal",
    }
}
