//! Builtin operator functions.
//!
//! Operators do not exist at evaluation time: the lowering compiler
//! rewrites every binary operator expression into an ordinary call whose
//! callee is a literal wrapping one of these builtins. Each builtin is an
//! exhaustively-matched conversion over value kinds; an unsupported operand
//! kind is a `TypeMismatch`, never a panic.
//!
//! Integer arithmetic wraps on overflow, matching the host language's
//! two's-complement semantics. `&&`/`||` do not short-circuit: by the time
//! they run, both operands were evaluated as call arguments.

use crate::bridge::{NativeFn, NativeRegistry};
use crate::errors::{arity_mismatch, division_by_zero, type_mismatch, RuntimeError};
use crate::Value;

/// Install the builtin binary and compound-assignment operator tables.
pub fn install_operators(registry: &mut NativeRegistry) {
    // Compound symbols reuse the plain operator implementation:
    // `x += e` lowers to `x := add(x, e)`.
    let arith: [(&'static str, &'static str, BinOpFn); 5] = [
        ("+", "+=", add),
        ("-", "-=", sub),
        ("*", "*=", mul),
        ("/", "/=", div),
        ("%", "%=", rem),
    ];
    for (symbol, compound, f) in arith {
        registry.register_binary_op(symbol, binary(symbol, f));
        registry.register_compound_op(compound, binary(compound, f));
    }

    registry.register_binary_op("<", binary("<", lt));
    registry.register_binary_op("<=", binary("<=", le));
    registry.register_binary_op(">", binary(">", gt));
    registry.register_binary_op(">=", binary(">=", ge));
    registry.register_binary_op("==", binary("==", eq));
    registry.register_binary_op("!=", binary("!=", ne));
    registry.register_binary_op("&&", binary("&&", and));
    registry.register_binary_op("||", binary("||", or));
}

type BinOpFn = fn(&Value, &Value) -> Result<Value, RuntimeError>;

/// Wrap a two-operand implementation with the arity check.
fn binary(name: &'static str, f: BinOpFn) -> NativeFn {
    NativeFn::new(name, move |_ctx, args| match args {
        [lhs, rhs] => Ok(vec![f(lhs, rhs)?]),
        _ => Err(arity_mismatch(name, 2, args.len())),
    })
}

fn add(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
        (Value::Str(a), Value::Str(b)) => {
            let mut out = String::with_capacity(a.len() + b.len());
            out.push_str(a);
            out.push_str(b);
            Ok(Value::string(out))
        }
        _ => Err(operand_mismatch("int or string", lhs, rhs)),
    }
}

fn sub(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Int(lhs.as_int()?.wrapping_sub(rhs.as_int()?)))
}

fn mul(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Int(lhs.as_int()?.wrapping_mul(rhs.as_int()?)))
}

fn div(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = (lhs.as_int()?, rhs.as_int()?);
    if b == 0 {
        return Err(division_by_zero());
    }
    Ok(Value::Int(a.wrapping_div(b)))
}

fn rem(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = (lhs.as_int()?, rhs.as_int()?);
    if b == 0 {
        return Err(division_by_zero());
    }
    Ok(Value::Int(a.wrapping_rem(b)))
}

fn lt(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    ordered(lhs, rhs, |ord| ord.is_lt())
}

fn le(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    ordered(lhs, rhs, |ord| ord.is_le())
}

fn gt(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    ordered(lhs, rhs, |ord| ord.is_gt())
}

fn ge(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    ordered(lhs, rhs, |ord| ord.is_ge())
}

/// Ordering comparison over int and string operands.
fn ordered(
    lhs: &Value,
    rhs: &Value,
    decide: fn(std::cmp::Ordering) -> bool,
) -> Result<Value, RuntimeError> {
    let ord = match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.as_str().cmp(b.as_str()),
        _ => return Err(operand_mismatch("int or string", lhs, rhs)),
    };
    Ok(Value::Bool(decide(ord)))
}

fn eq(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    comparable(lhs, rhs).map(Value::Bool)
}

fn ne(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    comparable(lhs, rhs).map(|same| Value::Bool(!same))
}

/// Equality over comparable kinds. Slices are not comparable, matching the
/// host language.
fn comparable(lhs: &Value, rhs: &Value) -> Result<bool, RuntimeError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Array(a), Value::Array(b)) => Ok(a == b),
        (Value::Struct(a), Value::Struct(b)) => Ok(a == b),
        _ => Err(operand_mismatch("comparable operands", lhs, rhs)),
    }
}

fn and(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(lhs.as_bool()? && rhs.as_bool()?))
}

fn or(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(lhs.as_bool()? || rhs.as_bool()?))
}

fn operand_mismatch(expected: &str, lhs: &Value, rhs: &Value) -> RuntimeError {
    type_mismatch(
        expected,
        format!("{} and {}", lhs.type_name(), rhs.type_name()),
    )
}
