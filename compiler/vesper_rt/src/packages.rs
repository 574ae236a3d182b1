//! Bundled native packages and the default registry.
//!
//! `fmt` covers the printing surface the sample programs use; `testing`
//! carries the `AssertEqual` helper those programs self-check with.

use crate::bridge::{NativeCtx, NativeFn, NativePackage, NativeRegistry};
use crate::errors::{arity_mismatch, assertion_failed};
use crate::format::format_value;
use crate::operators::install_operators;
use crate::Value;

/// Render invocation arguments separated by single spaces.
fn join_args(ctx: &NativeCtx<'_>, args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(|v| format_value(v, ctx.interner)).collect();
    rendered.join(" ")
}

/// The `fmt` package: `Print`, `Println`, `Sprint`.
pub fn fmt_package() -> NativePackage {
    NativePackage::new("fmt")
        .func(
            "Print",
            NativeFn::new("fmt.Print", |ctx, args| {
                print!("{}", join_args(ctx, args));
                Ok(vec![])
            }),
        )
        .func(
            "Println",
            NativeFn::new("fmt.Println", |ctx, args| {
                println!("{}", join_args(ctx, args));
                Ok(vec![])
            }),
        )
        .func(
            "Sprint",
            NativeFn::new("fmt.Sprint", |ctx, args| {
                Ok(vec![Value::string(join_args(ctx, args))])
            }),
        )
}

/// The `testing` package: `AssertEqual(expected, actual)`.
pub fn testing_package() -> NativePackage {
    NativePackage::new("testing").func(
        "AssertEqual",
        NativeFn::new("testing.AssertEqual", |ctx, args| match args {
            [expected, actual] => {
                if expected == actual {
                    Ok(vec![])
                } else {
                    Err(assertion_failed(
                        format_value(expected, ctx.interner),
                        format_value(actual, ctx.interner),
                    ))
                }
            }
            _ => Err(arity_mismatch("testing.AssertEqual", 2, args.len())),
        }),
    )
}

/// Registry with the operator tables, `fmt`, and `testing` installed.
pub fn default_registry() -> NativeRegistry {
    let mut registry = NativeRegistry::new();
    install_operators(&mut registry);
    registry.register(fmt_package());
    registry.register(testing_package());
    registry
}
