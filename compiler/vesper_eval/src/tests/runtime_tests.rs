//! Runtime error surface and the aggregate-literal value semantics.

use pretty_assertions::assert_eq;

use super::*;
use rustc_hash::FxHashMap;
use vesper_ir::ast::BinaryOp;
use vesper_ir::{Expr, FuncDecl, Package, Stmt};
use vesper_rt::{RuntimeErrorKind, SliceValue};

#[test]
fn calling_with_wrong_arity_fails() {
    let unit = unit(vec![
        func("addOne", &["x"], vec![ret(vec![ident("x")])]),
        func(
            "main",
            &[],
            vec![ret(vec![call("addOne", vec![int(1), int(2)])])],
        ),
    ]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::ArityMismatch {
            func: "addOne".to_owned(),
            expected: 1,
            found: 2
        }
    );
}

#[test]
fn entry_arity_is_checked_too() {
    let unit = unit(vec![func("main", &["x"], vec![])]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert!(matches!(err.kind, RuntimeErrorKind::ArityMismatch { .. }));
}

#[test]
fn unknown_entry_function_is_reported() {
    let unit = unit(vec![func("main", &[], vec![])]);
    let err = run_unit(&unit, "missing", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::UndefinedFunction {
            name: "missing".to_owned()
        }
    );
}

#[test]
fn undefined_identifier_is_reported() {
    let unit = unit(vec![func("main", &[], vec![ret(vec![ident("ghost")])])]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::UndefinedIdentifier {
            name: "ghost".to_owned()
        }
    );
}

#[test]
fn bare_function_references_resolve_against_the_package() {
    // f := addOne; return f(1)
    let unit = unit(vec![
        func(
            "addOne",
            &["x"],
            vec![ret(vec![bin(BinaryOp::Add, ident("x"), int(1))])],
        ),
        func(
            "main",
            &[],
            vec![
                define("f", ident("addOne")),
                ret(vec![call("f", vec![int(1)])]),
            ],
        ),
    ]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::int(2)]);
}

#[test]
fn calling_a_non_function_fails() {
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("x", int(3)),
            ret(vec![call("x", vec![])]),
        ],
    )]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::NotCallable {
            type_name: "int".to_owned()
        }
    );
}

#[test]
fn unbounded_recursion_hits_the_depth_ceiling() {
    let unit = unit(vec![func(
        "spin",
        &[],
        vec![ret(vec![call("spin", vec![])])],
    )]);
    let err = run_unit(&unit, "spin", vec![]).unwrap_err();
    assert!(matches!(err.kind, RuntimeErrorKind::RecursionLimit { .. }));
}

#[test]
fn multi_value_call_in_single_value_context_fails() {
    // pair() + 1
    let unit = unit(vec![
        func("pair", &[], vec![ret(vec![int(1), int(2)])]),
        func(
            "main",
            &[],
            vec![ret(vec![bin(
                BinaryOp::Add,
                call("pair", vec![]),
                int(1),
            )])],
        ),
    ]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert!(matches!(err.kind, RuntimeErrorKind::TypeMismatch { .. }));
}

#[test]
fn zero_result_call_observed_as_expression_is_void() {
    // x := noop(); return x  -- binds Void
    let unit = unit(vec![
        func("noop", &[], vec![]),
        func(
            "main",
            &[],
            vec![
                define("x", call("noop", vec![])),
                ret(vec![ident("x")]),
            ],
        ),
    ]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::Void]);
}

#[test]
fn multi_value_call_statement_discards_all_results() {
    let unit = unit(vec![
        func("pair", &[], vec![ret(vec![int(1), int(2)])]),
        func(
            "main",
            &[],
            vec![ast::Stmt::Expr(call("pair", vec![])), ret(vec![int(9)])],
        ),
    ]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::int(9)]);
}

/// Build a package directly in IR form; the composite-literal shapes have
/// no lowering rule but are part of the evaluator contract.
fn ir_package(interner: &SharedInterner, body: Stmt) -> Package {
    let mut funcs = FxHashMap::default();
    funcs.insert(
        interner.intern("main"),
        FuncDecl {
            params: vec![],
            body,
        },
    );
    Package::new(funcs)
}

#[test]
fn slice_literals_evaluate_elements_in_order_into_shared_storage() {
    let interner = SharedInterner::new();
    let registry = default_registry();
    let package = ir_package(
        &interner,
        Stmt::Return(vec![Expr::SliceLit(vec![
            Expr::Literal(Value::int(4)),
            Expr::Literal(Value::int(8)),
            Expr::Literal(Value::int(15)),
        ])]),
    );
    let result = crate::run(&package, &registry, &interner, "main", vec![]).unwrap();

    let [Value::Slice(slice)] = result.as_slice() else {
        panic!("expected a slice result, got {result:?}");
    };
    assert_eq!(slice.to_vec(), vec![Value::int(4), Value::int(8), Value::int(15)]);

    // Shared backing: writes through one alias are seen by another.
    let alias: SliceValue = slice.clone();
    slice.set(1, Value::int(5)).unwrap();
    assert_eq!(alias.get(1).unwrap(), Value::int(5));
}

#[test]
fn array_literals_evaluate_to_copy_semantics_aggregates() {
    let interner = SharedInterner::new();
    let registry = default_registry();
    let package = ir_package(
        &interner,
        Stmt::Return(vec![Expr::ArrayLit(vec![
            Expr::Literal(Value::int(1)),
            Expr::Literal(Value::int(2)),
        ])]),
    );
    let result = crate::run(&package, &registry, &interner, "main", vec![]).unwrap();

    let [Value::Array(array)] = result.as_slice() else {
        panic!("expected an array result, got {result:?}");
    };
    assert_eq!(array.elements(), &[Value::int(1), Value::int(2)]);
}

#[test]
fn placeholder_parameters_accept_and_ignore_arguments() {
    let unit = unit(vec![func(
        "first",
        &["x", "_"],
        vec![ret(vec![ident("x")])],
    )]);
    assert_eq!(
        run_unit(&unit, "first", vec![Value::int(1), Value::int(99)]).unwrap(),
        vec![Value::int(1)]
    );
}

#[test]
fn runtime_errors_abort_the_whole_run() {
    // A division by zero in a callee surfaces from the entry call.
    let unit = unit(vec![
        func(
            "boom",
            &[],
            vec![ret(vec![bin(BinaryOp::Div, int(1), int(0))])],
        ),
        func(
            "main",
            &[],
            vec![
                ast::Stmt::Expr(call("boom", vec![])),
                ret(vec![int(1)]),
            ],
        ),
    ]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);
}
