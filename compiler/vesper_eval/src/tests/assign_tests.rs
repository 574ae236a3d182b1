//! Assignment semantics: snapshots, scoping policy, compound forms.

use pretty_assertions::assert_eq;

use super::*;
use vesper_ir::ast::{AssignOp, BinaryOp};
use vesper_lower::lower_unit;
use vesper_rt::{install_operators, NativeFn, NativePackage, NativeRegistry, RuntimeErrorKind};

#[test]
fn multiple_assignment_snapshots_before_binding() {
    // a := 1; b := 2; a, b = b, a; return a, b
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("a", int(1)),
            define("b", int(2)),
            ast::Stmt::Assign {
                op: AssignOp::Assign,
                lhs: vec![ident("a"), ident("b")],
                rhs: vec![ident("b"), ident("a")],
            },
            ret(vec![ident("a"), ident("b")]),
        ],
    )]);
    assert_eq!(
        run_unit(&unit, "main", vec![]).unwrap(),
        vec![Value::int(2), Value::int(1)]
    );
}

#[test]
fn compound_assignment_matches_spelled_out_form() {
    // x := 5; x += 3  ==  y := 5; y = y + 3
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("x", int(5)),
            compound("x", AssignOp::AddAssign, int(3)),
            define("y", int(5)),
            set("y", bin(BinaryOp::Add, ident("y"), int(3))),
            ret(vec![ident("x"), ident("y")]),
        ],
    )]);
    assert_eq!(
        run_unit(&unit, "main", vec![]).unwrap(),
        vec![Value::int(8), Value::int(8)]
    );
}

#[test]
fn compound_assignment_evaluates_rhs_exactly_once() {
    // The counter native bumps a global every invocation; if `x += e`
    // evaluated `e` twice the counter would read 2.
    let mut registry = NativeRegistry::new();
    install_operators(&mut registry);
    let next = NativeFn::new("counter.Next", |ctx, _args| {
        let cell = ctx
            .registry
            .lookup_global("counter", "N")
            .expect("registered global");
        let bumped = cell.get().as_int()? + 1;
        cell.set(Value::int(bumped));
        Ok(vec![Value::int(bumped)])
    });
    registry.register(
        NativePackage::new("counter")
            .func("Next", next)
            .global("N", Value::int(0)),
    );

    let interner = SharedInterner::new();
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("x", int(10)),
            compound("x", AssignOp::AddAssign, call_native("counter", "Next", vec![])),
            ret(vec![ident("x")]),
        ],
    )]);
    let package = lower_unit(&unit, &registry, &interner).unwrap();
    let result = crate::run(&package, &registry, &interner, "main", vec![]).unwrap();

    assert_eq!(result, vec![Value::int(11)]);
    assert_eq!(
        registry.lookup_global("counter", "N").unwrap().get(),
        Value::int(1)
    );
}

#[test]
fn assignment_updates_nearest_enclosing_binding() {
    // x := 1; { x = 2 }; return x  -- inner write reaches the outer frame
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("x", int(1)),
            block(vec![set("x", int(2))]),
            ret(vec![ident("x")]),
        ],
    )]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::int(2)]);
}

#[test]
fn define_inside_block_also_updates_an_existing_binding() {
    // The IR does not distinguish := from =; with an existing binding in
    // scope, both update it.
    // x := 1; { x := 2 }; return x
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("x", int(1)),
            block(vec![define("x", int(2))]),
            ret(vec![ident("x")]),
        ],
    )]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::int(2)]);
}

#[test]
fn block_local_bindings_do_not_escape() {
    // { y := 5 }; return y
    let unit = unit(vec![func(
        "main",
        &[],
        vec![block(vec![define("y", int(5))]), ret(vec![ident("y")])],
    )]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::UndefinedIdentifier {
            name: "y".to_owned()
        }
    );
}

#[test]
fn target_and_value_counts_must_match() {
    let unit = unit(vec![func(
        "main",
        &[],
        vec![ast::Stmt::Assign {
            op: AssignOp::Assign,
            lhs: vec![ident("a"), ident("b")],
            rhs: vec![int(1)],
        }],
    )]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::AssignMismatch {
            targets: 2,
            values: 1
        }
    );
}

#[test]
fn non_identifier_targets_are_unsupported() {
    // 1 = 2
    let unit = unit(vec![func(
        "main",
        &[],
        vec![ast::Stmt::Assign {
            op: AssignOp::Assign,
            lhs: vec![int(1)],
            rhs: vec![int(2)],
        }],
    )]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::UnsupportedAssignmentTarget {
            target: "literal".to_owned()
        }
    );
}

#[test]
fn placeholder_target_discards_the_value() {
    // _ = 1; return 2  -- no binding named "_" is ever created
    let unit = unit(vec![func(
        "main",
        &[],
        vec![set("_", int(1)), ret(vec![int(2)])],
    )]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::int(2)]);
}
