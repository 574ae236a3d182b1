//! Whole-program scenarios from the reference samples.

use pretty_assertions::assert_eq;

use super::*;
use vesper_ir::ast::{AssignOp, BinaryOp};

/// `fib(n) = 1 if n < 2 else fib(n-1) + fib(n-2)`
fn fib_decl() -> ast::FuncDecl {
    func(
        "fib",
        &["n"],
        vec![
            if_stmt(
                bin(BinaryOp::Lt, ident("n"), int(2)),
                vec![ret(vec![int(1)])],
            ),
            ret(vec![bin(
                BinaryOp::Add,
                call("fib", vec![bin(BinaryOp::Sub, ident("n"), int(1))]),
                call("fib", vec![bin(BinaryOp::Sub, ident("n"), int(2))]),
            )]),
        ],
    )
}

#[test]
fn recursive_fib_of_four_is_five() {
    let unit = unit(vec![fib_decl()]);
    assert_eq!(run_unit(&unit, "fib", vec![Value::int(4)]).unwrap(), vec![
        Value::int(5)
    ]);
}

#[test]
fn entry_arguments_bind_positionally() {
    let unit = unit(vec![func(
        "addOne",
        &["x"],
        vec![ret(vec![bin(BinaryOp::Add, ident("x"), int(1))])],
    )]);
    assert_eq!(
        run_unit(&unit, "addOne", vec![Value::int(1)]).unwrap(),
        vec![Value::int(2)]
    );
}

#[test]
fn operator_desugaring_evaluates_through_the_builtin() {
    let unit = unit(vec![func(
        "main",
        &[],
        vec![ret(vec![bin(BinaryOp::Add, int(1), int(1))])],
    )]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), vec![Value::int(2)]);
}

#[test]
fn bare_loop_doubles_until_break() {
    // result := 1; i := 0
    // for { result *= 2; i += 1; if i >= 5 { break } }
    // return result
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("result", int(1)),
            define("i", int(0)),
            ast::Stmt::For {
                init: None,
                cond: None,
                post: None,
                body: Box::new(block(vec![
                    compound("result", AssignOp::MulAssign, int(2)),
                    compound("i", AssignOp::AddAssign, int(1)),
                    if_stmt(
                        bin(BinaryOp::Ge, ident("i"), int(5)),
                        vec![ast::Stmt::Break],
                    ),
                ])),
            },
            ret(vec![ident("result")]),
        ],
    )]);
    assert_eq!(
        run_unit(&unit, "main", vec![]).unwrap(),
        vec![Value::int(32)]
    );
}

#[test]
fn counted_loop_sums_zero_through_five() {
    // sum := 0; for j := 0; j <= 5; j += 1 { sum += j }; return sum
    let unit = unit(vec![func(
        "main",
        &[],
        vec![
            define("sum", int(0)),
            ast::Stmt::For {
                init: Some(Box::new(define("j", int(0)))),
                cond: Some(bin(BinaryOp::Le, ident("j"), int(5))),
                post: Some(Box::new(compound("j", AssignOp::AddAssign, int(1)))),
                body: Box::new(block(vec![compound(
                    "sum",
                    AssignOp::AddAssign,
                    ident("j"),
                )])),
            },
            ret(vec![ident("sum")]),
        ],
    )]);
    assert_eq!(
        run_unit(&unit, "main", vec![]).unwrap(),
        vec![Value::int(15)]
    );
}

#[test]
fn self_checking_program_passes_its_own_assertions() {
    // testing.AssertEqual(2, 1 + 1); testing.AssertEqual(5, fib(4))
    let unit = unit(vec![
        fib_decl(),
        func(
            "main",
            &[],
            vec![
                ast::Stmt::Expr(call_native(
                    "testing",
                    "AssertEqual",
                    vec![int(2), bin(BinaryOp::Add, int(1), int(1))],
                )),
                ast::Stmt::Expr(call_native(
                    "testing",
                    "AssertEqual",
                    vec![int(5), call("fib", vec![int(4)])],
                )),
            ],
        ),
    ]);
    assert_eq!(run_unit(&unit, "main", vec![]).unwrap(), Vec::<Value>::new());
}

#[test]
fn failed_assertion_aborts_the_run() {
    let unit = unit(vec![func(
        "main",
        &[],
        vec![ast::Stmt::Expr(call_native(
            "testing",
            "AssertEqual",
            vec![int(1), int(2)],
        ))],
    )]);
    let err = run_unit(&unit, "main", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "assertion failed: expected 1, but got 2");
}

#[test]
fn sprint_formats_through_the_bridge() {
    let unit = unit(vec![func(
        "main",
        &[],
        vec![ret(vec![call_native(
            "fmt",
            "Sprint",
            vec![str_lit("Pass!"), int(42)],
        )])],
    )]);
    assert_eq!(
        run_unit(&unit, "main", vec![]).unwrap(),
        vec![Value::string("Pass! 42")]
    );
}

#[test]
fn string_literals_carry_decoded_newlines() {
    let unit = unit(vec![func(
        "main",
        &[],
        vec![ret(vec![ast::Expr::Lit {
            kind: ast::LitKind::String,
            text: "\"a\\nb\"".to_owned(),
        }])],
    )]);
    assert_eq!(
        run_unit(&unit, "main", vec![]).unwrap(),
        vec![Value::string("a\nb")]
    );
}
