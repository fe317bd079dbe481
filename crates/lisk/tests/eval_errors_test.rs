use lisk_core::{LiskError, VarAccess};
use lisk_eval::Interpreter;

fn eval_err(input: &str) -> LiskError {
    let interp = Interpreter::new();
    interp
        .eval_str(input)
        .expect_err(&format!("expected error for `{input}`"))
}

#[test]
fn arithmetic_arity() {
    for input in ["(+ 1)", "(- 1)", "(* 1)", "(/ 1)", "(mod 1)"] {
        let err = eval_err(input);
        assert!(
            matches!(err, LiskError::WrongArgCount { expected: 2, .. }),
            "{input}: {err}"
        );
    }
}

#[test]
fn wrong_arg_count_renders_the_arguments() {
    let err = eval_err("(+ 1)");
    assert_eq!(err.to_string(), "Expected 2 args; found values 1");
}

#[test]
fn type_mismatch_messages() {
    let err = eval_err("(+ 1 \"two\")");
    assert_eq!(
        err.to_string(),
        "Invalid type: expected number, found \"two\""
    );
    let err = eval_err("(&& #t 1)");
    assert_eq!(err.to_string(), "Invalid type: expected boolean, found 1");
    let err = eval_err("(car 5)");
    assert_eq!(err.to_string(), "Invalid type: expected pair, found 5");
}

#[test]
fn unbound_variables() {
    let err = eval_err("missing");
    assert!(matches!(
        err,
        LiskError::Unbound {
            access: VarAccess::Read,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Getting an unbound variable: missing");

    let err = eval_err("(set! missing 1)");
    assert!(matches!(
        err,
        LiskError::Unbound {
            access: VarAccess::Write,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Setting an unbound variable: missing");
}

#[test]
fn closure_arity_messages() {
    let err = eval_err("(define (f x) x) (f)");
    assert_eq!(err.to_string(), "Expected 1 args; found values");
    let err = eval_err("(define (f x) x) (f 1 2)");
    assert_eq!(err.to_string(), "Expected 1 args; found values 1 2");
}

#[test]
fn bad_special_form_for_empty_list() {
    let err = eval_err("()");
    assert_eq!(err.to_string(), "Unrecognized special form: ()");
}

#[test]
fn not_a_function() {
    let err = eval_err("(1 2)");
    assert_eq!(err.to_string(), "Not a function: 1");
    let err = eval_err("(\"f\" 2)");
    assert_eq!(err.to_string(), "Not a function: \"f\"");
}

#[test]
fn parse_errors_surface_from_eval_str() {
    let err = eval_err("(+ 1");
    assert!(matches!(err, LiskError::Parse { .. }));
    let err = eval_err("(+ 1))");
    assert!(matches!(err, LiskError::Parse { .. }));
}

#[test]
fn division_by_zero() {
    let err = eval_err("(/ 1 0)");
    assert_eq!(err.to_string(), "Eval error: division by zero");
}

#[test]
fn errors_leave_prior_definitions_in_place() {
    let interp = Interpreter::new();
    assert!(interp
        .eval_str("(define a 1) (define b (undefined)) (define c 3)")
        .is_err());
    assert!(interp.global_env.get_str("a").is_some());
    assert!(interp.global_env.get_str("b").is_none());
    assert!(interp.global_env.get_str("c").is_none());
}
