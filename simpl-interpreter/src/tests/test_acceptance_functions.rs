//! Acceptance tests for function declarations, calls and closures

use crate::{
    DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_EVALUATION_DEPTH, EnvironmentError, EvaluationError,
    InterpreterSession, TestHarnessError, Value,
};

fn evaluation_error(result: Result<Value, TestHarnessError>) -> EvaluationError {
    match result {
        Err(TestHarnessError::Evaluation { source }) => source,
        other => panic!("Expected evaluation error, got: {:?}", other),
    }
}

#[test]
fn test_declaration_yields_the_function() {
    let mut harness = InterpreterSession::new();

    let value = harness.evaluate("fn add(a, b) { a + b }").unwrap();
    assert_eq!(value.to_string(), "fn add(a, b)");
    assert_eq!(harness.get_variable("add").unwrap(), value);
}

#[test]
fn test_simple_call() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn add(a, b) { a + b }").unwrap();
    harness.assert_evaluates_to_number("add(2, 3)", 5.0).unwrap();
    harness
        .assert_evaluates_to_number("add(add(1, 1), 2 * 3)", 8.0)
        .unwrap();
}

#[test]
fn test_body_returns_last_statement() {
    let mut harness = InterpreterSession::new();

    harness
        .evaluate("fn area(w, h) { let result = w * h; result }")
        .unwrap();
    harness.assert_evaluates_to_number("area(3, 4)", 12.0).unwrap();

    harness.evaluate("fn nothing() {}").unwrap();
    harness.assert_evaluates_to_null("nothing()").unwrap();
}

#[test]
fn test_locals_do_not_leak() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn f(a) { let local = a; local }").unwrap();
    harness.evaluate("f(1)").unwrap();
    assert!(harness.get_variable("local").is_err());
    assert!(harness.get_variable("a").is_err());

    // Each call gets a fresh scope, so redeclaring the local is fine
    harness.assert_evaluates_to_number("f(2)", 2.0).unwrap();
}

#[test]
fn test_parameters_shadow_outer_names() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("let x = 100; fn id(x) { x }").unwrap();
    harness.assert_evaluates_to_number("id(1)", 1.0).unwrap();
    harness.assert_evaluates_to_number("x", 100.0).unwrap();
}

#[test]
fn test_lexical_scoping_uses_declaring_scope() {
    let mut harness = InterpreterSession::new();

    harness
        .evaluate(
            "let base = 10;
             fn read() { base }
             fn shadow(base) { read() }",
        )
        .unwrap();
    harness.assert_evaluates_to_number("shadow(99)", 10.0).unwrap();
}

#[test]
fn test_closures_and_curried_calls() {
    let mut harness = InterpreterSession::new();

    harness
        .evaluate("fn adder(x) { fn add(y) { x + y } add }")
        .unwrap();
    harness.assert_evaluates_to_number("adder(1)(2)", 3.0).unwrap();
    harness.evaluate("const add5 = adder(5);").unwrap();
    harness.assert_evaluates_to_number("add5(10)", 15.0).unwrap();
}

#[test]
fn test_closures_share_their_scope() {
    let mut harness = InterpreterSession::new();

    harness
        .evaluate("fn counter() { let count = 0; fn next() { count = count + 1; count } next }")
        .unwrap();
    harness.evaluate("let tick = counter();").unwrap();
    harness.assert_evaluates_to_number("tick()", 1.0).unwrap();
    harness.assert_evaluates_to_number("tick()", 2.0).unwrap();

    harness.evaluate("let other = counter();").unwrap();
    harness.assert_evaluates_to_number("other()", 1.0).unwrap();
}

#[test]
fn test_inner_function_is_bound_in_the_scope_it_captures() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn outer() { fn inner() { 1 } inner }").unwrap();
    let inner = harness.evaluate("outer()").unwrap();
    let Value::Function(function) = &inner else {
        panic!("Expected a function, got: {:?}", inner);
    };

    // The call scope and the function reference each other, so both stay alive
    assert_eq!(function.closure.get("inner").unwrap(), inner);
    assert!(function.closure.parent().unwrap().ptr_eq(harness.environment()));
}

#[test]
fn test_functions_in_objects() {
    let mut harness = InterpreterSession::new();

    harness
        .evaluate("fn double(n) { n * 2 } let math = { double };")
        .unwrap();
    harness.assert_evaluates_to_number("math.double(21)", 42.0).unwrap();
}

#[test]
fn test_arity_mismatch() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn pair(a, b) { a }").unwrap();
    match evaluation_error(harness.evaluate("pair(1)")) {
        EvaluationError::ArityMismatch {
            function,
            expected,
            found,
            ..
        } => {
            assert_eq!(function, "pair");
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("Expected arity mismatch, got: {:?}", other),
    }
    assert!(matches!(
        evaluation_error(harness.evaluate("pair(1, 2, 3)")),
        EvaluationError::ArityMismatch { .. }
    ));
}

#[test]
fn test_calling_a_non_function() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("let n = 1;").unwrap();
    match evaluation_error(harness.evaluate("n(2)")) {
        EvaluationError::NotCallable { found, .. } => assert_eq!(found, "Number"),
        other => panic!("Expected not callable, got: {:?}", other),
    }
}

#[test]
fn test_arguments_are_evaluated_before_the_call_fails() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("let n = 1; let hits = 0;").unwrap();
    assert!(matches!(
        evaluation_error(harness.evaluate("n(hits = 5)")),
        EvaluationError::NotCallable { .. }
    ));
    harness.assert_evaluates_to_number("hits", 5.0).unwrap();
}

#[test]
fn test_unbounded_recursion_is_stopped() {
    let mut harness = InterpreterSession::with_max_call_depth(16);

    harness.evaluate("fn forever(n) { forever(n + 1) }").unwrap();
    match evaluation_error(harness.evaluate("forever(0)")) {
        EvaluationError::RecursionLimitExceeded { limit, .. } => assert_eq!(limit, 16),
        other => panic!("Expected recursion limit, got: {:?}", other),
    }

    // The session is usable again afterwards
    harness.evaluate("fn once() { 1 }").unwrap();
    harness.assert_evaluates_to_number("once()", 1.0).unwrap();
}

#[test]
fn test_plain_recursion_reports_the_call_limit() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn forever(n) { forever(n + 1) }").unwrap();
    match evaluation_error(harness.evaluate("forever(0)")) {
        EvaluationError::RecursionLimitExceeded { limit, .. } => {
            assert_eq!(limit, DEFAULT_MAX_CALL_DEPTH)
        }
        other => panic!("Expected recursion limit, got: {:?}", other),
    }
}

#[test]
fn test_recursion_through_nested_expressions_is_stopped() {
    for levels in [10, 40] {
        let mut harness = InterpreterSession::new();
        let body = format!("{}f(n){}", "0 + (".repeat(levels), ")".repeat(levels));

        harness.evaluate(&format!("fn f(n) {{ {body} }}")).unwrap();
        match evaluation_error(harness.evaluate("f(0)")) {
            EvaluationError::RecursionLimitExceeded { limit, .. } => {
                assert_eq!(limit, DEFAULT_MAX_EVALUATION_DEPTH)
            }
            other => panic!("Expected recursion limit, got: {:?}", other),
        }

        harness.assert_evaluates_to_number("1 + 1", 2.0).unwrap();
    }
}

#[test]
fn test_evaluation_depth_limit() {
    let mut harness = InterpreterSession::with_max_depth(8);

    harness.assert_evaluates_to_number("1 + (1 + (1 + 1))", 4.0).unwrap();
    let nested = format!("{}1{}", "-(".repeat(9), ")".repeat(9));
    match evaluation_error(harness.evaluate(&nested)) {
        EvaluationError::RecursionLimitExceeded { limit, .. } => assert_eq!(limit, 8),
        other => panic!("Expected recursion limit, got: {:?}", other),
    }
    harness.assert_evaluates_to_number("-(-(2))", 2.0).unwrap();
}

#[test]
fn test_parameters_cannot_rebind_builtin_booleans() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn f(true) { 1 }").unwrap();
    match evaluation_error(harness.evaluate("f(2)")) {
        EvaluationError::Environment { source, .. } => assert_eq!(
            source,
            EnvironmentError::DuplicateDeclaration {
                name: "true".to_string()
            }
        ),
        other => panic!("Expected duplicate declaration, got: {:?}", other),
    }

    harness.evaluate("fn g() { let false = 0; }").unwrap();
    assert!(matches!(
        evaluation_error(harness.evaluate("g()")),
        EvaluationError::Environment { .. }
    ));
}

#[test]
fn test_duplicate_function_name() {
    let mut harness = InterpreterSession::new();

    harness.evaluate("fn f() { 1 }").unwrap();
    assert!(matches!(
        evaluation_error(harness.evaluate("fn f() { 2 }")),
        EvaluationError::Environment { .. }
    ));
}
