use crate::{ast::*, parse_program};

fn single_expression(input: &str) -> Expression {
    let program = parse_program(input).unwrap();
    assert_eq!(program.body.len(), 1);
    match program.body.into_iter().next().map(|statement| statement.kind) {
        Some(StatementKind::Expression(expression)) => expression,
        other => panic!("Expected expression statement, got: {:?}", other),
    }
}

fn number(expression: &Expression) -> f64 {
    match &expression.kind {
        ExpressionKind::NumericLiteral(literal) => literal.value,
        other => panic!("Expected number, got: {:?}", other),
    }
}

fn binary(expression: &Expression) -> &BinaryExpr {
    match &expression.kind {
        ExpressionKind::Binary(binary) => binary,
        other => panic!("Expected binary expression, got: {:?}", other),
    }
}

#[test]
fn test_parse_addition() {
    let expression = single_expression("2 + 3");
    let op = binary(&expression);

    assert_eq!(op.operator, BinaryOperator::Add);
    assert_eq!(number(&op.left), 2.0);
    assert_eq!(number(&op.right), 3.0);
    assert_eq!(expression.span, Span::new(0, 5));
}

#[test]
fn test_parse_each_operator() {
    for (input, operator) in [
        ("10 - 4", BinaryOperator::Subtract),
        ("4 * 6", BinaryOperator::Multiply),
        ("8 / 2", BinaryOperator::Divide),
        ("10 % 3", BinaryOperator::Modulo),
    ] {
        let expression = single_expression(input);
        assert_eq!(binary(&expression).operator, operator, "input: {}", input);
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    // 2 + (5 * 2)
    let expression = single_expression("2 + 5 * 2");
    let add = binary(&expression);
    assert_eq!(add.operator, BinaryOperator::Add);
    assert_eq!(number(&add.left), 2.0);

    let multiply = binary(&add.right);
    assert_eq!(multiply.operator, BinaryOperator::Multiply);
    assert_eq!(number(&multiply.left), 5.0);
    assert_eq!(number(&multiply.right), 2.0);
}

#[test]
fn test_parentheses_override_precedence() {
    // (2 + 5) * 2
    let expression = single_expression("(2 + 5) * 2");
    let multiply = binary(&expression);
    assert_eq!(multiply.operator, BinaryOperator::Multiply);
    assert_eq!(binary(&multiply.left).operator, BinaryOperator::Add);
    assert_eq!(number(&multiply.right), 2.0);
}

#[test]
fn test_subtraction_is_left_associative() {
    // (10 - 2) - 3
    let expression = single_expression("10 - 2 - 3");
    let outer = binary(&expression);
    assert_eq!(number(&outer.right), 3.0);

    let inner = binary(&outer.left);
    assert_eq!(number(&inner.left), 10.0);
    assert_eq!(number(&inner.right), 2.0);
}

#[test]
fn test_division_chain_is_left_associative() {
    let expression = single_expression("8 / 4 % 3");
    let outer = binary(&expression);
    assert_eq!(outer.operator, BinaryOperator::Modulo);
    assert_eq!(binary(&outer.left).operator, BinaryOperator::Divide);
}

#[test]
fn test_parse_unary_minus() {
    let expression = single_expression("-5 * 2");
    let multiply = binary(&expression);

    match &multiply.left.kind {
        ExpressionKind::Unary(unary) => {
            assert_eq!(unary.operator, UnaryOperator::Negate);
            assert_eq!(number(&unary.operand), 5.0);
        }
        other => panic!("Expected unary expression, got: {:?}", other),
    }
}

#[test]
fn test_subtracting_a_negative() {
    let expression = single_expression("1 - -2");
    let subtract = binary(&expression);
    assert_eq!(subtract.operator, BinaryOperator::Subtract);
    assert!(matches!(subtract.right.kind, ExpressionKind::Unary(_)));
}

#[test]
fn test_decimal_literal_keeps_raw_text() {
    let expression = single_expression("2.50");
    match &expression.kind {
        ExpressionKind::NumericLiteral(literal) => {
            assert_eq!(literal.value, 2.5);
            assert_eq!(literal.raw, "2.50");
        }
        other => panic!("Expected number, got: {:?}", other),
    }
}

#[test]
fn test_null_literal() {
    let expression = single_expression("null");
    assert_eq!(expression.kind, ExpressionKind::NullLiteral);
}
