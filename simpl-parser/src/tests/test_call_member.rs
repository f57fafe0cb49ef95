use crate::{ast::*, parse_program};

fn single_expression(input: &str) -> Expression {
    let program = parse_program(input).unwrap();
    match program.body.into_iter().next().map(|statement| statement.kind) {
        Some(StatementKind::Expression(expression)) => expression,
        other => panic!("Expected expression statement, got: {:?}", other),
    }
}

fn identifier_name(expression: &Expression) -> &str {
    match &expression.kind {
        ExpressionKind::Identifier(identifier) => &identifier.name,
        other => panic!("Expected identifier, got: {:?}", other),
    }
}

#[test]
fn test_call_with_arguments() {
    let expression = single_expression("add(1, x)");
    match &expression.kind {
        ExpressionKind::Call(call) => {
            assert_eq!(identifier_name(&call.callee), "add");
            assert_eq!(call.arguments.len(), 2);
            assert_eq!(identifier_name(&call.arguments[1]), "x");
        }
        other => panic!("Expected call, got: {:?}", other),
    }
}

#[test]
fn test_call_without_arguments() {
    let expression = single_expression("now()");
    match &expression.kind {
        ExpressionKind::Call(call) => assert!(call.arguments.is_empty()),
        other => panic!("Expected call, got: {:?}", other),
    }
    assert_eq!(expression.span, Span::new(0, 5));
}

#[test]
fn test_curried_calls_chain_left_to_right() {
    // (make(1))(2)
    let expression = single_expression("make(1)(2)");
    match &expression.kind {
        ExpressionKind::Call(outer) => {
            assert_eq!(outer.arguments.len(), 1);
            match &outer.callee.kind {
                ExpressionKind::Call(inner) => {
                    assert_eq!(identifier_name(&inner.callee), "make");
                }
                other => panic!("Expected inner call, got: {:?}", other),
            }
        }
        other => panic!("Expected call, got: {:?}", other),
    }
}

#[test]
fn test_dot_member_is_not_computed() {
    let expression = single_expression("point.x");
    match &expression.kind {
        ExpressionKind::Member(member) => {
            assert!(!member.is_computed());
            assert_eq!(identifier_name(&member.object), "point");
            match &member.property {
                MemberProperty::Named(property) => assert_eq!(property.name, "x"),
                other => panic!("Expected named property, got: {:?}", other),
            }
        }
        other => panic!("Expected member expression, got: {:?}", other),
    }
}

#[test]
fn test_bracket_member_is_computed() {
    let expression = single_expression("table[1 + 1]");
    match &expression.kind {
        ExpressionKind::Member(member) => {
            assert!(member.is_computed());
            match &member.property {
                MemberProperty::Computed(key) => {
                    assert!(matches!(key.kind, ExpressionKind::Binary(_)));
                }
                other => panic!("Expected computed property, got: {:?}", other),
            }
        }
        other => panic!("Expected member expression, got: {:?}", other),
    }
    assert_eq!(expression.span, Span::new(0, 12));
}

#[test]
fn test_member_chain_then_call() {
    // ((a.b)[c])(1)
    let expression = single_expression("a.b[c](1)");
    match &expression.kind {
        ExpressionKind::Call(call) => match &call.callee.kind {
            ExpressionKind::Member(outer) => {
                assert!(outer.is_computed());
                assert!(matches!(outer.object.kind, ExpressionKind::Member(_)));
            }
            other => panic!("Expected member callee, got: {:?}", other),
        },
        other => panic!("Expected call, got: {:?}", other),
    }
}

#[test]
fn test_member_binds_tighter_than_multiplication() {
    let expression = single_expression("a.b * 2");
    match &expression.kind {
        ExpressionKind::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Multiply);
            assert!(matches!(binary.left.kind, ExpressionKind::Member(_)));
        }
        other => panic!("Expected binary, got: {:?}", other),
    }
}

#[test]
fn test_member_assignment_target_parses() {
    let program = parse_program("a.b = 1;").unwrap();
    match &program.body[0].kind {
        StatementKind::Expression(expression) => match &expression.kind {
            ExpressionKind::Assignment(assignment) => {
                assert!(matches!(assignment.assignee.kind, ExpressionKind::Member(_)));
            }
            other => panic!("Expected assignment, got: {:?}", other),
        },
        other => panic!("Expected expression statement, got: {:?}", other),
    }
}
