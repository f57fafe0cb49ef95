//! Properties of the public parsing API

use pretty_assertions::assert_eq;
use simpl_parser::{parse_program, tokenize, ExpressionKind, ParseError, StatementKind, TokenKind};

const SAMPLE: &str = r#"
let x = 5;
const origin = { x, y: 0 };
fn add(a, b) {
    a + b
}
add(x, origin.y) * -2
"#;

#[test]
fn parsing_is_deterministic() {
    let first = parse_program(SAMPLE).unwrap();
    let second = parse_program(SAMPLE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn statements_follow_source_order() {
    let program = parse_program(SAMPLE).unwrap();
    let names: Vec<&str> = program.body.iter().map(|s| s.node_name()).collect();
    assert_eq!(
        names,
        vec![
            "VariableDeclaration",
            "VariableDeclaration",
            "FunctionDeclaration",
            "BinaryExpr",
        ]
    );
}

#[test]
fn every_statement_span_lies_within_the_program() {
    let program = parse_program(SAMPLE).unwrap();
    for statement in &program.body {
        assert!(statement.span.start < statement.span.end);
        assert!(statement.span.end <= program.span.end);
    }
}

#[test]
fn tokenize_ends_with_a_single_sentinel() {
    let tokens = tokenize(SAMPLE).unwrap();
    let sentinels = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::EndOfInput)
        .count();
    assert_eq!(sentinels, 1);
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EndOfInput));
}

#[test]
fn malformed_input_yields_no_tree() {
    for source in ["let 5 = x;", "1 + ", "(1", "fn (a) { a }", "{ x: }", "a[1"] {
        let result = parse_program(source);
        assert!(result.is_err(), "expected {:?} to fail to parse", source);
    }
}

#[test]
fn diagnostics_carry_the_source_text() {
    match parse_program("let 5 = x;") {
        Err(ParseError::UnexpectedToken { src, .. }) => assert_eq!(src, "let 5 = x;"),
        other => panic!("Expected unexpected token error, got: {:?}", other),
    }
}

#[test]
fn whitespace_only_source_is_an_empty_program() {
    let program = parse_program(" \n\t\r\n").unwrap();
    assert!(program.body.is_empty());
}

#[test]
fn final_expression_statement_needs_no_semicolon() {
    let program = parse_program("let a = 1;\na").unwrap();
    match &program.body[1].kind {
        StatementKind::Expression(expression) => {
            assert!(matches!(expression.kind, ExpressionKind::Identifier(_)));
        }
        other => panic!("Expected expression statement, got: {:?}", other),
    }
}
