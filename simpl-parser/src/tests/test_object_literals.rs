use crate::{ast::*, parse_program};

fn object(input: &str) -> ObjectLiteral {
    let program = parse_program(input).unwrap();
    match program.body.into_iter().next().map(|statement| statement.kind) {
        Some(StatementKind::Expression(Expression {
            kind: ExpressionKind::ObjectLiteral(object),
            ..
        })) => object,
        other => panic!("Expected object literal, got: {:?}", other),
    }
}

#[test]
fn test_empty_object() {
    assert!(object("{}").properties.is_empty());
}

#[test]
fn test_explicit_property() {
    let literal = object("{ x: 5 }");
    assert_eq!(literal.properties.len(), 1);

    let property = &literal.properties[0];
    assert_eq!(property.key.name, "x");
    assert!(!property.is_shorthand());
    match property.value.as_ref().map(|value| &value.kind) {
        Some(ExpressionKind::NumericLiteral(literal)) => assert_eq!(literal.value, 5.0),
        other => panic!("Expected numeric value, got: {:?}", other),
    }
}

#[test]
fn test_shorthand_property() {
    let literal = object("{ x }");
    assert_eq!(literal.properties.len(), 1);
    assert!(literal.properties[0].is_shorthand());
    assert_eq!(literal.properties[0].key.name, "x");
}

#[test]
fn test_mixed_properties_keep_order() {
    let literal = object("{ x, y: 1 + 2, z }");
    let keys: Vec<&str> = literal
        .properties
        .iter()
        .map(|property| property.key.name.as_str())
        .collect();
    assert_eq!(keys, vec!["x", "y", "z"]);
    assert!(literal.properties[0].is_shorthand());
    assert!(!literal.properties[1].is_shorthand());
    assert!(literal.properties[2].is_shorthand());
}

#[test]
fn test_trailing_comma() {
    let literal = object("{ a: 1, }");
    assert_eq!(literal.properties.len(), 1);
}

#[test]
fn test_nested_object() {
    let literal = object("{ inner: { depth: 2 } }");
    match literal.properties[0].value.as_ref().map(|value| &value.kind) {
        Some(ExpressionKind::ObjectLiteral(inner)) => {
            assert_eq!(inner.properties[0].key.name, "depth");
        }
        other => panic!("Expected nested object, got: {:?}", other),
    }
}

#[test]
fn test_object_as_declaration_initializer() {
    let program = parse_program("const point = { x: 1, y: 2 };").unwrap();
    match &program.body[0].kind {
        StatementKind::VariableDeclaration(declaration) => {
            assert!(matches!(
                declaration.value.as_ref().map(|value| &value.kind),
                Some(ExpressionKind::ObjectLiteral(_))
            ));
        }
        other => panic!("Expected declaration, got: {:?}", other),
    }
}
