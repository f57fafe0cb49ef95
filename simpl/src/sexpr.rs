// S-expression formatter for the Simpl AST
// Renders parsed programs as readable Lisp-like syntax for `simpl parse`

use simpl_parser::*;

pub fn format_program_as_sexpr(program: &Program) -> String {
    format_program_with_indent(program, 0)
}

fn format_program_with_indent(program: &Program, indent: usize) -> String {
    let statements = format_block(&program.body, indent + 2);

    if statements.is_empty() {
        "(program)".to_string()
    } else if statements.len() == 1 {
        format!("(program {})", statements[0])
    } else {
        format!(
            "(program\n{}{}\n{})",
            " ".repeat(indent + 2),
            statements.join(&format!("\n{}", " ".repeat(indent + 2))),
            " ".repeat(indent)
        )
    }
}

fn format_block(body: &[Statement], indent: usize) -> Vec<String> {
    body.iter()
        .map(|statement| format_statement_with_indent(statement, indent))
        .collect()
}

fn format_statement_with_indent(statement: &Statement, indent: usize) -> String {
    match &statement.kind {
        StatementKind::VariableDeclaration(declaration) => {
            format_declaration_with_indent(declaration, indent)
        }
        StatementKind::FunctionDeclaration(function) => {
            format_function_with_indent(function, indent)
        }
        StatementKind::Expression(expression) => format_expression_with_indent(expression, indent),
    }
}

fn format_declaration_with_indent(declaration: &VariableDeclaration, indent: usize) -> String {
    let keyword = if declaration.constant { "const" } else { "let" };
    match &declaration.value {
        Some(value) => format!(
            "({} {} {})",
            keyword,
            declaration.identifier.name,
            format_expression_with_indent(value, indent + 2)
        ),
        None => format!("({} {})", keyword, declaration.identifier.name),
    }
}

fn format_function_with_indent(function: &FunctionDeclaration, indent: usize) -> String {
    let parameters: Vec<&str> = function
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    let header = format!("fn {} ({})", function.name.name, parameters.join(" "));
    let body = format_block(&function.body, indent + 2);

    if body.is_empty() {
        format!("({header})")
    } else {
        format!(
            "({}\n{}{})",
            header,
            " ".repeat(indent + 2),
            body.join(&format!("\n{}", " ".repeat(indent + 2)))
        )
    }
}

fn format_expression_with_indent(expr: &Expression, indent: usize) -> String {
    match &expr.kind {
        ExpressionKind::NumericLiteral(literal) => literal.raw.clone(),
        ExpressionKind::NullLiteral => "null".to_string(),
        ExpressionKind::Identifier(identifier) => identifier.name.clone(),
        ExpressionKind::Binary(binary) => format_binary_op_with_indent(binary, indent),
        ExpressionKind::Unary(unary) => format!(
            "({} {})",
            unary.operator.symbol(),
            format_expression_with_indent(&unary.operand, indent + 2)
        ),
        ExpressionKind::Assignment(assignment) => format!(
            "(= {} {})",
            format_expression_with_indent(&assignment.assignee, indent + 2),
            format_expression_with_indent(&assignment.value, indent + 2)
        ),
        ExpressionKind::Member(member) => {
            let object = format_expression_with_indent(&member.object, indent + 2);
            match &member.property {
                MemberProperty::Named(property) => format!("(. {} {})", object, property.name),
                MemberProperty::Computed(key) => format!(
                    "(index {} {})",
                    object,
                    format_expression_with_indent(key, indent + 2)
                ),
            }
        }
        ExpressionKind::Call(call) => {
            let mut parts = vec![format_expression_with_indent(&call.callee, indent + 2)];
            parts.extend(
                call.arguments
                    .iter()
                    .map(|argument| format_expression_with_indent(argument, indent + 2)),
            );
            format!("(call {})", parts.join(" "))
        }
        ExpressionKind::ObjectLiteral(object) => format_object_with_indent(object, indent),
    }
}

fn format_object_with_indent(object: &ObjectLiteral, indent: usize) -> String {
    if object.properties.is_empty() {
        return "(object)".to_string();
    }

    let properties: Vec<String> = object
        .properties
        .iter()
        .map(|property| match &property.value {
            Some(value) => format!(
                "({} {})",
                property.key.name,
                format_expression_with_indent(value, indent + 2)
            ),
            None => property.key.name.clone(),
        })
        .collect();

    format!("(object {})", properties.join(" "))
}

fn format_binary_op_with_indent(bin_op: &BinaryExpr, indent: usize) -> String {
    let left = format_expression_with_indent(&bin_op.left, indent + 2);
    let right = format_expression_with_indent(&bin_op.right, indent + 2);
    let op = bin_op.operator.symbol();

    // Simple expressions on one line
    if !left.contains('\n') && !right.contains('\n') && (left.len() + right.len() + op.len()) < 50 {
        format!("({op} {left} {right})")
    } else {
        format!(
            "({}\n{}{}\n{}{})",
            op,
            " ".repeat(indent + 2),
            left,
            " ".repeat(indent + 2),
            right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpl_parser::parse_program;

    fn sexpr(source: &str) -> String {
        format_program_as_sexpr(&parse_program(source).unwrap())
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(sexpr(""), "(program)");
    }

    #[test]
    fn test_precedence_is_visible() {
        assert_eq!(sexpr("2 + 5 * 2"), "(program (+ 2 (* 5 2)))");
        assert_eq!(sexpr("(2 + 5) * 2"), "(program (* (+ 2 5) 2))");
        assert_eq!(sexpr("-x % 3"), "(program (% (- x) 3))");
    }

    #[test]
    fn test_declarations() {
        assert_eq!(sexpr("let x = 1.5;"), "(program (let x 1.5))");
        assert_eq!(sexpr("const y = null;"), "(program (const y null))");
        assert_eq!(sexpr("let z;"), "(program (let z))");
    }

    #[test]
    fn test_multiple_statements_are_indented() {
        assert_eq!(
            sexpr("let a = 1; a = 2;"),
            "(program\n  (let a 1)\n  (= a 2)\n)"
        );
    }

    #[test]
    fn test_functions_and_calls() {
        assert_eq!(
            sexpr("fn add(a, b) { a + b }"),
            "(program (fn add (a b)\n    (+ a b)))"
        );
        assert_eq!(sexpr("f(1)(2, x)"), "(program (call (call f 1) 2 x))");
        assert_eq!(sexpr("fn noop() {}"), "(program (fn noop ()))");
    }

    #[test]
    fn test_objects_and_members() {
        assert_eq!(
            sexpr("{ x, y: 2 }"),
            "(program (object x (y 2)))"
        );
        assert_eq!(sexpr("{}"), "(program (object))");
        assert_eq!(sexpr("a.b[c]"), "(program (index (. a b) c))");
    }
}
