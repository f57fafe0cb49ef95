// Simpl AST Definitions
// Abstract Syntax Tree nodes with source positions

use miette::SourceSpan;
use std::fmt;

/// Byte range of a node or token in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Root node: statements in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    Expression(Expression),
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn node_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::VariableDeclaration(_) => "VariableDeclaration",
            StatementKind::FunctionDeclaration(_) => "FunctionDeclaration",
            StatementKind::Expression(expression) => expression.node_name(),
        }
    }
}

/// `let x;`, `let x = expr;` or `const x = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub constant: bool,
    pub identifier: Identifier,
    pub value: Option<Expression>,
}

/// `fn name(a, b) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Assignment(AssignmentExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Member(MemberExpr),
    Call(CallExpr),
    NumericLiteral(NumericLiteral),
    NullLiteral,
    Identifier(Identifier),
    ObjectLiteral(ObjectLiteral),
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        let span = left.span.to(right.span);
        Self::new(
            ExpressionKind::Binary(BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            }),
            span,
        )
    }

    pub fn node_name(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::Assignment(_) => "AssignmentExpr",
            ExpressionKind::Binary(_) => "BinaryExpr",
            ExpressionKind::Unary(_) => "UnaryExpr",
            ExpressionKind::Member(_) => "MemberExpr",
            ExpressionKind::Call(_) => "CallExpr",
            ExpressionKind::NumericLiteral(_) => "NumericLiteral",
            ExpressionKind::NullLiteral => "NullLiteral",
            ExpressionKind::Identifier(_) => "Identifier",
            ExpressionKind::ObjectLiteral(_) => "ObjectLiteral",
        }
    }
}

/// `assignee = value`, right-associative
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expression>,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `object.property` or `object[expression]`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expression>,
    pub property: MemberProperty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    Named(Identifier),
    Computed(Box<Expression>),
}

impl MemberExpr {
    pub fn is_computed(&self) -> bool {
        matches!(self.property, MemberProperty::Computed(_))
    }
}

/// `callee(arguments...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// Numeric literal; `raw` keeps the lexeme as written
#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    pub value: f64,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
}

/// Object literal entry; `value` is `None` for the `{ x }` shorthand
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Identifier,
    pub value: Option<Expression>,
    pub span: Span,
}

impl Property {
    pub fn is_shorthand(&self) -> bool {
        self.value.is_none()
    }
}
