// Simpl Tokens
// Token kinds produced by the tokenizer and consumed by the parser

use crate::ast::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Identifier,
    Null,
    Equals,
    OpenParen,
    CloseParen,
    BinaryOperator,
    Semicolon,
    Comma,
    Colon,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Dot,
    Let,
    Const,
    Function,
    EndOfInput,
}

impl TokenKind {
    /// Human readable description used in parse errors
    pub fn description(&self) -> &'static str {
        match self {
            TokenKind::Number => "a number",
            TokenKind::Identifier => "an identifier",
            TokenKind::Null => "'null'",
            TokenKind::Equals => "'='",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::BinaryOperator => "an operator",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::Dot => "'.'",
            TokenKind::Let => "'let'",
            TokenKind::Const => "'const'",
            TokenKind::Function => "'fn'",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Look up a reserved word, ignoring case
pub fn keyword(word: &str) -> Option<TokenKind> {
    match word.to_ascii_lowercase().as_str() {
        "let" => Some(TokenKind::Let),
        "const" => Some(TokenKind::Const),
        "fn" => Some(TokenKind::Function),
        "null" => Some(TokenKind::Null),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            kind,
            span,
        }
    }

    pub fn end_of_input(offset: usize) -> Self {
        Self::new(TokenKind::EndOfInput, "", Span::new(offset, offset))
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for a binary operator token with exactly this symbol
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::BinaryOperator && self.value == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "{:?} @ {}", self.kind, self.span.start),
            _ => write!(
                f,
                "{:?} '{}' @ {}..{}",
                self.kind, self.value, self.span.start, self.span.end
            ),
        }
    }
}
