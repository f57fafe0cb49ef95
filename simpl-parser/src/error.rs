// Simpl Parser Error Handling
// Lex and parse errors with miette source diagnostics

use crate::ast::Span;
use crate::token::{Token, TokenKind};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Tokenizer failure: a character that starts no token
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{character}' at offset {position}")]
    #[diagnostic(
        code(simpl::lex::unexpected_character),
        help("Only letters, digits, whitespace and = ( ) ; , : {{ }} [ ] . + - * / % are valid")
    )]
    UnexpectedCharacter {
        character: char,
        position: usize,
        #[source_code]
        src: String,
        #[label("not valid here")]
        span: SourceSpan,
    },
}

impl LexError {
    pub fn unexpected_character(src: &str, character: char, position: usize) -> Self {
        LexError::UnexpectedCharacter {
            character,
            position,
            src: src.to_string(),
            span: SourceSpan::new(position.into(), character.len_utf8()),
        }
    }
}

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error("Unexpected token '{found}'")]
    #[diagnostic(
        code(simpl::parse::unexpected_token),
        help("Expected {expected}")
    )]
    UnexpectedToken {
        #[source_code]
        src: String,
        #[label("found this")]
        span: SourceSpan,
        found: String,
        expected: String,
    },

    #[error("Unexpected end of input")]
    #[diagnostic(
        code(simpl::parse::unexpected_end_of_input),
        help("Expected {expected}")
    )]
    UnexpectedEndOfInput {
        #[source_code]
        src: String,
        #[label("input ends here")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Invalid assignment target")]
    #[diagnostic(
        code(simpl::parse::invalid_assignment_target),
        help("Only identifiers and member expressions can be assigned to")
    )]
    InvalidAssignmentTarget {
        #[source_code]
        src: String,
        #[label("cannot assign to this")]
        span: SourceSpan,
    },

    #[error("Invalid function parameter")]
    #[diagnostic(
        code(simpl::parse::invalid_parameter),
        help("Function parameters must be plain identifiers, like fn add(a, b) {{ ... }}")
    )]
    InvalidParameter {
        #[source_code]
        src: String,
        #[label("not an identifier")]
        span: SourceSpan,
    },

    #[error("Duplicate parameter '{name}'")]
    #[diagnostic(
        code(simpl::parse::duplicate_parameter),
        help("Each parameter name may appear once per function")
    )]
    DuplicateParameter {
        #[source_code]
        src: String,
        #[label("already declared")]
        span: SourceSpan,
        name: String,
    },

    #[error("Invalid number literal '{found}'")]
    #[diagnostic(code(simpl::parse::invalid_number))]
    InvalidNumber {
        #[source_code]
        src: String,
        #[label("invalid number")]
        span: SourceSpan,
        found: String,
    },

    #[error("Nesting exceeds the maximum depth of {limit}")]
    #[diagnostic(
        code(simpl::parse::recursion_limit),
        help("Split deeply nested expressions into separate declarations")
    )]
    RecursionLimitExceeded {
        #[source_code]
        src: String,
        #[label("nested too deeply")]
        span: SourceSpan,
        limit: usize,
    },
}

impl ParseError {
    /// Error for a token that does not fit the grammar at this point
    pub fn unexpected(src: &str, token: &Token, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        match token.kind {
            TokenKind::EndOfInput => ParseError::UnexpectedEndOfInput {
                src: src.to_string(),
                span: token.span.into(),
                expected,
            },
            _ => ParseError::UnexpectedToken {
                src: src.to_string(),
                span: token.span.into(),
                found: token.value.clone(),
                expected,
            },
        }
    }

    pub fn invalid_assignment_target(src: &str, span: Span) -> Self {
        ParseError::InvalidAssignmentTarget {
            src: src.to_string(),
            span: span.into(),
        }
    }

    pub fn invalid_parameter(src: &str, span: Span) -> Self {
        ParseError::InvalidParameter {
            src: src.to_string(),
            span: span.into(),
        }
    }

    pub fn duplicate_parameter(src: &str, span: Span, name: &str) -> Self {
        ParseError::DuplicateParameter {
            src: src.to_string(),
            span: span.into(),
            name: name.to_string(),
        }
    }

    pub fn invalid_number(src: &str, token: &Token) -> Self {
        ParseError::InvalidNumber {
            src: src.to_string(),
            span: token.span.into(),
            found: token.value.clone(),
        }
    }

    pub fn recursion_limit(src: &str, span: Span, limit: usize) -> Self {
        ParseError::RecursionLimitExceeded {
            src: src.to_string(),
            span: span.into(),
            limit,
        }
    }

    /// Location of the error in the source
    pub fn span(&self) -> SourceSpan {
        match self {
            ParseError::Lex(LexError::UnexpectedCharacter { span, .. })
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEndOfInput { span, .. }
            | ParseError::InvalidAssignmentTarget { span, .. }
            | ParseError::InvalidParameter { span, .. }
            | ParseError::DuplicateParameter { span, .. }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::RecursionLimitExceeded { span, .. } => *span,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
