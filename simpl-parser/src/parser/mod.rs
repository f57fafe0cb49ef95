// Simpl Parser
// Recursive-descent parser over the token stream, one token of lookahead

mod collections;
mod expressions;
mod functions;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::Tokenizer;
use crate::token::{Token, TokenKind};

/// Default limit on nested expressions and statements
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

/// Parser state: an index cursor over the immutable token array
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

impl<'src> Parser<'src> {
    /// Tokenize `source` and prepare to parse it
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let tokens = Tokenizer::new(source).tokenize()?;
        Ok(Self {
            source,
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse statements until the end of input
    pub fn parse_program(mut self) -> ParseResult<Program> {
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.parse_statement()?);
        }

        log::debug!(
            "parsed {} statements from {} tokens",
            body.len(),
            self.tokens.len()
        );

        Ok(Program {
            body,
            span: Span::new(0, self.source.len()),
        })
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(|parser| match parser.current().kind {
            TokenKind::Let | TokenKind::Const => parser.parse_variable_declaration(),
            TokenKind::Function => parser.parse_function_declaration(),
            _ => parser.parse_expression_statement(),
        })
    }

    /// `(let|const) name ;` or `(let|const) name = expression ;`
    fn parse_variable_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let constant = keyword.is(TokenKind::Const);

        let name = self.expect(TokenKind::Identifier, "an identifier")?;
        let identifier = Identifier::new(name.value, name.span);

        if self.at(TokenKind::Semicolon) {
            let end = self.advance();
            return Ok(Statement::new(
                StatementKind::VariableDeclaration(VariableDeclaration {
                    constant,
                    identifier,
                    value: None,
                }),
                keyword.span.to(end.span),
            ));
        }

        self.expect(TokenKind::Equals, "'=' or ';'")?;
        let value = self.parse_expression()?;
        let end = self.expect(TokenKind::Semicolon, "';' after the declaration")?;

        Ok(Statement::new(
            StatementKind::VariableDeclaration(VariableDeclaration {
                constant,
                identifier,
                value: Some(value),
            }),
            keyword.span.to(end.span),
        ))
    }

    /// Assignments must be terminated by `;`, other expressions may be
    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression()?;
        let mut span = expression.span;

        if matches!(expression.kind, ExpressionKind::Assignment(_)) {
            let end = self.expect(TokenKind::Semicolon, "';' after the assignment")?;
            span = span.to(end.span);
        } else if let Some(end) = self.eat(TokenKind::Semicolon) {
            span = span.to(end.span);
        }

        Ok(Statement::new(StatementKind::Expression(expression), span))
    }

    // Token cursor

    pub(crate) fn current(&self) -> &Token {
        // The tokenizer always appends EndOfInput, so the last token is a safe fallback
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenKind::EndOfInput) {
            self.cursor += 1;
        }
        token
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfInput)
    }

    /// Consume the current token if it has the given kind
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(self.source, self.current(), expected))
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(self.source, self.current(), expected)
    }

    pub(crate) fn source(&self) -> &'src str {
        self.source
    }

    /// Run `parse` one nesting level deeper, failing past the depth limit
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.deepen()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Count one more level of nesting; left-folded chains call this once per
    /// link and reset `depth` when the chain ends
    pub(crate) fn deepen(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            return Err(ParseError::recursion_limit(
                self.source,
                self.current().span,
                self.max_depth,
            ));
        }
        self.depth += 1;
        Ok(())
    }
}
