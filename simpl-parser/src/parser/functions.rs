// Function parsing module
// Function declarations and call argument lists

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// `fn name(a, b) { statements }`
    pub(crate) fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let name = self.expect(TokenKind::Identifier, "a function name")?;
        let name = Identifier::new(name.value, name.span);

        let (arguments, _) = self.parse_arguments()?;
        let mut parameters: Vec<Identifier> = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let ExpressionKind::Identifier(parameter) = argument.kind else {
                return Err(ParseError::invalid_parameter(self.source(), argument.span));
            };
            if parameters.iter().any(|existing| existing.name == parameter.name) {
                return Err(ParseError::duplicate_parameter(
                    self.source(),
                    parameter.span,
                    &parameter.name,
                ));
            }
            parameters.push(parameter);
        }

        self.expect(TokenKind::OpenBrace, "'{' to start the function body")?;
        let mut body = Vec::new();
        while !self.at(TokenKind::CloseBrace) && !self.at_end() {
            body.push(self.parse_statement()?);
        }
        let close = self.expect(TokenKind::CloseBrace, "'}' to close the function body")?;

        let mut span = keyword.span.to(close.span);
        if let Some(semicolon) = self.eat(TokenKind::Semicolon) {
            span = span.to(semicolon.span);
        }

        Ok(Statement::new(
            StatementKind::FunctionDeclaration(FunctionDeclaration {
                name,
                parameters,
                body,
            }),
            span,
        ))
    }

    /// `( expression, ... )`; returns the arguments and the closing paren span
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<(Vec<Expression>, Span)> {
        self.expect(TokenKind::OpenParen, "'('")?;

        let mut arguments = Vec::new();
        if let Some(close) = self.eat(TokenKind::CloseParen) {
            return Ok((arguments, close.span));
        }

        loop {
            arguments.push(self.parse_expression()?);
            if self.eat(TokenKind::Comma).is_none() {
                let close = self.expect(TokenKind::CloseParen, "',' or ')'")?;
                return Ok((arguments, close.span));
            }
        }
    }
}
