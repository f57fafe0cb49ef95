// Object literal parsing
// `{ key: value, shorthand }` sits between assignment and additive expressions

use crate::ast::*;
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_object_expr(&mut self) -> ParseResult<Expression> {
        if !self.at(TokenKind::OpenBrace) {
            return self.parse_additive_expr();
        }

        let open = self.advance();
        let mut properties = Vec::new();

        let close = loop {
            if let Some(close) = self.eat(TokenKind::CloseBrace) {
                break close;
            }

            let key = self.expect(TokenKind::Identifier, "a property name or '}'")?;
            let key = Identifier::new(key.value, key.span);

            let value = match self.eat(TokenKind::Colon) {
                Some(_) => Some(self.parse_expression()?),
                None => None,
            };

            let span = value
                .as_ref()
                .map_or(key.span, |value| key.span.to(value.span));
            properties.push(Property { key, value, span });

            if self.eat(TokenKind::Comma).is_none() {
                break self.expect(TokenKind::CloseBrace, "',' or '}'")?;
            }
        };

        Ok(Expression::new(
            ExpressionKind::ObjectLiteral(ObjectLiteral { properties }),
            open.span.to(close.span),
        ))
    }
}
