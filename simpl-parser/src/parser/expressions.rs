// Expression parsing module
// One function per precedence tier, lowest first

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Entry point for any nested expression
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.nested(Self::parse_assignment_expr)
    }

    /// `assignee = value`, right-associative: `a = b = c` is `a = (b = c)`
    fn parse_assignment_expr(&mut self) -> ParseResult<Expression> {
        let assignee = self.parse_object_expr()?;

        if !self.at(TokenKind::Equals) {
            return Ok(assignee);
        }

        if !matches!(
            assignee.kind,
            ExpressionKind::Identifier(_) | ExpressionKind::Member(_)
        ) {
            return Err(ParseError::invalid_assignment_target(
                self.source(),
                assignee.span,
            ));
        }

        self.advance();
        let value = self.nested(Self::parse_assignment_expr)?;
        let span = assignee.span.to(value.span);

        Ok(Expression::new(
            ExpressionKind::Assignment(AssignmentExpr {
                assignee: Box::new(assignee),
                value: Box::new(value),
            }),
            span,
        ))
    }

    /// `+` and `-`, folding left
    pub(crate) fn parse_additive_expr(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative_expr()?;
        let depth = self.depth;

        while let Some(operator) =
            self.current_operator(&[BinaryOperator::Add, BinaryOperator::Subtract])
        {
            self.deepen()?;
            self.advance();
            let right = self.parse_multiplicative_expr()?;
            left = Expression::binary(operator, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// `*`, `/` and `%`, folding left
    fn parse_multiplicative_expr(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expr()?;
        let depth = self.depth;

        while let Some(operator) = self.current_operator(&[
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Modulo,
        ]) {
            self.deepen()?;
            self.advance();
            let right = self.parse_unary_expr()?;
            left = Expression::binary(operator, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Prefix `-`
    fn parse_unary_expr(&mut self) -> ParseResult<Expression> {
        if !self.current().is_operator("-") {
            return self.parse_call_member_expr();
        }

        let minus = self.advance();
        let operand = self.nested(Self::parse_unary_expr)?;
        let span = minus.span.to(operand.span);

        Ok(Expression::new(
            ExpressionKind::Unary(UnaryExpr {
                operator: UnaryOperator::Negate,
                operand: Box::new(operand),
            }),
            span,
        ))
    }

    /// Member access followed by any number of call groups: `f(1)(2)`
    fn parse_call_member_expr(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_member_expr()?;
        let depth = self.depth;

        while self.at(TokenKind::OpenParen) {
            self.deepen()?;
            let (arguments, close) = self.parse_arguments()?;
            let span = expression.span.to(close);
            expression = Expression::new(
                ExpressionKind::Call(CallExpr {
                    callee: Box::new(expression),
                    arguments,
                }),
                span,
            );
        }

        self.depth = depth;
        Ok(expression)
    }

    /// `object.name` and `object[expression]`, chained left to right
    fn parse_member_expr(&mut self) -> ParseResult<Expression> {
        let mut object = self.parse_primary_expr()?;
        let depth = self.depth;

        loop {
            let (property, end) = match self.current().kind {
                TokenKind::Dot => {
                    self.deepen()?;
                    self.advance();
                    let name = self.expect(TokenKind::Identifier, "a property name after '.'")?;
                    let span = name.span;
                    (MemberProperty::Named(Identifier::new(name.value, span)), span)
                }
                TokenKind::OpenBracket => {
                    self.deepen()?;
                    self.advance();
                    let key = self.parse_expression()?;
                    let close = self.expect(TokenKind::CloseBracket, "']'")?;
                    (MemberProperty::Computed(Box::new(key)), close.span)
                }
                _ => {
                    self.depth = depth;
                    return Ok(object);
                }
            };

            let span = object.span.to(end);
            object = Expression::new(
                ExpressionKind::Member(MemberExpr {
                    object: Box::new(object),
                    property,
                }),
                span,
            );
        }
    }

    fn parse_primary_expr(&mut self) -> ParseResult<Expression> {
        match self.current().kind {
            TokenKind::Number => {
                let token = self.advance();
                let value: f64 = token
                    .value
                    .parse()
                    .map_err(|_| ParseError::invalid_number(self.source(), &token))?;
                Ok(Expression::new(
                    ExpressionKind::NumericLiteral(NumericLiteral {
                        value,
                        raw: token.value,
                    }),
                    token.span,
                ))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expression::new(
                    ExpressionKind::Identifier(Identifier::new(token.value, token.span)),
                    token.span,
                ))
            }
            TokenKind::Null => {
                let token = self.advance();
                Ok(Expression::new(ExpressionKind::NullLiteral, token.span))
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::CloseParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// The current token as a binary operator, if it is one of `allowed`
    fn current_operator(&self, allowed: &[BinaryOperator]) -> Option<BinaryOperator> {
        let token = self.current();
        if !token.is(TokenKind::BinaryOperator) {
            return None;
        }
        BinaryOperator::from_symbol(&token.value).filter(|operator| allowed.contains(operator))
    }
}
