//! Expression parsing (Pratt parsing)
//!
//! Prefix and infix handlers are chosen by matching on the token kind. Each
//! handler is entered with the token that triggered it as `cur` and leaves
//! `cur` on the last token of the expression it built.

use crate::ast::*;
use crate::parser::{Parser, Precedence};
use crate::token::TokenKind;

impl Parser {
    /// Parse an expression whose operators all bind tighter than `precedence`
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ()> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    /// Parse prefix expression
    fn parse_prefix(&mut self) -> Result<Expression, ()> {
        match self.cur.kind {
            TokenKind::Ident => Ok(Expression::Identifier(self.parse_identifier())),
            TokenKind::Int => self.parse_integer(),
            TokenKind::String => Ok(self.parse_string()),
            TokenKind::True | TokenKind::False => Ok(self.parse_boolean()),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            _ => {
                self.no_prefix_parse_error();
                Err(())
            }
        }
    }

    /// Parse infix expression
    fn parse_infix(&mut self, left: Expression) -> Result<Expression, ()> {
        match self.cur.kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Eq
            | TokenKind::NotEq => self.parse_infix_expression(left),
            TokenKind::LParen => self.parse_call(left),
            TokenKind::LBracket => self.parse_index(left),
            _ => Ok(left),
        }
    }

    // === Literals ===

    pub(super) fn parse_identifier(&mut self) -> Identifier {
        Identifier {
            token: self.cur.clone(),
            value: self.cur.literal.clone(),
        }
    }

    fn parse_integer(&mut self) -> Result<Expression, ()> {
        match self.cur.literal.parse::<i64>() {
            Ok(value) => Ok(Expression::Integer(IntegerLiteral {
                token: self.cur.clone(),
                value,
            })),
            Err(_) => {
                self.integer_error();
                Err(())
            }
        }
    }

    fn parse_string(&mut self) -> Expression {
        Expression::String(StringLiteral {
            token: self.cur.clone(),
            value: self.cur.literal.clone(),
        })
    }

    fn parse_boolean(&mut self) -> Expression {
        Expression::Boolean(BooleanLiteral {
            token: self.cur.clone(),
            value: self.cur_is(TokenKind::True),
        })
    }

    // === Operators ===

    fn parse_prefix_expression(&mut self) -> Result<Expression, ()> {
        let token = self.cur.clone();
        let operator = match token.kind {
            TokenKind::Bang => PrefixOperator::Bang,
            _ => PrefixOperator::Minus,
        };

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression, ()> {
        let token = self.cur.clone();
        let operator = match token.kind {
            TokenKind::Plus => InfixOperator::Plus,
            TokenKind::Minus => InfixOperator::Minus,
            TokenKind::Asterisk => InfixOperator::Asterisk,
            TokenKind::Slash => InfixOperator::Slash,
            TokenKind::Lt => InfixOperator::Lt,
            TokenKind::Gt => InfixOperator::Gt,
            TokenKind::Eq => InfixOperator::Eq,
            _ => InfixOperator::NotEq,
        };
        let precedence = self.cur_precedence();

        self.next_token();
        // Same precedence on the right keeps equal operators left-associative
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped(&mut self) -> Result<Expression, ()> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    // === Compound expressions ===

    /// `if (<cond>) { ... } else { ... }`
    fn parse_if(&mut self) -> Result<Expression, ()> {
        let token = self.cur.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `fn(<params>) { ... }`
    fn parse_function_literal(&mut self) -> Result<Expression, ()> {
        let token = self.cur.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Ok(Expression::Function(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>, ()> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.parse_identifier());

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.parse_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// `<function>(<args>)`; the current token is `(`
    fn parse_call(&mut self, function: Expression) -> Result<Expression, ()> {
        let token = self.cur.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    /// `<left>[<index>]`; the current token is `[`
    fn parse_index(&mut self, left: Expression) -> Result<Expression, ()> {
        let token = self.cur.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Ok(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_array_literal(&mut self) -> Result<Expression, ()> {
        let token = self.cur.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Ok(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// `{<key>: <value>, ...}`
    fn parse_hash_literal(&mut self) -> Result<Expression, ()> {
        let token = self.cur.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RBrace)?;
        Ok(Expression::Hash(HashLiteral { token, pairs }))
    }

    /// Comma-separated expressions up to `end`; the current token is the opener
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>, ()> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }
}
