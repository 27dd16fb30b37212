//! Statement parsing

use crate::ast::*;
use crate::parser::{Parser, Precedence};
use crate::token::TokenKind;

impl Parser {
    /// Parse a statement starting at the current token
    pub(super) fn parse_statement(&mut self) -> Result<Statement, ()> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    /// `let <ident> = <expr>;`
    fn parse_let_statement(&mut self) -> Result<LetStatement, ()> {
        let token = self.cur.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier {
            token: self.cur.clone(),
            value: self.cur.literal.clone(),
        };

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(LetStatement { token, name, value })
    }

    /// `return <expr>;`
    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ()> {
        let token = self.cur.clone();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ()> {
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(ExpressionStatement { token, expression })
    }

    /// Parse statements up to the closing `}` (or end of input)
    ///
    /// The current token is the opening `{`. Statements that fail to parse
    /// are dropped after their diagnostics are recorded.
    pub(super) fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur.clone();
        let mut statements = Vec::new();

        self.blocks.push(self.open_braces);
        self.next_token();

        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(()) => {
                    self.synchronize();
                    // The failing token was this block's own `}`
                    if self.at_block_close() {
                        break;
                    }
                }
            }
            self.next_token();
        }

        self.blocks.pop();
        BlockStatement { token, statements }
    }

    /// Statement terminators are optional
    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse_ok(source: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        program
    }

    #[test]
    fn test_semicolons_are_optional() {
        let program = parse_ok("let a = 1\nlet b = 2\nreturn a");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(program.to_string(), "let a = 1;let b = 2;return a;");
    }

    #[test]
    fn test_expression_statement_token() {
        let program = parse_ok("foobar;");
        match &program.statements[0] {
            Statement::Expression(stmt) => {
                assert_eq!(stmt.token_literal(), "foobar");
                assert_eq!(stmt.to_string(), "foobar");
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_block_keeps_statements_after_error() {
        let mut parser = Parser::new(Lexer::new("fn() { let = 1; x }"));
        let program = parser.parse_program();
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(program.to_string(), "fn() x");
    }

    #[test]
    fn test_unclosed_block_ends_at_eof() {
        let program = parse_ok("if (x) { y");
        assert_eq!(program.to_string(), "ifx y");
    }
}
