//! Parsing (tokens to AST)
//!
//! The parser pulls tokens from a [`Lexer`] one at a time, looking at most one
//! token ahead. Statements are parsed by recursive descent and expressions by
//! Pratt parsing. Errors are collected as diagnostics; after a failed statement
//! the parser skips to the next statement and keeps going.

mod expr;
mod stmt;

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use tracing::debug;

/// Parser state for building AST from tokens
pub struct Parser {
    lexer: Lexer,
    /// Token under examination
    pub(super) cur: Token,
    /// One-token lookahead
    pub(super) peek: Token,
    pub(super) diagnostics: Vec<Diagnostic>,
    /// `{` minus `}` tokens that have passed through `cur`
    open_braces: usize,
    /// `open_braces` at the opening `{` of each enclosing block
    pub(super) blocks: Vec<usize>,
}

/// Operator precedence levels for Pratt parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // f(x)
    Index,       // a[i]
}

impl Precedence {
    /// Binding power of a token in infix position
    pub(super) fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

impl Parser {
    /// Create a parser reading from `lexer`
    pub fn new(mut lexer: Lexer) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        let open_braces = usize::from(cur.kind == TokenKind::LBrace);
        Self {
            lexer,
            cur,
            peek,
            diagnostics: Vec::new(),
            open_braces,
            blocks: Vec::new(),
        }
    }

    /// Parse the whole input into a program
    ///
    /// Diagnostics are available from [`Parser::errors`] afterwards. A program
    /// with diagnostics is incomplete and must not be evaluated.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.cur_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(()) => self.synchronize(),
            }
            self.next_token();
        }

        Program { statements }
    }

    /// Diagnostics recorded so far
    pub fn errors(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Parse the whole input, returning the program and its diagnostics
    pub fn parse(&mut self) -> (Program, Vec<Diagnostic>) {
        let program = self.parse_program();
        (program, std::mem::take(&mut self.diagnostics))
    }

    // === Token navigation ===

    /// Shift the lookahead into `cur` and pull a new token from the lexer
    pub(super) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
        match self.cur.kind {
            TokenKind::LBrace => self.open_braces += 1,
            TokenKind::RBrace => self.open_braces = self.open_braces.saturating_sub(1),
            _ => {}
        }
    }

    pub(super) fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    pub(super) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance if the lookahead is `kind`, otherwise record an error
    pub(super) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ()> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            self.peek_error(kind);
            Err(())
        }
    }

    pub(super) fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    pub(super) fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur.kind)
    }

    // === Errors ===

    fn peek_error(&mut self, expected: TokenKind) {
        let message = format!(
            "expected next token to be {}, got {} instead",
            expected, self.peek.kind
        );
        let diagnostic = Diagnostic::error_with_code(
            error_codes::UNEXPECTED_TOKEN,
            message,
            self.peek.span,
        )
        .with_label(format!("expected {}", expected));
        self.report(diagnostic);
    }

    pub(super) fn no_prefix_parse_error(&mut self) {
        let message = format!("no prefix parse function for {} found", self.cur.kind);
        let mut diagnostic =
            Diagnostic::error_with_code(error_codes::NO_PREFIX_PARSE, message, self.cur.span)
                .with_label("expected an expression");
        if self.cur_is(TokenKind::Illegal) {
            diagnostic = diagnostic.with_help(format!(
                "'{}' is not a valid character in Monkey source",
                self.cur.literal
            ));
        }
        self.report(diagnostic);
    }

    pub(super) fn integer_error(&mut self) {
        let message = format!("could not parse {} as integer", self.cur.literal);
        let diagnostic =
            Diagnostic::error_with_code(error_codes::INVALID_INTEGER, message, self.cur.span)
                .with_label("integer literal out of range")
                .with_help(format!("integers must fit between {} and {}", i64::MIN, i64::MAX));
        self.report(diagnostic);
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(code = %diagnostic.code, message = %diagnostic.message, "parse error");
        self.diagnostics.push(diagnostic);
    }

    /// Skip the rest of a statement that failed to parse
    ///
    /// Stops on the terminating `;`, or right before a token that starts a new
    /// statement or closes the enclosing block. Braces opened by the broken
    /// statement itself are skipped as a unit. If the failing token already is
    /// the enclosing block's `}`, nothing is consumed.
    pub(super) fn synchronize(&mut self) {
        let base = self.blocks.last().copied().unwrap_or(0);
        let in_block = !self.blocks.is_empty();

        while !self.cur_is(TokenKind::Eof) && !self.at_block_close() {
            if self.cur_is(TokenKind::Semicolon) && self.open_braces == base {
                return;
            }

            let level = self.open_braces == base;
            match self.peek.kind {
                TokenKind::Eof => return,
                TokenKind::Let | TokenKind::Return if level => return,
                TokenKind::RBrace if level && in_block => return,
                _ => self.next_token(),
            }
        }
    }

    /// Whether `cur` is the `}` closing the innermost block
    pub(super) fn at_block_close(&self) -> bool {
        match self.blocks.last() {
            Some(&opened) => self.cur_is(TokenKind::RBrace) && self.open_braces < opened,
            None => false,
        }
    }
}
