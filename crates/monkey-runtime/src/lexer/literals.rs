//! Literal scanning for the lexer

use crate::lexer::{is_letter, Lexer};
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a string literal. The opening quote has been consumed.
    ///
    /// There are no escape sequences. A string missing its closing quote
    /// runs to the end of input.
    pub(super) fn string(&mut self) -> Token {
        let start = self.current;

        while !self.is_at_end() && self.peek() != '"' {
            self.advance();
        }

        let value = self.text_from(start);

        if !self.is_at_end() {
            self.advance(); // Closing "
        }

        self.make_token(TokenKind::String, &value)
    }

    /// Scan an integer literal (a run of decimal digits)
    pub(super) fn integer(&mut self) -> Token {
        let start = self.current - 1; // -1 because we already advanced past first digit

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }

        let literal = self.text_from(start);
        self.make_token(TokenKind::Int, &literal)
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        let start = self.current - 1; // -1 because we already advanced past first char

        while !self.is_at_end() && is_letter(self.peek()) {
            self.advance();
        }

        let literal = self.text_from(start);
        let kind = TokenKind::lookup_ident(&literal);

        self.make_token(kind, &literal)
    }
}
