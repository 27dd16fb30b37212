//! Lexical analysis (tokenization)
//!
//! The lexer converts Monkey source code into tokens, one per call to
//! [`Lexer::next_token`]. It never fails: characters it does not understand
//! become [`TokenKind::Illegal`] tokens and are left for the parser to report.

mod literals;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Characters of source code
    chars: Vec<char>,
    /// Current position in chars
    current: usize,
    /// Start position of current token
    start_pos: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            start_pos: 0,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Scan the next token. Keeps returning `Eof` once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.start_pos = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof, "");
        }

        let c = self.advance();

        match c {
            // Single-character tokens
            '+' => self.make_token(TokenKind::Plus, "+"),
            '-' => self.make_token(TokenKind::Minus, "-"),
            '*' => self.make_token(TokenKind::Asterisk, "*"),
            '/' => self.make_token(TokenKind::Slash, "/"),
            '<' => self.make_token(TokenKind::Lt, "<"),
            '>' => self.make_token(TokenKind::Gt, ">"),
            ',' => self.make_token(TokenKind::Comma, ","),
            ';' => self.make_token(TokenKind::Semicolon, ";"),
            ':' => self.make_token(TokenKind::Colon, ":"),
            '(' => self.make_token(TokenKind::LParen, "("),
            ')' => self.make_token(TokenKind::RParen, ")"),
            '{' => self.make_token(TokenKind::LBrace, "{"),
            '}' => self.make_token(TokenKind::RBrace, "}"),
            '[' => self.make_token(TokenKind::LBracket, "["),
            ']' => self.make_token(TokenKind::RBracket, "]"),

            // Two-character tokens
            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Eq, "==")
                } else {
                    self.make_token(TokenKind::Assign, "=")
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::NotEq, "!=")
                } else {
                    self.make_token(TokenKind::Bang, "!")
                }
            }

            // String literals
            '"' => self.string(),

            // Integers
            c if c.is_ascii_digit() => self.integer(),

            // Identifiers and keywords
            c if is_letter(c) => self.identifier(),

            _ => self.make_token(TokenKind::Illegal, &c.to_string()),
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    // === Character navigation ===

    /// Advance to next character and return it
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    /// Peek at current character without advancing
    pub(super) fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    /// Check if current character matches expected, and advance if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Check if we've reached the end of source
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    /// Source text between `start` and the current position
    pub(super) fn text_from(&self, start: usize) -> String {
        self.chars[start..self.current].iter().collect()
    }

    /// Create a token with the given kind and literal
    pub(super) fn make_token(&self, kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal, Span::new(self.start_pos, self.current))
    }
}

/// Characters allowed in identifiers
pub(super) fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_single_char_tokens() {
        assert_eq!(
            kinds("=+(){},;"),
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("10 == 10; 10 != 9; !x; y = 1"),
            vec![
                TokenKind::Int,
                TokenKind::Eq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::NotEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Bang,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("let ab == 5").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 6));
        assert_eq!(tokens[2].span, Span::new(7, 9));
        assert_eq!(tokens[3].span, Span::new(10, 11));
        assert_eq!(tokens[4].span, Span::new(11, 11));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_illegal_characters() {
        let tokens = Lexer::new("1 @ 2 & é").tokenize();
        let illegal: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Illegal)
            .map(|t| t.literal.as_str())
            .collect();
        assert_eq!(illegal, vec!["@", "&", "é"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \t\r\n "), vec![TokenKind::Eof]);
    }
}
