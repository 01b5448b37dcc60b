//! Lexer: turns source text into a lazy stream of tokens
//!
//! The lexer never fails. Characters it does not recognize become
//! `ILLEGAL` tokens, which the parser rejects with an ordinary parse error.
//!
//! # Example
//!
//! ```
//! use monkey::lexer::Lexer;
//! use monkey::token::TokenKind;
//!
//! let kinds: Vec<TokenKind> = Lexer::new("let x = 5;").map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Let,
//!         TokenKind::Ident,
//!         TokenKind::Assign,
//!         TokenKind::Int,
//!         TokenKind::Semicolon,
//!     ]
//! );
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::token::{lookup_ident, Token, TokenKind};

/// Scans source text one token at a time.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Produce the next token. Returns `EOF` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some((start, ch)) = self.chars.next() else {
            return Token::eof();
        };

        let kind = match ch {
            '=' if self.eat('=') => return Token::new(TokenKind::Eq, "=="),
            '=' => TokenKind::Assign,
            '!' if self.eat('=') => return Token::new(TokenKind::NotEq, "!="),
            '!' => TokenKind::Bang,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '#' => TokenKind::Sharp,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '"' => return self.read_string(start),
            c if is_letter(c) => return self.read_identifier(start),
            c if c.is_ascii_digit() => return self.read_number(start),
            _ => TokenKind::Illegal,
        };

        Token::new(kind, &self.input[start..start + ch.len_utf8()])
    }

    /// Consume the next character if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    /// Byte offset of the next unread character.
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.chars.next_if(|&(_, c)| is_letter(c)).is_some() {}
        let word = &self.input[start..self.offset()];
        Token::new(lookup_ident(word), word)
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.chars.next_if(|(_, c)| c.is_ascii_digit()).is_some() {}
        Token::new(TokenKind::Int, &self.input[start..self.offset()])
    }

    /// Read a string body; `start` is the offset of the opening quote.
    fn read_string(&mut self, start: usize) -> Token {
        let body_start = start + 1;
        for (i, c) in self.chars.by_ref() {
            if c == '"' {
                return Token::new(TokenKind::String, &self.input[body_start..i]);
            }
        }
        // Unterminated: hand the remainder to the parser as an illegal token
        Token::new(TokenKind::Illegal, &self.input[start..])
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `EOF`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_char_operators() {
        let mut lexer = Lexer::new("== != = !");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Eq, "=="));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::NotEq, "!="));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Assign, "="));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Bang, "!"));
        assert_eq!(lexer.next_token(), Token::eof());
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token(), Token::eof());
        assert_eq!(lexer.next_token(), Token::eof());
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let mut lexer = Lexer::new("\"abc");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Illegal, "\"abc"));
        assert_eq!(lexer.next_token(), Token::eof());
    }

    #[test]
    fn test_non_ascii_is_illegal() {
        let mut lexer = Lexer::new("é1");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Illegal, "é"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Int, "1"));
    }

    #[test]
    fn test_identifier_with_underscore() {
        let mut lexer = Lexer::new("foo_bar1");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, "foo_bar"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Int, "1"));
    }
}
