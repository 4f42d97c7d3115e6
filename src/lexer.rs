//! Lexer for Monkey
//!
//! Converts source code into a stream of tokens, one token per call to
//! [`Lexer::next_token`].

use crate::token::{lookup_ident, Span, Token, TokenKind};

/// The lexer state
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire source, including the trailing EOF token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Get the next token. Once input is exhausted this keeps returning EOF.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_line = self.line;
        let start_column = self.column;

        let Some(&(start_pos, ch)) = self.chars.peek() else {
            let span = Span::new(self.current_pos, self.current_pos, start_line, start_column);
            return Token::new(TokenKind::Eof, "", span);
        };

        let kind = match ch {
            '=' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '+' => { self.advance(); TokenKind::Plus }
            '-' => { self.advance(); TokenKind::Minus }
            '*' => { self.advance(); TokenKind::Asterisk }
            '/' => { self.advance(); TokenKind::Slash }
            '<' => { self.advance(); TokenKind::Lt }
            '>' => { self.advance(); TokenKind::Gt }
            ',' => { self.advance(); TokenKind::Comma }
            ';' => { self.advance(); TokenKind::Semicolon }
            ':' => { self.advance(); TokenKind::Colon }
            '(' => { self.advance(); TokenKind::LeftParen }
            ')' => { self.advance(); TokenKind::RightParen }
            '{' => { self.advance(); TokenKind::LeftBrace }
            '}' => { self.advance(); TokenKind::RightBrace }
            '[' => { self.advance(); TokenKind::LeftBracket }
            ']' => { self.advance(); TokenKind::RightBracket }

            '"' => {
                let literal = self.scan_string();
                let span = Span::new(start_pos, self.current_pos, start_line, start_column);
                return Token::new(TokenKind::String, literal, span);
            }

            c if is_digit(c) => {
                self.consume_while(is_digit);
                TokenKind::Int
            }

            c if is_letter(c) => {
                self.consume_while(is_letter);
                lookup_ident(&self.source[start_pos..self.current_pos])
            }

            _ => {
                self.advance();
                TokenKind::Illegal
            }
        };

        let literal = &self.source[start_pos..self.current_pos];
        Token::new(
            kind,
            literal,
            Span::new(start_pos, self.current_pos, start_line, start_column),
        )
    }

    /// Advance and return the current character
    fn advance(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.current_pos = pos + ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Peek at the next character without advancing
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn consume_while(&mut self, pred: fn(char) -> bool) {
        while self.peek_char().is_some_and(pred) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.consume_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    }

    /// Scan a string literal. There are no escapes: the next `"` always
    /// terminates, and end of input closes an unterminated string.
    fn scan_string(&mut self) -> String {
        // opening quote
        self.advance();

        let start = self.current_pos;
        self.consume_while(|c| c != '"');
        let value = self.source[start..self.current_pos].to_string();

        // closing quote, if any
        self.advance();
        value
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
