//! Syntax error types for Monkey
//!
//! Parser failures are collected as [`MonkeyError`] values carrying a source
//! location. Runtime failures never use these types; they are ordinary
//! `Value::Error` values produced by the evaluator.

use crate::token::{Span, TokenKind};
use std::fmt;

/// Error kinds reported by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The token after the current one was not the one the production needs
    ExpectedToken { expected: TokenKind, got: TokenKind },

    /// A token that cannot start an expression
    NoPrefixParseFn(TokenKind),

    /// An integer literal that does not fit in an i64
    InvalidInteger(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ExpectedToken { expected, got } => {
                write!(f, "expected next token to be {}, got {} instead", expected, got)
            }
            ErrorKind::NoPrefixParseFn(kind) => {
                write!(f, "no prefix parse function for {} found", kind)
            }
            ErrorKind::InvalidInteger(literal) => {
                write!(f, "could not parse {} as integer", literal)
            }
        }
    }
}

/// A Monkey syntax error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct MonkeyError {
    pub kind: ErrorKind,
    pub span: Span,
    pub source_line: Option<String>,
}

impl MonkeyError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            source_line: None,
        }
    }

    /// Attach the offending source line for display
    pub fn with_source(mut self, source: &str) -> Self {
        if self.span.line > 0 {
            self.source_line = source.lines().nth(self.span.line - 1).map(str::to_string);
        }
        self
    }
}

impl fmt::Display for MonkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}:{}] {}", self.span.line, self.span.column, self.kind)?;

        if let Some(ref line) = self.source_line {
            write!(f, "\n  | {}", line)?;
            write!(f, "\n  | {}^", " ".repeat(self.span.column.saturating_sub(1)))?;
        }
        Ok(())
    }
}

impl std::error::Error for MonkeyError {}

/// Every syntax error found while parsing one program
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrors(pub Vec<MonkeyError>);

impl ParseErrors {
    pub fn with_source(self, source: &str) -> Self {
        Self(self.0.into_iter().map(|e| e.with_source(source)).collect())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.kind.to_string()).collect()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// Result type for Monkey front-end operations
pub type Result<T> = std::result::Result<T, MonkeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_source() {
        let err = MonkeyError::new(
            ErrorKind::NoPrefixParseFn(TokenKind::Illegal),
            Span::new(8, 9, 2, 3),
        )
        .with_source("let a = 1;\nx @ 2");

        assert_eq!(
            err.to_string(),
            "[line 2:3] no prefix parse function for ILLEGAL found\n  | x @ 2\n  |   ^"
        );
    }
}
