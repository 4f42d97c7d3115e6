//! Parser for Monkey
//!
//! A Pratt (operator-precedence) parser. Every token kind that can start an
//! expression has a prefix parse function, and every operator that can
//! continue one has an infix parse function plus a binding precedence.
//!
//! The parser never stops at the first mistake: each failed statement is
//! recorded in [`Parser::errors`] and parsing resumes after it.

use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Identifier, InfixOp, PrefixOp, Program, Statement};
use crate::error::{ErrorKind, MonkeyError, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Binding power of operators, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
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
    fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LeftParen => Precedence::Call,
            TokenKind::LeftBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Result<Expression>;
type InfixParseFn<'a> = fn(&mut Parser<'a>, Expression) -> Result<Expression>;

/// The parser state
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<MonkeyError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser, priming the two lookahead tokens
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    /// Syntax errors collected so far
    pub fn errors(&self) -> &[MonkeyError] {
        &self.errors
    }

    /// Take ownership of the collected syntax errors
    pub fn into_errors(self) -> Vec<MonkeyError> {
        self.errors
    }

    /// Parse statements until end of input
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current.is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => self.errors.push(err),
            }
            self.advance();
        }

        Program::new(statements)
    }

    // ==================== Statements ====================

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::new(self.current.clone());

        self.expect_peek(TokenKind::Assign)?;
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        let token = self.current.clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Expression { token, expression })
    }

    /// Parse `{ stmt* }` with the current token on `{`. Statements that fail
    /// inside the block are recorded and skipped like at the top level.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.advance();

        while !self.current.is(TokenKind::RightBrace) && !self.current.is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => self.errors.push(err),
            }
            self.advance();
        }

        BlockStatement { token, statements }
    }

    // ==================== Expressions ====================

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let Some(prefix) = Self::prefix_parse_fn(self.current.kind) else {
            return Err(MonkeyError::new(
                ErrorKind::NoPrefixParseFn(self.current.kind),
                self.current.span,
            ));
        };

        let mut left = prefix(self)?;

        while !self.peek.is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_parse_fn(self.peek.kind) else {
                return Ok(left);
            };
            self.advance();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn<'a>> {
        let f: PrefixParseFn<'a> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::String => Self::parse_string_literal,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix_expression,
            TokenKind::LeftParen => Self::parse_grouped_expression,
            TokenKind::If => Self::parse_if_expression,
            TokenKind::Function => Self::parse_function_literal,
            TokenKind::LeftBracket => Self::parse_array_literal,
            TokenKind::LeftBrace => Self::parse_hash_literal,
            _ => return None,
        };
        Some(f)
    }

    fn infix_parse_fn(kind: TokenKind) -> Option<InfixParseFn<'a>> {
        let f: InfixParseFn<'a> = match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Eq
            | TokenKind::NotEq => Self::parse_infix_expression,
            TokenKind::LeftParen => Self::parse_call_expression,
            TokenKind::LeftBracket => Self::parse_index_expression,
            _ => return None,
        };
        Some(f)
    }

    fn parse_identifier(&mut self) -> Result<Expression> {
        Ok(Expression::Identifier(Identifier::new(self.current.clone())))
    }

    fn parse_integer_literal(&mut self) -> Result<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Ok(Expression::Integer { token, value }),
            Err(_) => Err(MonkeyError::new(
                ErrorKind::InvalidInteger(token.literal),
                token.span,
            )),
        }
    }

    fn parse_string_literal(&mut self) -> Result<Expression> {
        let token = self.current.clone();
        let value = token.literal.clone();
        Ok(Expression::String { token, value })
    }

    fn parse_boolean(&mut self) -> Result<Expression> {
        let token = self.current.clone();
        let value = token.is(TokenKind::True);
        Ok(Expression::Boolean { token, value })
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let token = self.current.clone();
        let operator = match token.kind {
            TokenKind::Bang => PrefixOp::Not,
            _ => PrefixOp::Neg,
        };

        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let token = self.current.clone();
        let operator = match token.kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Asterisk => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Eq => InfixOp::Eq,
            _ => InfixOp::NotEq,
        };
        let precedence = self.current_precedence();

        self.advance();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;
        Ok(expr)
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LeftParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block_statement();

        let alternative = if self.peek.is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LeftBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Ok(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LeftParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let body = self.parse_block_statement();

        Ok(Expression::Function {
            token,
            parameters: Rc::new(parameters),
            body: Rc::new(body),
        })
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>> {
        let mut params = Vec::new();

        if self.peek.is(TokenKind::RightParen) {
            self.advance();
            return Ok(params);
        }

        self.expect_peek(TokenKind::Ident)?;
        params.push(Identifier::new(self.current.clone()));

        while self.peek.is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Ident)?;
            params.push(Identifier::new(self.current.clone()));
        }

        self.expect_peek(TokenKind::RightParen)?;
        Ok(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_expression_list(TokenKind::RightParen)?;

        Ok(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let token = self.current.clone();
        let elements = self.parse_expression_list(TokenKind::RightBracket)?;
        Ok(Expression::Array { token, elements })
    }

    /// Comma-separated expressions up to `end`, with the current token on
    /// the opening delimiter
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek.is(end) {
            self.advance();
            return Ok(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }

    fn parse_index_expression(&mut self, left: Expression) -> Result<Expression> {
        let token = self.current.clone();

        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightBracket)?;

        Ok(Expression::Index {
            token,
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    fn parse_hash_literal(&mut self) -> Result<Expression> {
        let token = self.current.clone();
        let mut pairs = Vec::new();

        while !self.peek.is(TokenKind::RightBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek.is(TokenKind::RightBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RightBrace)?;
        Ok(Expression::Hash { token, pairs })
    }

    // ==================== Helpers ====================

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn skip_semicolon(&mut self) {
        if self.peek.is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Advance if the next token has the expected kind, otherwise fail
    fn expect_peek(&mut self, kind: TokenKind) -> Result<()> {
        if self.peek.is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(MonkeyError::new(
                ErrorKind::ExpectedToken {
                    expected: kind,
                    got: self.peek.kind,
                },
                self.peek.span,
            ))
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }
}
