//! Abstract Syntax Tree definitions for Monkey
//!
//! Every node renders back to a canonical, fully parenthesized source form
//! through `Display`.

use std::fmt;
use std::rc::Rc;

use crate::token::Token;

/// A name, either bound by `let`/parameters or referenced in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefixOp {
    Not, // !
    Neg, // -
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Neg => write!(f, "-"),
        }
    }
}

/// Infix (binary) operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfixOp {
    Add,   // +
    Sub,   // -
    Mul,   // *
    Div,   // /
    Lt,    // <
    Gt,    // >
    Eq,    // ==
    NotEq, // !=
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfixOp::Add => write!(f, "+"),
            InfixOp::Sub => write!(f, "-"),
            InfixOp::Mul => write!(f, "*"),
            InfixOp::Div => write!(f, "/"),
            InfixOp::Lt => write!(f, "<"),
            InfixOp::Gt => write!(f, ">"),
            InfixOp::Eq => write!(f, "=="),
            InfixOp::NotEq => write!(f, "!="),
        }
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Variable reference: foo
    Identifier(Identifier),

    /// Integer literal: 42
    Integer { token: Token, value: i64 },

    /// String literal: "hello"
    String { token: Token, value: String },

    /// Boolean literal: true, false
    Boolean { token: Token, value: bool },

    /// Array literal: [1, 2 * 2]
    Array { token: Token, elements: Vec<Expression> },

    /// Hash literal: {"a": 1}; pairs keep source order
    Hash {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },

    /// Prefix operation: -x, !y
    Prefix {
        token: Token,
        operator: PrefixOp,
        right: Box<Expression>,
    },

    /// Infix operation: a + b
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: InfixOp,
        right: Box<Expression>,
    },

    /// if (cond) { } else { }
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },

    /// Function literal: fn(a, b) { a + b }
    Function {
        token: Token,
        parameters: Rc<Vec<Identifier>>,
        body: Rc<BlockStatement>,
    },

    /// Call: add(1, 2)
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// Index: arr[0], hash["key"]
    Index {
        token: Token,
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(ident) => &ident.token,
            Expression::Integer { token, .. }
            | Expression::String { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::Array { token, .. }
            | Expression::Hash { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. }
            | Expression::Function { token, .. }
            | Expression::Call { token, .. }
            | Expression::Index { token, .. } => token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::Integer { value, .. } => write!(f, "{}", value),
            Expression::String { value, .. } => write!(f, "\"{}\"", value),
            Expression::Boolean { value, .. } => write!(f, "{}", value),
            Expression::Array { elements, .. } => write!(f, "[{}]", join(elements)),
            Expression::Hash { pairs, .. } => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}:{}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Expression::Prefix { operator, right, .. } => write!(f, "({}{})", operator, right),
            Expression::Infix { left, operator, right, .. } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expression::If { condition, consequence, alternative, .. } => {
                write!(f, "if ({}) {{ {} }}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {} }}", alternative)?;
                }
                Ok(())
            }
            Expression::Function { token, parameters, body } => {
                write!(f, "{}({}) {{ {} }}", token.literal, join(parameters.iter()), body)
            }
            Expression::Call { function, arguments, .. } => {
                write!(f, "{}({})", function, join(arguments))
            }
            Expression::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
        }
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `{ stmt* }` as used by if-branches and function bodies
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// let x = expr;
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },

    /// return expr;
    Return { token: Token, value: Expression },

    /// A bare expression, optionally followed by `;`
    Expression { token: Token, expression: Expression },

    Block(BlockStatement),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let { token, .. }
            | Statement::Return { token, .. }
            | Statement::Expression { token, .. } => &token.literal,
            Statement::Block(block) => &block.token.literal,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { token, name, value } => {
                write!(f, "{} {} = {};", token.literal, name, value)
            }
            Statement::Return { token, value } => write!(f, "{} {};", token.literal, value),
            Statement::Expression { expression, .. } => write!(f, "{}", expression),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

/// A complete program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |stmt| stmt.token_literal())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, TokenKind};

    fn ident(name: &str) -> Identifier {
        Identifier::new(Token::new(TokenKind::Ident, name, Span::default()))
    }

    #[test]
    fn test_let_rendering() {
        let program = Program::new(vec![Statement::Let {
            token: Token::new(TokenKind::Let, "let", Span::default()),
            name: ident("myVar"),
            value: Expression::Identifier(ident("anotherVar")),
        }]);

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_empty_program() {
        let program = Program::default();
        assert_eq!(program.to_string(), "");
        assert_eq!(program.token_literal(), "");
    }
}
