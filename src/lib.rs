//! Monkey - a tree-walking interpreter
//!
//! Source text flows through the [`Lexer`], the Pratt [`Parser`] and the
//! evaluator, which walks the AST against an [`Environment`].

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod hash;
pub mod value;
pub mod environment;
pub mod builtins;
pub mod evaluator;
pub mod error;

pub use environment::{Env, Environment};
pub use error::{MonkeyError, ParseErrors, Result};
pub use lexer::Lexer;
pub use parser::Parser;
pub use value::Value;

use ast::Program;

/// Parse source into a program, failing with every syntax error found
pub fn parse(source: &str) -> std::result::Result<Program, ParseErrors> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    let errors = parser.into_errors();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(ParseErrors(errors))
    }
}

/// Convenience function to run Monkey code against an environment.
/// Runtime errors come back as `Value::Error`.
pub fn run(source: &str, env: &Env) -> std::result::Result<Value, ParseErrors> {
    let program = parse(source)?;
    Ok(evaluator::eval_program(&program, env))
}

/// Version of the interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
