//! Makefile-style rule file tokenizer, parser, expander, and printer.
//!
//! Turns the text of a build-rule file into a rule-oriented AST,
//! resolves the automatic all-prerequisites variable inside recipes,
//! and prints the result back as rule-file text.
//!
//! # Quick start
//!
//! ## Parse, expand, and print
//!
//! ```
//! use makefile_rs::{format, parse_str};
//!
//! let mut program = parse_str("bundle: a.js b.js\n\tconcat $<\n").unwrap();
//! program.expand().unwrap();
//! assert_eq!(format(&program), "bundle: a.js b.js\n\tconcat a.jsb.js\n");
//! ```
//!
//! ## Build a program in code
//!
//! ```
//! use makefile_rs::{CommandLine, Program, Target, format};
//!
//! let program = Program::new().target(
//!     Target::new("app")
//!         .prerequisite("main.o")
//!         .command(CommandLine::new().words(&["link", "app"])),
//! );
//!
//! assert_eq!(format(&program), "app: main.o\n\tlink app\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod config;
pub mod expander;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    ALL_PREREQUISITES, Assignment, CommandLine, Expression, Identifier, Node, Program,
    SymbolTable, Target, VariableReference,
};
pub use config::Config;
pub use expander::{ExpandError, ExpandErrorKind};
pub use formatter::{format, write_to};
pub use lexer::{LexError, LexErrorKind, Tokenizer, tokenize};
pub use parser::{ParseError, ParseErrorKind, TokenCursor, TokenSource, parse};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering lexing, parsing, and expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// An expansion error.
    #[error("{0}")]
    Expand(#[from] ExpandError),
}

/// Tokenize and parse a rule file in one streaming pass.
pub fn parse_str(input: &str) -> Result<Program, Error> {
    parse_str_with(input, &Config::default())
}

/// Like [`parse_str`] with explicit settings.
pub fn parse_str_with(input: &str, config: &Config) -> Result<Program, Error> {
    let mut program = Program::new();
    program.build_with(&mut Tokenizer::new(input), config)?;
    Ok(program)
}
