//! Search-query compiler.
//!
//! A query is a whitespace-separated list of clauses:
//!
//! | form            | meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `t:text`        | title contains `text`                     |
//! | `a:text`        | artist contains `text`                    |
//! | `al:text`       | album contains `text`                     |
//! | `y:2020`        | year is 2020                              |
//! | `y:2018-2020`   | year within range, either side optional   |
//! | `e:yes`         | explicit flag (`1/true/yes/on`, `0/false/no/off`) |
//! | `+tag`, `-tag`  | tagged / not tagged                       |
//! | `(...)`         | group                                     |
//! | anything else   | title, artist or album contains the text  |
//!
//! Clauses are joined with `AND` unless separated by `OR`. Double quotes
//! keep whitespace inside one clause and a backslash escapes the next
//! character.

pub mod ast;
pub mod clause;
pub mod eval;
pub mod parser;
pub mod tokenizer;

use crate::error::CoreError;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::debug;

pub use ast::Predicate;
pub use clause::{classify, strip_quotes, Clause};
pub use eval::Record;
pub use parser::parse;
pub use tokenizer::{tokenize, tokenize_with_limit, Token, TokenKind};

pub const DEFAULT_MAX_GROUP_DEPTH: usize = 64;
pub const MAX_GROUP_DEPTH: usize = 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unclosed quote")]
    UnclosedQuote,
    #[error("unclosed bracket")]
    UnclosedBracket,
    #[error("groups nested deeper than {limit}")]
    TooDeep { limit: usize },
}

pub fn validate_max_group_depth(depth: i64) -> Result<usize, CoreError> {
    match usize::try_from(depth) {
        Ok(value) if (1..=MAX_GROUP_DEPTH).contains(&value) => Ok(value),
        _ => Err(CoreError::InvalidGroupDepth(depth)),
    }
}

/// Compiles queries with a cap on group nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    max_depth: Option<usize>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_GROUP_DEPTH),
        }
    }
}

impl Compiler {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn tokenize(&self, query: &str) -> Result<Vec<Token>, SyntaxError> {
        tokenize_with_limit(query, self.max_depth)
    }

    pub fn compile(&self, query: &str) -> Result<Predicate, SyntaxError> {
        let mut tokens: VecDeque<Token> = self.tokenize(query)?.into();
        debug!(tokens = tokens.len(), "compiling query");
        parser::parse_with_limit(&mut tokens, self.max_depth)
    }
}

/// Compiles a query with the default nesting limit.
///
/// Fails with [`SyntaxError::UnclosedQuote`] or
/// [`SyntaxError::UnclosedBracket`] on malformed structure, and with
/// [`SyntaxError::TooDeep`] once groups nest deeper than
/// [`DEFAULT_MAX_GROUP_DEPTH`]. Use [`Compiler::unbounded`] to lift the cap.
pub fn compile(query: &str) -> Result<Predicate, SyntaxError> {
    Compiler::default().compile(query)
}
