pub mod domain;
pub mod dto;
pub mod error;
pub mod query;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use query::{compile, Compiler, Predicate, Record, SyntaxError};
