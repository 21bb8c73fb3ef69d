//! Parser implementation for Go declarations using chumsky
//!
//! Builds on the token stream from the lexer (semicolons already inserted)
//! and produces the declaration tree in [crate::golang::ast].

pub mod api;
pub(crate) mod combinators;

pub use api::{parse, ParseError};
