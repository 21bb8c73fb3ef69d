//! Lexer module for Go source
//!
//! Lexing happens in two passes:
//!     1. Core tokenization with a vanilla logos lexer, see [lexer_impl].
//!        Newlines and block comments survive this pass as tokens.
//!     2. Semicolon insertion, see [semicolons]. This turns line structure into
//!        explicit terminators and drops newline/comment tokens, so the parser
//!        never has to think about lines.
//!
//! The pretty-printer in [crate::golang::format] only needs pass 1; the
//! declaration parser consumes the output of both.

pub mod lexer_impl;
pub mod semicolons;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans, LexError};
pub use semicolons::insert_semicolons;
pub use tokens::Token;

use std::ops::Range;

/// Main lexer function: tokenize and insert semicolons, keeping spans
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let raw_tokens = tokenize_with_spans(source)?;
    Ok(insert_semicolons(raw_tokens))
}
