//! Go source handling: lexing, declaration parsing, struct extraction and the
//! layout pass applied to generated code.

pub mod ast;
pub mod extract;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod position;
