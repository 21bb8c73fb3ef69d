//! Public API for the parser.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use thiserror::Error;

use crate::golang::ast::SourceFile;
use crate::golang::lexer::{lex, LexError};
use crate::golang::parser::combinators::{source_file, ParserError, TokenSpan};
use crate::golang::position::{Position, SourceLocation};

/// A syntax error with the position of the offending token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    fn from_lex_error(source: &str, err: LexError) -> Self {
        let location = SourceLocation::new(source);
        ParseError {
            message: err.to_string(),
            position: location.byte_to_position(err.span.start),
        }
    }

    fn from_parser_error(source: &str, tokens: &[TokenSpan], err: &ParserError) -> Self {
        let location = SourceLocation::new(source);

        let (found, offset) = match err.found() {
            Some((token, range)) => (token.to_string(), range.start),
            None => (
                "end of file".to_string(),
                tokens.last().map(|(_, r)| r.end).unwrap_or(source.len()),
            ),
        };

        let message = match (err.reason(), err.label()) {
            (SimpleReason::Custom(msg), _) => msg.clone(),
            (SimpleReason::Unclosed { delimiter, .. }, _) => {
                format!("unclosed {}", delimiter.0)
            }
            (SimpleReason::Unexpected, Some(label)) => format!("unexpected {found} in {label}"),
            (SimpleReason::Unexpected, None) => format!("unexpected {found}"),
        };

        ParseError {
            message,
            position: location.byte_to_position(offset),
        }
    }
}

/// Parse Go source text into a declaration tree
pub fn parse(source: &str) -> Result<SourceFile, ParseError> {
    let tokens = lex(source).map_err(|e| ParseError::from_lex_error(source, e))?;

    source_file().parse(tokens.clone()).map_err(|errors| {
        tracing::debug!(count = errors.len(), "parser reported errors");
        match errors.first() {
            Some(err) => ParseError::from_parser_error(source, &tokens, err),
            None => ParseError {
                message: "invalid source".to_string(),
                position: Position::new(1, 1),
            },
        }
    })
}
