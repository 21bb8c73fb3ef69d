//! Implementation of the Go lexer
//!
//! The actual tokenization is handled entirely by logos. The first lexical
//! error aborts tokenization.

use crate::golang::lexer::tokens::Token;
use logos::Logos;
use std::ops::Range;
use thiserror::Error;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A byte sequence logos could not turn into a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid token {text:?}")]
pub struct LexError {
    pub text: String,
    pub span: Range<usize>,
}

/// Tokenize a string and collect tokens with their byte spans.
///
/// A leading byte order mark is skipped; spans still index into `source`.
pub fn tokenize_with_spans(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let (body, offset) = match source.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => (rest, BYTE_ORDER_MARK.len_utf8()),
        None => (source, 0),
    };
    let shift = |span: Range<usize>| span.start + offset..span.end + offset;

    let mut lexer = Token::lexer(body);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, shift(lexer.span()))),
            Err(()) => {
                return Err(LexError {
                    text: lexer.slice().to_string(),
                    span: shift(lexer.span()),
                })
            }
        }
    }

    Ok(tokens)
}

/// Tokenize a string, dropping the spans
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize("package user").unwrap();
        assert_eq!(tokens, vec![Token::Package, Token::Ident("user".to_string())]);
    }

    #[test]
    fn test_spans_are_byte_ranges() {
        let tokens = tokenize_with_spans("type  T int").unwrap();
        let spans: Vec<_> = tokens.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(spans, vec![0..4, 6..7, 8..11]);
    }

    #[test]
    fn test_lex_error_reports_span() {
        let err = tokenize_with_spans("package a\n#").unwrap_err();
        assert_eq!(err.span, 10..11);
        assert_eq!(err.text, "#");
    }

    #[test]
    fn test_leading_byte_order_mark_is_skipped() {
        let tokens = tokenize_with_spans("\u{feff}package p").unwrap();
        assert_eq!(
            tokens,
            vec![(Token::Package, 3..10), (Token::Ident("p".to_string()), 11..12)]
        );
        // Only a leading mark is allowed
        assert!(tokenize("package \u{feff}p").is_err());
    }

    #[test]
    fn test_multiline_source() {
        let tokens = tokenize("type T struct {\n\tID int\n}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Type,
                Token::Ident("T".to_string()),
                Token::Struct,
                Token::LBrace,
                Token::Newline,
                Token::Ident("ID".to_string()),
                Token::Ident("int".to_string()),
                Token::Newline,
                Token::RBrace,
            ]
        );
    }
}
