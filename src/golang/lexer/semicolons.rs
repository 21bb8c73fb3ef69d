//! Automatic semicolon insertion
//!
//! Go's grammar is written with explicit `;` terminators, which the lexer
//! inserts when a line ends after an identifier, a literal, a closing bracket
//! or `++`/`--`. Doing the same here keeps the parser combinators
//! line-agnostic: after this pass the stream has no newline or comment tokens
//! left, only `Semicolon`/`AutoSemicolon` where a statement ends.
//!
//! A block comment that spans a line break acts like a newline.

use crate::golang::lexer::tokens::Token;
use std::ops::Range;

pub fn insert_semicolons(tokens: Vec<(Token, Range<usize>)>) -> Vec<(Token, Range<usize>)> {
    let mut result: Vec<(Token, Range<usize>)> = Vec::with_capacity(tokens.len());

    for (token, span) in tokens {
        let is_line_break = match token {
            Token::Newline | Token::BlockComment(true) => true,
            Token::BlockComment(false) => continue,
            _ => false,
        };

        if is_line_break {
            if needs_semicolon(&result) {
                result.push((Token::AutoSemicolon, span.start..span.start));
            }
            continue;
        }

        result.push((token, span));
    }

    // The end of the file terminates the last line as well
    if needs_semicolon(&result) {
        let end = result.last().map(|(_, span)| span.end).unwrap_or(0);
        result.push((Token::AutoSemicolon, end..end));
    }

    result
}

fn needs_semicolon(tokens: &[(Token, Range<usize>)]) -> bool {
    tokens
        .last()
        .map(|(token, _)| token.ends_statement())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golang::lexer::tokenize_with_spans;

    fn transformed(source: &str) -> Vec<Token> {
        insert_semicolons(tokenize_with_spans(source).unwrap())
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test]
    fn test_semicolon_after_identifier_line() {
        assert_eq!(
            transformed("package user\n"),
            vec![Token::Package, ident("user"), Token::AutoSemicolon]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace() {
        assert_eq!(
            transformed("type T struct {\nID int\n}\n"),
            vec![
                Token::Type,
                ident("T"),
                Token::Struct,
                Token::LBrace,
                ident("ID"),
                ident("int"),
                Token::AutoSemicolon,
                Token::RBrace,
                Token::AutoSemicolon,
            ]
        );
    }

    #[test]
    fn test_blank_lines_insert_once() {
        assert_eq!(
            transformed("a\n\n\nb"),
            vec![
                ident("a"),
                Token::AutoSemicolon,
                ident("b"),
                Token::AutoSemicolon
            ]
        );
    }

    #[test]
    fn test_semicolon_at_end_of_file() {
        assert_eq!(
            transformed("package user; type T int"),
            vec![
                Token::Package,
                ident("user"),
                Token::Semicolon,
                Token::Type,
                ident("T"),
                ident("int"),
                Token::AutoSemicolon,
            ]
        );
    }

    #[test]
    fn test_tag_literal_ends_line() {
        let tokens = transformed("ID int `db:\"id\"`\n");
        assert_eq!(tokens.last(), Some(&Token::AutoSemicolon));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_multiline_block_comment_acts_as_newline() {
        assert_eq!(
            transformed("a /*\n*/ b /* inline */ c"),
            vec![
                ident("a"),
                Token::AutoSemicolon,
                ident("b"),
                ident("c"),
                Token::AutoSemicolon
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(transformed("").is_empty());
        assert!(transformed("\n\n// only a comment\n").is_empty());
    }
}
