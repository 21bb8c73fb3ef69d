//! Token definitions for Go source
//!
//! Only the keywords the declaration parser needs are split out; every other
//! keyword lexes as an identifier, which keeps the semicolon rule simple (an
//! identifier at the end of a line gets a semicolon, as Go's own lexer does for
//! `return`, `break` and friends).
use logos::{Lexer, Logos};
use std::fmt;

/// All possible tokens in Go source text
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("type")]
    Type,
    #[token("struct")]
    Struct,
    #[token("func")]
    Func,
    #[token("var")]
    Var,
    #[token("const")]
    Const,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Literals keep their full source text, quotes included
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_string())]
    String(String),
    #[regex(r"`[^`]*`", |lex| lex.slice().to_string())]
    RawString(String),
    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    Rune,
    #[regex(r"[0-9]([0-9a-zA-Z_.]|[eEpP][+-])*")]
    #[regex(r"\.[0-9]([0-9a-zA-Z_]|[eEpP][+-])*")]
    Number,

    // Brackets
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Punctuation
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token("*")]
    Star,
    #[regex(r"[+\-%&|^<>=!~]+|/=?", |lex| lex.slice().to_string())]
    Operator(String),

    // Line structure
    #[token("\n")]
    Newline,
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
    /// Carries whether the comment spans a line break
    #[token("/*", block_comment)]
    BlockComment(bool),

    /// Inserted by the semicolon transformation, never produced by logos
    AutoSemicolon,
}

/// Consume a block comment up to its `*/`. An unterminated comment is an error.
fn block_comment(lex: &mut Lexer<Token>) -> Option<bool> {
    let end = lex.remainder().find("*/")?;
    let spans_lines = lex.remainder()[..end].contains('\n');
    lex.bump(end + 2);
    Some(spans_lines)
}

impl Token {
    pub fn is_open_bracket(&self) -> bool {
        matches!(self, Token::LBrace | Token::LParen | Token::LBracket)
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(self, Token::RBrace | Token::RParen | Token::RBracket)
    }

    pub fn is_bracket(&self) -> bool {
        self.is_open_bracket() || self.is_close_bracket()
    }

    /// The closing bracket matching an opening one
    pub fn closing(&self) -> Option<Token> {
        match self {
            Token::LBrace => Some(Token::RBrace),
            Token::LParen => Some(Token::RParen),
            Token::LBracket => Some(Token::RBracket),
            _ => None,
        }
    }

    /// Explicit or inserted statement terminator
    pub fn is_semicolon(&self) -> bool {
        matches!(self, Token::Semicolon | Token::AutoSemicolon)
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self, Token::String(_) | Token::RawString(_))
    }

    /// Whether a line ending right after this token gets a semicolon
    pub fn ends_statement(&self) -> bool {
        match self {
            Token::Ident(_)
            | Token::String(_)
            | Token::RawString(_)
            | Token::Rune
            | Token::Number
            | Token::RParen
            | Token::RBracket
            | Token::RBrace => true,
            Token::Operator(op) => op == "++" || op == "--",
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Package => write!(f, "'package'"),
            Token::Import => write!(f, "'import'"),
            Token::Type => write!(f, "'type'"),
            Token::Struct => write!(f, "'struct'"),
            Token::Func => write!(f, "'func'"),
            Token::Var => write!(f, "'var'"),
            Token::Const => write!(f, "'const'"),
            Token::Ident(name) => write!(f, "identifier {name}"),
            Token::String(text) | Token::RawString(text) => write!(f, "string literal {text}"),
            Token::Rune => write!(f, "rune literal"),
            Token::Number => write!(f, "number literal"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Semicolon => write!(f, "';'"),
            Token::AutoSemicolon => write!(f, "newline"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::Ellipsis => write!(f, "'...'"),
            Token::Colon => write!(f, "':'"),
            Token::Star => write!(f, "'*'"),
            Token::Operator(op) => write!(f, "'{op}'"),
            Token::Newline => write!(f, "newline"),
            Token::LineComment | Token::BlockComment(_) => write!(f, "comment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.expect("valid token")).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            lex_all("type User struct"),
            vec![
                Token::Type,
                Token::Ident("User".to_string()),
                Token::Struct
            ]
        );
        // Keyword prefixes are still identifiers
        assert_eq!(
            lex_all("typed structure"),
            vec![
                Token::Ident("typed".to_string()),
                Token::Ident("structure".to_string())
            ]
        );
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(lex_all("Größe"), vec![Token::Ident("Größe".to_string())]);
    }

    #[test]
    fn test_string_literals_keep_quotes() {
        assert_eq!(
            lex_all(r#"`db:"id"` "a\"b""#),
            vec![
                Token::RawString(r#"`db:"id"`"#.to_string()),
                Token::String(r#""a\"b""#.to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_string_spans_lines() {
        assert_eq!(
            lex_all("`line one\nline two`"),
            vec![Token::RawString("`line one\nline two`".to_string())]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            lex_all("a // trailing\nb /* x */ c /* \n */"),
            vec![
                Token::Ident("a".to_string()),
                Token::Newline,
                Token::Ident("b".to_string()),
                Token::BlockComment(false),
                Token::Ident("c".to_string()),
                Token::BlockComment(true),
            ]
        );
    }

    #[test]
    fn test_block_comment_edge_cases() {
        assert_eq!(lex_all("/**/"), vec![Token::BlockComment(false)]);
        assert_eq!(lex_all("/* a*b **/"), vec![Token::BlockComment(false)]);
        assert_eq!(
            lex_all("x /* a / b */ / y"),
            vec![
                Token::Ident("x".to_string()),
                Token::BlockComment(false),
                Token::Operator("/".to_string()),
                Token::Ident("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_is_an_error() {
        assert!(Token::lexer("a /* never closed").any(|t| t.is_err()));
    }

    #[test]
    fn test_operators_and_punctuation() {
        assert_eq!(
            lex_all("x := y[1] ... a.b *p /= 2"),
            vec![
                Token::Ident("x".to_string()),
                Token::Colon,
                Token::Operator("=".to_string()),
                Token::Ident("y".to_string()),
                Token::LBracket,
                Token::Number,
                Token::RBracket,
                Token::Ellipsis,
                Token::Ident("a".to_string()),
                Token::Dot,
                Token::Ident("b".to_string()),
                Token::Star,
                Token::Ident("p".to_string()),
                Token::Operator("/=".to_string()),
                Token::Number,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let results: Vec<_> = Token::lexer("\"open").collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::LBrace.is_open_bracket());
        assert!(Token::RBracket.is_close_bracket());
        assert_eq!(Token::LParen.closing(), Some(Token::RParen));
        assert!(Token::AutoSemicolon.is_semicolon());
        assert!(Token::RawString(String::new()).is_string_literal());
        assert!(Token::Operator("++".to_string()).ends_statement());
        assert!(!Token::Operator("+".to_string()).ends_statement());
        assert!(!Token::LBrace.ends_statement());
    }
}
