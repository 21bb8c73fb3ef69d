//! Parser combinator functions for building the declaration parser.
//!
//! The grammar covers the package clause and type declarations in detail.
//! Everything else is matched as a run of balanced token groups up to the
//! next top-level semicolon, which is enough to step over imports, functions
//! and var/const blocks without understanding them.

use chumsky::prelude::*;
use std::ops::Range;

use crate::golang::ast::{Decl, FieldDecl, Ident, SourceFile, StructType, Tag, TypeBody, TypeSpec};
use crate::golang::lexer::Token;

/// Type alias for token with span
pub(crate) type TokenSpan = (Token, Range<usize>);

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, ignoring the span
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// Explicit `;` or one inserted at a line break
pub(crate) fn semi() -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(|(t, _): &TokenSpan| t.is_semicolon())
        .ignored()
        .labelled("';' or newline")
}

pub(crate) fn ident() -> impl Parser<TokenSpan, Ident, Error = ParserError> + Clone {
    filter_map(|span, (tok, range): TokenSpan| match tok {
        Token::Ident(name) => Ok(Ident::new(name, range)),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, range)),
        )),
    })
    .labelled("identifier")
}

/// A field tag: any string literal in tag position
pub(crate) fn tag() -> impl Parser<TokenSpan, Tag, Error = ParserError> + Clone {
    filter_map(|span, (tok, range): TokenSpan| match tok {
        Token::String(raw) | Token::RawString(raw) => Ok(Tag { raw, span: range }),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, range)),
        )),
    })
    .labelled("field tag")
}

/// A bracketed group `{...}`, `(...)` or `[...]` with balanced contents
pub(crate) fn token_group() -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    recursive(|group| {
        let contents = group
            .or(filter(|(t, _): &TokenSpan| !t.is_bracket()).ignored())
            .repeated()
            .ignored();

        choice((
            contents
                .clone()
                .delimited_by(token(Token::LBrace), token(Token::RBrace)),
            contents
                .clone()
                .delimited_by(token(Token::LParen), token(Token::RParen)),
            contents.delimited_by(token(Token::LBracket), token(Token::RBracket)),
        ))
    })
}

/// The remainder of a declaration, up to (not including) its terminator
pub(crate) fn decl_tail() -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    token_group()
        .or(filter(|(t, _): &TokenSpan| !t.is_bracket() && !t.is_semicolon()).ignored())
        .repeated()
        .ignored()
}

/// One top-level piece of a field type
fn type_element() -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    token_group().or(filter(|(t, _): &TokenSpan| {
        !t.is_bracket() && !t.is_semicolon() && !t.is_string_literal() && *t != Token::Comma
    })
    .ignored())
}

/// The type of a named field
///
/// A type may not start with `.` (that would be a qualified embedded type),
/// and one starting with `[` needs an element type after the brackets, which
/// tells `Field []int` apart from an embedded generic `List[T]`.
fn field_type() -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    let bracketed = token(Token::LBracket)
        .rewind()
        .ignore_then(token_group())
        .then(type_element().repeated().at_least(1))
        .ignored();

    let first = filter(|(t, _): &TokenSpan| {
        !t.is_bracket()
            && !t.is_semicolon()
            && !t.is_string_literal()
            && !matches!(t, Token::Comma | Token::Dot)
    })
    .ignored()
    .or(token(Token::LParen).rewind().ignore_then(token_group()));

    bracketed
        .or(first.then(type_element().repeated()).ignored())
        .labelled("field type")
}

pub(crate) fn field_decl() -> impl Parser<TokenSpan, FieldDecl, Error = ParserError> + Clone {
    let named = ident()
        .separated_by(token(Token::Comma))
        .at_least(1)
        .then_ignore(field_type())
        .then(tag().or_not())
        .map(|(names, tag)| FieldDecl::Named { names, tag });

    let type_arguments = token(Token::LBracket).rewind().ignore_then(token_group());

    let embedded = token(Token::Star)
        .or_not()
        .ignore_then(ident())
        .then(token(Token::Dot).ignore_then(ident()).or_not())
        .then_ignore(type_arguments.or_not())
        .then(tag().or_not())
        .map(|((first, qualified), tag)| FieldDecl::Embedded {
            type_name: qualified.unwrap_or(first),
            tag,
        });

    named.or(embedded).labelled("field declaration")
}

pub(crate) fn struct_type() -> impl Parser<TokenSpan, StructType, Error = ParserError> + Clone {
    token(Token::Struct).ignore_then(
        field_decl()
            .separated_by(semi())
            .allow_trailing()
            .delimited_by(token(Token::LBrace), token(Token::RBrace))
            .map(|fields| StructType { fields }),
    )
}

pub(crate) fn type_spec() -> impl Parser<TokenSpan, TypeSpec, Error = ParserError> + Clone {
    let type_parameters = token(Token::LBracket).rewind().ignore_then(token_group());

    let generic_struct = ident()
        .then_ignore(type_parameters)
        .then(struct_type())
        .map(|(name, body)| TypeSpec {
            name,
            body: TypeBody::Struct(body),
        });

    let other_type = filter(|(t, _): &TokenSpan| !t.is_bracket() && !t.is_semicolon())
        .ignored()
        .or(token_group())
        .repeated()
        .at_least(1)
        .to(TypeBody::Other);

    let plain = ident()
        .then_ignore(token(Token::Operator("=".to_string())).or_not())
        .then(struct_type().map(TypeBody::Struct).or(other_type))
        .map(|(name, body)| TypeSpec { name, body });

    generic_struct.or(plain).labelled("type specification")
}

pub(crate) fn type_decl() -> impl Parser<TokenSpan, Decl, Error = ParserError> + Clone {
    let grouped = type_spec()
        .separated_by(semi())
        .allow_trailing()
        .delimited_by(token(Token::LParen), token(Token::RParen));

    token(Token::Type)
        .ignore_then(grouped.or(type_spec().map(|spec| vec![spec])))
        .map(Decl::Type)
}

pub(crate) fn import_decl() -> impl Parser<TokenSpan, Decl, Error = ParserError> + Clone {
    token(Token::Import).ignore_then(decl_tail()).to(Decl::Import)
}

/// `func`, `var` and `const` declarations, skipped wholesale
pub(crate) fn other_decl() -> impl Parser<TokenSpan, Decl, Error = ParserError> + Clone {
    choice((token(Token::Func), token(Token::Var), token(Token::Const)))
        .ignore_then(decl_tail())
        .to(Decl::Other)
}

pub(crate) fn source_file() -> impl Parser<TokenSpan, SourceFile, Error = ParserError> + Clone {
    let package_clause = token(Token::Package)
        .ignore_then(ident())
        .then_ignore(semi())
        .labelled("package clause");

    let decl = choice((import_decl(), type_decl(), other_decl()))
        .labelled("declaration")
        .then_ignore(semi());

    package_clause
        .then(decl.repeated())
        .then_ignore(end())
        .map(|(package, decls)| SourceFile { package, decls })
}
