//! Canonical layout for generated Go code
//!
//! A small stand-in for `go/format`, enough for the code this crate emits and
//! for hand-written Go of the same shape:
//!     - the text must lex, and brackets must balance and match
//!     - every line is re-indented with tabs, one level per line that leaves
//!       brackets open
//!     - runs of blank lines collapse to one; blank lines right after an
//!       opening or right before a closing bracket are dropped
//!     - two-word lines inside a struct or a `var`/`const`/`type` group are
//!       aligned into columns with spaces, as gofmt's tabwriter does
//!     - continuation lines of raw strings and block comments stay verbatim
//!
//! Formatting is idempotent: formatting formatted output changes nothing.

use std::ops::Range;

use crate::error::RenderError;
use crate::golang::lexer::{tokenize_with_spans, Token};
use crate::golang::position::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    /// Struct bodies and declaration groups, whose lines align
    Spec,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Code {
        indent: usize,
        text: String,
        align: bool,
    },
    Verbatim(String),
}

/// Per-line bracket bookkeeping derived from the token stream
struct LineDepths {
    /// Bracket depth before the first token of each line
    depth_at_start: Vec<usize>,
    /// Closing brackets that open the line, before any other token
    leading_closers: Vec<usize>,
    /// Lines inside a multi-line raw string or block comment
    verbatim: Vec<bool>,
}

pub fn format_source(source: &str) -> Result<String, RenderError> {
    let location = SourceLocation::new(source);
    let tokens = tokenize_with_spans(source).map_err(|e| RenderError::Syntax {
        message: e.to_string(),
        position: location.byte_to_position(e.span.start),
    })?;
    check_brackets(&tokens, &location)?;

    let raw_lines: Vec<&str> = source.split('\n').collect();
    let depths = line_depths(&tokens, &location, raw_lines.len());
    let lines = classify_lines(&raw_lines, &depths);
    let lines = collapse_blank_lines(lines);

    Ok(render_lines(&lines))
}

fn check_brackets(
    tokens: &[(Token, Range<usize>)],
    location: &SourceLocation,
) -> Result<(), RenderError> {
    let mut open: Vec<(&Token, &Range<usize>)> = Vec::new();

    for (token, span) in tokens {
        if token.is_open_bracket() {
            open.push((token, span));
        } else if token.is_close_bracket() {
            match open.pop() {
                Some((opener, _)) if opener.closing().as_ref() == Some(token) => {}
                _ => {
                    return Err(RenderError::Syntax {
                        message: format!("unexpected {token}"),
                        position: location.byte_to_position(span.start),
                    })
                }
            }
        }
    }

    match open.pop() {
        Some((opener, span)) => Err(RenderError::Syntax {
            message: format!("unclosed {opener}"),
            position: location.byte_to_position(span.start),
        }),
        None => Ok(()),
    }
}

fn line_depths(
    tokens: &[(Token, Range<usize>)],
    location: &SourceLocation,
    line_count: usize,
) -> LineDepths {
    let mut depths = LineDepths {
        depth_at_start: vec![0; line_count],
        leading_closers: vec![0; line_count],
        verbatim: vec![false; line_count],
    };

    let mut depth = 0usize;
    let mut next = 0;
    for line in 0..line_count {
        depths.depth_at_start[line] = depth;
        let mut at_line_start = true;

        while next < tokens.len() && location.line_index(tokens[next].1.start) == line {
            let (token, span) = &tokens[next];
            if token.is_close_bracket() {
                depth = depth.saturating_sub(1);
                if at_line_start {
                    depths.leading_closers[line] += 1;
                }
            } else if *token != Token::Newline {
                at_line_start = false;
                if token.is_open_bracket() {
                    depth += 1;
                }
            }

            let last_line = location.line_index(span.end.saturating_sub(1).max(span.start));
            for covered in (line + 1)..=last_line.min(line_count - 1) {
                depths.verbatim[covered] = true;
            }
            next += 1;
        }
    }

    depths
}

fn classify_lines(raw_lines: &[&str], depths: &LineDepths) -> Vec<Line> {
    // Bracket depth each indent level was opened at, with the kind of block
    let mut levels: Vec<(usize, BlockKind)> = Vec::new();
    let mut lines = Vec::with_capacity(raw_lines.len());

    for (index, raw) in raw_lines.iter().enumerate() {
        let text = raw.trim();
        if text.is_empty() && !depths.verbatim[index] {
            lines.push(Line::Blank);
            continue;
        }

        let after_closers = depths.depth_at_start[index].saturating_sub(depths.leading_closers[index]);
        while levels.last().is_some_and(|(depth, _)| *depth > after_closers) {
            levels.pop();
        }
        let indent = levels.len();
        let in_spec_block = levels.last().is_some_and(|(_, kind)| *kind == BlockKind::Spec);

        // A line opens at most one indent level, however many brackets it leaves open
        let end_depth = depths
            .depth_at_start
            .get(index + 1)
            .copied()
            .unwrap_or(0);
        while levels.last().is_some_and(|(depth, _)| *depth > end_depth) {
            levels.pop();
        }
        if end_depth > levels.last().map(|(depth, _)| *depth).unwrap_or(0) {
            let kind = if opens_spec_block(text) {
                BlockKind::Spec
            } else {
                BlockKind::Body
            };
            levels.push((end_depth, kind));
        }

        if depths.verbatim[index] {
            lines.push(Line::Verbatim(raw.to_string()));
        } else {
            lines.push(Line::Code {
                indent,
                text: text.to_string(),
                align: in_spec_block && is_two_column(text),
            });
        }
    }

    lines
}

fn opens_spec_block(text: &str) -> bool {
    text.ends_with("struct {") || matches!(text, "var (" | "const (" | "type (")
}

fn is_two_column(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [name, kind] => {
            name.chars().all(|c| c.is_alphanumeric() || c == '_')
                && !kind.starts_with("//")
                && !kind.starts_with('"')
                && !kind.starts_with('`')
                && !kind.starts_with('=')
                && !kind.ends_with('{')
                && !kind.ends_with('(')
        }
        _ => false,
    }
}

fn opens_block(line: &Line) -> bool {
    match line {
        Line::Code { text, .. } => text.ends_with('{') || text.ends_with('('),
        _ => false,
    }
}

fn closes_block(line: &Line) -> bool {
    match line {
        Line::Code { text, .. } => text.starts_with('}') || text.starts_with(')'),
        _ => false,
    }
}

fn collapse_blank_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut kept: Vec<Line> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        if *line == Line::Blank {
            let after_opener_or_blank = match kept.last() {
                None | Some(Line::Blank) => true,
                Some(previous) => opens_block(previous),
            };
            let before_closer = lines[index + 1..]
                .iter()
                .find(|l| **l != Line::Blank)
                .map(closes_block)
                // Trailing blank lines are dropped as well
                .unwrap_or(true);
            if after_opener_or_blank || before_closer {
                continue;
            }
        }
        kept.push(line.clone());
    }

    kept
}

fn render_lines(lines: &[Line]) -> String {
    let mut out = String::new();
    let mut index = 0;

    while index < lines.len() {
        match &lines[index] {
            Line::Code {
                indent,
                align: true,
                ..
            } => {
                let run_end = lines[index..]
                    .iter()
                    .position(|l| !matches!(l, Line::Code { indent: i, align: true, .. } if i == indent))
                    .map(|offset| index + offset)
                    .unwrap_or(lines.len());
                let run = &lines[index..run_end];

                let width = run
                    .iter()
                    .filter_map(|l| match l {
                        Line::Code { text, .. } => text.split_whitespace().next(),
                        _ => None,
                    })
                    .map(|name| name.chars().count())
                    .max()
                    .unwrap_or(0);

                for line in run {
                    if let Line::Code { indent, text, .. } = line {
                        let mut words = text.split_whitespace();
                        let name = words.next().unwrap_or_default();
                        let kind = words.next().unwrap_or_default();
                        let padding = width - name.chars().count() + 1;
                        out.push_str(&"\t".repeat(*indent));
                        out.push_str(name);
                        out.push_str(&" ".repeat(padding));
                        out.push_str(kind);
                        out.push('\n');
                    }
                }
                index = run_end;
                continue;
            }
            Line::Code { indent, text, .. } => {
                out.push_str(&"\t".repeat(*indent));
                out.push_str(text);
            }
            Line::Verbatim(text) => out.push_str(text),
            Line::Blank => {}
        }
        out.push('\n');
        index += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reindents_and_aligns() {
        let input = "// header\npackage p\n\n\ntype _T struct {\n\nID string\n      LongName string\n}\nvar (\nTColumns _T\n)\nfunc init() {\nTColumns.ID = \"id\"\n\n}\n";
        let expected = "// header\npackage p\n\ntype _T struct {\n\tID       string\n\tLongName string\n}\nvar (\n\tTColumns _T\n)\nfunc init() {\n\tTColumns.ID = \"id\"\n}\n";
        assert_eq!(format_source(input).unwrap(), expected);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let input = "package p\n\ntype A struct {\n  X int\n  Longer []string\n}\n\n\n\nfunc f() {\n  if true {\n    return\n  }\n}\n";
        let once = format_source(input).unwrap();
        let twice = format_source(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_function_bodies_are_not_aligned() {
        let input = "package p\nfunc f() {\nreturn x\ngo run()\n}\n";
        let expected = "package p\nfunc f() {\n\treturn x\n\tgo run()\n}\n";
        assert_eq!(format_source(input).unwrap(), expected);
    }

    #[test]
    fn test_closing_line_dedents_first() {
        let input = "package p\nfunc f() {\nif ok {\ng()\n} else {\nh()\n}\n}\n";
        let expected = "package p\nfunc f() {\n\tif ok {\n\t\tg()\n\t} else {\n\t\th()\n\t}\n}\n";
        assert_eq!(format_source(input).unwrap(), expected);
    }

    #[test]
    fn test_several_open_brackets_indent_once() {
        let input = "package p\nfunc f() {\ng(func() {\nh()\n})\n}\n";
        let expected = "package p\nfunc f() {\n\tg(func() {\n\t\th()\n\t})\n}\n";
        assert_eq!(format_source(input).unwrap(), expected);
    }

    #[test]
    fn test_raw_string_lines_stay_verbatim() {
        let input = "package p\nvar x = `a\n  b {\n`\n";
        assert_eq!(format_source(input).unwrap(), input);
    }

    #[test]
    fn test_unbalanced_brackets_are_rejected() {
        let err = format_source("package p\nfunc f() {\n").unwrap_err();
        assert!(matches!(err, RenderError::Syntax { ref message, .. } if message.contains("unclosed")));

        let err = format_source("package p\nvar x = (1]\n").unwrap_err();
        match err {
            RenderError::Syntax { position, .. } => assert_eq!(position.line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_lex_errors_are_rejected() {
        assert!(format_source("package p\nvar x = \"unterminated\n").is_err());
    }

    #[test]
    fn test_output_ends_with_single_newline() {
        assert_eq!(format_source("package p").unwrap(), "package p\n");
        assert_eq!(format_source("package p\n\n\n").unwrap(), "package p\n");
    }
}
