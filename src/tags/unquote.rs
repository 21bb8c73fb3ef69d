//! Decoding of double-quoted Go string literals
//!
//! Follows `strconv.Unquote` for the `"` quote: simple escapes, octal `\NNN`
//! (at most 255), `\xHH`, `\uHHHH` and `\UHHHHHHHH`. Byte escapes may build
//! sequences that are not UTF-8; those are rejected since the result has to be
//! a Rust `String`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("literal is not enclosed in double quotes")]
    NotQuoted,
    #[error("literal contains a raw newline")]
    Newline,
    #[error("unescaped quote inside literal")]
    StrayQuote,
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

pub fn unquote(literal: &str) -> Result<String, UnquoteError> {
    let bytes = literal.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return Err(UnquoteError::NotQuoted);
    }
    let inner = &bytes[1..bytes.len() - 1];
    if inner.contains(&b'\n') {
        return Err(UnquoteError::Newline);
    }

    let mut out = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        match inner[i] {
            b'"' => return Err(UnquoteError::StrayQuote),
            b'\\' => i = unescape(inner, i, &mut out)?,
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| UnquoteError::InvalidUtf8)
}

/// Decode the escape starting at `inner[start]` (a backslash), returning the
/// index just past it
fn unescape(inner: &[u8], start: usize, out: &mut Vec<u8>) -> Result<usize, UnquoteError> {
    let invalid = UnquoteError::InvalidEscape(start + 1);
    let kind = *inner.get(start + 1).ok_or(invalid.clone())?;
    let simple = match kind {
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0B),
        b'\\' => Some(b'\\'),
        b'"' => Some(b'"'),
        _ => None,
    };
    if let Some(byte) = simple {
        out.push(byte);
        return Ok(start + 2);
    }

    match kind {
        b'0'..=b'7' => {
            let digits = inner.get(start + 1..start + 4).ok_or(invalid.clone())?;
            let value = parse_radix(digits, 8).ok_or(invalid.clone())?;
            let byte = u8::try_from(value).map_err(|_| invalid)?;
            out.push(byte);
            Ok(start + 4)
        }
        b'x' => {
            let digits = inner.get(start + 2..start + 4).ok_or(invalid.clone())?;
            let value = parse_radix(digits, 16).ok_or(invalid)?;
            // Two hex digits always fit a byte
            out.push(value as u8);
            Ok(start + 4)
        }
        b'u' | b'U' => {
            let width = if kind == b'u' { 4 } else { 8 };
            let digits = inner
                .get(start + 2..start + 2 + width)
                .ok_or(invalid.clone())?;
            let value = parse_radix(digits, 16).ok_or(invalid.clone())?;
            let ch = char::from_u32(value).ok_or(invalid)?;
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            Ok(start + 2 + width)
        }
        _ => Err(invalid),
    }
}

fn parse_radix(digits: &[u8], radix: u32) -> Option<u32> {
    let text = std::str::from_utf8(digits).ok()?;
    if !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(text, radix).ok()
}
