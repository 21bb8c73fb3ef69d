//! Struct tag lookup
//!
//! Tags follow the conventional `key:"value" key2:"value2"` layout used by
//! Go's `reflect.StructTag`. The scanner here is a byte-for-byte port of that
//! convention, including its failure mode: the first malformed entry ends the
//! search, and every key after it reads as absent. Nothing in this module
//! returns an error; a missing or unreadable key is simply `None`.

pub mod unquote;

pub use unquote::{unquote, UnquoteError};

/// Look up `key` in a raw tag literal.
///
/// `raw_tag` may still carry its backtick delimiters, exactly as written in
/// the source. Returns `Some(value)` when the key is present (the value may be
/// empty) and `None` when it is absent or the tag is malformed before it.
pub fn lookup(raw_tag: &str, key: &str) -> Option<String> {
    let mut tag = strip_backticks(raw_tag);

    while !tag.is_empty() {
        // Skip leading space
        tag = tag.trim_start_matches(' ');
        if tag.is_empty() {
            break;
        }

        // Scan to colon. A space, a quote or a control character ends the name.
        let bytes = tag.as_bytes();
        let mut i = 0;
        while i < bytes.len()
            && bytes[i] > b' '
            && bytes[i] != b':'
            && bytes[i] != b'"'
            && bytes[i] != 0x7f
        {
            i += 1;
        }
        if i == 0 || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            break;
        }
        let name = &tag[..i];
        tag = &tag[i + 1..];

        // Scan quoted string to find value
        let bytes = tag.as_bytes();
        let mut i = 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let quoted = &tag[..=i];
        tag = &tag[i + 1..];

        if name == key {
            return unquote(quoted).ok();
        }
    }

    None
}

/// Drop one layer of raw-string delimiters
fn strip_backticks(raw_tag: &str) -> &str {
    let tag = raw_tag.strip_prefix('`').unwrap_or(raw_tag);
    tag.strip_suffix('`').unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("`db:\"id\"`", "db", Some("id"))]
    #[case("db:\"id\"", "db", Some("id"))]
    #[case("`db:\"id\" json:\"json_id\"`", "json", Some("json_id"))]
    #[case("`json:\"x\"   db:\"spaced\"`", "db", Some("spaced"))]
    #[case("`db:\"\"`", "db", Some(""))]
    #[case("`db:\"a\\\"b\"`", "db", Some("a\"b"))]
    #[case("`db:\"id,omitempty\"`", "db", Some("id,omitempty"))]
    #[case("`xml:\"a\" db:\"b\" db:\"c\"`", "db", Some("b"))]
    fn test_lookup_present(
        #[case] tag: &str,
        #[case] key: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(lookup(tag, key).as_deref(), expected);
    }

    #[rstest]
    // Key absent from a well-formed tag
    #[case("`json:\"id\"`", "db")]
    // Prefix of a key is not the key
    #[case("`dbx:\"id\"`", "db")]
    #[case("``", "db")]
    #[case("", "db")]
    #[case("   ", "db")]
    // Missing closing quote
    #[case("`db:\"id`", "db")]
    // Colon not followed by a quote
    #[case("`db:id`", "db")]
    #[case("`db: \"id\"`", "db")]
    // Nothing after the colon
    #[case("`db:`", "db")]
    // Malformed entry ends the search even if the key follows
    #[case("`bad db:\"id\"`", "db")]
    #[case("`json:x db:\"id\"`", "db")]
    // Invalid escape in the matched value
    #[case("`db:\"\\q\"`", "db")]
    // A control byte cannot start a name
    #[case("`\u{7f}db:\"id\"`", "db")]
    fn test_lookup_absent(#[case] tag: &str, #[case] key: &str) {
        assert_eq!(lookup(tag, key), None);
    }

    #[test]
    fn test_invalid_escape_in_other_key_is_skipped() {
        // Only the matched value is unquoted
        assert_eq!(
            lookup("`json:\"\\q\" db:\"id\"`", "db").as_deref(),
            Some("id")
        );
    }

    #[test]
    fn test_strip_backticks_removes_one_layer() {
        assert_eq!(strip_backticks("`a`"), "a");
        assert_eq!(strip_backticks("``a``"), "`a`");
        assert_eq!(strip_backticks("a"), "a");
    }
}
