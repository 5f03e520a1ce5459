//! Text utilities for generated module source.
//!
//! Provides helpers for preparing file contents before they are embedded in a
//! JavaScript string literal.

use regex::Regex;

lazy_static! {
    static ref LINE_BREAKS_RE: Regex = Regex::new(r"[\r\n]+").unwrap();
}

/// Removes every run of carriage returns and line feeds.
///
/// Generated modules embed contents in single-line string literals, so SVG
/// text spread over several lines is joined back together.
pub fn strip_line_breaks(text: &str) -> String {
    LINE_BREAKS_RE.replace_all(text, "").into_owned()
}

/// Escapes a string for embedding in a JavaScript string literal delimited by `quote`.
///
/// Handles the delimiting quote, backslashes, control characters and the
/// line/paragraph separators that are not allowed unescaped in string literals.
pub fn escape_js_string(s: &str, quote: char) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            c if c == quote => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            // Control characters (U+0000 to U+001F)
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

/// Single-quoted JavaScript string literal.
pub fn single_quoted(s: &str) -> String {
    format!("'{}'", escape_js_string(s, '\''))
}

/// Double-quoted JavaScript string literal.
pub fn double_quoted(s: &str) -> String {
    format!("\"{}\"", escape_js_string(s, '"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_breaks() {
        assert_eq!(strip_line_breaks("a\r\nb\n\nc\rd"), "abcd");
        assert_eq!(strip_line_breaks("no breaks"), "no breaks");
    }

    #[test]
    fn test_escape_single_quotes() {
        assert_eq!(escape_js_string("it's", '\''), "it\\'s");
        assert_eq!(escape_js_string("say \"hi\"", '\''), "say \"hi\"");
        assert_eq!(single_quoted("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_escape_double_quotes() {
        assert_eq!(double_quoted("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(double_quoted("it's"), "\"it's\"");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_js_string("a\tb\u{0}", '\''), "a\\tb\\u0000");
        assert_eq!(escape_js_string("x\u{2028}y", '\''), "x\\u2028y");
    }

    #[test]
    fn test_base64_is_left_alone() {
        let payload = "iVBORw0KGgo+/=";
        assert_eq!(escape_js_string(payload, '\''), payload);
    }
}
