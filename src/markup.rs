//! Escaping for text that crosses into a display surface.
//!
//! Turn text and listing fields come from the user or the agent service and
//! must always be displayed literally.  [`escape_html`] is used for HTML
//! output; [`sanitize_terminal`] is used before anything reaches a terminal,
//! where the dangerous "markup" is control sequences rather than tags.

use std::borrow::Cow;

/// Replacement for control characters stripped from terminal output.
const REPLACEMENT: char = '\u{FFFD}';

/// Escapes `&`, `<`, `>`, `"` and `'` so text can be embedded in HTML
/// element content or attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Replaces control characters other than newline and tab.
///
/// This makes ANSI escape sequences, carriage-return overwrites and the like
/// inert: the rest of the sequence is printed as plain text.
pub fn sanitize_terminal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_unsafe_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_unsafe_control(c) { REPLACEMENT } else { c })
            .collect(),
    )
}

fn is_unsafe_control(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_script_is_literal() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn html_ampersand_first() {
        assert_eq!(escape_html("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn html_plain_text_borrows() {
        assert!(matches!(escape_html("Departamento 80 m²"), Cow::Borrowed(_)));
    }

    #[test]
    fn terminal_strips_escape_sequences() {
        let cleaned = sanitize_terminal("hola \x1b[2Jmundo\r");
        assert!(!cleaned.contains('\x1b'));
        assert!(!cleaned.contains('\r'));
        assert_eq!(cleaned, "hola \u{FFFD}[2Jmundo\u{FFFD}");
    }

    #[test]
    fn terminal_keeps_newlines_and_tabs() {
        let text = "línea 1\nlínea 2\tfin";
        assert!(matches!(sanitize_terminal(text), Cow::Borrowed(_)));
        assert_eq!(sanitize_terminal(text), text);
    }

    #[test]
    fn terminal_leaves_markup_characters() {
        assert_eq!(sanitize_terminal("<script>"), "<script>");
    }
}
