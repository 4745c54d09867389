//! Fragment markup helpers for the preview surface.

/// Line break marker substituted for `\n` in plain text.
pub const LINE_BREAK: &str = "<br/>";

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Plain text as markup: escaped, with newlines turned into `<br/>`.
pub fn text_with_line_breaks(text: &str) -> String {
    escape_html(text).replace('\n', LINE_BREAK)
}

/// Visible marker for an expression the typesetter rejected.
pub fn error_span(expression: &str) -> String {
    format!(
        r#"<span class="math-error" style="color: red;">Error: {}</span>"#,
        escape_html(expression)
    )
}
