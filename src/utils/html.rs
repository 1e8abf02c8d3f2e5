//! Small HTML helpers shared by the commander and the renderer

use super::error::CommandError;

/// Escape HTML special characters in text and attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inline marker shown in place of a command that failed to evaluate
pub fn error_marker(message: &str) -> String {
    format!(
        r#"<span style="color: red">[{}]</span>"#,
        escape_html(message)
    )
}

/// Inline marker for a [`CommandError`]
pub fn command_error(err: &CommandError) -> String {
    error_marker(&err.to_string())
}

/// Wrap already-rendered content in `<tag>…</tag>`
pub fn wrap_tag(tag: &str, content: &str) -> String {
    format!("<{tag}>{content}</{tag}>")
}

/// Wrap already-rendered content in `<tag attributes>…</tag>`
pub fn wrap_tag_with(tag: &str, attributes: &str, content: &str) -> String {
    format!("<{tag} {attributes}>{content}</{tag}>")
}
