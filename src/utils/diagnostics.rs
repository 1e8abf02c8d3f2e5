//! Markup diagnostics
//!
//! Lints markup without rendering it. It reports:
//!
//! - Structural parse errors (a backslash without a command name, nesting
//!   too deep)
//! - Unknown commands, with a suggestion when a built-in name is close
//! - Argument lists that are closed implicitly by the end of a paragraph
//!
//! ## Example
//!
//! ```rust
//! use texhtml::utils::diagnostics::{check_markup, DiagnosticLevel};
//!
//! let result = check_markup(r"\bolf{Deo}");
//! assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
//! assert_eq!(result.diagnostics[0].suggestion.as_deref(), Some("did you mean \\bold?"));
//! ```

use std::cmp::Reverse;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::core::parser::{Parser, DEFAULT_MAX_DEPTH};
use crate::core::token::Token;
use crate::core::tokenizer::tokenize;
use crate::data::commands::{command_names, is_known_command, normalize_name};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - renders, but probably not as intended
    Warning,
    /// Error - the markup cannot be rendered
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(line) = self.line {
            write!(f, "\n  --> line {}", line)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CheckResult {
    /// All diagnostics, in source order within each kind
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// e.g. "1 error, 2 warnings"
    pub fn summary(&self) -> String {
        let counts = [
            (self.errors, "error"),
            (self.warnings, "warning"),
            (self.infos, "note"),
        ];
        let parts: Vec<String> = counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|&(count, noun)| match count {
                1 => format!("1 {}", noun),
                n => format!("{} {}s", n, noun),
            })
            .collect();

        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check markup for issues without rendering it
pub fn check_markup(input: &str) -> CheckResult {
    let mut result = CheckResult::new();
    let tokens = tokenize(input);

    let mut parser = Parser::new(DEFAULT_MAX_DEPTH);
    if let Err(err) = parser.parse_document(&tokens) {
        result.add(Diagnostic::new(DiagnosticLevel::Error, err.to_string()).with_line(err.line()));
        return result;
    }

    check_command_names(&tokens, &mut result);

    for close in parser.implicit_closes() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                format!("argument list of \\{} is never closed", close.command),
            )
            .with_line(close.line)
            .with_suggestion("add a closing '}'"),
        );
    }

    result
}

/// Warn about every `\name` that is not a built-in command
fn check_command_names(tokens: &[Token], result: &mut CheckResult) {
    let mut line = 1;
    for pair in tokens.windows(2) {
        if let [Token::Backslash, Token::Word(name)] = pair {
            if !is_known_command(name) {
                let mut diag =
                    Diagnostic::new(DiagnosticLevel::Warning, format!("unknown command \\{}", name))
                        .with_line(line);
                if let Some(close) = closest_command(name) {
                    diag = diag.with_suggestion(format!("did you mean \\{}?", close));
                }
                result.add(diag);
            }
        }
        line += pair[0].newline_count();
    }
}

/// The built-in name nearest to `name`, if it is close enough to be a typo
fn closest_command(name: &str) -> Option<&'static str> {
    let name = normalize_name(name);
    let limit = (name.chars().count() / 3).max(1);
    command_names()
        .map(|candidate| (edit_distance(&name, candidate), candidate))
        .filter(|&(distance, _)| distance <= limit)
        .min()
        .map(|(_, candidate)| candidate)
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, a_i) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_j) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_i != *b_j);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Format check results for terminal output.
///
/// One line per diagnostic, ordered by source line with the most severe
/// first, then a status line. With `use_color` only the level is colored.
///
/// ```text
/// line 3: warning: unknown command \italc (did you mean \italic?)
/// failed: 1 error, 1 warning
/// ```
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut ordered: Vec<&Diagnostic> = result.diagnostics.iter().collect();
    ordered.sort_by_key(|diag| (diag.line.unwrap_or(0), Reverse(diag.level)));

    let mut lines: Vec<String> = ordered
        .into_iter()
        .map(|diag| format_line(diag, use_color))
        .collect();
    let status = if result.has_errors() { "failed" } else { "ok" };
    lines.push(format!("{}: {}", status, result.summary()));
    lines.join("\n")
}

fn format_line(diag: &Diagnostic, use_color: bool) -> String {
    let location = match diag.line {
        Some(line) => format!("line {}", line),
        None => "input".to_string(),
    };
    let level = if use_color {
        let color = match diag.level {
            DiagnosticLevel::Error => "\x1b[1;31m",
            DiagnosticLevel::Warning => "\x1b[1;33m",
            DiagnosticLevel::Info => "\x1b[1;36m",
        };
        format!("{}{}\x1b[0m", color, diag.level)
    } else {
        diag.level.to_string()
    };

    let mut line = format!("{}: {}: {}", location, level, diag.message);
    if let Some(ref suggestion) = diag.suggestion {
        line.push_str(&format!(" ({})", suggestion));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markup() {
        let result = check_markup(r"\b{Soli} \i{Deo} \sup{Gloria}");
        assert!(result.is_empty());
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_parse_error() {
        let result = check_markup("fine\n\\ oops");
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].line, Some(2));
    }

    #[test]
    fn test_unknown_command_with_suggestion() {
        let result = check_markup("ok\n\\itemise{x}");
        assert_eq!(result.warnings, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.message, "unknown command \\itemise");
        assert_eq!(diag.line, Some(2));
        assert_eq!(diag.suggestion.as_deref(), Some("did you mean \\itemize?"));
    }

    #[test]
    fn test_unknown_command_without_suggestion() {
        let result = check_markup(r"\qwertyuiop");
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].suggestion, None);
    }

    #[test]
    fn test_underscore_aliases_are_known() {
        assert!(check_markup(r"\bookmarks_folder_id{3} \ol_A{}").is_empty());
    }

    #[test]
    fn test_implicit_close_note() {
        let result = check_markup("\\b{never closed\n\nnext");
        assert_eq!(result.infos, 1);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Info);
        assert!(result.diagnostics[0].message.contains("\\b"));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn test_format_diagnostics() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "late").with_line(7));
        result.add(
            Diagnostic::new(DiagnosticLevel::Info, "note")
                .with_line(2)
                .with_suggestion("add a closing '}'"),
        );
        result.add(Diagnostic::new(DiagnosticLevel::Error, "broken").with_line(2));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "anywhere"));

        assert_eq!(
            format_diagnostics(&result, false),
            "input: warning: anywhere\n\
             line 2: error: broken\n\
             line 2: info: note (add a closing '}')\n\
             line 7: warning: late\n\
             failed: 1 error, 2 warnings, 1 note"
        );
    }

    #[test]
    fn test_format_diagnostics_clean() {
        let result = check_markup(r"\b{fine}");
        assert_eq!(format_diagnostics(&result, false), "ok: no issues found");
    }

    #[test]
    fn test_format_diagnostics_colors_level_only() {
        let result = check_markup(r"\frobnicate");
        let text = format_diagnostics(&result, true);
        assert!(text.starts_with("line 1: \x1b[1;33mwarning\x1b[0m: unknown command \\frobnicate"));
        assert!(text.ends_with("ok: 1 warning"));
    }
}
