//! Fixed-output commands and URI schemes
//!
//! Escape commands produce the literal character the tokenizer would
//! otherwise treat as syntax.

use phf::{phf_map, phf_set};

/// Canonical literal command name → rendered text
pub static LITERALS: phf::Map<&'static str, &'static str> = phf_map! {
    "backslash" => "\\",
    "left-brace" => "{",
    "right-brace" => "}",
    "left-bracket" => "[",
    "right-bracket" => "]",
    "pipe" => "|",
    "backquote" => "`",
    "squiggle" => "~",
    "dollar" => "$",
    "br" => "\n<br/>\n",
    "true" => "true",
    "false" => "false",
};

/// Alternative spellings of the literal commands
pub static LITERAL_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "bslash" => "backslash",
    "leftbrace" => "left-brace",
    "lbrace" => "left-brace",
    "opening-brace" => "left-brace",
    "openingbrace" => "left-brace",
    "obrace" => "left-brace",
    "rightbrace" => "right-brace",
    "rbrace" => "right-brace",
    "closing-brace" => "right-brace",
    "closingbrace" => "right-brace",
    "cbrace" => "right-brace",
    "leftbracket" => "left-bracket",
    "lbracket" => "left-bracket",
    "rightbracket" => "right-bracket",
    "rbracket" => "right-bracket",
    "bar" => "pipe",
    "backtick" => "backquote",
    "tilde" => "squiggle",
    "newline" => "br",
};

/// Rendered text of one non-breaking space
pub const NBSP: &str = "&nbsp;";

/// Upper bound on the `\nbsp{n}` repeat count
pub const MAX_NBSP_REPEAT: usize = 1000;

/// URI schemes accepted by `\link` and `\image`
pub static URI_SCHEMES: phf::Set<&'static str> = phf_set! {
    "http",
    "https",
    "ftp",
    "ftps",
    "mailto",
    "irc",
    "news",
    "gopher",
};

/// Look up the output of a literal command by canonical name or alias
pub fn get_literal(name: &str) -> Option<&'static str> {
    let canonical = LITERAL_ALIASES.get(name).copied().unwrap_or(name);
    LITERALS.get(canonical).copied()
}

/// Whether `scheme` (lowercase) is an accepted URI scheme
pub fn is_known_scheme(scheme: &str) -> bool {
    URI_SCHEMES.contains(scheme)
}
