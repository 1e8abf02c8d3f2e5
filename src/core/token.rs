//! Token types produced by the tokenizer
//!
//! Every token owns the exact source text it was matched from, so the token
//! sequence of a document is a lossless partition of the (CR-stripped) input.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// `\`
    Backslash,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `|`
    Pipe,
    /// `` ` ``
    Backquote,
    /// `~`
    Squiggle,
    /// `$`
    Dollar,
    /// Two or more consecutive newlines; separates paragraphs
    EmptyNewlines(String),
    /// Any other run of whitespace
    Whitespace(String),
    /// A word-shaped run that is entirely a decimal number
    Number(String),
    /// Maximal run of anything but whitespace, braces and backslashes
    Word(String),
}

impl Token {
    /// Source text this token was matched from
    pub fn text(&self) -> &str {
        match self {
            Token::Backslash => "\\",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Pipe => "|",
            Token::Backquote => "`",
            Token::Squiggle => "~",
            Token::Dollar => "$",
            Token::EmptyNewlines(text)
            | Token::Whitespace(text)
            | Token::Number(text)
            | Token::Word(text) => text,
        }
    }

    /// Tokens the parser keeps verbatim as text.
    ///
    /// The bracket, pipe, backquote, squiggle and dollar tokens are
    /// recognised so that they can gain meaning later; for now they read as
    /// ordinary text.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Token::Word(_)
                | Token::Number(_)
                | Token::LeftBracket
                | Token::RightBracket
                | Token::Pipe
                | Token::Backquote
                | Token::Squiggle
                | Token::Dollar
        )
    }

    /// Number of newlines in the token's text
    pub fn newline_count(&self) -> usize {
        match self {
            Token::EmptyNewlines(text) | Token::Whitespace(text) => {
                text.bytes().filter(|&b| b == b'\n').count()
            }
            _ => 0,
        }
    }

    /// Short human readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::EmptyNewlines(_) => "a blank line".to_string(),
            Token::Whitespace(_) => "whitespace".to_string(),
            Token::Number(text) => format!("number '{}'", text),
            Token::Word(text) => format!("word '{}'", text),
            other => format!("'{}'", other.text()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
