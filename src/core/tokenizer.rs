//! Tokenizer: raw markup text → token sequence
//!
//! At every offset a fixed-priority list of matchers is tried and the first
//! one that matches consumes its (maximal) match:
//!
//! ```text
//! single character tokens  \ { } [ ] | ` ~ $
//! empty newlines           \n\n+
//! whitespace               \s+  (stopping before any \n\n)
//! number                   a word that is entirely a decimal number
//! word                     [^\s{}\\]+
//! ```
//!
//! The empty-newline matcher must run before the whitespace matcher, since a
//! newline run is also whitespace. `Word` matches anything the other classes
//! leave over, which makes tokenization total.

use lazy_static::lazy_static;
use regex::Regex;

use super::token::Token;

lazy_static! {
    static ref EMPTY_NEWLINES: Regex = Regex::new(r"\A\n\n+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\A\s+").unwrap();
    static ref WORD: Regex = Regex::new(r"\A[^\s{}\\]+").unwrap();
    static ref NUMBER: Regex =
        Regex::new(r"\A[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?\z").unwrap();
}

/// A matcher returns the token found at the start of `rest` and its length in bytes
type Matcher = fn(&str) -> Option<(Token, usize)>;

/// Matchers in priority order
const MATCHERS: [Matcher; 5] = [
    match_single_character,
    match_empty_newlines,
    match_whitespace,
    match_number,
    match_word,
];

/// Tokenize markup text.
///
/// Carriage returns are dropped before matching. Concatenating the text of
/// the returned tokens reproduces the CR-stripped input exactly.
pub fn tokenize(text: &str) -> Vec<Token> {
    let text = strip_carriage_returns(text);
    let mut tokens = Vec::new();
    let mut rest = text.as_str();

    while !rest.is_empty() {
        let (token, len) = MATCHERS
            .iter()
            .find_map(|matcher| matcher(rest))
            .unwrap_or_else(|| unreachable!("no token matcher accepts {:?}", rest));
        tokens.push(token);
        rest = &rest[len..];
    }

    tokens
}

/// Remove every `\r` from the input
pub fn strip_carriage_returns(text: &str) -> String {
    text.replace('\r', "")
}

fn match_single_character(rest: &str) -> Option<(Token, usize)> {
    let token = match rest.as_bytes().first()? {
        b'\\' => Token::Backslash,
        b'{' => Token::LeftBrace,
        b'}' => Token::RightBrace,
        b'[' => Token::LeftBracket,
        b']' => Token::RightBracket,
        b'|' => Token::Pipe,
        b'`' => Token::Backquote,
        b'~' => Token::Squiggle,
        b'$' => Token::Dollar,
        _ => return None,
    };
    Some((token, 1))
}

fn match_empty_newlines(rest: &str) -> Option<(Token, usize)> {
    let m = EMPTY_NEWLINES.find(rest)?;
    Some((Token::EmptyNewlines(m.as_str().to_string()), m.end()))
}

fn match_whitespace(rest: &str) -> Option<(Token, usize)> {
    let mut run = WHITESPACE.find(rest)?.as_str();
    // A blank line inside the run belongs to the next EmptyNewlines token.
    if let Some(blank) = run.find("\n\n") {
        run = &run[..blank];
    }
    if run.is_empty() {
        return None;
    }
    Some((Token::Whitespace(run.to_string()), run.len()))
}

fn match_number(rest: &str) -> Option<(Token, usize)> {
    let word = WORD.find(rest)?.as_str();
    if !NUMBER.is_match(word) {
        return None;
    }
    Some((Token::Number(word.to_string()), word.len()))
}

fn match_word(rest: &str) -> Option<(Token, usize)> {
    let m = WORD.find(rest)?;
    Some((Token::Word(m.as_str().to_string()), m.end()))
}
