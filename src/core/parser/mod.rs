//! Paragraph splitter and command parser
//!
//! Turns a token stream into a [`Document`]: a list of paragraphs, each a
//! forest of [`ParseNode`]s.
//!
//! ```text
//! tokens -> split on blank lines -> recursive descent per paragraph -> Document
//! ```
//!
//! The grammar is forgiving. An argument list left open at the end of its
//! paragraph is closed implicitly, and a stray brace outside any argument list
//! is kept as text. The only structural error is a backslash that is not
//! followed by a command name, plus nesting past the configured depth.

mod node;
#[allow(clippy::module_inception)]
mod parser;


pub use node::{Document, ParseNode, Paragraph};
pub use parser::{ImplicitClose, Parser};

use crate::core::render::RenderOptions;
use crate::core::token::Token;
use crate::core::tokenizer::tokenize;
use crate::utils::error::ParseResult;

/// Default maximum command nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Split tokens into paragraphs on `EmptyNewlines`, discarding the separators.
///
/// Leading or trailing separators produce empty groups.
pub fn split_paragraphs(tokens: &[Token]) -> Vec<&[Token]> {
    tokens
        .split(|t| matches!(t, Token::EmptyNewlines(_)))
        .collect()
}

/// Parse nodes from the start of `tokens`, returning the unconsumed remainder
pub fn parse_paragraph(tokens: &[Token]) -> ParseResult<(Vec<ParseNode>, &[Token])> {
    Parser::new(DEFAULT_MAX_DEPTH).parse_paragraph(tokens)
}

/// Parse one command from the start of `tokens`, returning the unconsumed remainder
pub fn parse_command(tokens: &[Token]) -> ParseResult<(ParseNode, &[Token])> {
    Parser::new(DEFAULT_MAX_DEPTH).parse_command(tokens)
}

/// Tokenize and parse a document with default options
pub fn parse_document(text: &str) -> ParseResult<Document> {
    parse_document_with_options(text, &RenderOptions::default())
}

/// Tokenize and parse a document, honouring `options.max_depth`
pub fn parse_document_with_options(text: &str, options: &RenderOptions) -> ParseResult<Document> {
    Parser::new(options.max_depth).parse_document(&tokenize(text))
}
