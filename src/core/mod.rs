//! Core rendering pipeline
//!
//! ```text
//! text -> tokenizer -> parser -> Document -> render (via Commander) -> HTML
//! ```
//!
//! - `token` / `tokenizer`: lossless lexing of the source text
//! - `parser`: paragraph splitting and recursive-descent command parsing
//! - `commander`: per-command evaluation strategy and the built-in commands
//! - `render`: options, evaluation state and the document entry points

pub mod commander;
pub mod parser;
pub mod render;
pub mod token;
pub mod tokenizer;

pub use commander::{ActionableCommander, Commander, EntityKind, EntityResolver, StandardCommander};
pub use parser::{
    parse_command, parse_document, parse_document_with_options, parse_paragraph,
    split_paragraphs, Document, ParseNode, Paragraph, Parser, DEFAULT_MAX_DEPTH,
};
pub use render::{
    render_document, render_node, to_html, try_render, try_to_html, Evaluator, RenderOptions,
};
pub use token::Token;
pub use tokenizer::tokenize;
