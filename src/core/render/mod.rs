//! Renderer: parse tree → HTML
//!
//! Walks each paragraph with an [`Evaluator`], wraps non-empty paragraphs and
//! joins them. Evaluation never fails; only parsing can, and the fallible
//! entry points surface that as a [`RenderError`].

mod context;

pub use context::{Evaluator, RenderOptions};

use crate::core::commander::{Commander, StandardCommander};
use crate::core::parser::{parse_document_with_options, Document, ParseNode};
use crate::utils::error::{RenderError, RenderOutput, RenderResult};
use crate::utils::html::error_marker;

/// Wrap one paragraph's HTML in `<p>` the way documents are laid out
pub fn wrap_paragraph(content: &str) -> String {
    format!("<p>\n{}\n</p>\n", content)
}

/// Render a single node with a fresh evaluator
pub fn render_node(node: &ParseNode, commander: &dyn Commander, options: &RenderOptions) -> String {
    Evaluator::new(commander, options).render(node)
}

/// Render a parsed document.
///
/// Paragraphs whose content renders empty are omitted.
pub fn render_document(
    document: &Document,
    commander: &dyn Commander,
    options: &RenderOptions,
) -> RenderOutput {
    let mut ev = Evaluator::new(commander, options);

    let blocks: Vec<String> = document
        .paragraphs
        .iter()
        .map(|paragraph| ev.render_all(&paragraph.nodes))
        .filter(|html| !html.trim().is_empty())
        .map(|html| {
            if options.wrap_paragraphs {
                wrap_paragraph(&html)
            } else {
                html
            }
        })
        .collect();

    let separator = if options.wrap_paragraphs { "\n" } else { " " };
    RenderOutput::with_warnings(blocks.join(separator), ev.into_warnings())
}

/// Parse and render `text`
pub fn try_render(
    text: &str,
    commander: &dyn Commander,
    options: &RenderOptions,
) -> RenderResult<RenderOutput> {
    let document = parse_document_with_options(text, options)?;
    Ok(render_document(&document, commander, options))
}

/// Render with the standard commander and default options
pub fn try_to_html(text: &str) -> RenderResult<String> {
    try_render(text, &StandardCommander, &RenderOptions::default()).map(|output| output.content)
}

/// Render with the standard commander and default options.
///
/// A structural parse error renders as a single error paragraph.
pub fn to_html(text: &str) -> String {
    match try_to_html(text) {
        Ok(html) => html,
        Err(RenderError::Parse(err)) => wrap_paragraph(&error_marker(&err.to_string())),
    }
}
