//! # texhtml
//!
//! Renderer for a small TeX-flavoured markup language: backslash commands
//! with brace-delimited arguments, evaluated to HTML.
//!
//! ## Features
//!
//! - **Forgiving parser**: unclosed argument lists close at the end of their
//!   paragraph, stray braces are kept as text
//! - **Formatting and structure**: bold, italics, headings, lists and tables
//! - **Expression language**: arithmetic, transcendental functions,
//!   comparisons, booleans and conditionals
//! - **Pluggable commands**: hosts supply a [`Commander`] to add commands or
//!   to resolve entity references (`\link-id{42}`, `\user{name}`)
//! - **Total rendering**: evaluation problems render as inline error markers
//!   and are reported as warnings; only structural parse errors fail
//!
//! ## Usage Examples
//!
//! ### Rendering
//!
//! ```rust
//! use texhtml::to_html;
//!
//! let html = to_html(r"\sup{\b{\it{Deo}}} \+{1 2 3 4}");
//! assert_eq!(html, "<p>\n<sup><b><i>Deo</i></b></sup> 10\n</p>\n");
//! ```
//!
//! ### Host commands and options
//!
//! ```rust
//! use texhtml::{try_render, Commander, Evaluator, ParseNode, RenderOptions};
//!
//! struct Site;
//!
//! impl Commander for Site {
//!     fn evaluate(&self, ev: &mut Evaluator<'_>, name: &str, children: &[ParseNode]) -> String {
//!         match name {
//!             "shout" => ev.render_all(children).to_uppercase(),
//!             _ => ev.evaluate_builtin(name, children),
//!         }
//!     }
//! }
//!
//! let options = RenderOptions::inline().with_base_url("https://example.org");
//! let output = try_render(r"\shout{amen} \tag-id{7}", &Site, &options).unwrap();
//! assert_eq!(
//!     output.content,
//!     r#"AMEN <a href="https://example.org/tags/7">Tag #7</a>"#
//! );
//! ```

/// Core rendering pipeline
pub mod core;

/// Data layer - static command tables
pub mod data;

/// Utility modules
pub mod utils;

// Re-export the pipeline
pub use core::commander::{
    ActionableCommander, Commander, EntityKind, EntityResolver, StandardCommander,
};
pub use core::parser::{
    parse_command, parse_document, parse_document_with_options, parse_paragraph,
    split_paragraphs, Document, ParseNode, Paragraph,
};
pub use core::render::{
    render_document, render_node, to_html, try_render, try_to_html, Evaluator, RenderOptions,
};
pub use core::token::Token;
pub use core::tokenizer::tokenize;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::diagnostics::{check_markup, CheckResult, Diagnostic, DiagnosticLevel};
pub use utils::error::{
    CommandError, ParseError, RenderError, RenderOutput, RenderResult, RenderWarning,
};

/// Render markup with a host commander, never failing.
///
/// A structural parse error renders as a single error paragraph and is also
/// reported as the only warning.
pub fn render(input: &str, commander: &dyn Commander, options: &RenderOptions) -> RenderOutput {
    match try_render(input, commander, options) {
        Ok(output) => output,
        Err(err) => {
            let message = err.to_string();
            let marker = utils::html::error_marker(&message);
            let content = if options.wrap_paragraphs {
                core::render::wrap_paragraph(&marker)
            } else {
                marker
            };
            RenderOutput::with_warnings(
                content,
                vec![RenderWarning {
                    command: None,
                    message,
                }],
            )
        }
    }
}
