//! Render configuration and evaluation state
//!
//! [`RenderOptions`] configures a render; [`Evaluator`] carries the state of
//! one render in progress (the commander in use, current nesting depth and
//! the warnings collected so far).

use crate::core::commander::Commander;
use crate::core::parser::{ParseNode, DEFAULT_MAX_DEPTH};
use crate::utils::error::{CommandError, RenderWarning};
use crate::utils::html::{command_error, escape_html};

// =============================================================================
// Render Options
// =============================================================================

/// Options for parsing and rendering markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum command nesting depth accepted by the parser and evaluator
    /// Default: 200
    pub max_depth: usize,

    /// Base URL for fallback entity and user links (no trailing slash)
    /// Default: empty, giving site-relative links
    pub base_url: String,

    /// Wrap each paragraph in `<p>…</p>`; otherwise join paragraphs with a space
    /// Default: true
    pub wrap_paragraphs: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            base_url: String::new(),
            wrap_paragraphs: true,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for inline snippets: no paragraph wrapping
    pub fn inline() -> Self {
        Self {
            wrap_paragraphs: false,
            ..Self::default()
        }
    }

    /// Options for untrusted input: a small nesting limit
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Evaluation state for one render
pub struct Evaluator<'a> {
    commander: &'a dyn Commander,
    options: &'a RenderOptions,
    depth: usize,
    warnings: Vec<RenderWarning>,
}

impl<'a> Evaluator<'a> {
    pub fn new(commander: &'a dyn Commander, options: &'a RenderOptions) -> Self {
        Self {
            commander,
            options,
            depth: 0,
            warnings: Vec::new(),
        }
    }

    pub fn commander(&self) -> &'a dyn Commander {
        self.commander
    }

    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    /// Current command nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<RenderWarning> {
        self.warnings
    }

    /// Render one node.
    ///
    /// Text is escaped, whitespace collapses to one space and commands are
    /// dispatched to the commander. Never fails: problems render inline.
    pub fn render(&mut self, node: &ParseNode) -> String {
        match node {
            ParseNode::Text(text) => escape_html(text),
            ParseNode::Whitespace => " ".to_string(),
            ParseNode::Command { name, children } => {
                if self.depth >= self.options.max_depth {
                    let limit = self.options.max_depth;
                    return self.fail(name, CommandError::TooDeep { limit });
                }
                self.depth += 1;
                let commander = self.commander;
                let html = commander.evaluate(self, name, children);
                self.depth -= 1;
                html
            }
        }
    }

    /// Render nodes and concatenate the results
    pub fn render_all(&mut self, nodes: &[ParseNode]) -> String {
        nodes.iter().map(|node| self.render(node)).collect()
    }

    /// Record `err` against `command` and return its inline marker
    pub fn fail(&mut self, command: &str, err: CommandError) -> String {
        let html = command_error(&err);
        self.warnings.push(RenderWarning {
            command: Some(command.to_string()),
            message: err.to_string(),
        });
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commander::StandardCommander;

    #[test]
    fn test_options_presets() {
        assert_eq!(RenderOptions::new().max_depth, DEFAULT_MAX_DEPTH);
        assert!(RenderOptions::default().wrap_paragraphs);
        assert!(!RenderOptions::inline().wrap_paragraphs);
        assert_eq!(RenderOptions::strict().max_depth, 32);
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let options = RenderOptions::new().with_base_url("https://example.org/");
        assert_eq!(options.base_url, "https://example.org");
    }

    #[test]
    fn test_render_text_and_whitespace() {
        let options = RenderOptions::default();
        let mut ev = Evaluator::new(&StandardCommander, &options);
        assert_eq!(ev.render(&ParseNode::text("a<b")), "a&lt;b");
        assert_eq!(ev.render(&ParseNode::Whitespace), " ");
        assert!(ev.warnings().is_empty());
    }

    #[test]
    fn test_depth_limit_fails_closed() {
        let options = RenderOptions::new().with_max_depth(2);
        let mut ev = Evaluator::new(&StandardCommander, &options);
        let tree = ParseNode::command(
            "b",
            vec![ParseNode::command("i", vec![ParseNode::command("u", vec![])])],
        );
        let html = ev.render(&tree);
        assert!(html.starts_with("<b><i><span style=\"color: red\">"));
        assert!(html.contains("nested deeper than 2"));
        assert_eq!(ev.depth(), 0);
        assert_eq!(ev.warnings().len(), 1);
        assert_eq!(ev.warnings()[0].command.as_deref(), Some("u"));
    }
}
