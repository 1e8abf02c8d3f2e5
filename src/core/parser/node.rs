//! Parse tree types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of a paragraph's parse tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseNode {
    /// Literal text, HTML-escaped when rendered
    Text(String),
    /// A whitespace run; always renders as a single space
    Whitespace,
    /// `\name` or `\name{children…}`
    Command {
        name: String,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    pub fn text(text: impl Into<String>) -> Self {
        ParseNode::Text(text.into())
    }

    pub fn command(name: impl Into<String>, children: Vec<ParseNode>) -> Self {
        ParseNode::Command {
            name: name.into(),
            children,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, ParseNode::Whitespace)
    }

    /// The text of a `Text` node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParseNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The name of a `Command` node
    pub fn command_name(&self) -> Option<&str> {
        match self {
            ParseNode::Command { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Plain text of this subtree, with command names dropped
    pub fn text_content(&self) -> String {
        match self {
            ParseNode::Text(text) => text.clone(),
            ParseNode::Whitespace => " ".to_string(),
            ParseNode::Command { children, .. } => {
                children.iter().map(ParseNode::text_content).collect()
            }
        }
    }

    /// Nesting depth of commands in this subtree (a bare command counts 1)
    pub fn depth(&self) -> usize {
        match self {
            ParseNode::Command { children, .. } => {
                1 + children.iter().map(ParseNode::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

/// The nodes of one blank-line separated block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paragraph {
    pub nodes: Vec<ParseNode>,
}

impl Paragraph {
    pub fn new(nodes: Vec<ParseNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A parsed document: paragraphs in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Iterate over every node of the document, depth first
    pub fn walk(&self) -> impl Iterator<Item = &ParseNode> {
        let mut stack: Vec<&ParseNode> = self
            .paragraphs
            .iter()
            .rev()
            .flat_map(|p| p.nodes.iter().rev())
            .collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let ParseNode::Command { children, .. } = node {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }
}
