//! Recursive-descent parser over token slices
//!
//! Every parse function takes the remaining tokens and returns what it built
//! together with the tokens it did not consume. Nesting depth equals call
//! stack depth: a nested command consumes its own closing brace (or closes
//! implicitly) before control returns to its parent.

use crate::core::token::Token;
use crate::utils::error::{ParseError, ParseResult};

use super::node::{Document, ParseNode, Paragraph};
use super::split_paragraphs;

/// An argument list that ran out of input before its `}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicitClose {
    /// Name of the command whose argument list was left open
    pub command: String,
    /// Line the command started on
    pub line: usize,
}

/// Parser state: nesting depth, current line and recovered oddities
#[derive(Debug, Clone)]
pub struct Parser {
    max_depth: usize,
    depth: usize,
    line: usize,
    implicit_closes: Vec<ImplicitClose>,
}

impl Parser {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depth: 0,
            line: 1,
            implicit_closes: Vec::new(),
        }
    }

    /// Current line (1-indexed)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Argument lists closed at end of input, in the order they were closed
    pub fn implicit_closes(&self) -> &[ImplicitClose] {
        &self.implicit_closes
    }

    /// Drop the first token, keeping the line count in step
    fn advance<'t>(&mut self, tokens: &'t [Token]) -> &'t [Token] {
        match tokens.split_first() {
            Some((token, rest)) => {
                self.line += token.newline_count();
                rest
            }
            None => tokens,
        }
    }

    // ========================================================================
    // Document level
    // ========================================================================

    /// Parse a whole token stream into paragraphs.
    ///
    /// `EmptyNewlines` tokens separate paragraphs and are discarded; leading
    /// and trailing separators yield empty paragraphs.
    pub fn parse_document(&mut self, tokens: &[Token]) -> ParseResult<Document> {
        let mut separators = tokens
            .iter()
            .filter(|t| matches!(t, Token::EmptyNewlines(_)));
        let mut paragraphs = Vec::new();

        for group in split_paragraphs(tokens) {
            paragraphs.push(self.parse_block(group)?);
            if let Some(separator) = separators.next() {
                self.line += separator.newline_count();
            }
        }

        Ok(Document::new(paragraphs))
    }

    /// Parse one paragraph's tokens completely.
    ///
    /// Unlike [`Parser::parse_paragraph`] this never stops early: a stray
    /// brace at paragraph level is kept as literal text and parsing resumes
    /// after it. Whitespace at either edge of the paragraph is dropped.
    pub fn parse_block(&mut self, tokens: &[Token]) -> ParseResult<Paragraph> {
        let mut nodes = Vec::new();
        let mut rest = tokens;

        loop {
            let (mut parsed, after) = self.parse_paragraph(rest)?;
            nodes.append(&mut parsed);
            match after.first() {
                None => break,
                Some(Token::EmptyNewlines(_)) => nodes.push(ParseNode::Whitespace),
                Some(stray) => nodes.push(ParseNode::text(stray.text())),
            }
            rest = self.advance(after);
        }

        let start = nodes
            .iter()
            .position(|n| !n.is_whitespace())
            .unwrap_or(nodes.len());
        let end = nodes
            .iter()
            .rposition(|n| !n.is_whitespace())
            .map_or(start, |i| i + 1);
        nodes.truncate(end);
        nodes.drain(..start);

        Ok(Paragraph::new(nodes))
    }

    // ========================================================================
    // Paragraph and command level
    // ========================================================================

    /// Parse nodes until a token that cannot start one.
    ///
    /// Braces and blank lines stop the loop and are returned unconsumed, so
    /// an enclosing command can see its own closing brace.
    pub fn parse_paragraph<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> ParseResult<(Vec<ParseNode>, &'t [Token])> {
        let mut nodes = Vec::new();
        let mut rest = tokens;

        while let Some(token) = rest.first() {
            match token {
                Token::Backslash => {
                    let (node, after) = self.parse_command(rest)?;
                    nodes.push(node);
                    rest = after;
                }
                Token::Whitespace(_) => {
                    nodes.push(ParseNode::Whitespace);
                    rest = self.advance(rest);
                }
                token if token.is_text_like() => {
                    nodes.push(ParseNode::text(token.text()));
                    rest = self.advance(rest);
                }
                _ => break,
            }
        }

        Ok((nodes, rest))
    }

    /// Parse `\name`, `\name ` or `\name{…}` at the start of `tokens`
    pub fn parse_command<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> ParseResult<(ParseNode, &'t [Token])> {
        let rest = match tokens.first() {
            Some(Token::Backslash) => self.advance(tokens),
            other => return Err(self.missing_name(other)),
        };
        let name = match rest.first() {
            Some(Token::Word(name)) => name.clone(),
            other => return Err(self.missing_name(other)),
        };
        let line = self.line;
        let rest = self.advance(rest);

        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                line,
                limit: self.max_depth,
            });
        }
        let result = self.parse_arguments(name, line, rest);
        self.depth -= 1;
        result
    }

    fn missing_name(&self, found: Option<&Token>) -> ParseError {
        ParseError::MissingCommandName {
            line: self.line,
            found: found.map_or_else(|| "end of input".to_string(), Token::describe),
        }
    }

    fn parse_arguments<'t>(
        &mut self,
        name: String,
        line: usize,
        tokens: &'t [Token],
    ) -> ParseResult<(ParseNode, &'t [Token])> {
        match tokens.first() {
            Some(Token::LeftBrace) => {}
            // A single whitespace token after a bare command is its delimiter.
            Some(Token::Whitespace(_)) => {
                return Ok((ParseNode::command(name, Vec::new()), self.advance(tokens)))
            }
            _ => return Ok((ParseNode::command(name, Vec::new()), tokens)),
        }

        let mut rest = self.advance(tokens);
        let mut children = Vec::new();

        loop {
            match rest.first() {
                None | Some(Token::EmptyNewlines(_)) => {
                    self.implicit_closes.push(ImplicitClose {
                        command: name.clone(),
                        line,
                    });
                    break;
                }
                Some(Token::RightBrace) => {
                    rest = self.advance(rest);
                    break;
                }
                Some(Token::Backslash) => {
                    let (node, after) = self.parse_command(rest)?;
                    children.push(node);
                    rest = after;
                }
                Some(Token::Whitespace(_)) => {
                    children.push(ParseNode::Whitespace);
                    rest = self.advance(rest);
                }
                Some(token) => {
                    // Includes a stray `{`, which has no meaning inside arguments.
                    children.push(ParseNode::text(token.text()));
                    rest = self.advance(rest);
                }
            }
        }

        Ok((ParseNode::command(name, children), rest))
    }
}
