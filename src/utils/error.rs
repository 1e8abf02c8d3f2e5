//! Error handling for texhtml rendering
//!
//! Errors come in two tiers:
//!
//! - [`ParseError`]: structural problems in the markup (a backslash that is
//!   not followed by a command name, nesting past the configured limit).
//!   These abort the whole render.
//! - [`CommandError`]: semantic problems found while evaluating a single
//!   command (unknown name, bad operand, invalid URI, unresolved ID). These
//!   never abort; they are rendered in place as an inline error marker and
//!   recorded as a [`RenderWarning`].

use thiserror::Error;

/// Structural parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A backslash was not followed by a word naming the command
    #[error("Parse error at line {line}: expected a command name after '\\', found {found}")]
    MissingCommandName { line: usize, found: String },

    /// Commands are nested deeper than the configured limit
    #[error("Parse error at line {line}: commands nested deeper than {limit} levels")]
    NestingTooDeep { line: usize, limit: usize },
}

impl ParseError {
    /// Line (1-indexed) the error was detected on
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingCommandName { line, .. } => *line,
            ParseError::NestingTooDeep { line, .. } => *line,
        }
    }
}

/// Error returned by the fallible render entry points
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for rendering
pub type RenderResult<T> = Result<T, RenderError>;

/// Evaluation error for a single command.
///
/// The `Display` text is exactly what appears inside the inline marker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command {0}")]
    UnknownCommand(String),

    #[error("Non-numeric result.")]
    NonNumeric,

    #[error("Complex numbers are not yet supported.")]
    Complex,

    #[error("{command}: no numeric argument given")]
    MissingNumber { command: String },

    #[error("{command}: {found} is not a boolean")]
    NotBoolean { command: String, found: String },

    #[error("{command}: expected {expected} argument(s), got {got}")]
    Arity {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("{command}: error: no URI specified")]
    MissingUri { command: String },

    #[error("{command}: error: invalid URI {uri}")]
    InvalidUri { command: String, uri: String },

    #[error("mailto: error: invalid e-mail address {0}")]
    InvalidEmail(String),

    #[error("{kind}_id: error: no {kind} ID specified")]
    MissingId { kind: &'static str },

    #[error("{kind}_id: error: invalid {kind} ID specified")]
    InvalidId { kind: &'static str },

    #[error("unknown {kind} ID {id}")]
    UnknownEntity { kind: &'static str, id: u64 },

    #[error("user: error: no user specified")]
    MissingUser,

    #[error("unknown user {0}")]
    UnknownUser(String),

    #[error("commands nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

impl CommandError {
    pub fn missing_number(command: impl Into<String>) -> Self {
        CommandError::MissingNumber {
            command: command.into(),
        }
    }

    pub fn not_boolean(command: impl Into<String>, found: impl Into<String>) -> Self {
        CommandError::NotBoolean {
            command: command.into(),
            found: found.into(),
        }
    }

    pub fn arity(command: impl Into<String>, expected: usize, got: usize) -> Self {
        CommandError::Arity {
            command: command.into(),
            expected,
            got,
        }
    }

    pub fn invalid_uri(command: impl Into<String>, uri: impl Into<String>) -> Self {
        CommandError::InvalidUri {
            command: command.into(),
            uri: uri.into(),
        }
    }
}

/// A recovered, non-fatal problem found while rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderWarning {
    /// Command being evaluated when the problem was found, if any
    pub command: Option<String>,
    pub message: String,
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.command {
            Some(ref command) => write!(f, "Warning in \\{}: {}", command, self.message),
            None => write!(f, "Warning: {}", self.message),
        }
    }
}

/// Rendered HTML with the warnings collected along the way
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// The rendered HTML
    pub content: String,
    /// Every inline error marker emitted, in document order
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<RenderWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
