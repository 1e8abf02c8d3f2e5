//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Markup diagnostics
//! - HTML escaping and tag helpers

pub mod diagnostics;
pub mod error;
pub mod html;

// Re-export commonly used items
pub use diagnostics::{check_markup, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{
    CommandError, ParseError, ParseResult, RenderError, RenderOutput, RenderResult, RenderWarning,
};
pub use html::{error_marker, escape_html};
