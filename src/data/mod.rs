//! Data layer - static command tables
//!
//! - Command names, aliases and their handler kinds
//! - Literal escape outputs and accepted URI schemes

pub mod commands;
pub mod literals;

// Re-export commonly used items
pub use commands::{
    command_names, is_known_command, lookup_command, normalize_name, Arithmetic, CommandHandler,
    Comparison, Control, EntityKind, Function, Logic, Percent, COMMANDS,
};
pub use literals::{get_literal, is_known_scheme, LITERALS, URI_SCHEMES};
