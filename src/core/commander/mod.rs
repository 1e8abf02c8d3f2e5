//! Commander: the per-command evaluation strategy
//!
//! A [`Commander`] decides what every `\command` renders to. The built-in
//! table (see [`crate::data::commands`]) covers formatting, lists, literals,
//! arithmetic, booleans, control forms and links; hosts customise behaviour
//! by implementing the trait and delegating the rest to
//! [`Evaluator::evaluate_builtin`].
//!
//! Two implementations ship with the crate:
//!
//! - [`StandardCommander`]: entity and user references become plain links
//!   under [`RenderOptions::base_url`].
//! - [`ActionableCommander`]: entity and user references are resolved
//!   through a host-supplied [`EntityResolver`].
//!
//! The commander is always passed explicitly to the render entry points;
//! there is no process-wide default to mutate.

mod links;
mod logic;
mod markup;
mod math;

use crate::core::parser::ParseNode;
use crate::core::render::{Evaluator, RenderOptions};
use crate::data::commands::{lookup_command, CommandHandler};
use crate::utils::error::CommandError;
use crate::utils::html::escape_html;

pub use crate::data::commands::EntityKind;
pub use math::{coerce_number, format_number};

/// Evaluation strategy for commands
pub trait Commander {
    /// Render `\name{children}`.
    ///
    /// The default dispatches through the built-in command table.
    fn evaluate(&self, ev: &mut Evaluator<'_>, name: &str, children: &[ParseNode]) -> String {
        ev.evaluate_builtin(name, children)
    }

    /// Render a reference to a host entity with a syntactically valid ID
    fn entity_link(
        &self,
        kind: EntityKind,
        id: u64,
        options: &RenderOptions,
    ) -> Result<String, CommandError> {
        Ok(format!(
            r#"<a href="{}/{}/{}{}">{} #{}</a>"#,
            options.base_url,
            kind.plural(),
            id,
            kind.view(),
            kind.label(),
            id
        ))
    }

    /// Render a reference to a host user
    fn user_link(&self, user: &str, options: &RenderOptions) -> Result<String, CommandError> {
        let user = escape_html(user);
        Ok(format!(
            r#"<a href="{}/users/{}">{}</a>"#,
            options.base_url, user, user
        ))
    }
}

/// The built-in commands with plain fallback links
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCommander;

impl Commander for StandardCommander {}

// ============================================================================
// Host resolution
// ============================================================================

/// Host capability that turns entity and user references into HTML
pub trait EntityResolver {
    /// Fragment for entity `id` of `kind`, or `None` if there is no such entity
    fn resolve_entity(&self, kind: EntityKind, id: u64) -> Option<String>;

    /// Fragment for the user named by `identifier`, or `None` if unknown
    fn resolve_user(&self, identifier: &str) -> Option<String>;
}

/// Built-in commands with entity and user references resolved by the host.
///
/// The resolver is only consulted once an ID has been validated; a missing
/// or non-numeric ID never reaches it.
#[derive(Debug, Clone)]
pub struct ActionableCommander<R> {
    resolver: R,
}

impl<R: EntityResolver> ActionableCommander<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: EntityResolver> Commander for ActionableCommander<R> {
    fn entity_link(
        &self,
        kind: EntityKind,
        id: u64,
        _options: &RenderOptions,
    ) -> Result<String, CommandError> {
        self.resolver
            .resolve_entity(kind, id)
            .ok_or(CommandError::UnknownEntity {
                kind: kind.singular(),
                id,
            })
    }

    fn user_link(&self, user: &str, _options: &RenderOptions) -> Result<String, CommandError> {
        self.resolver
            .resolve_user(user)
            .ok_or_else(|| CommandError::UnknownUser(user.to_string()))
    }
}

// ============================================================================
// Built-in dispatch
// ============================================================================

impl<'a> Evaluator<'a> {
    /// Evaluate a command through the built-in table.
    ///
    /// Unknown names and failed evaluations render as inline error markers
    /// and are recorded as warnings.
    pub fn evaluate_builtin(&mut self, name: &str, children: &[ParseNode]) -> String {
        let handler = match lookup_command(name) {
            Some(handler) => handler,
            None => return self.fail(name, CommandError::UnknownCommand(name.to_string())),
        };

        let result = match handler {
            CommandHandler::Wrap(tag) => Ok(markup::wrap(self, tag, None, children)),
            CommandHandler::WrapWith { tag, attributes } => {
                Ok(markup::wrap(self, tag, Some(attributes), children))
            }
            CommandHandler::Literal(text) => Ok(text.to_string()),
            CommandHandler::Nbsp => Ok(markup::nbsp(self, children)),
            CommandHandler::Constant(value) => format_number(value),
            CommandHandler::Arithmetic(op) => math::arithmetic(self, op, name, children),
            CommandHandler::Function(function) => math::function(self, function, name, children),
            CommandHandler::Percent(op) => math::percent(self, op, name, children),
            CommandHandler::Compare(op) => math::compare(self, op, children),
            CommandHandler::Logic(op) => logic::boolean(self, op, name, children),
            CommandHandler::Control(form) => logic::control(self, form, name, children),
            CommandHandler::Link => links::link(self, name, children),
            CommandHandler::Image => links::image(self, name, children),
            CommandHandler::Mailto => links::mailto(self, name, children),
            CommandHandler::Entity(kind) => links::entity(self, kind, children),
            CommandHandler::User => links::user(self, children),
        };

        match result {
            Ok(html) => html,
            Err(err) => self.fail(name, err),
        }
    }
}

/// Children that are not whitespace, in order
fn significant(children: &[ParseNode]) -> Vec<&ParseNode> {
    children.iter().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn eval(commander: &dyn Commander, node: &ParseNode) -> String {
        let options = RenderOptions::new().with_base_url("https://tb.example");
        Evaluator::new(commander, &options).render(node)
    }

    struct Library {
        lookups: Cell<usize>,
    }

    impl EntityResolver for Library {
        fn resolve_entity(&self, kind: EntityKind, id: u64) -> Option<String> {
            self.lookups.set(self.lookups.get() + 1);
            (id == 42).then(|| format!("<span class=\"{}\">#42</span>", kind.singular()))
        }

        fn resolve_user(&self, identifier: &str) -> Option<String> {
            (identifier == "cgore").then(|| "<a class=\"user\">cgore</a>".to_string())
        }
    }

    #[test]
    fn test_unknown_command() {
        let html = eval(&StandardCommander, &ParseNode::command("frob", vec![]));
        assert_eq!(html, r#"<span style="color: red">[unknown command frob]</span>"#);
    }

    #[test]
    fn test_standard_entity_fallback() {
        let node = ParseNode::command("tag-id", vec![ParseNode::text("7")]);
        assert_eq!(
            eval(&StandardCommander, &node),
            r#"<a href="https://tb.example/tags/7">Tag #7</a>"#
        );

        let node = ParseNode::command("bookmarks_folder_id", vec![ParseNode::text("3")]);
        assert_eq!(
            eval(&StandardCommander, &node),
            r#"<a href="https://tb.example/folders/3/bookmarks">Folder #3</a>"#
        );
    }

    #[test]
    fn test_standard_user_fallback() {
        let node = ParseNode::command("user", vec![ParseNode::text("cgore")]);
        assert_eq!(
            eval(&StandardCommander, &node),
            r#"<a href="https://tb.example/users/cgore">cgore</a>"#
        );
    }

    #[test]
    fn test_actionable_resolves_through_host() {
        let commander = ActionableCommander::new(Library {
            lookups: Cell::new(0),
        });

        let node = ParseNode::command("link-id", vec![ParseNode::text("42")]);
        assert_eq!(eval(&commander, &node), r#"<span class="link">#42</span>"#);

        let node = ParseNode::command("note-id", vec![ParseNode::text("9")]);
        assert_eq!(
            eval(&commander, &node),
            r#"<span style="color: red">[unknown note ID 9]</span>"#
        );
        assert_eq!(commander.resolver().lookups.get(), 2);
    }

    #[test]
    fn test_actionable_skips_host_for_invalid_ids() {
        let commander = ActionableCommander::new(Library {
            lookups: Cell::new(0),
        });

        let node = ParseNode::command("link-id", vec![ParseNode::text("abc")]);
        assert_eq!(
            eval(&commander, &node),
            r#"<span style="color: red">[link_id: error: invalid link ID specified]</span>"#
        );
        let node = ParseNode::command("link-id", vec![]);
        assert_eq!(
            eval(&commander, &node),
            r#"<span style="color: red">[link_id: error: no link ID specified]</span>"#
        );
        assert_eq!(commander.resolver().lookups.get(), 0);
    }

    #[test]
    fn test_actionable_users() {
        let commander = ActionableCommander::new(Library {
            lookups: Cell::new(0),
        });
        let node = ParseNode::command("user", vec![ParseNode::text("cgore")]);
        assert_eq!(eval(&commander, &node), r#"<a class="user">cgore</a>"#);

        let node = ParseNode::command("user", vec![ParseNode::text("nobody")]);
        assert!(eval(&commander, &node).contains("[unknown user nobody]"));
    }

    #[test]
    fn test_host_can_override_commands() {
        struct Shouting;

        impl Commander for Shouting {
            fn evaluate(&self, ev: &mut Evaluator<'_>, name: &str, children: &[ParseNode]) -> String {
                match name {
                    "shout" => ev.render_all(children).to_uppercase(),
                    _ => ev.evaluate_builtin(name, children),
                }
            }
        }

        let node = ParseNode::command(
            "b",
            vec![ParseNode::command("shout", vec![ParseNode::text("deo")])],
        );
        assert_eq!(eval(&Shouting, &node), "<b>DEO</b>");
    }
}
