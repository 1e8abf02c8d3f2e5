//! Hyperlinks, images and host references

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::core::parser::ParseNode;
use crate::core::render::Evaluator;
use crate::data::commands::EntityKind;
use crate::data::literals::is_known_scheme;
use crate::utils::error::CommandError;
use crate::utils::html::escape_html;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"\A[^@\s]+@[^@\s]+\z").unwrap();
    static ref ALL_DIGITS: Regex = Regex::new(r"\A[0-9]+\z").unwrap();
}

/// Source text of an argument: raw for text, rendered for commands
fn argument_text(ev: &mut Evaluator<'_>, node: &ParseNode) -> String {
    match node {
        ParseNode::Text(text) => text.clone(),
        other => ev.render(other),
    }
}

/// Split children into the first argument and the rest, skipping whitespace
/// around the first argument
fn split_first_argument(children: &[ParseNode]) -> Option<(&ParseNode, &[ParseNode])> {
    let start = children.iter().position(|c| !c.is_whitespace())?;
    let rest = &children[start + 1..];
    let skip = rest.iter().take_while(|c| c.is_whitespace()).count();
    Some((&children[start], &rest[skip..]))
}

/// Validate `uri` as an absolute URI with an accepted scheme
fn checked_uri(command: &str, uri: &str) -> Result<String, CommandError> {
    let parsed = Url::parse(uri).map_err(|_| CommandError::invalid_uri(command, uri))?;
    if !is_known_scheme(parsed.scheme()) {
        return Err(CommandError::invalid_uri(command, uri));
    }
    Ok(escape_html(uri))
}

fn required_uri<'c>(
    ev: &mut Evaluator<'_>,
    command: &str,
    children: &'c [ParseNode],
) -> Result<(String, &'c [ParseNode]), CommandError> {
    let (first, rest) = split_first_argument(children).ok_or_else(|| {
        CommandError::MissingUri {
            command: command.to_string(),
        }
    })?;
    let uri = argument_text(ev, first);
    Ok((checked_uri(command, uri.trim())?, rest))
}

/// `\link{uri description…}`; the URI doubles as the description
pub(super) fn link(
    ev: &mut Evaluator<'_>,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let (href, rest) = required_uri(ev, name, children)?;
    let description = ev.render_all(rest);
    let description = match description.trim_end() {
        "" => href.clone(),
        text => text.to_string(),
    };
    Ok(format!(r#"<a href="{}">{}</a>"#, href, description))
}

/// `\image{uri alt…}`
pub(super) fn image(
    ev: &mut Evaluator<'_>,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let (src, rest) = required_uri(ev, name, children)?;
    let alt: String = rest.iter().map(ParseNode::text_content).collect();
    Ok(format!(
        r#"<img src="{}" alt="{}"/>"#,
        src,
        escape_html(alt.trim_end())
    ))
}

/// `\mailto{address}`
pub(super) fn mailto(
    ev: &mut Evaluator<'_>,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let (first, _) = split_first_argument(children).ok_or_else(|| CommandError::MissingUri {
        command: name.to_string(),
    })?;
    let address = argument_text(ev, first);
    if !EMAIL.is_match(&address) {
        return Err(CommandError::InvalidEmail(address));
    }
    let address = escape_html(&address);
    Ok(format!(r#"<a href="mailto:{}">{}</a>"#, address, address))
}

/// First text child, the identifier of an entity or user reference
fn first_text(children: &[ParseNode]) -> Option<&str> {
    children.iter().find_map(ParseNode::as_text)
}

/// `\link-id{42}` and friends
pub(super) fn entity(
    ev: &mut Evaluator<'_>,
    kind: EntityKind,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let singular = kind.singular();
    let id = first_text(children).ok_or(CommandError::MissingId { kind: singular })?;
    if !ALL_DIGITS.is_match(id) {
        return Err(CommandError::InvalidId { kind: singular });
    }
    let id: u64 = id
        .parse()
        .map_err(|_| CommandError::InvalidId { kind: singular })?;
    ev.commander().entity_link(kind, id, ev.options())
}

/// `\user{name}`
pub(super) fn user(ev: &mut Evaluator<'_>, children: &[ParseNode]) -> Result<String, CommandError> {
    let user = first_text(children).ok_or(CommandError::MissingUser)?;
    ev.commander().user_link(user, ev.options())
}
