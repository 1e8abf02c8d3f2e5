//! Tag-wrapping and spacing commands

use crate::core::parser::ParseNode;
use crate::core::render::Evaluator;
use crate::data::literals::{MAX_NBSP_REPEAT, NBSP};
use crate::utils::html::{wrap_tag, wrap_tag_with};

use super::math::numbers;

/// Wrap the rendered children in `tag`
pub(super) fn wrap(
    ev: &mut Evaluator<'_>,
    tag: &str,
    attributes: Option<&str>,
    children: &[ParseNode],
) -> String {
    let content = ev.render_all(children);
    match attributes {
        Some(attributes) => wrap_tag_with(tag, attributes, &content),
        None => wrap_tag(tag, &content),
    }
}

/// `&nbsp;` repeated by the first numeric child, 1 by default
pub(super) fn nbsp(ev: &mut Evaluator<'_>, children: &[ParseNode]) -> String {
    let count = numbers(ev, children)
        .first()
        .map_or(1, |&n| (n.trunc().max(1.0) as usize).min(MAX_NBSP_REPEAT));
    NBSP.repeat(count)
}
