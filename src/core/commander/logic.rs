//! Boolean and control forms
//!
//! Truth values are the literal strings `true` and `false`. Control forms
//! work on unrendered children and render only the clause they select, so a
//! branch that is not taken can never surface an error.

use crate::core::parser::ParseNode;
use crate::core::render::Evaluator;
use crate::data::commands::{Control, Logic};
use crate::utils::error::CommandError;
use crate::utils::html::wrap_tag;

use super::math::bool_text;
use super::significant;

/// Render `node` and read it as a boolean
fn truth(ev: &mut Evaluator<'_>, name: &str, node: &ParseNode) -> Result<bool, CommandError> {
    let rendered = ev.render(node);
    match rendered.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CommandError::not_boolean(name, rendered)),
    }
}

pub(super) fn boolean(
    ev: &mut Evaluator<'_>,
    op: Logic,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let operands = significant(children)
        .into_iter()
        .map(|node| truth(ev, name, node))
        .collect::<Result<Vec<bool>, _>>()?;
    let trues = operands.iter().filter(|&&b| b).count();
    let all = trues == operands.len();
    let any = trues > 0;

    let value = match op {
        Logic::And => all,
        Logic::Or => any,
        Logic::Xor => trues == 1,
        Logic::Nand => !all,
        Logic::Nor => !any,
        Logic::Xnor => trues != 1,
        Logic::Not => match operands.as_slice() {
            [b] => !b,
            _ => return Err(CommandError::arity(name, 1, operands.len())),
        },
    };
    Ok(bool_text(value))
}

pub(super) fn control(
    ev: &mut Evaluator<'_>,
    form: Control,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let clauses = significant(children);

    let html = match form {
        Control::Comment => String::new(),
        Control::Prog1 => render_opt(ev, clauses.first().copied()),
        Control::Progn => render_opt(ev, clauses.last().copied()),
        Control::If => {
            let condition = condition(&clauses, name)?;
            let branch = if truth(ev, name, condition)? { 1 } else { 2 };
            render_opt(ev, clauses.get(branch).copied())
        }
        Control::Unless => {
            let condition = condition(&clauses, name)?;
            if truth(ev, name, condition)? {
                String::new()
            } else {
                render_opt(ev, clauses.get(1).copied())
            }
        }
        Control::When => {
            let condition = condition(&clauses, name)?;
            if !truth(ev, name, condition)? {
                return Ok(String::new());
            }
            match &clauses[1..] {
                [] => String::new(),
                [only] => ev.render(only),
                body => {
                    let parts: Vec<String> = body.iter().map(|c| ev.render(c)).collect();
                    wrap_tag("span", &parts.join(" "))
                }
            }
        }
        Control::Cond => {
            let mut selected = None;
            for pair in clauses.chunks(2) {
                if truth(ev, name, pair[0])? {
                    selected = Some(pair.get(1).copied());
                    break;
                }
            }
            render_opt(ev, selected.flatten())
        }
        Control::Case => {
            let value = ev.render(condition(&clauses, name)?);
            let mut selected = None;
            for pair in clauses[1..].chunks(2) {
                match pair {
                    [test, form] => {
                        if ev.render(test) == value {
                            selected = Some(*form);
                            break;
                        }
                    }
                    // A lone trailing clause is the default.
                    [default] => selected = Some(*default),
                    _ => {}
                }
            }
            render_opt(ev, selected)
        }
    };
    Ok(html)
}

/// The first clause, required by forms that test something
fn condition<'n>(clauses: &[&'n ParseNode], name: &str) -> Result<&'n ParseNode, CommandError> {
    clauses
        .first()
        .copied()
        .ok_or_else(|| CommandError::arity(name, 1, 0))
}

fn render_opt(ev: &mut Evaluator<'_>, node: Option<&ParseNode>) -> String {
    node.map(|n| ev.render(n)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::core::commander::StandardCommander;
    use crate::core::parser::parse_document;
    use crate::core::render::{Evaluator, RenderOptions};

    fn eval(input: &str) -> (String, usize) {
        let doc = parse_document(input).unwrap();
        let options = RenderOptions::default();
        let mut ev = Evaluator::new(&StandardCommander, &options);
        let html = ev.render_all(&doc.paragraphs[0].nodes);
        (html, ev.warnings().len())
    }

    fn html(input: &str) -> String {
        eval(input).0
    }

    #[test]
    fn test_boolean_identities() {
        assert_eq!(html(r"\and{}"), "true");
        assert_eq!(html(r"\or{}"), "false");
        assert_eq!(html(r"\xor{}"), "false");
        assert_eq!(html(r"\nand{}"), "false");
        assert_eq!(html(r"\nor{}"), "true");
    }

    #[test]
    fn test_boolean_forms() {
        assert_eq!(html(r"\and{true true false}"), "false");
        assert_eq!(html(r"\or{false true}"), "true");
        assert_eq!(html(r"\xor{true true}"), "false");
        assert_eq!(html(r"\xor{true false}"), "true");
        assert_eq!(html(r"\xor{true true true}"), "false");
        assert_eq!(html(r"\xnor{true false}"), "false");
        assert_eq!(html(r"\not{true}"), "false");
        assert_eq!(html(r"\not{\and{}}"), "false");
        assert_eq!(html(r"\and{\true \<{1 2}}"), "true");
    }

    #[test]
    fn test_non_boolean_operand() {
        let (out, warnings) = eval(r"\and{true maybe}");
        assert_eq!(out, r#"<span style="color: red">[and: maybe is not a boolean]</span>"#);
        assert_eq!(warnings, 1);
        assert!(html(r"\not{true false}").contains("expected 1"));
    }

    #[test]
    fn test_if() {
        assert_eq!(html(r"\if{true foo bar}"), "foo");
        assert_eq!(html(r"\if{false foo bar}"), "bar");
        assert_eq!(html(r"\if{false foo}"), "");
        assert_eq!(html(r"\if{\>{2 1} \b{yes} \i{no}}"), "<b>yes</b>");
        assert!(html(r"\if{perhaps foo bar}").contains("not a boolean"));
    }

    #[test]
    fn test_unselected_branch_is_not_evaluated() {
        let (out, warnings) = eval(r"\if{true ok \frobnicate}");
        assert_eq!(out, "ok");
        assert_eq!(warnings, 0);

        let (out, warnings) = eval(r"\cond{false \frob true fine}");
        assert_eq!(out, "fine");
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_unless_and_when() {
        assert_eq!(html(r"\unless{false shown}"), "shown");
        assert_eq!(html(r"\unless{true shown}"), "");
        assert_eq!(html(r"\when{true one}"), "one");
        assert_eq!(html(r"\when{true one two}"), "<span>one two</span>");
        assert_eq!(html(r"\when{true}"), "");
        assert_eq!(html(r"\when{false one two}"), "");
    }

    #[test]
    fn test_cond() {
        assert_eq!(html(r"\cond{false a true b true c}"), "b");
        assert_eq!(html(r"\cond{false a}"), "");
        assert_eq!(html(r"\cond{}"), "");
    }

    #[test]
    fn test_case() {
        assert_eq!(html(r"\case{123 1 foo 123 bar 4 baz}"), "bar");
        assert_eq!(html(r"\case{5 1 foo 4 baz}"), "");
        assert_eq!(html(r"\case{5 1 foo other}"), "other");
        assert_eq!(html(r"\case{\+{1 2} 3 three}"), "three");
    }

    #[test]
    fn test_sequencing() {
        assert_eq!(html(r"\comment{\frob anything}"), "");
        assert_eq!(html(r"\prog1{a b c}"), "a");
        assert_eq!(html(r"\progn{a b c}"), "c");
        assert_eq!(html(r"\progn{}"), "");
    }
}
