//! Integration tests for full document rendering

use std::cell::Cell;

use pretty_assertions::assert_eq;
use texhtml::{
    check_markup, parse_document, render, to_html, tokenize, try_render, try_to_html,
    ActionableCommander, Commander, EntityKind, EntityResolver, Evaluator, ParseError, ParseNode,
    RenderError, RenderOptions, StandardCommander,
};

fn inline(input: &str) -> String {
    try_render(input, &StandardCommander, &RenderOptions::inline())
        .map(|output| output.content)
        .unwrap_or_else(|err| panic!("failed to render {:?}: {}", input, err))
}

// ============================================================================
// Tokenizing and parsing
// ============================================================================

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenizer_is_lossless() {
        let inputs = [
            "",
            "Soli Deo Gloria",
            "\\b{Deo}\n\n\n\\i{x y}  z",
            "{{}} \\\\ 3.14 -2 $ [ ] |",
            "mixed\r\nline endings\r\n\r\nhere",
        ];
        for input in inputs {
            let rebuilt: String = tokenize(input).iter().map(|t| t.text()).collect();
            assert_eq!(rebuilt, input.replace('\r', ""));
        }
    }

    #[test]
    fn test_document_shape() {
        let doc = parse_document("\\sup{\\b{\\it{Deo}}}\n\nGloria").unwrap();
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.paragraphs[0].nodes[0].depth(), 3);

        let commands: Vec<&str> = doc.walk().filter_map(|n| n.command_name()).collect();
        assert_eq!(commands, vec!["sup", "b", "it"]);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = try_to_html("one\n\ntwo\n\\ three").unwrap_err();
        let RenderError::Parse(err) = err;
        assert!(matches!(err, ParseError::MissingCommandName { line: 4, .. }));
        assert!(err.to_string().starts_with("Parse error at line 4"));
    }
}

// ============================================================================
// Rendering
// ============================================================================

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(to_html("Soli Deo Gloria"), "<p>\nSoli Deo Gloria\n</p>\n");
    }

    #[test]
    fn test_two_paragraphs() {
        assert_eq!(
            to_html("Soli\n\nDeo"),
            "<p>\nSoli\n</p>\n\n<p>\nDeo\n</p>\n"
        );
    }

    #[test]
    fn test_lines_within_paragraph_join() {
        assert_eq!(
            to_html("Line 1\nLine 2\n\nLine 3\nLine 4"),
            "<p>\nLine 1 Line 2\n</p>\n\n<p>\nLine 3 Line 4\n</p>\n"
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(inline("a   \n  b"), "a b");
        assert_eq!(inline("a\t\tb"), "a b");
    }

    #[test]
    fn test_nested_formatting() {
        assert_eq!(
            to_html(r"\sup{\b{\it{Deo}}}"),
            "<p>\n<sup><b><i>Deo</i></b></sup>\n</p>\n"
        );
    }

    #[test]
    fn test_unterminated_argument_list() {
        assert_eq!(to_html(r"\b{unterminated"), "<p>\n<b>unterminated</b>\n</p>\n");
        assert_eq!(
            to_html("\\b{open\n\nclosed"),
            "<p>\n<b>open</b>\n</p>\n\n<p>\nclosed\n</p>\n"
        );
    }

    #[test]
    fn test_literal_escapes() {
        assert_eq!(inline(r"\left-brace{}x\right-brace{}"), "{x}");
        assert_eq!(inline(r"\backslash{}n"), "\\n");
        assert_eq!(inline(r"\dollar{}5"), "$5");
        assert_eq!(inline(r"\lbracket{}1\rbracket{}"), "[1]");
        assert_eq!(inline(r"\lbrace \rbrace"), "{}");
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(
            inline(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            inline(r"\ul{\li{a} \li{b}}"),
            "<ul><li>a</li> <li>b</li></ul>"
        );
    }

    #[test]
    fn test_unknown_command_is_not_fatal() {
        let output = try_render(
            r"before \frobnicate{x} after",
            &StandardCommander,
            &RenderOptions::inline(),
        )
        .unwrap();
        assert_eq!(
            output.content,
            r#"before <span style="color: red">[unknown command frobnicate]</span> after"#
        );
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].command.as_deref(), Some("frobnicate"));
    }

    #[test]
    fn test_render_never_fails() {
        let output = render(r"\ ", &StandardCommander, &RenderOptions::default());
        assert!(output.content.starts_with("<p>\n<span style=\"color: red\">"));
        assert!(output.has_warnings());
    }
}

// ============================================================================
// Expression language
// ============================================================================

mod expressions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arithmetic() {
        assert_eq!(inline(r"\+{1 2 3 4}"), "10");
        assert_eq!(inline(r"\-{10}"), "-10");
        assert_eq!(inline(r"\/{10}"), "0.1");
        assert_eq!(inline(r"\*{2 \+{1 2}}"), "6");
    }

    #[test]
    fn test_functions() {
        let cos_pi: f64 = inline(r"\cos{\pi}").parse().unwrap();
        assert!((cos_pi + 1.0).abs() < 1e-12);
        assert_eq!(inline(r"\sqrt{\+{7 9}}"), "4");
    }

    #[test]
    fn test_numeric_errors() {
        assert!(inline(r"\/{1 0}").contains("Non-numeric result."));
        assert!(inline(r"\sqrt{-4}").contains("Complex numbers are not yet supported."));
    }

    #[test]
    fn test_booleans_and_comparisons() {
        assert_eq!(inline(r"\and{\true \false}"), "false");
        assert_eq!(inline(r"\or{\true \false}"), "true");
        assert_eq!(inline(r"\<{1 2 3}"), "true");
        assert_eq!(inline(r"\>={3 3 4}"), "false");
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(inline(r"\if{\>{2 1} yes no}"), "yes");
        assert_eq!(inline(r"\if{\false yes no}"), "no");
        assert_eq!(inline(r"\case{123 1 foo 123 bar 4 baz}"), "bar");
        assert_eq!(inline(r"\case{2 1 one 2 two other}"), "two");
        assert_eq!(inline(r"\case{9 1 one 2 two other}"), "other");
        assert_eq!(inline(r"\comment{\frobnicate}kept"), "kept");
    }
}

// ============================================================================
// Host integration
// ============================================================================

mod host {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Catalogue {
        lookups: Cell<usize>,
    }

    impl EntityResolver for Catalogue {
        fn resolve_entity(&self, kind: EntityKind, id: u64) -> Option<String> {
            self.lookups.set(self.lookups.get() + 1);
            (kind == EntityKind::Link && id == 1)
                .then(|| r#"<a href="/l/1">first</a>"#.to_string())
        }

        fn resolve_user(&self, identifier: &str) -> Option<String> {
            (identifier == "admin").then(|| "<b>admin</b>".to_string())
        }
    }

    fn catalogue() -> ActionableCommander<Catalogue> {
        ActionableCommander::new(Catalogue {
            lookups: Cell::new(0),
        })
    }

    #[test]
    fn test_resolved_references() {
        let commander = catalogue();
        let output = try_render(
            r"\link-id{1} \user{admin}",
            &commander,
            &RenderOptions::inline(),
        )
        .unwrap();
        assert_eq!(output.content, r#"<a href="/l/1">first</a> <b>admin</b>"#);
        assert!(!output.has_warnings());
    }

    #[test]
    fn test_unknown_references() {
        let commander = catalogue();
        let output = try_render(
            r"\link-id{2} \user{ghost}",
            &commander,
            &RenderOptions::inline(),
        )
        .unwrap();
        assert!(output.content.contains("[unknown link ID 2]"));
        assert!(output.content.contains("[unknown user ghost]"));
        assert_eq!(output.warnings.len(), 2);
    }

    #[test]
    fn test_invalid_id_never_reaches_host() {
        let commander = catalogue();
        let output = try_render(r"\link-id{abc}", &commander, &RenderOptions::inline()).unwrap();
        assert!(output.content.contains("invalid link ID specified"));
        assert_eq!(commander.resolver().lookups.get(), 0);
    }

    #[test]
    fn test_standard_fallback_links() {
        let options = RenderOptions::inline().with_base_url("https://tb.example/");
        let output = try_render(r"\forum-id{5}", &StandardCommander, &options).unwrap();
        assert_eq!(
            output.content,
            r#"<a href="https://tb.example/forums/5">Forum #5</a>"#
        );
    }

    struct Extended;

    impl Commander for Extended {
        fn evaluate(&self, ev: &mut Evaluator<'_>, name: &str, children: &[ParseNode]) -> String {
            match name {
                "verse" => format!("<blockquote>{}</blockquote>", ev.render_all(children)),
                _ => ev.evaluate_builtin(name, children),
            }
        }
    }

    #[test]
    fn test_host_defined_command() {
        let output =
            try_render(r"\verse{\i{Gloria}}", &Extended, &RenderOptions::inline()).unwrap();
        assert_eq!(output.content, "<blockquote><i>Gloria</i></blockquote>");
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

mod diagnostics {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_before_render() {
        let input = "\\bold{fine}\n\n\\italc{typo}";
        let result = check_markup(input);
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].line, Some(3));
        assert_eq!(
            result.diagnostics[0].suggestion.as_deref(),
            Some("did you mean \\italic?")
        );
        assert_eq!(result.summary(), "1 warning");
    }
}
