//! Rewriting of a single located chain.

use super::cursor::{CodeWalk, contains_comment, matching_paren};
use super::dialect::ChainDialect;
use super::lambda;
use super::locate::ChainSpan;
use super::calls;
use super::split::split_top_level;
use super::synth::{self, Fragment};
use super::template::Template;
use std::ops::Range;

/// Classification of one argument-adding call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentCall<'a> {
    /// First argument is a zero-parameter closure; `body` is normalized.
    Supplier { body: &'a str, extras: Vec<&'a str> },
    /// Anything else; left untouched.
    Plain,
}

impl<'a> ArgumentCall<'a> {
    /// Classifies the text between a call's parentheses.
    ///
    /// A call is kept as `Plain` when its arguments contain a comment, since
    /// the emitted arguments are joined onto one line, or when inlining would
    /// emit another supplier.
    pub fn classify(arg_list: &'a str) -> Self {
        if contains_comment(arg_list) {
            return ArgumentCall::Plain;
        }
        let args = split_top_level(arg_list, b',');
        let Some((&first, extras)) = args.split_first() else {
            return ArgumentCall::Plain;
        };
        let Some(body) = lambda::supplier_body(first).map(lambda::normalize) else {
            return ArgumentCall::Plain;
        };
        if lambda::supplier_body(body).is_some()
            || extras.iter().any(|extra| lambda::supplier_body(extra).is_some())
        {
            return ArgumentCall::Plain;
        }
        ArgumentCall::Supplier {
            body,
            extras: extras.to_vec(),
        }
    }
}

/// A replaced region of the chain, relative to the chain start.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Accumulates the merged template and call-site replacements of one chain.
#[derive(Debug, Default)]
pub struct RewritePlan {
    template: Template,
    arguments: Vec<String>,
    call_sites: Vec<Edit>,
}

impl RewritePlan {
    /// Folds one supplier call's fragment into the chain.
    fn absorb(&mut self, range: Range<usize>, fragment: Fragment, method: &str) {
        let replacement = fragment
            .arguments
            .iter()
            .map(|arg| format!(".{method}({arg})"))
            .collect();
        self.call_sites.push(Edit { range, replacement });

        self.template.separate();
        self.template.append(fragment.template);
        self.arguments.extend(fragment.arguments);
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

/// The outcome of rewriting one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenChain {
    pub text: String,
    pub template: Template,
    pub arguments: Vec<String>,
}

/// Rewrites located chains in the given dialect.
pub struct ChainRewriter<'d> {
    dialect: &'d ChainDialect,
}

impl<'d> ChainRewriter<'d> {
    pub fn new(dialect: &'d ChainDialect) -> Self {
        Self { dialect }
    }

    /// Scans the chain for argument-adding calls and builds the plan.
    pub fn plan(&self, span: &ChainSpan<'_>) -> RewritePlan {
        let text = span.text;
        let mut plan = RewritePlan::default();
        let mut walk = CodeWalk::new(text, 0);

        while let Some(point) = walk.next() {
            if point.byte != b'.' {
                continue;
            }
            let Some(open) = calls::argument_call_open(self.dialect, text, point.index) else {
                continue;
            };
            let Some(close) = matching_paren(&text[open..]).map(|rel| open + rel) else {
                break;
            };
            walk.jump_to(close + 1);

            if let ArgumentCall::Supplier { body, extras } = ArgumentCall::classify(&text[open..close])
            {
                let mut fragment = synth::synthesize(body);
                fragment.push_extras(extras);
                plan.absorb(point.index..close + 1, fragment, &self.dialect.argument_method);
            }
        }

        plan
    }

    /// Rewrites one chain, or returns `None` when there is nothing to inline
    /// or the merged template cannot be expressed as a message pattern.
    pub fn rewrite(&self, span: &ChainSpan<'_>) -> Option<RewrittenChain> {
        let plan = self.plan(span);
        if plan.template.is_empty() {
            return None;
        }

        let Some(message_literal) = plan.template.to_literal() else {
            tracing::trace!(
                template = %plan.template,
                "template has no placeholder-safe rendering"
            );
            return None;
        };

        let message = span.message.start - span.start..span.message.end - span.start;
        let mut edits = plan.call_sites;
        edits.push(Edit {
            range: message,
            replacement: message_literal,
        });
        edits.sort_by_key(|edit| edit.range.start);

        let mut text = String::with_capacity(span.text.len());
        let mut copied = 0;
        for edit in &edits {
            text.push_str(&span.text[copied..edit.range.start]);
            text.push_str(&edit.replacement);
            copied = edit.range.end;
        }
        text.push_str(&span.text[copied..]);

        Some(RewrittenChain {
            text,
            template: plan.template,
            arguments: plan.arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::locate::ChainLocator;
    use pretty_assertions::assert_eq;

    fn rewrite(source: &str) -> Option<RewrittenChain> {
        let dialect = ChainDialect::default();
        let span = ChainLocator::new(&dialect).locate(source).next()?;
        ChainRewriter::new(&dialect).rewrite(&span)
    }

    fn rewritten(source: &str) -> String {
        rewrite(source).expect("chain should be rewritten").text
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            ArgumentCall::classify(r#"() -> "a"+b, c, d"#),
            ArgumentCall::Supplier {
                body: r#""a"+b"#,
                extras: vec!["c", "d"]
            }
        );
        assert_eq!(ArgumentCall::classify("cause"), ArgumentCall::Plain);
        assert_eq!(ArgumentCall::classify(""), ArgumentCall::Plain);
        assert_eq!(ArgumentCall::classify("x, () -> y"), ArgumentCall::Plain);
        assert_eq!(
            ArgumentCall::classify("() -> { return a + b; }"),
            ArgumentCall::Supplier {
                body: "a + b",
                extras: vec![]
            }
        );
        assert_eq!(
            ArgumentCall::classify("() -> { int x = 1; return x; }"),
            ArgumentCall::Supplier {
                body: "{ int x = 1; return x; }",
                extras: vec![]
            }
        );
    }

    #[test]
    fn test_simple_expression_supplier() {
        assert_eq!(
            rewritten(
                r#"log.atInfo().setMessage("{}").addArgument(() -> "My Error: "+e+", the parameter="+param).log();"#
            ),
            r#"log.atInfo().setMessage("My Error: {}, the parameter={}").addArgument(e).addArgument(param).log()"#
        );
    }

    #[test]
    fn test_block_supplier_matches_expression_supplier() {
        let block = rewritten(
            "log.atWarn()\n   .setMessage(\"{}\")\n   .addArgument(() -> { return \"N=\"+n+\", cause=\"+e; })\n   .log();",
        );
        let expr = rewritten(
            "log.atWarn()\n   .setMessage(\"{}\")\n   .addArgument(() -> \"N=\"+n+\", cause=\"+e)\n   .log();",
        );
        assert_eq!(block, expr);
        assert!(block.contains(r#".setMessage("N={}, cause={}")"#));
        assert!(block.contains(".addArgument(n).addArgument(e)"));
    }

    #[test]
    fn test_two_suppliers_are_joined() {
        let chain = rewrite(
            r#"log.atWarn()
                .setMessage("{}")
                .addArgument(() -> "User="+userId+" ")
                .addArgument(() -> "File:"+file+" size="+size)
                .log();"#,
        )
        .unwrap();
        assert_eq!(chain.template.to_string(), "User={} File:{} size={}");
        assert_eq!(chain.arguments, vec!["userId", "file", "size"]);
    }

    #[test]
    fn test_fragments_get_one_separating_space() {
        let chain = rewrite(
            r#"log.atWarn().setMessage("{}").addArgument(() -> "a="+a).addArgument(() -> "b="+b).log();"#,
        )
        .unwrap();
        assert_eq!(chain.template.to_string(), "a={} b={}");
    }

    #[test]
    fn test_plain_call_is_kept() {
        let text = rewritten(
            r#"log.atError()
                .setMessage("{}")
                .addArgument(() -> "ID="+id)
                .addArgument(cause)
                .log();"#,
        );
        assert!(text.contains(r#".setMessage("ID={}")"#));
        assert!(text.contains(".addArgument(id)\n"));
        assert!(text.contains(".addArgument(cause)"));
    }

    #[test]
    fn test_trailing_extras() {
        let chain = rewrite(
            r#"log.atDebug().setMessage("{}").addArgument(() -> "Static text only", e).log();"#,
        )
        .unwrap();
        assert_eq!(chain.template.to_string(), "Static text only {}");
        assert_eq!(
            chain.text,
            r#"log.atDebug().setMessage("Static text only {}").addArgument(e).log()"#
        );
    }

    #[test]
    fn test_pure_literal_supplier() {
        assert_eq!(
            rewritten(r#"log.atDebug().setMessage("{}").addArgument(() -> "Static text only").log();"#),
            r#"log.atDebug().setMessage("Static text only").log()"#
        );
    }

    #[test]
    fn test_ternary_with_nested_literals_and_cause() {
        let text = rewritten(
            r#"log.atError()
                   .setMessage("{}")
                   .addArgument(() -> "ID="+id)
                   .addArgument(() -> "C="+(cause != null
                                            ? cause.getMessage() + ", (" + code + ")"
                                            : "none"), cause)
                   .log();"#,
        );
        assert!(text.contains(r#".setMessage("ID={} C={} {}")"#));
        assert!(text.contains(
            r#".addArgument((cause != null ? cause.getMessage() + ", (" + code + ")" : "none")).addArgument(cause)"#
        ));
    }

    #[test]
    fn test_chain_without_suppliers_is_not_rewritten() {
        assert!(rewrite(r#"log.atInfo().setMessage("{}").addArgument(x).log();"#).is_none());
        assert!(rewrite(r#"log.atInfo().setMessage("{}").log();"#).is_none());
    }

    #[test]
    fn test_empty_template_leaves_chain_unchanged() {
        assert!(rewrite(r#"log.atInfo().setMessage("{}").addArgument(() -> "").log();"#).is_none());
    }

    #[test]
    fn test_quotes_in_literals_are_reescaped() {
        assert_eq!(
            rewritten(r#"log.atInfo().setMessage("{}").addArgument(() -> "name=\"" + n + "\" \\ ok").log();"#),
            r#"log.atInfo().setMessage("name=\"{}\" \\ ok").addArgument(n).log()"#
        );
    }

    #[test]
    fn test_argument_call_inside_literal_is_ignored() {
        assert_eq!(
            rewritten(r#"log.atInfo().setMessage("{}").addArgument(() -> ".addArgument(" + x).log();"#),
            r#"log.atInfo().setMessage(".addArgument({}").addArgument(x).log()"#
        );
    }

    #[test]
    fn test_placeholder_count_matches_emitted_calls() {
        let chain = rewrite(
            r#"log.atInfo().setMessage("{}").addArgument(() -> "a" + x + "b" + y(1, 2), z).log();"#,
        )
        .unwrap();
        assert_eq!(chain.template.placeholders(), 3);
        assert_eq!(chain.text.matches(".addArgument(").count(), 3);
    }

    #[test]
    fn test_supplier_with_line_comment_is_kept() {
        let source = "log.atInfo().setMessage(\"{}\").addArgument(() -> \"a=\" + a // why\n).log();";
        assert!(rewrite(source).is_none());
    }

    #[test]
    fn test_comment_in_plain_call_does_not_hide_later_suppliers() {
        let text = rewritten(
            "log.atInfo().setMessage(\"{}\")\n   .addArgument(x /* ) */)\n   .addArgument(() -> \"b=\" + b)\n   .log();",
        );
        assert!(text.contains(".addArgument(x /* ) */)"));
        assert!(text.contains(r#".setMessage("b={}")"#));
        assert!(text.contains(".addArgument(b)\n"));
    }

    #[test]
    fn test_literal_braces_are_escaped_for_the_formatter() {
        assert_eq!(
            rewritten(r#"log.atInfo().setMessage("{}").addArgument(() -> "set {} to " + v).log();"#),
            r#"log.atInfo().setMessage("set \\{} to {}").addArgument(v).log()"#
        );
    }

    #[test]
    fn test_backslash_before_placeholder_is_doubled() {
        assert_eq!(
            rewritten(r#"log.atInfo().setMessage("{}").addArgument(() -> "dir C:\\" + d).log();"#),
            r#"log.atInfo().setMessage("dir C:\\\\{}").addArgument(d).log()"#
        );
    }

    #[test]
    fn test_unrenderable_template_leaves_chain_unchanged() {
        assert!(
            rewrite(r#"log.atInfo().setMessage("{}").addArgument(() -> "a\\{} " + d).log();"#)
                .is_none()
        );
    }

    #[test]
    fn test_nested_supplier_is_kept() {
        assert!(rewrite(r#"log.atInfo().setMessage("{}").addArgument(() -> () -> x).log();"#).is_none());
        assert!(rewrite(r#"log.atInfo().setMessage("{}").addArgument(() -> "a", () -> y).log();"#).is_none());
    }

    #[test]
    fn test_increment_stays_in_argument() {
        assert_eq!(
            rewritten(r#"log.atInfo().setMessage("{}").addArgument(() -> "n=" + i++).log();"#),
            r#"log.atInfo().setMessage("n={}").addArgument(i++).log()"#
        );
        assert_eq!(
            rewritten(r#"log.atInfo().setMessage("{}").addArgument(() -> "n=" + ++i).log();"#),
            r#"log.atInfo().setMessage("n={}").addArgument(++i).log()"#
        );
    }
}
