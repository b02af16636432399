//! Property-based tests for the chain rewriter.
//!
//! Generated chains check that:
//! 1. Rewriting is idempotent
//! 2. Sources without supplier closures are never touched
//! 3. Every emitted placeholder has exactly one emitted argument
//! 4. The rewritten chain logs the same text as the supplier did

use log_unsupplier::chain::{literal, split_top_level};
use log_unsupplier::prelude::*;
use proptest::prelude::*;
use std::path::Path;

/// One operand of a supplier concatenation.
#[derive(Debug, Clone)]
enum Operand {
    Literal(String),
    Ident(String),
}

impl Operand {
    fn source(&self) -> String {
        match self {
            Operand::Literal(text) => literal::quote(text),
            Operand::Ident(name) => name.clone(),
        }
    }
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z0-9_]{0,8}").expect("valid regex")
}

fn operand_strategy(literal_chars: &'static str) -> impl Strategy<Value = Operand> {
    prop_oneof![
        prop::string::string_regex(literal_chars)
            .expect("valid regex")
            .prop_map(Operand::Literal),
        identifier_strategy().prop_map(Operand::Ident),
    ]
}

/// Literal text without formatter or Java metacharacters.
fn plain_operands() -> impl Strategy<Value = Vec<Operand>> {
    prop::collection::vec(operand_strategy("[a-zA-Z0-9 :=,.]{1,12}"), 1..6)
}

/// Literal text full of braces, backslashes, quotes and separators.
fn awkward_operands() -> impl Strategy<Value = Vec<Operand>> {
    prop::collection::vec(operand_strategy(r#"[a-c {}\\"+,]{1,8}"#), 1..6)
}

fn chain(receiver: &str, level: &str, operands: &[Operand]) -> String {
    let body = operands
        .iter()
        .map(Operand::source)
        .collect::<Vec<_>>()
        .join(" + ");
    format!("{receiver}.at{level}().setMessage(\"{{}}\").addArgument(() -> {body}).log();")
}

fn rewrite(source: &str) -> String {
    rewrite_source(source, Path::new("Generated.java")).into_text(source)
}

/// Splits `log.atInfo().setMessage(LIT)<args>.log();` into the decoded
/// message pattern and the argument expressions.
fn parse_rewritten(text: &str) -> (String, Vec<&str>) {
    let rest = text
        .strip_prefix("log.atInfo().setMessage(")
        .expect("message call");
    let mut escaped = false;
    let close = rest
        .char_indices()
        .skip(1)
        .find(|&(_, ch)| {
            let closes = ch == '"' && !escaped;
            escaped = ch == '\\' && !escaped;
            closes
        })
        .map(|(idx, _)| idx)
        .expect("closing quote");
    let pattern = literal::decode(&rest[..=close]).expect("message literal");
    let arguments = rest[close + 2..]
        .strip_suffix(".log();")
        .expect("terminal call")
        .split(".addArgument(")
        .skip(1)
        .map(|arg| arg.strip_suffix(')').expect("argument call"))
        .collect();
    (pattern, arguments)
}

/// Formats `pattern` the way SLF4J's `MessageFormatter` does.
fn slf4j_format(pattern: &str, args: &[&str]) -> String {
    let bytes = pattern.as_bytes();
    let mut out = String::new();
    let mut from = 0;
    let mut next = 0;

    while next < args.len() {
        let Some(at) = pattern[from..].find("{}").map(|rel| from + rel) else {
            break;
        };
        let escaped = at >= 1 && bytes[at - 1] == b'\\';
        let double = escaped && at >= 2 && bytes[at - 2] == b'\\';
        if escaped && !double {
            out.push_str(&pattern[from..at - 1]);
            out.push('{');
            from = at + 1;
        } else {
            out.push_str(&pattern[from..if double { at - 1 } else { at }]);
            out.push_str(args[next]);
            next += 1;
            from = at + 2;
        }
    }
    out.push_str(&pattern[from..]);
    out
}

/// True when literal `\{}` text sits in front of a later operand placeholder.
fn has_unrenderable_literal(operands: &[Operand]) -> bool {
    let Some(last) = operands.iter().rposition(|op| matches!(op, Operand::Ident(_))) else {
        return false;
    };
    let mut segment = String::new();
    for op in &operands[..last] {
        match op {
            Operand::Literal(text) => segment.push_str(text),
            Operand::Ident(_) => {
                if segment.contains(r"\{}") {
                    return true;
                }
                segment.clear();
            }
        }
    }
    segment.contains(r"\{}")
}

proptest! {
    #[test]
    fn rewrite_is_idempotent(
        receiver in prop::sample::select(vec!["log", "LOGGER", "logger"]),
        level in prop::sample::select(vec!["Trace", "Debug", "Info", "Warn", "Error"]),
        operands in prop_oneof![plain_operands(), awkward_operands()],
    ) {
        let once = rewrite(&chain(receiver, level, &operands));
        let twice = rewrite(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn placeholders_match_emitted_arguments(operands in plain_operands()) {
        let source = chain("log", "Info", &operands);
        let rewritten = rewrite(&source);

        let expected_template: String = operands
            .iter()
            .map(|op| match op {
                Operand::Literal(text) => text.as_str(),
                Operand::Ident(_) => "{}",
            })
            .collect();
        let expected_arguments: String = operands
            .iter()
            .filter_map(|op| match op {
                Operand::Ident(name) => Some(format!(".addArgument({name})")),
                Operand::Literal(_) => None,
            })
            .collect();

        prop_assert_eq!(
            rewritten,
            format!("log.atInfo().setMessage(\"{expected_template}\"){expected_arguments}.log();")
        );
        prop_assert_eq!(
            expected_template.matches("{}").count(),
            operands.iter().filter(|op| matches!(op, Operand::Ident(_))).count()
        );
    }

    #[test]
    fn rewritten_chain_logs_the_same_text(operands in awkward_operands()) {
        let source = chain("log", "Info", &operands);
        let rewritten = rewrite(&source);

        if has_unrenderable_literal(&operands) {
            prop_assert_eq!(rewritten, source);
            return Ok(());
        }

        let expected: String = operands
            .iter()
            .map(|op| match op {
                Operand::Literal(text) | Operand::Ident(text) => text.as_str(),
            })
            .collect();
        let (pattern, arguments) = parse_rewritten(&rewritten);
        prop_assert_eq!(
            arguments.len(),
            operands.iter().filter(|op| matches!(op, Operand::Ident(_))).count()
        );
        prop_assert_eq!(slf4j_format(&pattern, &arguments), expected);
    }

    #[test]
    fn sources_without_suppliers_are_unchanged(source in "\\PC*") {
        prop_assume!(!source.contains("->"));
        prop_assert_eq!(rewrite_source(&source, Path::new("A.java")), Rewrite::Unchanged);
    }

    #[test]
    fn arbitrary_text_never_panics(source in "(log\\.atInfo\\(\\)|\\.setMessage\\(\"\\{\\}\"\\)|\\.addArgument\\(\\(\\) -> |\\.log\\(\\)|[\"'(){};,+ a-z\\\\\n])*") {
        let _ = rewrite(&source);
    }

    #[test]
    fn splitter_recovers_operands(parts in prop::collection::vec(identifier_strategy(), 1..8)) {
        let joined = parts.join(" + ");
        prop_assert_eq!(split_top_level(&joined, b'+'), parts);
    }

    #[test]
    fn splitter_keeps_nested_separators_together(
        outer in identifier_strategy(),
        inner in prop::collection::vec(identifier_strategy(), 2..5),
    ) {
        let call = format!("{outer}({})", inner.join("+"));
        let joined = format!("{call} + \"a+b\" + {outer}");
        prop_assert_eq!(
            split_top_level(&joined, b'+'),
            vec![call.as_str(), "\"a+b\"", outer.as_str()]
        );
    }
}
