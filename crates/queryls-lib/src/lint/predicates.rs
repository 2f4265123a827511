//! Predicate and directive lints.
//!
//! Names outside the known vocabulary are only suspicious: editors and
//! downstream tools define their own. Regex arguments are parsed with
//! `regex-syntax` so that a broken pattern shows up before the query runs.

use regex_syntax::ast::parse::Parser as RegexParser;
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{Predicate, Str};
use crate::parser::cst::SyntaxNode;
use crate::utils::find_similar;

use super::{Lint, LintContext, query};

pub const KNOWN_PREDICATES: [&str; 22] = [
    "eq?",
    "not-eq?",
    "any-eq?",
    "any-not-eq?",
    "match?",
    "not-match?",
    "any-match?",
    "any-not-match?",
    "any-of?",
    "not-any-of?",
    "is?",
    "is-not?",
    "lua-match?",
    "not-lua-match?",
    "contains?",
    "not-contains?",
    "has-ancestor?",
    "not-has-ancestor?",
    "has-parent?",
    "not-has-parent?",
    "kind-eq?",
    "not-kind-eq?",
];

pub const KNOWN_DIRECTIVES: [&str; 7] = [
    "set!",
    "select-adjacent!",
    "strip!",
    "offset!",
    "gsub!",
    "trim!",
    "inject-language!",
];

pub fn is_known(name: &str) -> bool {
    KNOWN_PREDICATES.contains(&name) || KNOWN_DIRECTIVES.contains(&name)
}

pub struct UnknownPredicate;

impl Lint for UnknownPredicate {
    fn name(&self) -> &'static str {
        query::PREDICATE
    }

    fn check(&self, ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        let Some(predicate) = Predicate::cast(node.clone()) else {
            return;
        };
        let (Some(name), Some(full_name)) = (predicate.name(), predicate.full_name()) else {
            return;
        };
        if is_known(&full_name) {
            return;
        }

        let range = match predicate.suffix() {
            Some(suffix) => TextRange::new(name.text_range().start(), suffix.text_range().end()),
            None => name.text_range(),
        };
        let candidates = KNOWN_PREDICATES.iter().chain(&KNOWN_DIRECTIVES).copied();
        let mut report = diagnostics
            .report(DiagnosticKind::UnknownPredicate, range)
            .message(&full_name);
        if let Some(similar) = find_similar(&full_name, candidates, ctx.suggestion_distance) {
            report = report.hint(format!("did you mean `#{similar}`?"));
        }
        report.emit();
    }
}

pub struct RegexPredicate;

impl Lint for RegexPredicate {
    fn name(&self) -> &'static str {
        query::REGEX_PREDICATE
    }

    fn check(&self, _ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        let Some(parameters) = Predicate::cast(node.clone()).and_then(|p| p.parameters()) else {
            return;
        };
        // `(#match? @capture "pattern")`: the pattern is the first string.
        if let Some(pattern) = parameters.strings().next() {
            check_pattern(&pattern, diagnostics);
        }
    }
}

fn check_pattern(pattern: &Str, diagnostics: &mut Diagnostics) {
    let value = pattern.value();
    let Err(err) = RegexParser::new().parse(&value) else {
        return;
    };

    let range = error_range(pattern, &value, err.span());
    diagnostics
        .report(DiagnosticKind::InvalidRegex, range)
        .message(err.kind().to_string())
        .emit();
}

/// Map a span inside the unescaped pattern back to the document. Escapes
/// shift offsets, so a pattern that contains any falls back to the whole
/// string.
fn error_range(pattern: &Str, value: &str, span: &regex_syntax::ast::Span) -> TextRange {
    let whole = pattern.as_cst().text_range();
    let Some(content) = pattern.content() else {
        return whole;
    };
    if content.text() != value {
        return whole;
    }

    let base = content.text_range().start();
    let start = base + TextSize::from(span.start.offset as u32);
    let end = base + TextSize::from(span.end.offset as u32);
    if end > content.text_range().end() {
        return whole;
    }
    TextRange::new(start, end)
}
