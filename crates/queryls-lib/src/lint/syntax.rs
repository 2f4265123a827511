//! Lints for constructs the parser accepted but left incomplete.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast;
use crate::parser::cst::{SyntaxKind, SyntaxNode};

use super::{Lint, LintContext, query};

/// `()` and `[]`.
pub struct EmptyContainer;

impl Lint for EmptyContainer {
    fn name(&self) -> &'static str {
        query::EMPTY_CONTAINER
    }

    fn check(&self, _ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        let kind = if node.kind() == SyntaxKind::List {
            DiagnosticKind::EmptyList
        } else {
            DiagnosticKind::EmptyGrouping
        };
        diagnostics.report(kind, node.text_range()).emit();
    }
}

/// `@` with no name after it.
pub struct HangingCapture;

impl Lint for HangingCapture {
    fn name(&self) -> &'static str {
        query::HANGING_CAPTURE
    }

    fn check(&self, _ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        diagnostics
            .report(DiagnosticKind::HangingCapture, node.text_range())
            .emit();
    }
}

/// `field:` with nothing after the colon.
pub struct MissingFieldValue;

impl Lint for MissingFieldValue {
    fn name(&self) -> &'static str {
        query::MISSING_FIELD_VALUE
    }

    fn check(&self, _ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        let mut report = diagnostics.report(DiagnosticKind::MissingFieldValue, node.text_range());
        if let Some(name) = ast::FieldDefinition::cast(node.clone()).and_then(|f| f.name()) {
            report = report.message(format!("`{}`", name.text()));
        }
        report.emit();
    }
}

/// `(#eq?)` and other calls without arguments.
pub struct MissingParameters;

impl Lint for MissingParameters {
    fn name(&self) -> &'static str {
        query::MISSING_PARAMETERS
    }

    fn check(&self, _ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
        let mut report =
            diagnostics.report(DiagnosticKind::MissingPredicateParameters, node.text_range());
        if let Some(name) = ast::Predicate::cast(node.clone()).and_then(|p| p.full_name()) {
            report = report.message(format!("`#{name}`"));
        }
        report.emit();
    }
}
