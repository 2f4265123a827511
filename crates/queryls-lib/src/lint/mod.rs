//! Structural validation of query documents.
//!
//! The structural query runs once per document; every lint then picks the
//! matches bound to its own capture name. Lints never fail: an unresolvable
//! name becomes a diagnostic, and an empty grammar turns the grammar-aware
//! lints into no-ops.

pub mod node_usage;
pub mod predicates;
pub mod query;
pub mod syntax;


use queryls_core::TypeEnvironment;

use crate::diagnostics::Diagnostics;
use crate::parser::cst::SyntaxNode;

pub use query::QueryMatch;

/// Everything a lint may consult besides its matches.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    pub env: &'a TypeEnvironment,
    /// Largest edit distance for "did you mean" hints.
    pub suggestion_distance: usize,
}

impl<'a> LintContext<'a> {
    pub fn new(env: &'a TypeEnvironment) -> Self {
        Self {
            env,
            suggestion_distance: 2,
        }
    }

    pub fn with_suggestion_distance(mut self, distance: usize) -> Self {
        self.suggestion_distance = distance;
        self
    }
}

pub trait Lint {
    /// Capture name this lint consumes.
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &LintContext<'_>, node: &SyntaxNode, diagnostics: &mut Diagnostics);

    fn run(&self, ctx: &LintContext<'_>, matches: &[QueryMatch], diagnostics: &mut Diagnostics) {
        for node in matches.iter().filter_map(|m| m.get(self.name())) {
            self.check(ctx, node, diagnostics);
        }
    }
}

/// Every lint, in reporting order.
pub fn all_lints() -> [&'static dyn Lint; 9] {
    [
        &node_usage::NodeUsage,
        &node_usage::UnownedField,
        &node_usage::UnownedNegatedField,
        &syntax::EmptyContainer,
        &syntax::HangingCapture,
        &syntax::MissingFieldValue,
        &syntax::MissingParameters,
        &predicates::UnknownPredicate,
        &predicates::RegexPredicate,
    ]
}

/// Run the structural query and every lint over `root`.
pub fn run_all(root: &SyntaxNode, ctx: &LintContext<'_>) -> Diagnostics {
    let matches = query::run(root);
    let mut diagnostics = Diagnostics::new();
    for lint in all_lints() {
        lint.run(ctx, &matches, &mut diagnostics);
    }
    tracing::debug!(
        matches = matches.len(),
        diagnostics = diagnostics.len(),
        "ran lints"
    );
    diagnostics
}
