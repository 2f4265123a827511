//! Entry point tying a grammar snapshot to documents.

use std::sync::Arc;

use queryls_core::{GrammarDescriptor, TypeEnvironment};
use rowan::TextSize;
use serde::Serialize;

use crate::Result;
use crate::completion::{CompletionContext, CompletionItem, CompletionPools, classify, resolve};
use crate::diagnostics::Diagnostics;
use crate::document::Document;
use crate::lint::{LintContext, run_all};
use crate::parser::DEFAULT_RECURSION_LIMIT;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Pattern nesting depth at which parsing stops descending.
    pub recursion_limit: u32,
    /// Largest edit distance for "did you mean" hints.
    pub suggestion_distance: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            suggestion_distance: 2,
        }
    }
}

/// A type environment and the completion pools derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarSnapshot {
    pub environment: TypeEnvironment,
    pub pools: CompletionPools,
}

impl GrammarSnapshot {
    pub fn new(environment: TypeEnvironment) -> Self {
        let pools = CompletionPools::new(&environment);
        Self { environment, pools }
    }
}

/// Completion result for one cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completions {
    pub context: CompletionContext,
    pub items: Vec<CompletionItem>,
}

/// Holds the current grammar snapshot. Loading a grammar swaps the whole
/// snapshot; callers that cloned the previous one keep a consistent view.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
    snapshot: Arc<GrammarSnapshot>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            snapshot: Arc::default(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<GrammarSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn environment(&self) -> &TypeEnvironment {
        &self.snapshot.environment
    }

    /// Replace the grammar with the one described by `json` (`node-types.json`).
    pub fn try_load_grammar(&mut self, json: &str) -> Result<()> {
        let descriptor = GrammarDescriptor::from_json(json)?;
        self.set_environment(TypeEnvironment::new(&descriptor));
        Ok(())
    }

    /// Like [`Self::try_load_grammar`], but a rejected descriptor leaves the
    /// empty grammar in place.
    pub fn load_grammar(&mut self, json: &str) {
        if let Err(err) = self.try_load_grammar(json) {
            tracing::warn!(error = %err, "grammar rejected, using empty environment");
            self.set_environment(TypeEnvironment::default());
        }
    }

    pub fn set_environment(&mut self, environment: TypeEnvironment) {
        self.snapshot = Arc::new(GrammarSnapshot::new(environment));
    }

    /// Parse `source` with this analyzer's limits.
    pub fn document(&self, source: impl Into<String>) -> Document {
        Document::with_recursion_limit(source, self.config.recursion_limit)
    }

    pub fn completions(&self, document: &Document, offset: TextSize) -> Completions {
        let snapshot = self.snapshot();
        let context = classify(&document.syntax(), offset);
        let items = resolve(
            &context,
            &snapshot.environment,
            &snapshot.pools,
            Some(document.captures()),
        );
        tracing::debug!(
            offset = u32::from(offset),
            items = items.len(),
            "resolved completions"
        );
        Completions { context, items }
    }

    /// Completions at an editor position. A line past the end offers nothing.
    pub fn completions_at(&self, document: &Document, position: Position) -> Completions {
        match document.offset(position) {
            Some(offset) => self.completions(document, offset),
            None => Completions {
                context: CompletionContext::None,
                items: Vec::new(),
            },
        }
    }

    /// Parser diagnostics and every lint, merged in document order.
    pub fn diagnostics(&self, document: &Document) -> Diagnostics {
        let snapshot = self.snapshot();
        let ctx = LintContext::new(&snapshot.environment)
            .with_suggestion_distance(self.config.suggestion_distance);

        let mut diagnostics = document.parse_diagnostics().clone();
        diagnostics.extend(run_all(&document.syntax(), &ctx));
        diagnostics.sort();
        diagnostics
    }
}
