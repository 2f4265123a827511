//! Completion and validation for tree-sitter query documents.
//!
//! # Example
//!
//! ```
//! use queryls_lib::{Analyzer, AnalyzerConfig};
//!
//! let mut analyzer = Analyzer::new(AnalyzerConfig::default());
//! analyzer.load_grammar(r#"[{"type": "identifier", "named": true}]"#);
//!
//! let source = "(identifer) @name";
//! let document = analyzer.document(source);
//! let diagnostics = analyzer.diagnostics(&document);
//! assert_eq!(diagnostics.error_count(), 1);
//! eprintln!("{}", diagnostics.render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyzer;
pub mod completion;
pub mod diagnostics;
pub mod document;
pub mod lint;
pub mod parser;
pub mod position;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use analyzer::{Analyzer, AnalyzerConfig, Completions, GrammarSnapshot};
pub use completion::{CompletionContext, CompletionItem, CompletionItemKind, classify, resolve};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use document::{Document, DocumentCache};
pub use position::{LineIndex, Position};
pub use rowan::{TextRange, TextSize};

/// Errors surfaced to callers that ask for them explicitly.
///
/// Analysis itself never fails; only loading a grammar through
/// [`Analyzer::try_load_grammar`] reports one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] queryls_core::GrammarError),
}

pub type Result<T> = std::result::Result<T, Error>;
