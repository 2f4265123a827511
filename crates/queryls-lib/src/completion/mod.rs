//! Completion: classify the cursor, then resolve items against the grammar.

pub mod captures;
pub mod context;
pub mod items;
pub mod resolve;

#[cfg(test)]
mod context_tests;

pub use captures::CaptureIndex;
pub use context::{CompletionContext, classify};
pub use items::{BUILTINS, CompletionItem, CompletionItemKind, CompletionPools, Pool};
pub use resolve::resolve;
