//! Parsed snapshots of query documents.

use std::collections::HashMap;
use std::sync::Arc;

use rowan::TextSize;

use crate::completion::CaptureIndex;
use crate::diagnostics::Diagnostics;
use crate::parser::cst::SyntaxNode;
use crate::parser::lexer::lex;
use crate::parser::{DEFAULT_RECURSION_LIMIT, Parse, Parser, parse_with_parser};
use crate::position::{LineIndex, Position};

/// One version of a document's text with everything derived from it.
///
/// Never mutated; a new text makes a new document.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    parse: Parse,
    diagnostics: Diagnostics,
    line_index: LineIndex,
    captures: CaptureIndex,
}

impl Document {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_recursion_limit(source, DEFAULT_RECURSION_LIMIT)
    }

    pub fn with_recursion_limit(source: impl Into<String>, limit: u32) -> Self {
        let source = source.into();
        let parser = Parser::new(&source, lex(&source)).with_recursion_limit(limit);
        let (parse, diagnostics) = parse_with_parser(parser);
        let captures = CaptureIndex::new(&parse.syntax());
        let line_index = LineIndex::new(&source);

        Self {
            source,
            parse,
            diagnostics,
            line_index,
            captures,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// Diagnostics reported while parsing, before any lint ran.
    pub fn parse_diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn captures(&self) -> &CaptureIndex {
        &self.captures
    }

    pub fn offset(&self, position: Position) -> Option<TextSize> {
        self.line_index.offset(position)
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.line_index.position(offset)
    }
}

/// Current document per URI. Updates swap the whole entry.
#[derive(Debug, Clone, Default)]
pub struct DocumentCache {
    documents: HashMap<String, Arc<Document>>,
    recursion_limit: Option<u32>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursion_limit(limit: u32) -> Self {
        Self {
            documents: HashMap::new(),
            recursion_limit: Some(limit),
        }
    }

    /// Parse `text` as the new version of `uri`. Readers holding the old
    /// version keep it.
    pub fn update(&mut self, uri: impl Into<String>, text: impl Into<String>) -> Arc<Document> {
        let limit = self.recursion_limit.unwrap_or(DEFAULT_RECURSION_LIMIT);
        let document = Arc::new(Document::with_recursion_limit(text, limit));
        self.documents.insert(uri.into(), Arc::clone(&document));
        document
    }

    pub fn get(&self, uri: &str) -> Option<Arc<Document>> {
        self.documents.get(uri).cloned()
    }

    pub fn remove(&mut self, uri: &str) -> Option<Arc<Document>> {
        self.documents.remove(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn document_derives_everything_once() {
        let document = Document::new("(identifier) @a\n(number) @a @b");

        assert_eq!(document.captures().count("a"), 2);
        assert_eq!(document.line_index().line_count(), 2);
        assert!(document.parse_diagnostics().is_empty());
        assert_eq!(
            document.offset(Position::new(1, 1)),
            Some(TextSize::from(17))
        );
    }

    #[test]
    fn parser_diagnostics_are_kept() {
        let document = Document::new("(identifier");
        assert_eq!(document.parse_diagnostics().error_count(), 1);
    }

    #[test]
    fn update_replaces_entry() {
        let mut cache = DocumentCache::new();
        let first = cache.update("file:///a.scm", "(a)");
        let second = cache.update("file:///a.scm", "(b)");

        assert_eq!(cache.len(), 1);
        assert_eq!(first.source(), "(a)");
        assert_eq!(second.source(), "(b)");
        let current = cache.get("file:///a.scm").unwrap();
        assert!(Arc::ptr_eq(&current, &second));

        assert!(cache.remove("file:///a.scm").is_some());
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_recursion_limit() {
        let mut cache = DocumentCache::with_recursion_limit(1);
        let document = cache.update("q", "((a))");
        assert_eq!(document.parse_diagnostics().error_count(), 1);
    }
}
