use indexmap::IndexMap;
use rowan::TextRange;

use crate::parser::ast::Capture;
use crate::parser::cst::SyntaxNode;

/// Every named capture of one document with the ranges of its names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureIndex {
    captures: IndexMap<String, Vec<TextRange>>,
}

impl CaptureIndex {
    pub fn new(root: &SyntaxNode) -> Self {
        let mut captures: IndexMap<String, Vec<TextRange>> = IndexMap::new();
        for capture in root.descendants().filter_map(Capture::cast) {
            let Some(name) = capture.name() else {
                continue;
            };
            captures
                .entry(name.text().to_string())
                .or_default()
                .push(name.text_range());
        }
        Self { captures }
    }

    pub fn occurrences(&self, name: &str) -> &[TextRange] {
        self.captures.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn count(&self, name: &str) -> usize {
        self.occurrences(name).len()
    }

    /// Names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.captures.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
