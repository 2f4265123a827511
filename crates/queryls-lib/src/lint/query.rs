//! The structural query every lint draws its matches from.
//!
//! One walk over the tree binds each construct of interest under a capture
//! name. A lint is keyed by one of these names and only sees its own matches.

use crate::parser::ast;
use crate::parser::cst::{SyntaxKind, SyntaxNode};

pub const NODE: &str = "node";
/// Field definitions and negated fields no named node owns.
pub const FIELD: &str = "field";
pub const NEGATED_FIELD: &str = "negated_field";
pub const EMPTY_CONTAINER: &str = "empty_container";
pub const HANGING_CAPTURE: &str = "hanging_capture";
pub const MISSING_FIELD_VALUE: &str = "missing_field_value";
pub const MISSING_PARAMETERS: &str = "missing_parameters";
pub const PREDICATE: &str = "predicate";
pub const REGEX_PREDICATE: &str = "regex_predicate";

/// Predicates whose string argument is a regular expression.
pub const REGEX_PREDICATES: [&str; 4] = ["match?", "not-match?", "any-match?", "any-not-match?"];

/// One match of the structural query: capture names bound to nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatch {
    captures: Vec<(&'static str, SyntaxNode)>,
}

impl QueryMatch {
    fn single(name: &'static str, node: SyntaxNode) -> Self {
        Self {
            captures: vec![(name, node)],
        }
    }

    pub fn get(&self, name: &str) -> Option<&SyntaxNode> {
        self.captures
            .iter()
            .find(|(capture, _)| *capture == name)
            .map(|(_, node)| node)
    }

    pub fn captures(&self) -> &[(&'static str, SyntaxNode)] {
        &self.captures
    }
}

/// Run the structural query over the tree rooted at `root`, in document order.
pub fn run(root: &SyntaxNode) -> Vec<QueryMatch> {
    let mut matches = Vec::new();

    for node in root.descendants() {
        match node.kind() {
            SyntaxKind::NamedNode => matches.push(QueryMatch::single(NODE, node)),
            SyntaxKind::Grouping => {
                if ast::Grouping::cast(node.clone()).is_some_and(|g| g.is_empty()) {
                    matches.push(QueryMatch::single(EMPTY_CONTAINER, node));
                }
            }
            SyntaxKind::List => {
                if ast::List::cast(node.clone()).is_some_and(|l| l.is_empty()) {
                    matches.push(QueryMatch::single(EMPTY_CONTAINER, node));
                }
            }
            SyntaxKind::Capture => {
                if ast::Capture::cast(node.clone()).is_some_and(|c| c.name().is_none()) {
                    matches.push(QueryMatch::single(HANGING_CAPTURE, node));
                }
            }
            SyntaxKind::FieldDefinition => {
                if is_unowned(&node) {
                    matches.push(QueryMatch::single(FIELD, node.clone()));
                }
                let field = ast::FieldDefinition::cast(node.clone());
                if field.is_some_and(|f| f.value().is_none()) {
                    matches.push(QueryMatch::single(MISSING_FIELD_VALUE, node));
                }
            }
            SyntaxKind::NegatedField => {
                if is_unowned(&node) {
                    matches.push(QueryMatch::single(NEGATED_FIELD, node));
                }
            }
            SyntaxKind::Predicate => predicate_matches(node, &mut matches),
            _ => {}
        }
    }

    matches
}

/// Whether no named node owns `node`: looking through groupings and lists,
/// it sits at the top level or inside another field's value. Fields in
/// error recovery are left to the parser's diagnostics.
fn is_unowned(node: &SyntaxNode) -> bool {
    let owner = node
        .ancestors()
        .skip(1)
        .find(|a| !matches!(a.kind(), SyntaxKind::Grouping | SyntaxKind::List));
    owner.is_some_and(|a| matches!(a.kind(), SyntaxKind::Program | SyntaxKind::FieldDefinition))
}

fn predicate_matches(node: SyntaxNode, matches: &mut Vec<QueryMatch>) {
    let Some(predicate) = ast::Predicate::cast(node.clone()) else {
        return;
    };

    if predicate.parameters().is_none_or(|p| p.is_empty()) {
        matches.push(QueryMatch::single(MISSING_PARAMETERS, node.clone()));
    }
    if predicate
        .full_name()
        .is_some_and(|name| REGEX_PREDICATES.contains(&name.as_str()))
    {
        matches.push(QueryMatch::single(REGEX_PREDICATE, node.clone()));
    }
    matches.push(QueryMatch::single(PREDICATE, node));
}
