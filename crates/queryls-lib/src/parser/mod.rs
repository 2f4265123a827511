//! Parser infrastructure for tree-sitter query documents.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Incomplete constructs stay in the tree so completion can classify the cursor
//!
//! # Recovery Strategy
//!
//! The parser is resilient and always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing closers are reported at their opener and not consumed
//! 3. On recursion limit, remaining input goes into single Error node
//!
//! # Grammar (EBNF-ish)
//!
//! ```text
//! program    = (pattern | capture)*
//! pattern    = (named | grouping | list | anonymous | field | predicate) suffix
//! named      = "(" (ID | "_") ["/" ID] item* ")"
//! grouping   = "(" item* ")"
//! list       = "[" item* "]"
//! anonymous  = STRING | "_"
//! field      = ID ":" [pattern]
//! item       = pattern | "!" ID | "." | capture
//! predicate  = "(" "#" ID ("?" | "!") (capture | STRING | ID | "_")* ")"
//! suffix     = ["*" | "+" | "?"] capture*
//! capture    = "@" [ID]
//! ```

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod lexer_tests;

pub use cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::{DEFAULT_RECURSION_LIMIT, Parser};

use std::fmt::Write;

use rowan::NodeOrToken;

use crate::diagnostics::Diagnostics;
use lexer::lex;

/// Parse result containing the green tree.
///
/// The tree is always complete. Diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    /// Creates a typed view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn program(&self) -> Option<ast::Program> {
        ast::Program::cast(self.syntax())
    }
}

pub fn parse(source: &str) -> (Parse, Diagnostics) {
    parse_with_parser(Parser::new(source, lex(source)))
}

/// Parse with a pre-configured parser (for custom recursion limits).
pub fn parse_with_parser(mut parser: Parser) -> (Parse, Diagnostics) {
    parser.parse_root();
    let (cst, diagnostics) = parser.finish();
    (Parse { cst }, diagnostics)
}

/// Indented dump of a syntax tree, one node or token per line.
pub fn format_cst(node: &SyntaxNode, trivia: bool) -> String {
    let mut out = String::new();
    // Writing into a String can't fail.
    let _ = write_cst(node, 0, trivia, &mut out);
    out
}

fn write_cst(node: &SyntaxNode, indent: usize, trivia: bool, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => write_cst(&n, indent + 1, trivia, w)?,
            NodeOrToken::Token(t) => {
                if trivia || !t.kind().is_trivia() {
                    writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
                }
            }
        }
    }
    Ok(())
}
