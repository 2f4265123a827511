//! Classify what kind of completion fits a cursor position.
//!
//! The classifier only looks at the syntax tree. It finds two anchors on the
//! way from the cursor to the root: the nearest *terminal* (a token or
//! construct that pins down what is being typed) and the nearest *enclosing*
//! construct (what the typed thing belongs to). The pair selects the context.

use rowan::{NodeOrToken, TextSize, TokenAtOffset};
use serde::Serialize;

use crate::parser::ast;
use crate::parser::cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenSet};

/// Where the cursor is, in terms of what may be inserted there.
///
/// `transform` tells the resolver to offer the wrapped form of an item
/// (`(identifier)`, `name: `) rather than the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CompletionContext {
    /// The tree shape is not one we know; offer everything.
    Unhandled,
    /// Nothing can be inserted here (comments, predicate names).
    None,
    Capture {
        identifier: Option<String>,
    },
    Node {
        transform: bool,
        enclosing_node_type: Option<String>,
    },
    Child {
        transform: bool,
        enclosing_node_type: Option<String>,
    },
    FieldValue {
        transform: bool,
        field_name: String,
        parent_type: Option<String>,
    },
    NegatedField {
        parent_type: Option<String>,
    },
    FieldName {
        transform: bool,
        parent_type: Option<String>,
    },
    EmptyString {
        parent_type: Option<String>,
        field_name: Option<String>,
    },
}

const TERMINALS: TokenSet = TokenSet::new(&[
    SyntaxKind::At,
    SyntaxKind::Colon,
    SyntaxKind::Bang,
    SyntaxKind::Id,
    SyntaxKind::NamedNode,
    SyntaxKind::Grouping,
    SyntaxKind::List,
    SyntaxKind::Program,
    SyntaxKind::Str,
    SyntaxKind::StrVal,
]);

const ENCLOSING: TokenSet = TokenSet::new(&[
    SyntaxKind::Program,
    SyntaxKind::Capture,
    SyntaxKind::NamedNode,
    SyntaxKind::FieldDefinition,
    SyntaxKind::NegatedField,
]);

/// Containers a kind name can be nested in without changing what it belongs to.
const TRANSPARENT: TokenSet =
    TokenSet::new(&[SyntaxKind::Grouping, SyntaxKind::List, SyntaxKind::Error]);

/// Classify the cursor at byte `offset` of the document rooted at `root`.
pub fn classify(root: &SyntaxNode, offset: TextSize) -> CompletionContext {
    if offset == TextSize::from(0) {
        return CompletionContext::Node {
            transform: true,
            enclosing_node_type: None,
        };
    }
    if offset > root.text_range().end() {
        return CompletionContext::None;
    }

    let Some(start) = start_element(root, offset) else {
        return CompletionContext::None;
    };

    let chain: Vec<SyntaxElement> =
        std::iter::successors(Some(start), |e| e.parent().map(NodeOrToken::Node)).collect();

    if chain.iter().any(|e| e.kind() == SyntaxKind::Comment) {
        return CompletionContext::None;
    }

    let terminal = chain.iter().find(|e| TERMINALS.contains(e.kind()));
    let enclosing = chain
        .iter()
        .filter_map(NodeOrToken::as_node)
        .find(|n| ENCLOSING.contains(n.kind()));
    let (Some(terminal), Some(enclosing)) = (terminal, enclosing) else {
        tracing::debug!(offset = u32::from(offset), "no terminal or enclosing construct");
        return CompletionContext::Unhandled;
    };

    if terminal.kind() == SyntaxKind::At {
        return CompletionContext::Capture { identifier: None };
    }

    let in_predicate = chain.iter().any(|e| e.kind() == SyntaxKind::Predicate);
    if in_predicate && enclosing.kind() != SyntaxKind::Capture {
        return CompletionContext::None;
    }

    let context = dispatch(enclosing, terminal);
    tracing::debug!(
        enclosing = ?enclosing.kind(),
        terminal = ?terminal.kind(),
        ?context,
        "classified completion context"
    );
    context
}

/// The element the cursor is considered to be in.
fn start_element(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxElement> {
    let token = match root.token_at_offset(offset) {
        TokenAtOffset::None => return None,
        TokenAtOffset::Single(token) => token,
        TokenAtOffset::Between(left, _) => left,
    };

    if token.text_range().end() == offset && closes_construct(&token) {
        return token.parent().map(|node| climb_closed(node, offset)).map(NodeOrToken::Node);
    }

    if token.kind().is_trivia()
        && token.kind() != SyntaxKind::Comment
        && let Some(colon) = dangling_colon(&token)
    {
        return Some(NodeOrToken::Token(colon));
    }

    Some(NodeOrToken::Token(token))
}

fn closes_construct(token: &SyntaxToken) -> bool {
    match token.kind() {
        SyntaxKind::ParenClose | SyntaxKind::BracketClose => true,
        SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question => token
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::Quantifier),
        SyntaxKind::DoubleQuote => token.prev_sibling_or_token().is_some(),
        _ => false,
    }
}

/// Leave every construct that ends exactly at `offset`.
fn climb_closed(mut node: SyntaxNode, offset: TextSize) -> SyntaxNode {
    while node.kind() != SyntaxKind::Program && node.text_range().end() == offset {
        let Some(parent) = node.parent() else {
            break;
        };
        node = parent;
    }
    node
}

/// The colon of a value-less field definition right before this trivia.
fn dangling_colon(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut prev = token.prev_token();
    while let Some(t) = &prev {
        if !t.kind().is_trivia() {
            break;
        }
        prev = t.prev_token();
    }
    let colon = prev.filter(|t| t.kind() == SyntaxKind::Colon)?;
    let field = colon.parent().and_then(ast::FieldDefinition::cast)?;
    field.value().is_none().then_some(colon)
}

fn dispatch(enclosing: &SyntaxNode, terminal: &SyntaxElement) -> CompletionContext {
    use SyntaxKind as K;

    match (enclosing.kind(), terminal.kind()) {
        (K::Program, K::Program | K::List | K::Id) => CompletionContext::Node {
            transform: true,
            enclosing_node_type: None,
        },
        (K::Program, K::Grouping) => CompletionContext::Node {
            transform: !is_empty_container(terminal),
            enclosing_node_type: None,
        },
        (K::Program, K::Str | K::StrVal) => CompletionContext::EmptyString {
            parent_type: None,
            field_name: None,
        },

        (K::Capture, K::Id) => CompletionContext::Capture {
            identifier: terminal.as_token().map(|t| t.text().to_string()),
        },

        (K::NamedNode, K::NamedNode) => CompletionContext::Child {
            transform: true,
            enclosing_node_type: named_node_type(enclosing),
        },
        (K::NamedNode, K::Id) => id_in_named_node(enclosing, terminal),
        (K::NamedNode, K::Grouping) if is_empty_container(terminal) => CompletionContext::Node {
            transform: false,
            enclosing_node_type: named_node_type(enclosing),
        },
        (K::NamedNode, K::Grouping | K::List) => CompletionContext::Child {
            transform: true,
            enclosing_node_type: named_node_type(enclosing),
        },
        (K::NamedNode, K::Str | K::StrVal) => CompletionContext::EmptyString {
            parent_type: named_node_type(enclosing),
            field_name: None,
        },

        (K::FieldDefinition, K::Id) => CompletionContext::FieldName {
            transform: false,
            parent_type: parent_node_type(enclosing),
        },
        (K::FieldDefinition, K::Colon | K::NamedNode | K::Program | K::List) => {
            field_value(enclosing, true)
        }
        (K::FieldDefinition, K::Grouping) => field_value(enclosing, !is_empty_container(terminal)),
        (K::FieldDefinition, K::Str | K::StrVal) => CompletionContext::EmptyString {
            parent_type: parent_node_type(enclosing),
            field_name: field_name(enclosing),
        },

        (
            K::NegatedField,
            K::Bang | K::Id | K::NamedNode | K::Grouping | K::List | K::Program,
        ) => CompletionContext::NegatedField {
            parent_type: parent_node_type(enclosing),
        },

        (K::Program, K::Colon | K::Bang | K::NamedNode)
        | (K::NamedNode, K::Colon | K::Bang | K::Program)
        | (K::FieldDefinition, K::Bang)
        | (K::Capture, _) => {
            tracing::warn!(
                enclosing = ?enclosing.kind(),
                terminal = ?terminal.kind(),
                "unexpected construct pair at completion position"
            );
            CompletionContext::Unhandled
        }

        (enclosing, terminal) => {
            tracing::debug!(?enclosing, ?terminal, "unhandled construct pair");
            CompletionContext::Unhandled
        }
    }
}

/// An identifier inside a named node: its kind name, a subtype, or the start
/// of a field name.
fn id_in_named_node(enclosing: &SyntaxNode, terminal: &SyntaxElement) -> CompletionContext {
    let Some(named) = ast::NamedNode::cast(enclosing.clone()) else {
        return CompletionContext::Unhandled;
    };
    let token = terminal.as_token();

    if token.is_some() && named.name().as_ref() == token {
        return kind_name_context(enclosing);
    }

    if named.subtype().as_ref() == token && token.is_some() {
        return CompletionContext::Node {
            transform: false,
            enclosing_node_type: named.name().map(|t| t.text().to_string()),
        };
    }

    if token.and_then(SyntaxToken::parent).as_ref() == Some(enclosing) {
        // `(MISSING kind)`
        return CompletionContext::Node {
            transform: false,
            enclosing_node_type: None,
        };
    }

    CompletionContext::FieldName {
        transform: true,
        parent_type: named_node_type(enclosing),
    }
}

/// Typing the kind name of `named`: the context is whatever holds `named`.
fn kind_name_context(named: &SyntaxNode) -> CompletionContext {
    let mut holder = named.parent();
    while let Some(node) = holder.as_ref().filter(|n| TRANSPARENT.contains(n.kind())) {
        holder = node.parent();
    }

    match holder {
        Some(node) if node.kind() == SyntaxKind::FieldDefinition => field_value(&node, false),
        Some(node) if node.kind() == SyntaxKind::NamedNode => CompletionContext::Node {
            transform: false,
            enclosing_node_type: named_node_type(&node),
        },
        _ => CompletionContext::Node {
            transform: false,
            enclosing_node_type: None,
        },
    }
}

fn field_value(field: &SyntaxNode, transform: bool) -> CompletionContext {
    match field_name(field) {
        Some(field_name) => CompletionContext::FieldValue {
            transform,
            field_name,
            parent_type: parent_node_type(field),
        },
        None => CompletionContext::Unhandled,
    }
}

fn is_empty_container(element: &SyntaxElement) -> bool {
    match element.as_node().cloned() {
        Some(node) => match node.kind() {
            SyntaxKind::Grouping => ast::Grouping::cast(node).is_some_and(|g| g.is_empty()),
            SyntaxKind::List => ast::List::cast(node).is_some_and(|l| l.is_empty()),
            _ => false,
        },
        None => false,
    }
}

/// Kind name of a named-node construct. The wildcard names no kind.
fn named_node_type(node: &SyntaxNode) -> Option<String> {
    let named = ast::NamedNode::cast(node.clone())?;
    if named.is_wildcard() {
        return None;
    }
    named.name().map(|t| t.text().to_string())
}

/// Kind name of the nearest named node strictly above `node`.
fn parent_node_type(node: &SyntaxNode) -> Option<String> {
    let parent = node
        .ancestors()
        .skip(1)
        .find(|n| n.kind() == SyntaxKind::NamedNode)?;
    named_node_type(&parent)
}

fn field_name(field: &SyntaxNode) -> Option<String> {
    ast::FieldDefinition::cast(field.clone())?
        .name()
        .map(|t| t.text().to_string())
}
