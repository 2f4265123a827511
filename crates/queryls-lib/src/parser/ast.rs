//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Accessors return `None` for whatever the parser had to leave out.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Program, Program);
ast_node!(NamedNode, NamedNode);
ast_node!(AnonymousNode, AnonymousNode);
ast_node!(Grouping, Grouping);
ast_node!(List, List);
ast_node!(FieldDefinition, FieldDefinition);
ast_node!(NegatedField, NegatedField);
ast_node!(Capture, Capture);
ast_node!(Quantifier, Quantifier);
ast_node!(Predicate, Predicate);
ast_node!(Parameters, Parameters);
ast_node!(Str, Str);

/// Anything that can appear inside a node, grouping or list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    NamedNode(NamedNode),
    AnonymousNode(AnonymousNode),
    Grouping(Grouping),
    List(List),
    FieldDefinition(FieldDefinition),
    NegatedField(NegatedField),
    Predicate(Predicate),
}

impl Item {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NamedNode => NamedNode::cast(node).map(Item::NamedNode),
            SyntaxKind::AnonymousNode => AnonymousNode::cast(node).map(Item::AnonymousNode),
            SyntaxKind::Grouping => Grouping::cast(node).map(Item::Grouping),
            SyntaxKind::List => List::cast(node).map(Item::List),
            SyntaxKind::FieldDefinition => FieldDefinition::cast(node).map(Item::FieldDefinition),
            SyntaxKind::NegatedField => NegatedField::cast(node).map(Item::NegatedField),
            SyntaxKind::Predicate => Predicate::cast(node).map(Item::Predicate),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Item::NamedNode(n) => n.as_cst(),
            Item::AnonymousNode(n) => n.as_cst(),
            Item::Grouping(n) => n.as_cst(),
            Item::List(n) => n.as_cst(),
            Item::FieldDefinition(n) => n.as_cst(),
            Item::NegatedField(n) => n.as_cst(),
            Item::Predicate(n) => n.as_cst(),
        }
    }
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens().filter_map(|it| it.into_token())
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

fn captures(node: &SyntaxNode) -> impl Iterator<Item = Capture> {
    node.children().filter_map(Capture::cast)
}

fn quantifier(node: &SyntaxNode) -> Option<Quantifier> {
    node.children().find_map(Quantifier::cast)
}

impl Program {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    /// Captures standing at the top level with no pattern before them.
    pub fn detached_captures(&self) -> impl Iterator<Item = Capture> + '_ {
        captures(&self.0)
    }
}

impl NamedNode {
    /// The kind name, or the `_` of a wildcard.
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::Underscore))
    }

    pub fn is_wildcard(&self) -> bool {
        self.name()
            .is_some_and(|t| t.kind() == SyntaxKind::Underscore)
    }

    /// The `subtype` of `(supertype/subtype)`.
    pub fn subtype(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .skip_while(|t| t.kind() != SyntaxKind::Slash)
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn has_slash(&self) -> bool {
        first_token(&self.0, SyntaxKind::Slash).is_some()
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn quantifier(&self) -> Option<Quantifier> {
        quantifier(&self.0)
    }

    pub fn captures(&self) -> impl Iterator<Item = Capture> + '_ {
        captures(&self.0)
    }
}

impl AnonymousNode {
    /// `None` for the bare `_` wildcard.
    pub fn string(&self) -> Option<Str> {
        self.0.children().find_map(Str::cast)
    }

    pub fn is_wildcard(&self) -> bool {
        first_token(&self.0, SyntaxKind::Underscore).is_some()
    }

    pub fn captures(&self) -> impl Iterator<Item = Capture> + '_ {
        captures(&self.0)
    }
}

impl Grouping {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    pub fn captures(&self) -> impl Iterator<Item = Capture> + '_ {
        captures(&self.0)
    }
}

impl List {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    pub fn captures(&self) -> impl Iterator<Item = Capture> + '_ {
        captures(&self.0)
    }
}

impl FieldDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Item> {
        self.0.children().find_map(Item::cast)
    }
}

impl NegatedField {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }
}

impl Capture {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }
}

impl Quantifier {
    pub fn operator(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question
            )
        })
    }
}

impl Predicate {
    /// The bare name: `eq` in `(#eq? ...)`.
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }

    /// The `?` or `!` suffix.
    pub fn suffix(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::Question | SyntaxKind::Bang))
    }

    /// Name plus suffix as written: `eq?`, `set!`.
    pub fn full_name(&self) -> Option<String> {
        let name = self.name()?;
        let suffix = self.suffix()?;
        Some(format!("{}{}", name.text(), suffix.text()))
    }

    pub fn is_directive(&self) -> bool {
        self.suffix().is_some_and(|t| t.kind() == SyntaxKind::Bang)
    }

    pub fn parameters(&self) -> Option<Parameters> {
        self.0.children().find_map(Parameters::cast)
    }
}

impl Parameters {
    pub fn is_empty(&self) -> bool {
        self.0
            .children_with_tokens()
            .all(|it| it.kind().is_trivia())
    }

    pub fn captures(&self) -> impl Iterator<Item = Capture> + '_ {
        captures(&self.0)
    }

    pub fn strings(&self) -> impl Iterator<Item = Str> + '_ {
        self.0.children().filter_map(Str::cast)
    }
}

impl Str {
    /// Raw content between the quotes, escapes untouched.
    pub fn content(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::StrVal)
    }

    /// Content with escape sequences resolved. Empty for `""`.
    pub fn value(&self) -> String {
        self.content()
            .map(|t| unescape(t.text()))
            .unwrap_or_default()
    }

    pub fn is_terminated(&self) -> bool {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::DoubleQuote)
            .count()
            == 2
    }
}

/// Resolve `\n`, `\t`, `\r`, `\0`, `\\` and `\"`. Any other escaped
/// character stands for itself.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
