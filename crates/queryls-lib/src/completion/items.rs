//! Completion items and the per-grammar pools they are drawn from.

use indexmap::IndexMap;
use queryls_core::{CheckableNamed, CheckableSupertype, TypeEnvironment};
use serde::Serialize;

use crate::utils::format_list;

/// Names that are valid in any named-node position.
pub const BUILTINS: [&str; 3] = ["_", "ERROR", "MISSING"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionItemKind {
    Node,
    Field,
    Literal,
    Capture,
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            kind,
            insert_text: None,
            documentation: None,
        }
    }

    pub fn insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    pub fn documentation(mut self, doc: Option<String>) -> Self {
        self.documentation = doc;
        self
    }

    /// What ends up in the document when the item is accepted.
    pub fn text(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }
}

/// Bare and wrapped renditions of the same names, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    bare: IndexMap<String, CompletionItem>,
    wrapped: IndexMap<String, CompletionItem>,
}

impl Pool {
    fn insert(&mut self, name: &str, bare: CompletionItem, wrapped: CompletionItem) {
        self.bare.insert(name.to_string(), bare);
        self.wrapped.insert(name.to_string(), wrapped);
    }

    fn side(&self, wrapped: bool) -> &IndexMap<String, CompletionItem> {
        if wrapped { &self.wrapped } else { &self.bare }
    }

    /// Every item of one rendition.
    pub fn all(&self, wrapped: bool) -> impl Iterator<Item = &CompletionItem> {
        self.side(wrapped).values()
    }

    /// Items of one rendition whose name passes `keep`, in pool order.
    pub fn filtered<'a>(
        &'a self,
        wrapped: bool,
        keep: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = &'a CompletionItem> + 'a {
        self.side(wrapped)
            .iter()
            .filter(move |(name, _)| keep(name.as_str()))
            .map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.bare.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bare.is_empty()
    }
}

/// Precomputed items for one type environment. Built with it, never mutated.
///
/// Literal pools use "wrapped" for the quoted form (`"+"`) and "bare" for the
/// dequoted one (`+`), which is what goes between quotes already typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionPools {
    pub nodes: Pool,
    pub fields: Pool,
    pub literals: Pool,
    pub builtins: Pool,
}

impl CompletionPools {
    pub fn new(env: &TypeEnvironment) -> Self {
        let mut nodes = Pool::default();
        for named in env.named_kinds() {
            let doc = Some(named_documentation(named));
            add_node(&mut nodes, named.name.as_str(), doc);
        }
        for supertype in env.supertypes() {
            let doc = Some(supertype_documentation(supertype));
            add_node(&mut nodes, supertype.name.as_str(), doc);
        }

        let mut fields = Pool::default();
        for (name, subnode) in env.fields() {
            let doc = Some(format!(
                "accepts {}",
                format_list(subnode.type_names().iter().map(|t| t.as_str()), 8)
            ))
            .filter(|_| !subnode.type_names().is_empty());
            fields.insert(
                name.as_str(),
                CompletionItem::new(name.as_str(), CompletionItemKind::Field)
                    .documentation(doc.clone()),
                CompletionItem::new(name.as_str(), CompletionItemKind::Field)
                    .insert_text(format!("{name}: "))
                    .documentation(doc),
            );
        }

        let mut literals = Pool::default();
        for literal in env.literals() {
            let quoted = quote(literal.as_str());
            literals.insert(
                literal.as_str(),
                CompletionItem::new(literal.as_str(), CompletionItemKind::Literal),
                CompletionItem::new(quoted, CompletionItemKind::Literal),
            );
        }

        let mut builtins = Pool::default();
        for name in BUILTINS {
            builtins.insert(
                name,
                CompletionItem::new(name, CompletionItemKind::Builtin),
                CompletionItem::new(name, CompletionItemKind::Builtin)
                    .insert_text(format!("({name})")),
            );
        }

        Self {
            nodes,
            fields,
            literals,
            builtins,
        }
    }
}

fn add_node(pool: &mut Pool, name: &str, doc: Option<String>) {
    pool.insert(
        name,
        CompletionItem::new(name, CompletionItemKind::Node).documentation(doc.clone()),
        CompletionItem::new(name, CompletionItemKind::Node)
            .insert_text(format!("({name})"))
            .documentation(doc),
    );
}

fn named_documentation(named: &CheckableNamed) -> String {
    let fields = if named.fields.is_empty() {
        "no fields".to_string()
    } else {
        format!(
            "fields: {}",
            format_list(named.fields.keys().map(|f| f.as_str()), 8)
        )
    };
    let children = if named.children.is_some() {
        "accepts children"
    } else {
        "no children"
    };
    format!("{fields}; {children}")
}

fn supertype_documentation(supertype: &CheckableSupertype) -> String {
    format!(
        "supertype of {}",
        format_list(supertype.subtype_names().iter().map(|t| t.as_str()), 8)
    )
}

/// Render a literal as a query string.
fn quote(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    out.push('"');
    for c in literal.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
