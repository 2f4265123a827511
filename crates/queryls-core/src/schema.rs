//! Grammar descriptor shapes.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to `node-types.json`
//! - **Classified layer**: every entry tagged as literal, leaf, supertype or branch
//!
//! Classification also performs the basic shape validation: a literal that
//! declares structure, or a supertype that declares fields, is rejected.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::names::{FieldName, Literal, TypeName};

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw node definition from `node-types.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub extra: bool,
    #[serde(default)]
    pub fields: IndexMap<String, RawChildren>,
    pub children: Option<RawChildren>,
    pub subtypes: Option<Vec<RawStub>>,
}

/// Cardinality constraints for a field or children slot.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChildren {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<RawStub>,
}

/// Reference to a node kind.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStub {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
}

/// Parse `node-types.json` content into raw nodes.
pub fn parse_node_types(json: &str) -> Result<Vec<RawNode>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Errors raised while loading a grammar descriptor.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("invalid grammar descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed kind `{kind}`: {reason}")]
    Malformed { kind: String, reason: &'static str },
}

// ============================================================================
// Classified Layer
// ============================================================================

/// Minimal reference to a kind, as found in field and subtype lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stub {
    Named(TypeName),
    Literal(Literal),
}

impl Stub {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(TypeName::new(name))
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal::new(value))
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name.as_str(),
            Self::Literal(value) => value.as_str(),
        }
    }
}

impl From<&RawStub> for Stub {
    fn from(raw: &RawStub) -> Self {
        if raw.named {
            Self::named(raw.type_name.as_str())
        } else {
            Self::literal(raw.type_name.as_str())
        }
    }
}

/// `root`: the kind may be the tree root. `extra`: it may appear anywhere (comments).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub root: bool,
    pub extra: bool,
}

/// A field or children slot with its declared (unflattened) member stubs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Children {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<Stub>,
}

impl From<&RawChildren> for Children {
    fn from(raw: &RawChildren) -> Self {
        Self {
            multiple: raw.multiple,
            required: raw.required,
            types: raw.types.iter().map(Stub::from).collect(),
        }
    }
}

/// Abstract kind standing for the union of its subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supertype {
    pub name: TypeName,
    pub subtypes: Vec<Stub>,
    pub flags: Flags,
}

/// Named kind with fields and/or an unnamed children slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: TypeName,
    pub fields: IndexMap<FieldName, Children>,
    pub children: Option<Children>,
    pub flags: Flags,
}

/// One classified descriptor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Literal { value: Literal, flags: Flags },
    Leaf { name: TypeName, flags: Flags },
    Supertype(Supertype),
    Branch(Branch),
}

impl Kind {
    pub fn stub(&self) -> Stub {
        match self {
            Kind::Literal { value, .. } => Stub::Literal(value.clone()),
            Kind::Leaf { name, .. } => Stub::Named(name.clone()),
            Kind::Supertype(s) => Stub::Named(s.name.clone()),
            Kind::Branch(b) => Stub::Named(b.name.clone()),
        }
    }

    pub fn flags(&self) -> Flags {
        match self {
            Kind::Literal { flags, .. } | Kind::Leaf { flags, .. } => *flags,
            Kind::Supertype(s) => s.flags,
            Kind::Branch(b) => b.flags,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Kind::Literal { .. })
    }

    pub fn is_supertype(&self) -> bool {
        matches!(self, Kind::Supertype(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Kind::Branch(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Kind::Leaf { .. })
    }
}

impl TryFrom<&RawNode> for Kind {
    type Error = GrammarError;

    fn try_from(raw: &RawNode) -> Result<Self, Self::Error> {
        let malformed = |reason| GrammarError::Malformed {
            kind: raw.type_name.clone(),
            reason,
        };

        if raw.type_name.is_empty() {
            return Err(malformed("kind name is empty"));
        }

        let flags = Flags {
            root: raw.root,
            extra: raw.extra,
        };
        let has_structure = !raw.fields.is_empty() || raw.children.is_some();

        if !raw.named {
            if has_structure || raw.subtypes.is_some() {
                return Err(malformed("literal kind declares structure"));
            }
            return Ok(Kind::Literal {
                value: Literal::new(raw.type_name.as_str()),
                flags,
            });
        }

        if let Some(subtypes) = &raw.subtypes {
            if has_structure {
                return Err(malformed("supertype declares fields or children"));
            }
            return Ok(Kind::Supertype(Supertype {
                name: TypeName::new(raw.type_name.as_str()),
                subtypes: subtypes.iter().map(Stub::from).collect(),
                flags,
            }));
        }

        if !has_structure {
            return Ok(Kind::Leaf {
                name: TypeName::new(raw.type_name.as_str()),
                flags,
            });
        }

        Ok(Kind::Branch(Branch {
            name: TypeName::new(raw.type_name.as_str()),
            fields: raw
                .fields
                .iter()
                .map(|(name, children)| (FieldName::new(name.as_str()), Children::from(children)))
                .collect(),
            children: raw.children.as_ref().map(Children::from),
            flags,
        }))
    }
}

/// A validated, classified grammar descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarDescriptor {
    kinds: Vec<Kind>,
}

impl GrammarDescriptor {
    pub fn new(kinds: Vec<Kind>) -> Self {
        Self { kinds }
    }

    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw = parse_node_types(json)?;
        Self::from_raw(&raw)
    }

    pub fn from_raw(raw: &[RawNode]) -> Result<Self, GrammarError> {
        let kinds = raw.iter().map(Kind::try_from).collect::<Result<_, _>>()?;
        Ok(Self { kinds })
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
