//! The queryable grammar model.
//!
//! Built once per grammar load and read-only afterwards. Every allow-set in here
//! is already flattened, so consumers never see a supertype where they expect a
//! concrete kind. The default value is the empty environment, which is what
//! consumers see before any grammar has been loaded.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::flatten::{FlatTypes, SupertypeMap};
use crate::names::{FieldName, Literal, TypeName};
use crate::schema::{Branch, Children, Flags, GrammarDescriptor, Kind};

/// Flattened form of a field or children declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckableSubnode {
    pub multiple: bool,
    pub required: bool,
    pub types: FlatTypes,
}

impl CheckableSubnode {
    fn new(children: &Children, supertypes: &SupertypeMap<'_>) -> Self {
        Self {
            multiple: children.multiple,
            required: children.required,
            types: supertypes.flatten(&children.types),
        }
    }

    /// Union with another declaration of the same field name.
    ///
    /// The union may hold many values if any declaration does, and is only
    /// required if every declaration is.
    fn merge(&mut self, other: &CheckableSubnode) {
        self.multiple |= other.multiple;
        self.required &= other.required;
        self.types.extend(&other.types);
    }

    pub fn type_names(&self) -> &IndexSet<TypeName> {
        &self.types.type_names
    }

    pub fn literals(&self) -> &IndexSet<Literal> {
        &self.types.literals
    }
}

/// A concrete named kind with everything it may contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckableNamed {
    pub name: TypeName,
    /// Union of the children slot and every field.
    pub types: FlatTypes,
    pub fields: IndexMap<FieldName, CheckableSubnode>,
    pub children: Option<CheckableSubnode>,
    pub root: bool,
    pub extra: bool,
}

impl CheckableNamed {
    fn leaf(name: &TypeName, flags: Flags) -> Self {
        Self {
            name: name.clone(),
            types: FlatTypes::default(),
            fields: IndexMap::new(),
            children: None,
            root: flags.root,
            extra: flags.extra,
        }
    }

    fn branch(branch: &Branch, supertypes: &SupertypeMap<'_>) -> Self {
        let fields: IndexMap<_, _> = branch
            .fields
            .iter()
            .map(|(name, children)| (name.clone(), CheckableSubnode::new(children, supertypes)))
            .collect();
        let children = branch
            .children
            .as_ref()
            .map(|children| CheckableSubnode::new(children, supertypes));

        let mut types = FlatTypes::default();
        for subnode in fields.values().chain(children.iter()) {
            types.extend(&subnode.types);
        }

        Self {
            name: branch.name.clone(),
            types,
            fields,
            children,
            root: branch.flags.root,
            extra: branch.flags.extra,
        }
    }

    /// Whether this kind can hold any subnode at all.
    pub fn accepts_subnodes(&self) -> bool {
        self.children.is_some() || !self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&CheckableSubnode> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn type_names(&self) -> &IndexSet<TypeName> {
        &self.types.type_names
    }

    pub fn literals(&self) -> &IndexSet<Literal> {
        &self.types.literals
    }
}

/// A supertype with its flattened membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckableSupertype {
    pub name: TypeName,
    pub subtypes: FlatTypes,
    pub root: bool,
    pub extra: bool,
}

impl CheckableSupertype {
    pub fn subtype_names(&self) -> &IndexSet<TypeName> {
        &self.subtypes.type_names
    }

    pub fn subtype_literals(&self) -> &IndexSet<Literal> {
        &self.subtypes.literals
    }
}

/// Grammar-wide registry of kinds, fields and literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnvironment {
    literals: IndexSet<Literal>,
    types: IndexMap<TypeName, CheckableNamed>,
    fields: IndexMap<FieldName, CheckableSubnode>,
    supertypes: IndexMap<TypeName, CheckableSupertype>,
}

impl TypeEnvironment {
    pub fn new(descriptor: &GrammarDescriptor) -> Self {
        let kinds = descriptor.kinds();
        let supertype_map = SupertypeMap::new(kinds);

        let mut literals = IndexSet::new();
        let mut types = IndexMap::new();
        let mut supertypes = IndexMap::new();

        for kind in kinds {
            match kind {
                Kind::Literal { value, .. } => {
                    literals.insert(value.clone());
                }
                Kind::Leaf { name, flags } => {
                    types.insert(name.clone(), CheckableNamed::leaf(name, *flags));
                }
                Kind::Branch(branch) => {
                    types.insert(
                        branch.name.clone(),
                        CheckableNamed::branch(branch, &supertype_map),
                    );
                }
                Kind::Supertype(supertype) => {
                    let checkable = CheckableSupertype {
                        name: supertype.name.clone(),
                        subtypes: supertype_map.flatten_supertype(supertype),
                        root: supertype.flags.root,
                        extra: supertype.flags.extra,
                    };
                    supertypes.insert(supertype.name.clone(), checkable);
                }
            }
        }

        let mut fields: IndexMap<FieldName, CheckableSubnode> = IndexMap::new();
        for named in types.values() {
            for (name, subnode) in &named.fields {
                fields
                    .entry(name.clone())
                    .and_modify(|union| union.merge(subnode))
                    .or_insert_with(|| subnode.clone());
            }
        }

        tracing::debug!(
            kinds = types.len(),
            supertypes = supertypes.len(),
            fields = fields.len(),
            literals = literals.len(),
            "built type environment"
        );

        Self {
            literals,
            types,
            fields,
            supertypes,
        }
    }

    /// Build from `node-types.json` text, degrading to the empty environment
    /// when the descriptor is rejected.
    pub fn from_json(json: &str) -> Self {
        match GrammarDescriptor::from_json(json) {
            Ok(descriptor) => Self::new(&descriptor),
            Err(err) => {
                tracing::warn!(error = %err, "grammar descriptor rejected, using empty environment");
                Self::default()
            }
        }
    }

    pub fn get_named(&self, name: &str) -> Option<&CheckableNamed> {
        self.types.get(name)
    }

    /// Global union of every declaration of field `name`.
    pub fn get_field(&self, name: &str) -> Option<&CheckableSubnode> {
        self.fields.get(name)
    }

    pub fn get_supertype(&self, name: &str) -> Option<&CheckableSupertype> {
        self.supertypes.get(name)
    }

    pub fn has_literal(&self, value: &str) -> bool {
        self.literals.contains(value)
    }

    /// Whether `name` is a concrete named kind. Supertypes don't count.
    pub fn has_type_name(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn has_supertype(&self, name: &str) -> bool {
        self.supertypes.contains_key(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// True iff no kinds and no literals were loaded.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.literals.is_empty()
    }

    pub fn named_kinds(&self) -> impl Iterator<Item = &CheckableNamed> {
        self.types.values()
    }

    pub fn supertypes(&self) -> impl Iterator<Item = &CheckableSupertype> {
        self.supertypes.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &CheckableSubnode)> {
        self.fields.iter()
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Every name usable as a node construct: concrete kinds, then supertypes.
    pub fn kind_names(&self) -> impl Iterator<Item = &str> {
        self.types
            .keys()
            .chain(self.supertypes.keys())
            .map(TypeName::as_str)
    }
}
