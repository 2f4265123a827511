//! Supertype flattening.
//!
//! A supertype stands for a union of other kinds, possibly through further
//! supertypes. Validation and completion only ever deal in concrete kinds, so
//! every stub list is resolved through a work-list closure before use.
//!
//! The closure is iterative: a queue of pending stubs, a visited set of
//! supertypes already expanded, and a hard cap on total pops. Cycles in the
//! supertype graph terminate through the visited set; the cap bounds
//! pathological descriptors.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexSet;
use serde::Serialize;

use crate::names::{Literal, TypeName};
use crate::schema::{Kind, Stub, Supertype};

/// Upper bound on work-list pops for one supertype expansion.
pub const MAX_FLATTEN_ITERATIONS: usize = 500;

/// Fully resolved vocabulary: concrete kind names and literals.
///
/// Never contains the name of a supertype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatTypes {
    pub type_names: IndexSet<TypeName>,
    pub literals: IndexSet<Literal>,
}

impl FlatTypes {
    pub fn is_empty(&self) -> bool {
        self.type_names.is_empty() && self.literals.is_empty()
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.type_names.contains(name)
    }

    pub fn contains_literal(&self, value: &str) -> bool {
        self.literals.contains(value)
    }

    pub fn extend(&mut self, other: &FlatTypes) {
        self.type_names.extend(other.type_names.iter().cloned());
        self.literals.extend(other.literals.iter().cloned());
    }
}

/// Supertype name → declared subtypes, borrowed from a grammar's kinds.
#[derive(Debug, Clone, Default)]
pub struct SupertypeMap<'a> {
    subtypes: HashMap<&'a str, &'a [Stub]>,
}

impl<'a> SupertypeMap<'a> {
    pub fn new(kinds: &'a [Kind]) -> Self {
        let subtypes = kinds
            .iter()
            .filter_map(|kind| match kind {
                Kind::Supertype(s) => Some((s.name.as_str(), s.subtypes.as_slice())),
                _ => None,
            })
            .collect();
        Self { subtypes }
    }

    pub fn is_supertype(&self, name: &str) -> bool {
        self.subtypes.contains_key(name)
    }

    /// Flatten a list of stubs. Literals and concrete names pass through,
    /// supertypes are replaced by their transitive members.
    pub fn flatten(&self, stubs: &[Stub]) -> FlatTypes {
        let mut out = FlatTypes::default();
        for stub in stubs {
            match stub {
                Stub::Literal(value) => {
                    out.literals.insert(value.clone());
                }
                Stub::Named(name) => match self.subtypes.get(name.as_str()) {
                    Some(subtypes) => self.expand(name.as_str(), subtypes, &mut out),
                    None => {
                        out.type_names.insert(name.clone());
                    }
                },
            }
        }
        out
    }

    /// Flatten one supertype's own subtype list.
    pub fn flatten_supertype(&self, supertype: &Supertype) -> FlatTypes {
        let mut out = FlatTypes::default();
        self.expand(supertype.name.as_str(), &supertype.subtypes, &mut out);
        out
    }

    fn expand<'s>(&'s self, root: &'s str, subtypes: &'s [Stub], out: &mut FlatTypes) {
        let mut visited: HashSet<&'s str> = HashSet::from([root]);
        let mut pending: VecDeque<&'s Stub> = subtypes.iter().collect();
        let mut iterations = 0usize;

        while let Some(stub) = pending.pop_front() {
            iterations += 1;
            if iterations > MAX_FLATTEN_ITERATIONS {
                tracing::warn!(
                    supertype = root,
                    limit = MAX_FLATTEN_ITERATIONS,
                    "supertype flattening hit the iteration cap, result may be incomplete"
                );
                return;
            }

            match stub {
                Stub::Literal(value) => {
                    out.literals.insert(value.clone());
                }
                Stub::Named(name) => match self.subtypes.get(name.as_str()) {
                    Some(nested) => {
                        if visited.insert(name.as_str()) {
                            pending.extend(nested.iter());
                        }
                    }
                    None => {
                        out.type_names.insert(name.clone());
                    }
                },
            }
        }
    }
}

/// Flatten `stubs` against every kind of a grammar.
pub fn flatten(stubs: &[Stub], kinds: &[Kind]) -> FlatTypes {
    SupertypeMap::new(kinds).flatten(stubs)
}

/// Flatten a single supertype against every kind of a grammar.
///
/// Agrees with `flatten(&[supertype stub], kinds)` for supertypes of `kinds`.
pub fn flatten_supertype(supertype: &Supertype, kinds: &[Kind]) -> FlatTypes {
    SupertypeMap::new(kinds).flatten_supertype(supertype)
}
