#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar type model for tree-sitter query analysis.
//!
//! Three layers, leaves first:
//! - **Schema**: 1:1 mapping to `node-types.json`, plus a classified view where
//!   every entry is a literal, a leaf, a supertype or a branch
//! - **Flattening**: supertypes resolved transitively into concrete kinds and literals
//! - **Environment**: the immutable, queryable registry built once per grammar load

pub mod environment;
pub mod flatten;
pub mod names;
pub mod schema;

#[cfg(test)]
mod flatten_tests;
#[cfg(test)]
mod schema_tests;

pub use environment::{CheckableNamed, CheckableSubnode, CheckableSupertype, TypeEnvironment};
pub use flatten::{FlatTypes, MAX_FLATTEN_ITERATIONS, SupertypeMap, flatten, flatten_supertype};
pub use names::{FieldName, Literal, TypeName};
pub use schema::{
    Branch, Children, Flags, GrammarDescriptor, GrammarError, Kind, RawChildren, RawNode, RawStub,
    Stub, Supertype, parse_node_types,
};
