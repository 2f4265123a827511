//! Distinct string types for the three kinds of grammar vocabulary.
//!
//! Kind names, field names and literal text all arrive as plain strings in the
//! descriptor. Each gets its own wrapper so a field name can never be looked up
//! in the kind table. All three borrow as `str`, so indexed collections can be
//! queried with plain string slices.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

name_type!(
    /// Name of a named node kind: a concrete kind or a supertype.
    TypeName
);

name_type!(
    /// Name of a field declared on some branch kind.
    FieldName
);

name_type!(
    /// Surface text of an anonymous kind, without quotes (`+`, `if`, `(`).
    Literal
);
