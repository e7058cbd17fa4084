//! Type descriptors for cached values.

use std::fmt;

/// Type descriptor for a cached [`Value`](crate::Value).
///
/// Used by typed cache reads to report what was requested and what was found.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Boolean flag.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// UTF-8 text.
    Text,
    /// Reference to another entity.
    Entity,
    /// Persistent list of values.
    List,
    /// Persistent string-keyed map of values.
    Map,
    /// Opaque shared payload; carries the Rust type name of the payload.
    Object(&'static str),
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Entity => write!(f, "entity"),
            Self::List => write!(f, "list"),
            Self::Map => write!(f, "map"),
            Self::Object(name) => write!(f, "object<{name}>"),
        }
    }
}
