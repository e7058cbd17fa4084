//! Tagged value type stored in per-entity caches.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::entity::EntityId;
use crate::types::ValueType;

/// Persistent list of values (O(1) clone).
pub type ValueList = im::Vector<Value>;

/// Persistent string-keyed map of values (O(1) clone).
pub type ValueMap = im::OrdMap<Arc<str>, Value>;

/// Tagged value stored by the identity cache.
///
/// Every variant clones cheaply, so a cached value can be handed out by value
/// without copying large payloads.
#[derive(Clone)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 text.
    Text(Arc<str>),
    /// Reference to another entity.
    Entity(EntityId),
    /// Persistent list.
    List(ValueList),
    /// Persistent map.
    Map(ValueMap),
    /// Shared opaque payload.
    Object(ObjectValue),
}

/// Shared opaque payload with its concrete type recorded at insertion.
#[derive(Clone)]
pub struct ObjectValue {
    payload: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ObjectValue {
    /// Wraps a payload.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self::from_arc(Arc::new(payload))
    }

    /// Wraps an already shared payload.
    #[must_use]
    pub fn from_arc<T: Any + Send + Sync>(payload: Arc<T>) -> Self {
        Self {
            payload,
            type_name: type_name::<T>(),
        }
    }

    /// Returns the recorded Rust type name of the payload.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the payload if it is a `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.payload).downcast::<T>().ok()
    }
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Text(_) => ValueType::Text,
            Self::Entity(_) => ValueType::Entity,
            Self::List(_) => ValueType::List,
            Self::Map(_) => ValueType::Map,
            Self::Object(obj) => ValueType::Object(obj.type_name),
        }
    }

    /// Wraps an arbitrary payload as an opaque object value.
    #[must_use]
    pub fn object<T: Any + Send + Sync>(payload: T) -> Self {
        Self::Object(ObjectValue::new(payload))
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a text reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an entity reference.
    #[must_use]
    pub const fn as_entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(*id),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a map reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract an opaque object of type `T`.
    #[must_use]
    pub fn as_object<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Object(obj) => obj.downcast::<T>(),
            _ => None,
        }
    }
}

// Floats compare by bit pattern and objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Entity(a), Self::Entity(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(&a.payload, &b.payload),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Entity(id) => write!(f, "{id:?}"),
            Self::List(v) => f.debug_list().entries(v.iter()).finish(),
            Self::Map(m) => f.debug_map().entries(m.iter()).finish(),
            Self::Object(obj) => write!(f, "<object {}>", obj.type_name),
        }
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectValue({})", self.type_name)
    }
}

// =============================================================================
// Typed reads
// =============================================================================

/// Types that can be read back out of a cached [`Value`].
///
/// `TYPE` is the variant a read expects; `from_value` returns `None` when the
/// stored variant differs, which callers surface as a type mismatch.
pub trait FromValue: Sized {
    /// The value type this reader expects.
    const TYPE: ValueType;

    /// Extracts `Self` from a value of the matching variant.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const TYPE: ValueType = ValueType::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    const TYPE: ValueType = ValueType::Int;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for f64 {
    const TYPE: ValueType = ValueType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl FromValue for String {
    const TYPE: ValueType = ValueType::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Arc<str> {
    const TYPE: ValueType = ValueType::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(Arc::clone(s)),
            _ => None,
        }
    }
}

impl FromValue for EntityId {
    const TYPE: ValueType = ValueType::Entity;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_entity()
    }
}

impl FromValue for ValueList {
    const TYPE: ValueType = ValueType::List;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_list().cloned()
    }
}

impl FromValue for ValueMap {
    const TYPE: ValueType = ValueType::Map;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::Text(s)
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl From<ValueList> for Value {
    fn from(v: ValueList) -> Self {
        Self::List(v)
    }
}

impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
