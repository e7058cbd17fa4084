//! Per-entity memoization cache.
//!
//! The `IdentityCache` maps each entity to a namespace of string-tagged
//! [`Value`]s. Namespaces are created on first write and live until the
//! entity is purged. Reads of absent namespaces or keys are never errors.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use stowage_foundation::value::ObjectValue;
use stowage_foundation::{EntityId, Error, FromValue, Result, Value, ValueType};

/// One entity's cached values: `key -> value`.
type Namespace = HashMap<String, Value>;

/// Per-entity key/value store used for ad-hoc memoization.
#[derive(Clone, Debug, Default)]
pub struct IdentityCache {
    /// `entity -> (key -> value)`
    namespaces: HashMap<EntityId, Namespace>,
}

impl IdentityCache {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with room for `entities` namespaces.
    #[must_use]
    pub fn with_capacity(entities: usize) -> Self {
        Self {
            namespaces: HashMap::with_capacity(entities),
        }
    }

    /// Returns the raw cached value, if any.
    #[must_use]
    pub fn get_value(&self, id: EntityId, key: &str) -> Option<&Value> {
        self.namespaces.get(&id).and_then(|ns| ns.get(key))
    }

    /// Reads a typed value, returning `T::default()` on a miss.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if the stored value is not a `T`.
    pub fn get<T: FromValue + Default>(&self, id: EntityId, key: &str) -> Result<T> {
        Ok(self.try_get(id, key)?.unwrap_or_default())
    }

    /// Reads a typed value, returning `None` on a miss.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if the stored value is not a `T`.
    pub fn try_get<T: FromValue>(&self, id: EntityId, key: &str) -> Result<Option<T>> {
        let Some(value) = self.get_value(id, key) else {
            return Ok(None);
        };
        T::from_value(value)
            .map(Some)
            .ok_or_else(|| Error::type_mismatch(id, key, T::TYPE, value.value_type()))
    }

    /// Reads an opaque object stored with [`set_object`](Self::set_object).
    ///
    /// # Errors
    /// Returns `TypeMismatch` if the stored value is not an object of type `T`.
    pub fn get_object<T: Any + Send + Sync>(
        &self,
        id: EntityId,
        key: &str,
    ) -> Result<Option<Arc<T>>> {
        let Some(value) = self.get_value(id, key) else {
            return Ok(None);
        };
        value.as_object::<T>().map(Some).ok_or_else(|| {
            Error::type_mismatch(
                id,
                key,
                ValueType::Object(type_name::<T>()),
                value.value_type(),
            )
        })
    }

    /// Returns true if a value is cached under `key` for `id`.
    #[must_use]
    pub fn has(&self, id: EntityId, key: &str) -> bool {
        self.namespaces
            .get(&id)
            .is_some_and(|ns| ns.contains_key(key))
    }

    /// Stores a value, creating the entity namespace if needed.
    ///
    /// Any existing value under `key` is replaced, whatever its type.
    pub fn set(&mut self, id: EntityId, key: impl Into<String>, value: impl Into<Value>) {
        self.namespaces
            .entry(id)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Stores an opaque object payload.
    pub fn set_object<T: Any + Send + Sync>(
        &mut self,
        id: EntityId,
        key: impl Into<String>,
        payload: T,
    ) {
        self.set(id, key, Value::Object(ObjectValue::new(payload)));
    }

    /// Returns the cached value, computing and storing it first on a miss.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if a value of another type is already cached.
    pub fn get_or_insert_with<T, F>(&mut self, id: EntityId, key: &str, compute: F) -> Result<T>
    where
        T: FromValue + Into<Value> + Clone,
        F: FnOnce() -> T,
    {
        if let Some(cached) = self.try_get::<T>(id, key)? {
            return Ok(cached);
        }
        let value = compute();
        self.set(id, key, value.clone());
        Ok(value)
    }

    /// Removes a single key. Missing namespaces and keys are ignored.
    pub fn remove(&mut self, id: EntityId, key: &str) -> Option<Value> {
        self.namespaces.get_mut(&id).and_then(|ns| ns.remove(key))
    }

    /// Drops the whole namespace of an entity.
    ///
    /// Returns true if a namespace existed.
    pub fn purge_entity(&mut self, id: EntityId) -> bool {
        self.namespaces.remove(&id).is_some()
    }

    /// Drops every namespace.
    pub fn purge_all(&mut self) {
        self.namespaces.clear();
    }

    /// Returns the number of entities with a namespace.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Returns the number of keys cached for an entity.
    #[must_use]
    pub fn len(&self, id: EntityId) -> usize {
        self.namespaces.get(&id).map_or(0, HashMap::len)
    }

    /// Returns true if no entity has a namespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Iterates over the keys cached for an entity.
    pub fn keys(&self, id: EntityId) -> impl Iterator<Item = &str> + '_ {
        self.namespaces
            .get(&id)
            .into_iter()
            .flat_map(|ns| ns.keys().map(String::as_str))
    }
}
