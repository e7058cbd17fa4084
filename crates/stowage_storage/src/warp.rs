//! Per-entity warp resource pool.
//!
//! Every entity owns at most one [`WarpResource`], created lazily on first
//! access. Each created instance gets a serial number that never repeats,
//! so a caller can tell a recreated resource apart from the one it held
//! before a purge.

use std::collections::{BTreeMap, HashMap};

use stowage_foundation::EntityId;

/// Label given to warp resources when none is configured.
pub const DEFAULT_WARP_LABEL: &str = "warp cache";

/// Throwaway pooled store used during accelerated-time simulation.
///
/// Never persisted. A fresh instance has zero capacity and zero amount.
/// A capacity of zero (or less) means the store is unbounded.
#[derive(Clone, Debug)]
pub struct WarpResource {
    /// Human-readable label.
    label: String,
    /// Serial distinguishing this instance from earlier ones.
    instance: u64,
    /// Maximum total amount, `<= 0` for unbounded.
    capacity: f64,
    /// Total amount currently stored.
    amount: f64,
    /// Stored amounts by entry name.
    entries: BTreeMap<String, f64>,
}

impl WarpResource {
    fn new(label: &str, instance: u64) -> Self {
        Self {
            label: label.to_owned(),
            instance,
            capacity: 0.0,
            amount: 0.0,
            entries: BTreeMap::new(),
        }
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the instance serial.
    #[must_use]
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Returns the capacity.
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Returns the total stored amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Sets the capacity. Already stored amounts are kept even if they exceed it.
    pub fn set_capacity(&mut self, capacity: f64) {
        self.capacity = capacity;
    }

    /// Returns the space left, or `f64::INFINITY` when unbounded.
    #[must_use]
    pub fn available(&self) -> f64 {
        if self.capacity <= 0.0 {
            f64::INFINITY
        } else {
            (self.capacity - self.amount).max(0.0)
        }
    }

    /// Stores up to `amount` under `name`, returning what was actually stored.
    pub fn store(&mut self, name: &str, amount: f64) -> f64 {
        let stored = amount.max(0.0).min(self.available());
        if stored > 0.0 {
            *self.entries.entry(name.to_owned()).or_insert(0.0) += stored;
            self.amount += stored;
        }
        stored
    }

    /// Returns the amount stored under `name`.
    #[must_use]
    pub fn amount_of(&self, name: &str) -> f64 {
        self.entries.get(name).copied().unwrap_or(0.0)
    }

    /// Empties the store and returns its entries in name order.
    pub fn drain(&mut self) -> Vec<(String, f64)> {
        self.amount = 0.0;
        std::mem::take(&mut self.entries).into_iter().collect()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the warp resource of every entity.
#[derive(Clone, Debug)]
pub struct WarpResourceCache {
    resources: HashMap<EntityId, WarpResource>,
    /// Label for newly created resources.
    label: String,
    /// Next instance serial; never reset.
    next_instance: u64,
}

impl Default for WarpResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl WarpResourceCache {
    /// Creates an empty cache using the default label.
    #[must_use]
    pub fn new() -> Self {
        Self::with_label(DEFAULT_WARP_LABEL)
    }

    /// Creates an empty cache whose resources carry `label`.
    #[must_use]
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            resources: HashMap::new(),
            label: label.into(),
            next_instance: 1,
        }
    }

    /// Returns the resource of `id`, creating a zero-state one on first access.
    pub fn acquire(&mut self, id: EntityId) -> &mut WarpResource {
        let Self {
            resources,
            label,
            next_instance,
        } = self;
        resources.entry(id).or_insert_with(|| {
            let instance = *next_instance;
            *next_instance += 1;
            WarpResource::new(label, instance)
        })
    }

    /// Returns the resource of `id` without creating one.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&WarpResource> {
        self.resources.get(&id)
    }

    /// Returns true if `id` currently owns a resource.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.resources.contains_key(&id)
    }

    /// Drops the resource of `id`. Returns true if one existed.
    pub fn purge_entity(&mut self, id: EntityId) -> bool {
        self.resources.remove(&id).is_some()
    }

    /// Drops every resource.
    pub fn purge_all(&mut self) {
        self.resources.clear();
    }

    /// Returns the number of live resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if no resources are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
