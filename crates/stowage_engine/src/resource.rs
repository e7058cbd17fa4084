//! Boundary with the resource-handling collaborator.
//!
//! The engine never simulates resource flow. It only publishes aggregate
//! capacity into named virtual resources that the host's resource network
//! reads from.

use std::collections::BTreeMap;

/// A non-physical resource pool exposing an aggregate capacity and amount.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualResource {
    capacity: f64,
    amount: f64,
}

impl VirtualResource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the capacity.
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Returns the current amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Sets the capacity.
    pub fn set_capacity(&mut self, capacity: f64) {
        self.capacity = capacity;
    }

    /// Sets the current amount.
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    /// Returns `amount / capacity`, or 0 when there is no capacity.
    #[must_use]
    pub fn level(&self) -> f64 {
        if self.capacity > 0.0 {
            self.amount / self.capacity
        } else {
            0.0
        }
    }
}

/// Resource-handling collaborator of an entity.
pub trait ResourceHandler {
    /// Returns the virtual resource named `name`, creating it if needed.
    fn virtual_resource(&mut self, name: &str) -> &mut VirtualResource;
}

/// In-memory [`ResourceHandler`] keyed by resource name.
#[derive(Clone, Debug, Default)]
pub struct ResourceLedger {
    resources: BTreeMap<String, VirtualResource>,
}

impl ResourceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a resource without creating it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VirtualResource> {
        self.resources.get(name)
    }

    /// Iterates over resources in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VirtualResource)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceHandler for ResourceLedger {
    fn virtual_resource(&mut self, name: &str) -> &mut VirtualResource {
        self.resources.entry(name.to_owned()).or_default()
    }
}
