//! Stable entity identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a simulated entity.
///
/// Unlike a storage slot, an `EntityId` never changes for the lifetime of the
/// entity: the live handle and the persisted handle of the same entity resolve
/// to the same id, and the id survives save/reload.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(Uuid);

impl EntityId {
    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Builds an id from its 128-bit representation.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Generates a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the sentinel value representing "no entity".
    #[must_use]
    pub const fn null() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({})", self.0)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}

/// Anything that can be resolved to a stable [`EntityId`].
///
/// Hosts implement this for both their live and persisted entity handles;
/// two handles of the same underlying entity must return the same id.
pub trait Identified {
    /// Returns the stable id of this entity.
    fn entity_id(&self) -> EntityId;
}

impl Identified for EntityId {
    fn entity_id(&self) -> EntityId {
        *self
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    fn entity_id(&self) -> EntityId {
        (**self).entity_id()
    }
}
