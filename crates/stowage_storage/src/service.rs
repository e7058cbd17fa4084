//! The cache service: explicit owner of all per-entity caches.
//!
//! Instead of process-wide statics, one `CacheService` is constructed by the
//! host and passed by reference to the tick driver and to whatever consumer
//! needs a cache. Dropping it destroys every cached value.

use stowage_foundation::{EntityId, Identified};
use tracing::debug;

use crate::config::CacheConfig;
use crate::identity::IdentityCache;
use crate::message::MessageLog;
use crate::warp::{WarpResource, WarpResourceCache};

/// Owns the identity cache, the warp resource cache and the message log.
#[derive(Clone, Debug)]
pub struct CacheService {
    identity: IdentityCache,
    warp: WarpResourceCache,
    messages: MessageLog,
}

impl Default for CacheService {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl CacheService {
    /// Creates an empty service.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            identity: IdentityCache::with_capacity(config.entity_capacity),
            warp: WarpResourceCache::with_label(config.warp_label.clone()),
            messages: MessageLog::new(config.message_log_size),
        }
    }

    /// Returns the identity cache.
    #[must_use]
    pub fn identity(&self) -> &IdentityCache {
        &self.identity
    }

    /// Returns mutable access to the identity cache.
    pub fn identity_mut(&mut self) -> &mut IdentityCache {
        &mut self.identity
    }

    /// Returns the warp resource cache.
    #[must_use]
    pub fn warp(&self) -> &WarpResourceCache {
        &self.warp
    }

    /// Returns the warp resource of an entity, creating it on first access.
    pub fn warp_resource(&mut self, id: EntityId) -> &mut WarpResource {
        self.warp.acquire(id)
    }

    /// Returns the message log.
    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Returns mutable access to the message log.
    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    /// Forgets everything cached for one entity.
    ///
    /// Called whenever an entity changes enough that its caches are stale,
    /// or when it is removed from the game.
    pub fn purge_entity(&mut self, id: EntityId) {
        let had_namespace = self.identity.purge_entity(id);
        let had_warp = self.warp.purge_entity(id);
        debug!(%id, had_namespace, had_warp, "purged entity caches");
    }

    /// Forgets everything cached for the entity behind a live or persisted handle.
    pub fn purge_entity_of(&mut self, handle: &impl Identified) {
        self.purge_entity(handle.entity_id());
    }

    /// Forgets everything: every namespace, every warp resource and the
    /// message log. Called when the game state is replaced (e.g. a load).
    pub fn purge_all(&mut self) {
        let namespaces = self.identity.entity_count();
        let warp_resources = self.warp.len();
        let messages = self.messages.len();

        self.identity.purge_all();
        self.warp.purge_all();
        self.messages.clear();

        debug!(namespaces, warp_resources, messages, "purged all caches");
    }

    /// Returns true if nothing is cached and the message log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identity.is_empty() && self.warp.is_empty() && self.messages.is_empty()
    }
}
