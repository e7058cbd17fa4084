//! Configuration for the cache service.

use crate::warp::DEFAULT_WARP_LABEL;

/// Default number of messages kept by the message log.
pub const DEFAULT_MESSAGE_LOG_SIZE: usize = 200;

/// Configuration for a [`CacheService`](crate::CacheService).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of entity namespaces to reserve up front.
    pub entity_capacity: usize,

    /// Maximum number of messages kept in the message log.
    pub message_log_size: usize,

    /// Label given to newly created warp resources.
    pub warp_label: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 0,
            message_log_size: DEFAULT_MESSAGE_LOG_SIZE,
            warp_label: DEFAULT_WARP_LABEL.to_owned(),
        }
    }
}

impl CacheConfig {
    /// Creates a configuration sized for a save with many vessels.
    #[must_use]
    pub fn large() -> Self {
        Self {
            entity_capacity: 1024,
            message_log_size: 1000,
            ..Self::default()
        }
    }

    /// Builder method to set the reserved entity capacity.
    #[must_use]
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Builder method to set the message log size.
    #[must_use]
    pub fn with_message_log_size(mut self, size: usize) -> Self {
        self.message_log_size = size;
        self
    }

    /// Builder method to set the warp resource label.
    #[must_use]
    pub fn with_warp_label(mut self, label: impl Into<String>) -> Self {
        self.warp_label = label.into();
        self
    }
}
