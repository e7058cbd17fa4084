//! Per-entity caches and the message log for Stowage.
//!
//! This crate provides:
//! - [`IdentityCache`] - Per-entity tagged key/value memoization
//! - [`WarpResourceCache`] - One lazily created pooled resource per entity
//! - [`MessageLog`] - Bounded log of tick-stamped messages
//! - [`CacheService`] - Explicitly owned bundle of all of the above

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod identity;
pub mod message;
pub mod service;
pub mod warp;

pub use config::CacheConfig;
pub use identity::IdentityCache;
pub use message::{Message, MessageLog, Severity};
pub use service::CacheService;
pub use warp::{WarpResource, WarpResourceCache};
