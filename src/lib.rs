//! Stowage - Per-entity caches and tick-boundary process aggregation
//!
//! This crate re-exports all layers of the Stowage system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: stowage_runtime    - Save files, vessel restoration
//! Layer 2: stowage_engine     - Process aggregation, vessel processes, tick driver
//! Layer 1: stowage_storage    - Identity cache, warp resource cache, message log
//! Layer 0: stowage_foundation - Core types (Value, EntityId, Error)
//! ```

pub use stowage_engine as engine;
pub use stowage_foundation as foundation;
pub use stowage_runtime as runtime;
pub use stowage_storage as storage;
