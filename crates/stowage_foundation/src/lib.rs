//! Core types, cached values, and errors for Stowage.
//!
//! This crate provides:
//! - [`EntityId`] - Stable entity identifiers shared by live and persisted handles
//! - [`Value`] - The tagged value type stored in per-entity caches
//! - [`ValueType`] - Type descriptors used in cache diagnostics
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod types;
pub mod value;

pub use entity::{EntityId, Identified};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use types::ValueType;
pub use value::{FromValue, Value, ValueList, ValueMap};
