//! Persistence for Stowage.
//!
//! This crate provides:
//! - [`VesselRecord`] - Persisted process state of one vessel
//! - [`restore_processes`] - Rebuilding live aggregators from a record
//! - `MessagePack` save and load helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod record;
pub mod serialize;

pub use record::{VesselRecord, restore_processes};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
