//! Process aggregation and tick driving for Stowage.
//!
//! This crate provides:
//! - [`ProcessDefinition`] and [`ProcessCatalog`] - Immutable process descriptions
//! - [`ProcessAggregator`] - Per-vessel capacity accumulator with tick commits
//! - [`VesselProcesses`] - Every aggregator of one vessel
//! - [`ResourceHandler`] - Boundary with the resource network
//! - [`TickDriver`] - Tick counter, commits and lifecycle purges

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aggregator;
pub mod definition;
pub mod record;
pub mod resource;
pub mod tick;
pub mod vessel;

pub use aggregator::{CapacitySnapshot, ProcessAggregator};
pub use definition::{ProcessCatalog, ProcessDefinition, ProcessInput, ProcessOutput, format_rate};
pub use record::ProcessRecord;
pub use resource::{ResourceHandler, ResourceLedger, VirtualResource};
pub use tick::{LifecycleEvent, TickDriver, TickSummary};
pub use vessel::{CommitReport, VesselProcesses};
