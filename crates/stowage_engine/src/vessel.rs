//! Per-vessel collection of process aggregators.

use std::collections::BTreeMap;
use std::sync::Arc;

use stowage_foundation::{EntityId, Error, ErrorContext, Identified, Result};
use tracing::{debug, warn};

use crate::aggregator::{CapacitySnapshot, ProcessAggregator};
use crate::definition::ProcessCatalog;
use crate::record::ProcessRecord;
use crate::resource::ResourceHandler;

// =============================================================================
// Commit Report
// =============================================================================

/// Outcome of committing every aggregator of a vessel.
#[derive(Debug, Default)]
pub struct CommitReport {
    /// Snapshots published this tick, by process name.
    pub committed: BTreeMap<String, CapacitySnapshot>,
    /// Processes whose commit failed, with the error.
    pub skipped: Vec<(String, Error)>,
}

impl CommitReport {
    /// Returns true if every aggregator committed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Returns the snapshot published for `process`, if it committed.
    #[must_use]
    pub fn snapshot(&self, process: &str) -> Option<CapacitySnapshot> {
        self.committed.get(process).copied()
    }
}

// =============================================================================
// Vessel Processes
// =============================================================================

/// The aggregators of one vessel, keyed by process name.
#[derive(Clone, Debug)]
pub struct VesselProcesses {
    entity: EntityId,
    processes: BTreeMap<String, ProcessAggregator>,
}

impl Identified for VesselProcesses {
    fn entity_id(&self) -> EntityId {
        self.entity
    }
}

impl VesselProcesses {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            processes: BTreeMap::new(),
        }
    }

    /// Creates one fresh aggregator per catalog definition.
    #[must_use]
    pub fn from_catalog(entity: EntityId, catalog: &ProcessCatalog) -> Self {
        let processes = catalog
            .iter()
            .map(|definition| {
                (
                    definition.name().to_owned(),
                    ProcessAggregator::new(Arc::clone(definition)),
                )
            })
            .collect();
        Self { entity, processes }
    }

    /// Restores a vessel from persisted records.
    ///
    /// Every catalog definition gets a fresh aggregator, then each record
    /// overrides the aggregator of the same name. Records whose definition is
    /// not in the catalog are kept unresolved so they survive the next save.
    #[must_use]
    pub fn from_records<'a, I>(entity: EntityId, records: I, catalog: &ProcessCatalog) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a ProcessRecord)>,
    {
        let mut vessel = Self::from_catalog(entity, catalog);
        for (name, record) in records {
            let aggregator = ProcessAggregator::from_record(name, record, catalog);
            if !aggregator.is_resolved() {
                warn!(%entity, process = name, "keeping unresolved process record");
            }
            vessel.processes.insert(name.to_owned(), aggregator);
        }
        vessel
    }

    /// Inserts an aggregator, replacing any with the same name.
    pub fn insert(&mut self, aggregator: ProcessAggregator) -> Option<ProcessAggregator> {
        self.processes
            .insert(aggregator.requested_name().to_owned(), aggregator)
    }

    /// Returns the vessel id.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Returns the aggregator for `process`.
    #[must_use]
    pub fn get(&self, process: &str) -> Option<&ProcessAggregator> {
        self.processes.get(process)
    }

    /// Returns mutable access to the aggregator for `process`.
    pub fn get_mut(&mut self, process: &str) -> Option<&mut ProcessAggregator> {
        self.processes.get_mut(process)
    }

    /// Iterates over aggregators in process name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProcessAggregator)> {
        self.processes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of tracked processes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Returns true if no process is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Registers one part's contribution to `process` for the current tick.
    ///
    /// # Errors
    /// Returns `UnknownProcess` if the vessel does not track `process`.
    pub fn register(&mut self, process: &str, enabled: bool, capacity: f64) -> Result<()> {
        let entity = self.entity;
        let aggregator = self
            .processes
            .get_mut(process)
            .ok_or_else(|| Error::unknown_process(entity, process))?;
        aggregator.register_contribution(enabled, capacity);
        Ok(())
    }

    /// Commits every aggregator once.
    ///
    /// A failing aggregator is logged and skipped; the others still commit.
    pub fn commit_all<H>(&mut self, handler: &mut H, tick: u64) -> CommitReport
    where
        H: ResourceHandler + ?Sized,
    {
        let mut report = CommitReport::default();
        for (name, aggregator) in &mut self.processes {
            match aggregator.commit(handler) {
                Ok(snapshot) => {
                    report.committed.insert(name.clone(), snapshot);
                }
                Err(err) => {
                    let err = err.with_context(
                        ErrorContext::new()
                            .with_entity(self.entity)
                            .with_tick(tick)
                            .with_frame(format!("commit {name}")),
                    );
                    warn!(entity = %self.entity, process = %name, error = %err, "skipping process commit");
                    report.skipped.push((name.clone(), err));
                }
            }
        }
        debug!(
            entity = %self.entity,
            tick,
            committed = report.committed.len(),
            skipped = report.skipped.len(),
            "committed vessel processes"
        );
        report
    }

    /// Retries resolution of every unresolved aggregator.
    ///
    /// Returns the number still unresolved.
    pub fn resolve_all(&mut self, catalog: &ProcessCatalog) -> usize {
        self.processes
            .values_mut()
            .map(|aggregator| aggregator.resolve(catalog))
            .filter(|resolved| !resolved)
            .count()
    }

    /// Returns the persisted form of every aggregator, by process name.
    #[must_use]
    pub fn to_records(&self) -> BTreeMap<String, ProcessRecord> {
        self.processes
            .iter()
            .map(|(name, aggregator)| (name.clone(), aggregator.to_record()))
            .collect()
    }
}
