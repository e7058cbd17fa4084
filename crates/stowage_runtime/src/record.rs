//! Persisted vessel state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stowage_engine::{ProcessCatalog, ProcessRecord, VesselProcesses};
use stowage_foundation::{EntityId, Identified};
use tracing::info;

/// Process state of one vessel as it is written to a save file.
///
/// Only player choices are persisted. Capacities are rebuilt by the first
/// tick after loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    /// The vessel.
    pub entity: EntityId,
    /// Process records by process name.
    #[serde(default)]
    pub processes: BTreeMap<String, ProcessRecord>,
}

impl Identified for VesselRecord {
    fn entity_id(&self) -> EntityId {
        self.entity
    }
}

impl VesselRecord {
    /// Creates an empty record for `entity`.
    #[must_use]
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            processes: BTreeMap::new(),
        }
    }

    /// Captures the persisted state of a live vessel.
    #[must_use]
    pub fn capture(vessel: &VesselProcesses) -> Self {
        Self {
            entity: vessel.entity(),
            processes: vessel.to_records(),
        }
    }
}

impl From<&VesselProcesses> for VesselRecord {
    fn from(vessel: &VesselProcesses) -> Self {
        Self::capture(vessel)
    }
}

/// Rebuilds the live aggregators of a vessel from its record.
///
/// Processes in the catalog but not in the record start fresh. Records whose
/// process is missing from the catalog come back unresolved.
#[must_use]
pub fn restore_processes(record: &VesselRecord, catalog: &ProcessCatalog) -> VesselProcesses {
    let vessel = VesselProcesses::from_records(
        record.entity,
        record
            .processes
            .iter()
            .map(|(name, process)| (name.as_str(), process)),
        catalog,
    );
    let unresolved = vessel.iter().filter(|(_, a)| !a.is_resolved()).count();
    info!(
        entity = %record.entity,
        processes = vessel.len(),
        unresolved,
        "restored vessel processes"
    );
    vessel
}
