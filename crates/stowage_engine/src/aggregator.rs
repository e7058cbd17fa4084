//! Vessel-wide process capacity aggregation.
//!
//! Every part that runs a process reports its capacity to the vessel's
//! [`ProcessAggregator`] once per tick. At the end of the tick the driver
//! calls [`ProcessAggregator::commit`], which turns the accumulated totals
//! into a new [`CapacitySnapshot`] and publishes it as a virtual resource.
//!
//! # Ordering
//!
//! The aggregator is not reentrant. Within one tick, every
//! `register_contribution` must happen before the single `commit`; a
//! contribution registered after the commit is counted in the next tick.

use std::sync::Arc;

use stowage_foundation::{Error, Result};
use tracing::warn;

use crate::definition::{ProcessCatalog, ProcessDefinition};
use crate::record::{ProcessRecord, join_outputs};
use crate::resource::ResourceHandler;

// =============================================================================
// Capacity Snapshot
// =============================================================================

/// The metrics published by one commit.
///
/// Replaced as a whole, so readers always see a consistent set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CapacitySnapshot {
    /// Capacity of every contributor, enabled or not.
    pub max_capacity: f64,
    /// Capacity of enabled contributors.
    pub enabled_capacity: f64,
    /// Enabled capacity after the vessel switch and scaling factor.
    pub available_capacity: f64,
    /// `available_capacity / enabled_capacity`, or 0 without enabled capacity.
    pub available_capacity_percent: f64,
    /// Utilization reported by the last recipe consumed before the commit.
    pub utilization: f64,
}

// =============================================================================
// Definition Reference
// =============================================================================

/// Either a resolved definition or the name that failed to resolve.
#[derive(Clone, Debug)]
enum DefinitionRef {
    Resolved(Arc<ProcessDefinition>),
    Unresolved(String),
}

/// Memoized rate description.
#[derive(Clone, Debug)]
struct CachedDescription {
    /// The available capacity the text was generated for.
    capacity: f64,
    text: String,
}

// =============================================================================
// Process Aggregator
// =============================================================================

/// Per-(vessel, process) accumulator with a tick-boundary commit.
#[derive(Clone, Debug)]
pub struct ProcessAggregator {
    definition: DefinitionRef,
    enabled: bool,
    scaling_factor: f64,
    dumped_outputs: Vec<String>,

    // Write side, only read by commit.
    pending_total: f64,
    pending_enabled_total: f64,
    consumed_utilization: Option<f64>,

    // Read side.
    published: CapacitySnapshot,
    description: Option<CachedDescription>,
}

impl ProcessAggregator {
    /// Creates a fresh aggregator for `definition`.
    ///
    /// It starts enabled at full scale, dumping the outputs the definition
    /// dumps by default.
    #[must_use]
    pub fn new(definition: Arc<ProcessDefinition>) -> Self {
        let dumped_outputs = definition.default_dumped_outputs();
        Self::with_state(DefinitionRef::Resolved(definition), true, 1.0, dumped_outputs)
    }

    /// Restores an aggregator from its persisted record.
    ///
    /// The definition is looked up in `catalog` by `name`. When it is missing
    /// the aggregator is still built, but [`is_resolved`](Self::is_resolved)
    /// returns false and every definition-dependent operation fails with
    /// `UnresolvedDefinition` until [`resolve`](Self::resolve) succeeds.
    #[must_use]
    pub fn from_record(name: &str, record: &ProcessRecord, catalog: &ProcessCatalog) -> Self {
        let definition = match catalog.get(name) {
            Some(definition) => DefinitionRef::Resolved(definition),
            None => {
                warn!(process = name, "process definition not found in catalog");
                DefinitionRef::Unresolved(name.to_owned())
            }
        };
        Self::with_state(
            definition,
            record.enabled,
            record.enabled_factor,
            record.dumped_output_names(),
        )
    }

    fn with_state(
        definition: DefinitionRef,
        enabled: bool,
        scaling_factor: f64,
        dumped_outputs: Vec<String>,
    ) -> Self {
        Self {
            definition,
            enabled,
            scaling_factor,
            dumped_outputs,
            pending_total: 0.0,
            pending_enabled_total: 0.0,
            consumed_utilization: None,
            published: CapacitySnapshot::default(),
            description: None,
        }
    }

    /// Retries resolving the definition against `catalog`.
    ///
    /// Returns true if the aggregator is resolved afterwards.
    pub fn resolve(&mut self, catalog: &ProcessCatalog) -> bool {
        if let DefinitionRef::Unresolved(name) = &self.definition {
            if let Some(definition) = catalog.get(name) {
                self.definition = DefinitionRef::Resolved(definition);
                self.description = None;
            }
        }
        self.is_resolved()
    }

    /// Returns the persisted form of this aggregator.
    #[must_use]
    pub fn to_record(&self) -> ProcessRecord {
        ProcessRecord {
            enabled: self.enabled,
            enabled_factor: self.scaling_factor,
            dumped_outputs: join_outputs(&self.dumped_outputs),
        }
    }

    // -------------------------------------------------------------------------
    // Definition-dependent accessors
    // -------------------------------------------------------------------------

    /// Returns true if the process definition was found.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.definition, DefinitionRef::Resolved(_))
    }

    /// Returns the process name this aggregator was created or loaded with.
    ///
    /// Unlike [`name`](Self::name), this never fails.
    #[must_use]
    pub fn requested_name(&self) -> &str {
        match &self.definition {
            DefinitionRef::Resolved(definition) => definition.name(),
            DefinitionRef::Unresolved(name) => name,
        }
    }

    /// Returns the process definition.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found.
    pub fn definition(&self) -> Result<&Arc<ProcessDefinition>> {
        match &self.definition {
            DefinitionRef::Resolved(definition) => Ok(definition),
            DefinitionRef::Unresolved(name) => Err(Error::unresolved_definition(name.clone())),
        }
    }

    /// Returns the process name.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found.
    pub fn name(&self) -> Result<&str> {
        Ok(self.definition()?.name())
    }

    /// Returns the process title.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found.
    pub fn title(&self) -> Result<&str> {
        Ok(self.definition()?.title())
    }

    /// Returns whether the player may toggle the process.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found.
    pub fn can_toggle(&self) -> Result<bool> {
        Ok(self.definition()?.can_toggle())
    }

    /// Returns the name of the virtual resource this aggregator publishes to.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found.
    pub fn pseudo_resource_name(&self) -> Result<&str> {
        Ok(self.definition()?.pseudo_resource_name())
    }

    // -------------------------------------------------------------------------
    // Player controls
    // -------------------------------------------------------------------------

    /// Returns the vessel-wide switch.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the vessel-wide switch. Takes effect at the next commit.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the scaling factor.
    #[must_use]
    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    /// Sets the scaling factor, nominally in `[0, 1]`. Takes effect at the
    /// next commit.
    pub fn set_scaling_factor(&mut self, factor: f64) {
        self.scaling_factor = factor;
    }

    /// Returns the dumped outputs.
    #[must_use]
    pub fn dumped_outputs(&self) -> &[String] {
        &self.dumped_outputs
    }

    /// Returns true if `output` is dumped.
    #[must_use]
    pub fn is_dumped(&self, output: &str) -> bool {
        self.dumped_outputs.iter().any(|o| o == output)
    }

    /// Marks `output` as dumped or kept. Order of the other outputs is kept.
    pub fn set_dumped(&mut self, output: &str, dumped: bool) {
        let present = self.is_dumped(output);
        if dumped && !present {
            self.dumped_outputs.push(output.to_owned());
        } else if !dumped && present {
            self.dumped_outputs.retain(|o| o != output);
        }
    }

    /// Flips the dump state of `output`, returning the new state.
    pub fn toggle_dump(&mut self, output: &str) -> bool {
        let dumped = !self.is_dumped(output);
        self.set_dumped(output, dumped);
        dumped
    }

    // -------------------------------------------------------------------------
    // Accumulate / commit
    // -------------------------------------------------------------------------

    /// Adds one contributor's capacity for the current tick.
    ///
    /// `capacity` always counts toward the maximum capacity, and toward the
    /// enabled capacity only if `enabled` is true.
    pub fn register_contribution(&mut self, enabled: bool, capacity: f64) {
        self.pending_total += capacity;
        if enabled {
            self.pending_enabled_total += capacity;
        }
    }

    /// Records the utilization factor of the latest recipe run for this
    /// process. Only the last value before a commit is kept.
    pub fn consume_recipe(&mut self, utilization: f64) {
        self.consumed_utilization = Some(utilization);
    }

    /// Closes the tick: publishes the accumulated totals and resets them.
    ///
    /// The published capacity and amount of the pseudo-resource are both set
    /// to the new available capacity.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found. The
    /// snapshot is still updated and the accumulators still reset, so the
    /// next tick starts clean.
    pub fn commit<H>(&mut self, handler: &mut H) -> Result<CapacitySnapshot>
    where
        H: ResourceHandler + ?Sized,
    {
        let utilization = self.consumed_utilization.take().unwrap_or(0.0);

        let max_capacity = std::mem::take(&mut self.pending_total);
        let enabled_capacity = std::mem::take(&mut self.pending_enabled_total);

        let available_capacity = if self.enabled {
            enabled_capacity * self.scaling_factor
        } else {
            0.0
        };
        let available_capacity_percent = if enabled_capacity > 0.0 {
            available_capacity / enabled_capacity
        } else {
            0.0
        };

        self.published = CapacitySnapshot {
            max_capacity,
            enabled_capacity,
            available_capacity,
            available_capacity_percent,
            utilization,
        };

        let resource = handler.virtual_resource(self.pseudo_resource_name()?);
        resource.set_capacity(available_capacity);
        resource.set_amount(available_capacity);

        Ok(self.published)
    }

    /// Returns the last published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CapacitySnapshot {
        self.published
    }

    /// Returns the published capacity of every contributor.
    #[must_use]
    pub fn max_capacity(&self) -> f64 {
        self.published.max_capacity
    }

    /// Returns the published capacity of enabled contributors.
    #[must_use]
    pub fn enabled_capacity(&self) -> f64 {
        self.published.enabled_capacity
    }

    /// Returns the published available capacity.
    #[must_use]
    pub fn available_capacity(&self) -> f64 {
        self.published.available_capacity
    }

    /// Returns the published available capacity fraction.
    #[must_use]
    pub fn available_capacity_percent(&self) -> f64 {
        self.published.available_capacity_percent
    }

    /// Returns the published utilization.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        self.published.utilization
    }

    // -------------------------------------------------------------------------
    // Description
    // -------------------------------------------------------------------------

    /// Returns the rate description for the current available capacity.
    ///
    /// The text is regenerated only when the available capacity differs from
    /// the one the cached text was built for.
    ///
    /// # Errors
    /// Returns `UnresolvedDefinition` if the definition was not found.
    pub fn describe_current_rate(&mut self) -> Result<&str> {
        let capacity = self.published.available_capacity;
        // NaN never equals itself, so a NaN capacity always regenerates.
        let cached = match self.description.take() {
            Some(cached) if cached.capacity == capacity => cached,
            _ => CachedDescription {
                capacity,
                text: self.definition()?.describe(capacity, false),
            },
        };
        Ok(self.description.insert(cached).text.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
