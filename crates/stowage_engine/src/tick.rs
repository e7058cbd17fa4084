//! Tick orchestration for Stowage.
//!
//! A tick is the fundamental unit of simulation time. Each tick:
//! 1. Parts of every vessel register their process contributions
//! 2. The driver commits every vessel under the same tick number
//! 3. The driver advances the counter once
//!
//! Lifecycle events purge whatever caches went stale in between.

use stowage_foundation::EntityId;
use stowage_storage::{CacheService, Severity};
use tracing::{debug, info};

use crate::resource::ResourceHandler;
use crate::vessel::{CommitReport, VesselProcesses};

// =============================================================================
// Lifecycle Event
// =============================================================================

/// Entity lifecycle notifications forwarded by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// An entity came into existence.
    Created(EntityId),
    /// An entity changed enough that its cached values are stale
    /// (docking, undocking, staging...).
    Changed(EntityId),
    /// An entity left the game.
    Removed(EntityId),
    /// The whole game state was replaced (load, scene change).
    Reset,
}

// =============================================================================
// Tick Summary
// =============================================================================

/// Result of committing one vessel.
#[derive(Debug)]
pub struct TickSummary {
    /// The tick the vessel was committed in.
    pub tick: u64,
    /// The vessel that was committed.
    pub entity: EntityId,
    /// Per-process commit outcome.
    pub report: CommitReport,
}

impl TickSummary {
    /// Returns true if every aggregator committed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.report.is_ok()
    }
}

// =============================================================================
// Tick Driver
// =============================================================================

/// Owns the tick counter and closes ticks.
#[derive(Clone, Debug, Default)]
pub struct TickDriver {
    /// Number of the tick currently accumulating.
    tick_number: u64,
}

impl TickDriver {
    /// Creates a driver at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver resuming at `tick_number`.
    #[must_use]
    pub fn starting_at(tick_number: u64) -> Self {
        Self { tick_number }
    }

    /// Returns the number of the tick currently accumulating.
    #[must_use]
    pub fn tick_number(&self) -> u64 {
        self.tick_number
    }

    /// Commits one vessel under the current tick number.
    ///
    /// Every contribution for this tick must already be registered. The
    /// counter does not move; call [`advance`](Self::advance) once every
    /// vessel of the tick is committed.
    pub fn commit<H>(&self, vessel: &mut VesselProcesses, handler: &mut H) -> TickSummary
    where
        H: ResourceHandler + ?Sized,
    {
        let tick = self.tick_number;
        TickSummary {
            tick,
            entity: vessel.entity(),
            report: vessel.commit_all(handler, tick),
        }
    }

    /// Commits one vessel and posts a warning for each skipped process to
    /// the service's message log.
    pub fn commit_logged<H>(
        &self,
        vessel: &mut VesselProcesses,
        handler: &mut H,
        service: &mut CacheService,
    ) -> TickSummary
    where
        H: ResourceHandler + ?Sized,
    {
        let summary = self.commit(vessel, handler);
        for (process, err) in &summary.report.skipped {
            service.messages_mut().post(
                summary.tick,
                Severity::Warning,
                format!("process {process} skipped: {err}"),
            );
        }
        summary
    }

    /// Closes the current tick. Returns the number of the closed tick.
    pub fn advance(&mut self) -> u64 {
        let closed = self.tick_number;
        self.tick_number += 1;
        closed
    }

    /// Commits every vessel with its own resource handler, then advances
    /// the counter once.
    pub fn tick<'a, I, H>(&mut self, vessels: I) -> Vec<TickSummary>
    where
        I: IntoIterator<Item = (&'a mut VesselProcesses, &'a mut H)>,
        H: ResourceHandler + ?Sized + 'a,
    {
        let summaries = vessels
            .into_iter()
            .map(|(vessel, handler)| self.commit(vessel, handler))
            .collect();
        self.advance();
        summaries
    }

    /// Applies a lifecycle event to the caches.
    pub fn handle_event(&self, service: &mut CacheService, event: &LifecycleEvent) {
        match *event {
            // Caches are created lazily on first access.
            LifecycleEvent::Created(id) => {
                debug!(%id, tick = self.tick_number, "entity created");
            }
            LifecycleEvent::Changed(id) | LifecycleEvent::Removed(id) => {
                service.purge_entity(id);
            }
            LifecycleEvent::Reset => {
                info!(tick = self.tick_number, "game state reset, purging all caches");
                service.purge_all();
            }
        }
    }
}
