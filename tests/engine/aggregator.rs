//! Integration tests for process aggregation
//!
//! Tests the accumulate/commit cycle as seen from a resource network.

use std::sync::Arc;

use stowage_engine::{
    ProcessAggregator, ProcessCatalog, ProcessDefinition, ProcessRecord, ResourceHandler,
    ResourceLedger, VirtualResource,
};

fn scrubber() -> Arc<ProcessDefinition> {
    Arc::new(
        ProcessDefinition::new("scrubber")
            .with_title("CO2 Scrubber")
            .with_input("ElectricCharge", 0.05)
            .with_input("CarbonDioxide", 0.1)
            .with_output("Oxygen", 0.1, false),
    )
}

/// A handler that counts how often each resource is touched.
#[derive(Default)]
struct CountingHandler {
    ledger: ResourceLedger,
    calls: usize,
}

impl ResourceHandler for CountingHandler {
    fn virtual_resource(&mut self, name: &str) -> &mut VirtualResource {
        self.calls += 1;
        self.ledger.virtual_resource(name)
    }
}

// =============================================================================
// Commit
// =============================================================================

#[test]
fn mixed_contributions_in_any_order() {
    let orders = [
        [(true, 10.0), (false, 5.0), (true, 3.0)],
        [(false, 5.0), (true, 3.0), (true, 10.0)],
        [(true, 3.0), (true, 10.0), (false, 5.0)],
    ];
    for order in orders {
        let mut agg = ProcessAggregator::new(scrubber());
        let mut ledger = ResourceLedger::new();
        agg.set_scaling_factor(0.5);
        for (enabled, capacity) in order {
            agg.register_contribution(enabled, capacity);
        }
        let snap = agg.commit(&mut ledger).unwrap();
        assert_eq!(snap.max_capacity, 18.0);
        assert_eq!(snap.enabled_capacity, 13.0);
        assert_eq!(snap.available_capacity, 6.5);
        assert!((snap.available_capacity_percent - 0.5).abs() < 1e-9);

        let pseudo = ledger.get("_scrubber").unwrap();
        assert_eq!(pseudo.capacity(), 6.5);
        assert_eq!(pseudo.amount(), 6.5);
    }
}

#[test]
fn commit_touches_the_handler_once() {
    let mut agg = ProcessAggregator::new(scrubber());
    let mut handler = CountingHandler::default();
    agg.register_contribution(true, 1.0);
    agg.commit(&mut handler).unwrap();
    assert_eq!(handler.calls, 1);
}

#[test]
fn commit_through_dyn_handler() {
    let mut agg = ProcessAggregator::new(scrubber());
    let mut ledger = ResourceLedger::new();
    let handler: &mut dyn ResourceHandler = &mut ledger;
    agg.register_contribution(true, 2.0);
    assert_eq!(agg.commit(handler).unwrap().available_capacity, 2.0);
}

#[test]
fn consecutive_commits_reset() {
    let mut agg = ProcessAggregator::new(scrubber());
    let mut ledger = ResourceLedger::new();
    agg.register_contribution(true, 9.0);
    agg.commit(&mut ledger).unwrap();

    let second = agg.commit(&mut ledger).unwrap();
    assert_eq!(second.max_capacity, 0.0);
    assert_eq!(second.enabled_capacity, 0.0);
    assert_eq!(ledger.get("_scrubber").unwrap().amount(), 0.0);
}

// =============================================================================
// Description
// =============================================================================

#[test]
fn description_tracks_available_capacity() {
    let mut agg = ProcessAggregator::new(scrubber());
    let mut ledger = ResourceLedger::new();

    agg.register_contribution(true, 1.0);
    agg.commit(&mut ledger).unwrap();
    let at_one = agg.describe_current_rate().unwrap().to_owned();
    assert_eq!(at_one, agg.describe_current_rate().unwrap());
    assert!(at_one.contains("CarbonDioxide: -0.10/s"));

    agg.register_contribution(true, 10.0);
    agg.commit(&mut ledger).unwrap();
    assert!(agg.describe_current_rate().unwrap().contains("CarbonDioxide: -1.00/s"));
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn record_restores_controls() {
    let catalog = ProcessCatalog::new().with((*scrubber()).clone());
    let record = ProcessRecord {
        enabled: false,
        enabled_factor: 0.4,
        dumped_outputs: " Oxygen ,".to_owned(),
    };
    let agg = ProcessAggregator::from_record("scrubber", &record, &catalog);

    assert!(agg.is_resolved());
    assert!(!agg.enabled());
    assert_eq!(agg.scaling_factor(), 0.4);
    assert!(agg.is_dumped("Oxygen"));
    assert_eq!(agg.to_record().dumped_outputs, "Oxygen");
}
