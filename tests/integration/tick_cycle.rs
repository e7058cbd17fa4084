//! Tick cycle integration tests
//!
//! Tests a full simulated tick: parts consult the caches, register their
//! capacity, the driver commits, and lifecycle events invalidate caches.

use stowage::engine::{
    LifecycleEvent, ProcessCatalog, ProcessDefinition, ResourceLedger, TickDriver,
    VesselProcesses,
};
use stowage::foundation::EntityId;
use stowage::storage::{CacheService, Severity};

/// A converter part: runs one process at a fixed capacity.
struct Converter {
    process: &'static str,
    capacity: f64,
    running: bool,
}

fn catalog() -> ProcessCatalog {
    ProcessCatalog::new()
        .with(
            ProcessDefinition::new("electrolysis")
                .with_input("ElectricCharge", 1.0)
                .with_output("Hydrogen", 0.5, true)
                .with_output("Oxygen", 0.25, false),
        )
        .with(ProcessDefinition::new("scrubber").with_input("CarbonDioxide", 0.1))
}

fn run_tick(
    parts: &[Converter],
    vessel: &mut VesselProcesses,
    ledger: &mut ResourceLedger,
    driver: &mut TickDriver,
    service: &mut CacheService,
) {
    for part in parts {
        // Parts memoize their per-vessel lookups in the identity cache.
        let boost = service
            .identity_mut()
            .get_or_insert_with::<f64, _>(vessel.entity(), "converter.boost", || 1.0)
            .unwrap();
        vessel
            .register(part.process, part.running, part.capacity * boost)
            .unwrap();
    }
    let summary = driver.commit_logged(vessel, ledger, service);
    assert!(summary.is_ok());
    driver.advance();
}

#[test]
fn parts_feed_the_pseudo_resources() {
    let id = EntityId::from_u128(100);
    let parts = [
        Converter { process: "electrolysis", capacity: 2.0, running: true },
        Converter { process: "electrolysis", capacity: 1.0, running: false },
        Converter { process: "scrubber", capacity: 4.0, running: true },
    ];
    let mut vessel = VesselProcesses::from_catalog(id, &catalog());
    let mut ledger = ResourceLedger::new();
    let mut driver = TickDriver::new();
    let mut service = CacheService::default();

    run_tick(&parts, &mut vessel, &mut ledger, &mut driver, &mut service);

    let electrolysis = vessel.get("electrolysis").unwrap();
    assert_eq!(electrolysis.max_capacity(), 3.0);
    assert_eq!(electrolysis.enabled_capacity(), 2.0);
    assert_eq!(ledger.get("_electrolysis").unwrap().amount(), 2.0);
    assert_eq!(ledger.get("_scrubber").unwrap().capacity(), 4.0);
    assert!(service.messages().is_empty());
}

#[test]
fn player_controls_apply_on_next_tick() {
    let id = EntityId::from_u128(100);
    let parts = [Converter { process: "scrubber", capacity: 4.0, running: true }];
    let mut vessel = VesselProcesses::from_catalog(id, &catalog());
    let mut ledger = ResourceLedger::new();
    let mut driver = TickDriver::new();
    let mut service = CacheService::default();

    run_tick(&parts, &mut vessel, &mut ledger, &mut driver, &mut service);
    vessel.get_mut("scrubber").unwrap().set_scaling_factor(0.25);
    assert_eq!(vessel.get("scrubber").unwrap().available_capacity(), 4.0);

    run_tick(&parts, &mut vessel, &mut ledger, &mut driver, &mut service);
    assert_eq!(vessel.get("scrubber").unwrap().available_capacity(), 1.0);
    assert_eq!(ledger.get("_scrubber").unwrap().amount(), 1.0);
}

#[test]
fn change_event_invalidates_memoized_lookups() {
    let id = EntityId::from_u128(100);
    let parts = [Converter { process: "scrubber", capacity: 4.0, running: true }];
    let mut vessel = VesselProcesses::from_catalog(id, &catalog());
    let mut ledger = ResourceLedger::new();
    let mut driver = TickDriver::new();
    let mut service = CacheService::default();

    service.identity_mut().set(id, "converter.boost", 2.0);
    run_tick(&parts, &mut vessel, &mut ledger, &mut driver, &mut service);
    assert_eq!(vessel.get("scrubber").unwrap().max_capacity(), 8.0);

    // Docking changed the vessel; the boost is recomputed with its default.
    driver.handle_event(&mut service, &LifecycleEvent::Changed(id));
    run_tick(&parts, &mut vessel, &mut ledger, &mut driver, &mut service);
    assert_eq!(vessel.get("scrubber").unwrap().max_capacity(), 4.0);
}

#[test]
fn reset_clears_messages_and_caches() {
    let mut service = CacheService::default();
    let driver = TickDriver::new();
    service.identity_mut().set(EntityId::from_u128(1), "k", 1_i64);
    service.messages_mut().post(0, Severity::Danger, "radiation storm");

    driver.handle_event(&mut service, &LifecycleEvent::Reset);

    assert!(service.is_empty());
}
