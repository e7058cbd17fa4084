//! Integration tests for vessel process sets
//!
//! Tests routing, tick driving, and lifecycle handling.

use stowage_engine::{
    LifecycleEvent, ProcessCatalog, ProcessDefinition, ProcessRecord, ResourceLedger, TickDriver,
    VesselProcesses,
};
use stowage_foundation::{EntityId, ErrorKind};
use stowage_storage::CacheService;

fn catalog() -> ProcessCatalog {
    ProcessCatalog::new()
        .with(ProcessDefinition::new("scrubber").with_input("CarbonDioxide", 0.1))
        .with(ProcessDefinition::new("fuel_cell").with_output("Water", 0.2, true))
}

#[test]
fn driver_closes_successive_ticks() {
    let id = EntityId::from_u128(1);
    let mut vessel = VesselProcesses::from_catalog(id, &catalog());
    let mut ledger = ResourceLedger::new();
    let mut driver = TickDriver::new();

    for tick in 0..3_u32 {
        vessel.register("scrubber", true, f64::from(tick + 1)).unwrap();
        let summary = driver.commit(&mut vessel, &mut ledger);
        assert_eq!(driver.advance(), u64::from(tick));
        assert_eq!(summary.tick, u64::from(tick));
        assert_eq!(
            summary.report.snapshot("scrubber").unwrap().max_capacity,
            f64::from(tick + 1)
        );
    }
    assert_eq!(driver.tick_number(), 3);
}

#[test]
fn one_tick_commits_every_vessel_under_one_number() {
    let mut a = VesselProcesses::from_catalog(EntityId::from_u128(1), &catalog());
    let mut b = VesselProcesses::from_catalog(EntityId::from_u128(2), &catalog());
    let mut ledger_a = ResourceLedger::new();
    let mut ledger_b = ResourceLedger::new();
    let mut driver = TickDriver::new();

    for expected in 0..2_u64 {
        let summaries = driver.tick([(&mut a, &mut ledger_a), (&mut b, &mut ledger_b)]);
        assert!(summaries.iter().all(|s| s.tick == expected));
    }
    assert_eq!(driver.tick_number(), 2);
}

#[test]
fn unknown_process_is_reported() {
    let mut vessel = VesselProcesses::from_catalog(EntityId::from_u128(1), &catalog());
    let err = vessel.register("nuclear", true, 1.0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownProcess { .. }));
}

#[test]
fn unresolved_process_does_not_abort_tick() {
    let id = EntityId::from_u128(1);
    let orphan = ProcessRecord::default();
    let mut vessel = VesselProcesses::from_records(id, [("nuclear", &orphan)], &catalog());
    let mut ledger = ResourceLedger::new();
    vessel.register("scrubber", true, 2.0).unwrap();

    let summary = TickDriver::new().commit(&mut vessel, &mut ledger);

    assert!(!summary.is_ok());
    assert_eq!(summary.report.skipped.len(), 1);
    assert_eq!(ledger.get("_scrubber").unwrap().amount(), 2.0);
}

#[test]
fn removal_event_purges_only_that_vessel() {
    let a = EntityId::from_u128(1);
    let b = EntityId::from_u128(2);
    let mut service = CacheService::default();
    service.identity_mut().set(a, "k", 1_i64);
    service.identity_mut().set(b, "k", 1_i64);
    service.warp_resource(a);

    let driver = TickDriver::new();
    driver.handle_event(&mut service, &LifecycleEvent::Removed(a));

    assert!(!service.identity().has(a, "k"));
    assert!(service.warp().get(a).is_none());
    assert!(service.identity().has(b, "k"));
}
