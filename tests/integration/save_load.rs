//! Save and load integration tests
//!
//! Tests that player choices survive a save file and that missing process
//! definitions come back unresolved instead of failing the load.

use stowage::engine::{ProcessCatalog, ProcessDefinition, ResourceLedger, TickDriver, VesselProcesses};
use stowage::foundation::EntityId;
use stowage::runtime::{VesselRecord, from_bytes, restore_processes, to_bytes};

fn catalog() -> ProcessCatalog {
    ProcessCatalog::new()
        .with(
            ProcessDefinition::new("electrolysis")
                .with_title("Water Electrolysis")
                .with_input("Water", 1.0)
                .with_output("Hydrogen", 1.0, true)
                .with_output("Oxygen", 0.5, false),
        )
        .with(ProcessDefinition::new("scrubber").with_input("CarbonDioxide", 0.1))
}

fn saved_vessel(id: EntityId) -> Vec<u8> {
    let mut vessel = VesselProcesses::from_catalog(id, &catalog());
    let electrolysis = vessel.get_mut("electrolysis").unwrap();
    electrolysis.set_enabled(false);
    electrolysis.set_scaling_factor(0.6);
    electrolysis.toggle_dump("Hydrogen");
    electrolysis.toggle_dump("Oxygen");

    to_bytes(&[VesselRecord::capture(&vessel)]).unwrap()
}

#[test]
fn controls_survive_round_trip() {
    let id = EntityId::random();
    let records = from_bytes(&saved_vessel(id)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].entity, id);

    let vessel = restore_processes(&records[0], &catalog());
    let electrolysis = vessel.get("electrolysis").unwrap();
    assert!(electrolysis.is_resolved());
    assert!(!electrolysis.enabled());
    assert_eq!(electrolysis.scaling_factor(), 0.6);
    assert_eq!(electrolysis.dumped_outputs(), ["Oxygen".to_string()]);
}

#[test]
fn restored_vessel_starts_from_zero_capacity() {
    let id = EntityId::from_u128(8);
    let records = from_bytes(&saved_vessel(id)).unwrap();
    let mut vessel = restore_processes(&records[0], &catalog());
    assert_eq!(vessel.get("scrubber").unwrap().max_capacity(), 0.0);

    vessel.register("scrubber", true, 3.0).unwrap();
    let mut ledger = ResourceLedger::new();
    TickDriver::new().tick([(&mut vessel, &mut ledger)]);
    assert_eq!(vessel.get("scrubber").unwrap().max_capacity(), 3.0);
}

#[test]
fn missing_definition_fails_explicitly_but_loads() {
    let id = EntityId::from_u128(8);
    let records = from_bytes(&saved_vessel(id)).unwrap();
    let reduced = ProcessCatalog::new().with(ProcessDefinition::new("scrubber"));

    let mut vessel = restore_processes(&records[0], &reduced);
    let electrolysis = vessel.get_mut("electrolysis").unwrap();
    assert!(!electrolysis.is_resolved());
    assert!(electrolysis.name().unwrap_err().is_unresolved_definition());
    assert!(electrolysis.title().is_err());
    assert!(electrolysis.describe_current_rate().is_err());
    assert_eq!(electrolysis.requested_name(), "electrolysis");

    // A later catalog update resolves it in place.
    assert_eq!(vessel.resolve_all(&catalog()), 0);
    assert_eq!(vessel.get("electrolysis").unwrap().title().unwrap(), "Water Electrolysis");
    assert_eq!(
        VesselRecord::capture(&vessel).processes["electrolysis"],
        records[0].processes["electrolysis"]
    );
}
