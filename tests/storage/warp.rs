//! Integration tests for warp resources
//!
//! Tests lazy creation, identity stability, and bounded storage.

use stowage_foundation::EntityId;
use stowage_storage::WarpResourceCache;

#[test]
fn acquire_is_stable_until_purge() {
    let mut cache = WarpResourceCache::new();
    let id = EntityId::from_u128(1);

    let first = cache.acquire(id).instance();
    assert_eq!(cache.acquire(id).instance(), first);

    cache.purge_entity(id);
    assert!(!cache.contains(id));
    assert_ne!(cache.acquire(id).instance(), first);
}

#[test]
fn stored_amounts_survive_reacquire() {
    let mut cache = WarpResourceCache::new();
    let id = EntityId::from_u128(1);

    cache.acquire(id).set_capacity(10.0);
    assert_eq!(cache.acquire(id).store("Ore", 7.0), 7.0);
    assert_eq!(cache.acquire(id).store("Ore", 7.0), 3.0);

    let res = cache.get(id).unwrap();
    assert_eq!(res.amount_of("Ore"), 10.0);
    assert_eq!(res.available(), 0.0);
}

#[test]
fn unbounded_without_capacity() {
    let mut cache = WarpResourceCache::new();
    let res = cache.acquire(EntityId::from_u128(3));
    assert_eq!(res.store("Water", 1.0e9), 1.0e9);
    assert!(res.available().is_infinite());
}

#[test]
fn purge_all_keeps_instances_unique() {
    let mut cache = WarpResourceCache::new();
    let ids: Vec<_> = (0..4).map(EntityId::from_u128).collect();
    let before: Vec<_> = ids.iter().map(|&id| cache.acquire(id).instance()).collect();

    cache.purge_all();
    assert!(cache.is_empty());

    for (&id, old) in ids.iter().zip(before) {
        assert!(cache.acquire(id).instance() > old);
    }
}
