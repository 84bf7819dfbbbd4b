//! Listing Tests
//!
//! - Empty store
//! - N appends → N records, newest first
//! - Deterministic tie order
//! - Idempotent listing

use crate::*;
use proptest::prelude::*;
use recordsync::RecordStore;

#[test]
fn test_list_empty_backend() {
    let c = faulty_collection();
    let snapshot = c.list().unwrap();
    assert!(snapshot.is_empty());
    // one read of the index, nothing else
    assert_eq!(c.store().stats().reads(), 1);
    assert_eq!(c.store().stats().writes(), 0);
}

#[test]
fn test_list_returns_every_append_newest_first() {
    let c = faulty_collection();
    let stamps = [40, 10, 30, 20, 50];
    for (i, secs) in stamps.iter().enumerate() {
        c.append(record_at(&format!("r{}", i), *secs)).unwrap();
    }

    let snapshot = c.list().unwrap();
    assert_eq!(snapshot.len(), stamps.len());
    assert_eq!(listed_ids(&snapshot), vec!["r4", "r0", "r2", "r3", "r1"]);
    let times: Vec<i64> = snapshot.iter().map(|r| r.created_at.as_secs()).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_tie_order_follows_append_order() {
    let first = faulty_collection();
    let second = faulty_collection();
    for id in ["m", "a", "z", "b"] {
        first.append(record_at(id, 100)).unwrap();
        second.append(record_at(id, 100)).unwrap();
    }
    let a = listed_ids(&first.list().unwrap());
    let b = listed_ids(&second.list().unwrap());
    assert_eq!(a, vec!["m", "a", "z", "b"]);
    assert_eq!(a, b);
}

#[test]
fn test_list_is_idempotent() {
    let c = faulty_collection();
    for i in 0..10 {
        c.append(record_at(&format!("r{}", i), i % 3)).unwrap();
    }
    let first = c.list().unwrap();
    let second = c.list().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_list_rereads_store_every_call() {
    let c = faulty_collection();
    c.append(record_at("a", 1)).unwrap();
    assert_eq!(c.list().unwrap().len(), 1);

    // a write by someone else shows up without any refresh call
    let other = IndexedCollection::new(c.store());
    other.append(record_at("b", 2)).unwrap();
    assert_eq!(listed_ids(&c.list().unwrap()), vec!["b", "a"]);
}

#[test]
fn test_payload_is_opaque() {
    let c = faulty_collection();
    let payload: Vec<u8> = (0..=255u8).collect();
    let record = record_at("bin", 1);
    let record = Record {
        payload: payload.clone(),
        ..record
    };
    c.append(record).unwrap();
    assert_eq!(c.list().unwrap().records()[0].payload, payload);
}

#[test]
fn test_record_key_derived_from_id() {
    let c = faulty_collection();
    c.append(record_at("abc", 1)).unwrap();
    assert!(c.store().inner().read("record:abc").unwrap().is_some());
    assert!(c.store().inner().read("records:index").unwrap().is_some());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_list_twice_identical(stamps in prop::collection::vec(-5i64..5, 0..16)) {
        let c = IndexedCollection::new(MemoryStore::new());
        for (i, secs) in stamps.iter().enumerate() {
            c.append(record_at(&format!("p{}", i), *secs)).unwrap();
        }
        let first = c.list().unwrap();
        prop_assert_eq!(first.len(), stamps.len());
        prop_assert_eq!(first, c.list().unwrap());
    }
}
