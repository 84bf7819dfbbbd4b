//! Corruption Tests
//!
//! Malformed data read back from the store degrades the listing instead of
//! failing it.

use crate::*;
use recordsync::RecordStore;

#[test]
fn test_unparseable_index_lists_empty() {
    let c = faulty_collection();
    for i in 0..3 {
        c.append(record_at(&format!("r{}", i), i)).unwrap();
    }
    c.store()
        .write("records:index", &[0xde, 0xad, 0xbe, 0xef])
        .unwrap();

    let snapshot = c.list().unwrap();
    assert!(snapshot.is_empty());
    assert!(snapshot.stats().index_corrupt);
}

#[test]
fn test_index_of_wrong_shape_lists_empty() {
    let c = faulty_collection();
    c.append(record_at("a", 1)).unwrap();
    c.store().write("records:index", br#"{"ids":["a"]}"#).unwrap();
    assert!(c.list().unwrap().is_empty());
}

#[test]
fn test_one_corrupt_record_of_n() {
    const N: usize = 6;
    let c = faulty_collection();
    for i in 0..N {
        c.append(record_at(&format!("r{}", i), i as i64)).unwrap();
    }
    c.store().write("record:r3", b"\x00garbage").unwrap();

    let snapshot = c.list().unwrap();
    assert_eq!(snapshot.len(), N - 1);
    assert!(snapshot.get(&RecordId::new("r3").unwrap()).is_none());
    assert_eq!(snapshot.stats().undecodable, 1);
    assert_eq!(listed_ids(&snapshot), vec!["r5", "r4", "r2", "r1", "r0"]);
}

#[test]
fn test_record_with_invalid_envelope_skipped() {
    let c = faulty_collection();
    c.append(record_at("good", 2)).unwrap();
    c.append(record_at("bad", 1)).unwrap();
    c.store()
        .write(
            "record:bad",
            br#"{"category":"trade","magnitude":-1,"created_at":1,"owner":"o"}"#,
        )
        .unwrap();
    assert_eq!(listed_ids(&c.list().unwrap()), vec!["good"]);
}

#[test]
fn test_indexed_but_never_written() {
    let c = faulty_collection();
    c.append(record_at("real", 1)).unwrap();
    c.store()
        .write("records:index", br#"["crashed-peer","real"]"#)
        .unwrap();

    let snapshot = c.list().unwrap();
    assert_eq!(listed_ids(&snapshot), vec!["real"]);
    assert_eq!(snapshot.stats().missing, 1);
}

#[test]
fn test_corrupt_index_recovers_on_next_append() {
    let c = faulty_collection();
    c.append(record_at("lost", 1)).unwrap();
    c.store().write("records:index", b"]]").unwrap();

    // the rewritten index starts over; the earlier record becomes an orphan
    c.append(record_at("new", 2)).unwrap();
    assert_eq!(listed_ids(&c.list().unwrap()), vec!["new"]);
    assert!(c
        .read_record(&RecordId::new("lost").unwrap())
        .unwrap()
        .is_some());
}
