//! Orphan Tests
//!
//! A record whose index update failed stays readable by key but is absent
//! from listings until a later index write includes it.

use crate::*;
use recordsync::RecordStore;

#[test]
fn test_index_write_fault_orphans_record() {
    let c = faulty_collection();
    c.append(record_at("kept", 1)).unwrap();
    break_index_writes(c.store());

    let orphan = record_at("orphan", 2);
    let err = c.append(orphan.clone()).unwrap_err();
    assert!(!err.is_rejected());

    // not listed
    let snapshot = c.list().unwrap();
    assert_eq!(listed_ids(&snapshot), vec!["kept"]);

    // but directly readable under its derived key
    assert_eq!(c.read_record(&orphan.id).unwrap(), Some(orphan));
    assert!(c.store().inner().read("record:orphan").unwrap().is_some());
}

#[test]
fn test_index_read_fault_during_append_orphans_record() {
    let c = faulty_collection();
    c.store()
        .fail_reads_of("records:index", Fault::Unavailable);

    assert!(c.append(record_at("x", 1)).is_err());
    c.store().clear_faults();

    assert!(c.list().unwrap().is_empty());
    assert!(c.store().inner().contains_key("record:x"));
}

#[test]
fn test_rejected_index_write_surfaces_rejection() {
    let c = faulty_collection();
    c.store()
        .fail_next_write_to("records:index", Fault::Rejected);

    let err = c.append(record_at("x", 1)).unwrap_err();
    assert!(err.is_rejected());
    assert!(c.list().unwrap().is_empty());
}

#[test]
fn test_orphan_not_adopted_by_later_append() {
    let c = faulty_collection();
    c.store()
        .fail_next_write_to("records:index", Fault::Unavailable);
    assert!(c.append(record_at("orphan", 1)).is_err());

    c.append(record_at("next", 2)).unwrap();
    assert_eq!(listed_ids(&c.list().unwrap()), vec!["next"]);
}

#[test]
fn test_orphan_visible_once_reindexed() {
    let c = faulty_collection();
    c.store()
        .fail_next_write_to("records:index", Fault::Unavailable);
    let orphan = record_at("orphan", 1);
    assert!(c.append(orphan.clone()).is_err());

    // retrying the same record relinks it
    c.append(orphan).unwrap();
    assert_eq!(listed_ids(&c.list().unwrap()), vec!["orphan"]);
}

#[test]
fn test_record_write_fault_leaves_no_trace() {
    let c = faulty_collection();
    c.store()
        .fail_next_write_to("record:x", Fault::Unavailable);

    let err = c.append(record_at("x", 1)).unwrap_err();
    assert!(matches!(
        recordsync::Error::from(err),
        recordsync::Error::Unavailable(_)
    ));
    assert!(c.store().inner().is_empty());
}
