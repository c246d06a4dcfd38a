//! Row collection tests: shape locking, batch validation, re-rendering,
//! and the guarantee that retained cases survive strategy changes.

use std::sync::Arc;

use theoria::prelude::*;

mod common;
use common::{division_case, division_error_case, plain_case, seeded_by_property};

#[test]
fn seeded_by_property_collection_renders_expected_then_args() {
    let collection = seeded_by_property();
    let rows = collection.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[0].get(0), Some(&SlotValue::Number(2.0)));
    assert_eq!(rows[0].get(1), Some(&SlotValue::Number(6.0)));
    assert_eq!(rows[0].get(2), Some(&SlotValue::Number(3.0)));
}

#[test]
fn seeded_by_reference_collection_renders_the_case_itself() {
    let seed = division_case("six by three", 6, 3, 2);
    let collection = RowCollection::seeded(Arc::clone(&seed), DataStrategy::by_reference());
    let rows = collection.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);
    match rows[0].get(0) {
        Some(SlotValue::Case(held)) => assert!(Arc::ptr_eq(held, &seed)),
        other => panic!("expected a case slot, got {:?}", other),
    }
}

#[test]
fn empty_batch_insertion_fails_and_leaves_the_collection_empty() {
    let mut collection = RowCollection::new(DataStrategy::by_property());
    let err = collection.add_range(Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(collection.len(), 0);
}

#[test]
fn rows_are_idempotent_between_mutations() {
    let mut collection = seeded_by_property();
    collection.add(division_case("ten by two", 10, 2, 5)).unwrap();
    assert_eq!(collection.rows(), collection.rows());
}

#[test]
fn strategy_round_trip_restores_the_original_rows() {
    let mut collection = seeded_by_property();
    collection.add(division_case("ten by two", 10, 2, 5)).unwrap();

    let round_tripped = collection
        .with_strategy(ConversionMode::ByReference)
        .with_strategy(ConversionMode::ByProperty);
    assert_eq!(round_tripped.rows(), collection.rows());
}

#[test]
fn mismatched_shape_insertion_fails_without_growing_the_collection() {
    let mut collection = seeded_by_property();
    let mismatched = TestCase::builder("wrong arity")
        .arg(6)
        .returns(2)
        .build()
        .unwrap();

    let err = collection.add(mismatched).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCaseShape);
    assert_eq!(collection.len(), 1);

    // Outcome kind is part of the shape: a throwing case cannot join a
    // collection of returning cases.
    let err = collection
        .add(division_error_case("six by zero", 6, 0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCaseShape);
    assert_eq!(collection.len(), 1);
}

#[test]
fn batch_with_one_invalid_element_applies_nothing() {
    let mut collection = seeded_by_property();
    let err = collection
        .add_range(vec![
            division_case("ten by two", 10, 2, 5),
            plain_case("no outcome", 1, 1),
            division_case("nine by three", 9, 3, 3),
        ])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCaseShape);
    assert_eq!(collection.len(), 1);
}

#[test]
fn valid_batch_preserves_insertion_order() {
    let mut collection = seeded_by_property();
    collection
        .add_range(vec![
            division_case("ten by two", 10, 2, 5),
            division_case("nine by three", 9, 3, 3),
        ])
        .unwrap();

    let names: Vec<&str> = collection.test_cases().map(|case| case.name()).collect();
    assert_eq!(names, ["six by three", "ten by two", "nine by three"]);
    assert_eq!(collection.rows().len(), 3);
}

#[test]
fn duplicate_cases_are_appended_not_deduplicated() {
    let mut collection = seeded_by_property();
    collection.add(division_case("six by three", 6, 3, 2)).unwrap();
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.rows()[0], collection.rows()[1]);
}

#[test]
fn empty_collection_locks_shape_at_first_insertion() {
    let mut collection = RowCollection::new(DataStrategy::by_property());
    assert!(collection.shape().is_none());

    collection.add(division_case("six by three", 6, 3, 2)).unwrap();
    assert!(collection.shape().is_some());

    let err = collection
        .add(TestCase::builder("wider").arg(1).arg(2).arg(3).build().unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCaseShape);
}

#[test]
fn with_strategy_same_mode_is_observably_identical() {
    let collection = seeded_by_property();
    let same = collection.with_strategy(ConversionMode::ByProperty);
    assert_eq!(same, collection);
}

#[test]
fn with_strategy_new_mode_never_touches_the_receiver() {
    let mut collection = seeded_by_property();
    collection.add(division_case("ten by two", 10, 2, 5)).unwrap();
    let before = collection.clone();

    let by_reference = collection.with_strategy(ConversionMode::ByReference);
    assert_eq!(collection, before);
    assert_eq!(by_reference.len(), collection.len());
    assert!(by_reference.rows().iter().all(|row| row.len() == 1));

    // Both collections retain the same structured cases.
    let original: Vec<_> = collection.test_cases().collect();
    let replayed: Vec<_> = by_reference.test_cases().collect();
    assert_eq!(original, replayed);
}

#[test]
fn rows_under_re_renders_without_mutating() {
    let collection = seeded_by_property();
    let by_reference = collection.rows_under(ConversionMode::ByReference);
    assert_eq!(by_reference.len(), 1);
    assert_eq!(by_reference[0].len(), 1);

    // The stored rows and the active strategy are unchanged.
    assert_eq!(collection.rows()[0].len(), 3);
    assert_eq!(collection.strategy().mode, ConversionMode::ByProperty);
}

#[test]
fn retained_cases_allow_re_derivation_after_mode_changes() {
    let collection = seeded_by_property().with_strategy(ConversionMode::ByReference);

    // Rows are now single-slot, but the cases still carry full structure.
    let case = collection.test_cases().next().unwrap();
    assert_eq!(case.arity(), 2);
    assert!(case.has_expected());
}

#[test]
fn nil_slots_are_wildcards_for_the_shape_lock() {
    let mut collection = seeded_by_property();
    let with_nil = TestCase::builder("nil divisor")
        .arg(6)
        .arg(SlotValue::Nil)
        .returns(2)
        .build()
        .unwrap();
    collection.add(with_nil).unwrap();
    assert_eq!(collection.len(), 2);
}
