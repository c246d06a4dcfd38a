#![allow(dead_code)]
//! Shared fixtures for the integration suites.
//!
//! The fixtures model one small domain (integer division) so that every
//! suite exercises the same case shapes: an arity-2 case with an expected
//! quotient, an arity-2 case with an expected error, and an arity-2 case
//! with no outcome at all.

use std::sync::Arc;

use theoria::prelude::*;

/// An arity-2 case expecting a return value: `dividend / divisor == quotient`.
pub fn division_case(name: &str, dividend: i64, divisor: i64, quotient: i64) -> Arc<TestCase> {
    TestCase::builder(name)
        .arg(dividend)
        .arg(divisor)
        .returns(quotient)
        .build()
        .unwrap()
}

/// An arity-2 case expecting a division error.
pub fn division_error_case(name: &str, dividend: i64, divisor: i64) -> Arc<TestCase> {
    TestCase::builder(name)
        .arg(dividend)
        .arg(divisor)
        .throws(ErrorExpectation::new("InvalidOperation").with_message("division by zero"))
        .build()
        .unwrap()
}

/// An arity-2 case carrying no expected outcome.
pub fn plain_case(name: &str, dividend: i64, divisor: i64) -> Arc<TestCase> {
    TestCase::builder(name)
        .arg(dividend)
        .arg(divisor)
        .build()
        .unwrap()
}

/// A collection seeded with one quotient case under by-property conversion.
pub fn seeded_by_property() -> RowCollection {
    RowCollection::seeded(
        division_case("six by three", 6, 3, 2),
        DataStrategy::by_property(),
    )
}
