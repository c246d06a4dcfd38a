//! Type-homogeneous accumulation of test cases and their rendered rows.
//!
//! A [`RowCollection`] owns a sequence of test cases that all share one
//! concrete [`CaseShape`], locked at the first insertion and checked on
//! every later one. Each accepted case is rendered into a row immediately
//! under the strategy in force at insertion time, and both halves are
//! retained in insertion order. Because the structured cases are kept, the
//! collection can always be replayed under a different strategy — the
//! reverse derivation (rows back to cases) is impossible, which is why
//! rows alone are never trusted as the source of truth.
//!
//! # Thread Safety
//! Not safe for concurrent mutation. Callers sharing a collection across
//! threads must serialize `add`/`add_range` externally; the read paths may
//! run concurrently with each other but not with a mutation.

use std::sync::Arc;

use im::Vector;

use crate::case::{CaseShape, TestCase};
use crate::convert::{to_row, ConversionMode, DataStrategy, Row};
use crate::diagnostics::TheoriaError;

/// A shape-locked accumulator of test cases and their rendered rows.
///
/// # Examples
///
/// ```rust
/// use theoria::case::TestCase;
/// use theoria::collection::RowCollection;
/// use theoria::convert::{ConversionMode, DataStrategy};
///
/// let seed = TestCase::builder("add").arg(2).arg(3).returns(5).build().unwrap();
/// let mut collection = RowCollection::seeded(seed, DataStrategy::by_property());
///
/// let next = TestCase::builder("add negatives").arg(-2).arg(-3).returns(-5).build().unwrap();
/// collection.add(next).unwrap();
///
/// assert_eq!(collection.len(), 2);
/// assert_eq!(collection.rows()[0].len(), 3); // [expected, arg1, arg2]
///
/// // Replaying under the other mode leaves the original untouched.
/// let by_reference = collection.with_strategy(ConversionMode::ByReference);
/// assert_eq!(by_reference.rows()[0].len(), 1);
/// assert_eq!(collection.rows()[0].len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RowCollection {
    strategy: DataStrategy,
    shape: Option<CaseShape>,
    cases: Vector<Arc<TestCase>>,
    rows: Vector<Row>,
}

impl RowCollection {
    /// Creates an empty collection. The shape lock is established by the
    /// first insertion.
    pub fn new(strategy: DataStrategy) -> Self {
        Self {
            strategy,
            shape: None,
            cases: Vector::new(),
            rows: Vector::new(),
        }
    }

    /// Creates a collection seeded with one case, locking the shape to the
    /// seed's concrete shape.
    pub fn seeded(case: Arc<TestCase>, strategy: DataStrategy) -> Self {
        let mut collection = Self::new(strategy);
        collection.push(case, &strategy);
        collection
    }

    pub fn strategy(&self) -> &DataStrategy {
        &self.strategy
    }

    /// The locked shape, or `None` while the collection is still empty.
    pub fn shape(&self) -> Option<&CaseShape> {
        self.shape.as_ref()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Adds one case, rendering its row under the active strategy.
    ///
    /// Fails with `InvalidCaseShape` when the case's concrete shape does
    /// not match the locked shape; the collection is left unchanged.
    /// Duplicate cases are appended, not deduplicated.
    pub fn add(&mut self, case: Arc<TestCase>) -> Result<(), TheoriaError> {
        let strategy = self.strategy;
        self.add_rendered(case, &strategy)
    }

    /// Adds one case rendered under a per-row strategy override. The
    /// collection's active strategy is not changed; only this row reflects
    /// the override, and a later replay normalizes it.
    pub fn add_rendered(
        &mut self,
        case: Arc<TestCase>,
        strategy: &DataStrategy,
    ) -> Result<(), TheoriaError> {
        self.check_shape(&case)?;
        self.push(case, strategy);
        Ok(())
    }

    /// Adds every case from the batch, validating the whole batch before
    /// applying any of it: on failure the collection is unmodified.
    ///
    /// Fails with `EmptyInput` when the batch is empty and with
    /// `InvalidCaseShape` when any element's shape mismatches.
    pub fn add_range<I>(&mut self, cases: I) -> Result<(), TheoriaError>
    where
        I: IntoIterator<Item = Arc<TestCase>>,
    {
        let incoming: Vec<Arc<TestCase>> = cases.into_iter().collect();
        if incoming.is_empty() {
            return Err(TheoriaError::EmptyInput);
        }

        let mut lock = self.shape.clone();
        for case in &incoming {
            let shape = case.shape();
            match &lock {
                Some(locked) if locked.accepts(&shape) => {}
                Some(locked) => {
                    return Err(TheoriaError::InvalidCaseShape {
                        expected: locked.to_string(),
                        found: shape.to_string(),
                    });
                }
                None => lock = Some(shape),
            }
        }

        let strategy = self.strategy;
        for case in incoming {
            self.push(case, &strategy);
        }
        Ok(())
    }

    /// The rows as rendered at insertion time, in insertion order.
    /// Re-callable; calling twice without an intervening mutation returns
    /// equal sequences.
    pub fn rows(&self) -> Vec<Row> {
        self.rows.iter().cloned().collect()
    }

    /// The rows re-rendered from the retained cases under a mode override.
    /// Neither the collection nor its active strategy is changed.
    pub fn rows_under(&self, mode: ConversionMode) -> Vec<Row> {
        let strategy = self.strategy.with_mode(mode);
        self.cases
            .iter()
            .map(|case| to_row(case, &strategy))
            .collect()
    }

    /// Read-only view of the retained cases, in insertion order. This is
    /// what makes later re-derivation possible after the active strategy
    /// has moved on.
    pub fn test_cases(&self) -> impl Iterator<Item = &Arc<TestCase>> {
        self.cases.iter()
    }

    /// Returns this collection re-rendered under `mode`. The same mode
    /// yields an observably identical collection; a different mode yields
    /// a fresh collection replayed from the retained cases. The receiver
    /// is never mutated either way.
    pub fn with_strategy(&self, mode: ConversionMode) -> Self {
        if mode == self.strategy.mode {
            return self.clone();
        }

        let strategy = self.strategy.with_mode(mode);
        let rows = self.cases.iter().map(|case| to_row(case, &strategy)).collect();
        Self {
            strategy,
            shape: self.shape.clone(),
            cases: self.cases.clone(),
            rows,
        }
    }

    fn check_shape(&self, case: &TestCase) -> Result<(), TheoriaError> {
        let shape = case.shape();
        match &self.shape {
            None => Ok(()),
            Some(locked) if locked.accepts(&shape) => Ok(()),
            Some(locked) => Err(TheoriaError::InvalidCaseShape {
                expected: locked.to_string(),
                found: shape.to_string(),
            }),
        }
    }

    fn push(&mut self, case: Arc<TestCase>, strategy: &DataStrategy) {
        if self.shape.is_none() {
            self.shape = Some(case.shape());
        }
        self.rows.push_back(to_row(&case, strategy));
        self.cases.push_back(case);
    }
}
