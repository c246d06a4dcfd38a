//! Conversion of test cases into parameter rows.
//!
//! A [`DataStrategy`] pairs a [`ConversionMode`] with an expected-inclusion
//! flag. Conversion is a pure projection: [`to_row`] never fails on a
//! well-formed case, has no side effects, and is deterministic.
//!
//! Under [`ConversionMode::ByReference`] the row is a single slot holding
//! the case itself. Under [`ConversionMode::ByProperty`] the row is the
//! case's fields expanded positionally, with the expected outcome leading
//! the row when it is both present on the case and not suppressed by the
//! strategy. A suppressed or absent outcome leaves no slot behind — the
//! slot is omitted, not nil-filled, so row arity stays exact for the
//! runner's positional binding.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::case::{SlotValue, TestCase};

/// Selects how a test case becomes a row: the whole case as one argument,
/// or its fields expanded into positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionMode {
    ByReference,
    ByProperty,
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMode::ByReference => write!(f, "by-reference"),
            ConversionMode::ByProperty => write!(f, "by-property"),
        }
    }
}

/// The conversion strategy: a mode plus an expected-inclusion flag.
///
/// The flag only matters under by-property conversion, and only for cases
/// that actually carry an outcome; it never conjures an expected slot for
/// a case without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataStrategy {
    pub mode: ConversionMode,
    pub include_expected: bool,
}

impl DataStrategy {
    pub fn new(mode: ConversionMode, include_expected: bool) -> Self {
        Self {
            mode,
            include_expected,
        }
    }

    /// By-reference strategy. The flag is carried but has no effect on
    /// rendering until the strategy is re-moded.
    pub fn by_reference() -> Self {
        Self::new(ConversionMode::ByReference, true)
    }

    /// By-property strategy including the expected slot.
    pub fn by_property() -> Self {
        Self::new(ConversionMode::ByProperty, true)
    }

    /// Returns this strategy with a different mode, keeping the flag.
    pub fn with_mode(self, mode: ConversionMode) -> Self {
        Self { mode, ..self }
    }

    /// Returns this strategy with a different expected-inclusion flag.
    pub fn with_expected(self, include_expected: bool) -> Self {
        Self {
            include_expected,
            ..self
        }
    }
}

impl Default for DataStrategy {
    fn default() -> Self {
        Self::by_property()
    }
}

/// An ordered argument row handed to the parameterized-test runner.
/// Produced by conversion, never mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    slots: Vec<SlotValue>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SlotValue] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&SlotValue> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlotValue> {
        self.slots.iter()
    }
}

impl From<Vec<SlotValue>> for Row {
    fn from(slots: Vec<SlotValue>) -> Self {
        Self { slots }
    }
}

impl IntoIterator for Row {
    type Item = SlotValue;
    type IntoIter = std::vec::IntoIter<SlotValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a SlotValue;
    type IntoIter = std::slice::Iter<'a, SlotValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Converts one test case into a row under the given strategy.
///
/// # Examples
///
/// ```rust
/// use theoria::case::TestCase;
/// use theoria::convert::{to_row, DataStrategy};
///
/// let case = TestCase::builder("add").arg(2).arg(3).returns(5).build().unwrap();
///
/// let by_property = to_row(&case, &DataStrategy::by_property());
/// assert_eq!(by_property.len(), 3); // [expected, arg1, arg2]
///
/// let by_reference = to_row(&case, &DataStrategy::by_reference());
/// assert_eq!(by_reference.len(), 1);
/// ```
pub fn to_row(case: &Arc<TestCase>, strategy: &DataStrategy) -> Row {
    match strategy.mode {
        ConversionMode::ByReference => Row::from(vec![SlotValue::Case(Arc::clone(case))]),
        ConversionMode::ByProperty => {
            let mut slots = Vec::with_capacity(case.arity() + 1);
            if strategy.include_expected {
                if let Some(expectation) = case.expected() {
                    slots.push(expectation.as_slot());
                }
            }
            slots.extend(case.args().iter().cloned());
            Row::from(slots)
        }
    }
}

/// A row-holder: the retained test case paired with the row rendered at
/// creation time. Holding the case keeps re-rendering under any later
/// strategy exact instead of approximated, since rows are a one-way
/// projection.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    case: Arc<TestCase>,
    row: Row,
}

impl CaseRow {
    /// Renders the case under `strategy` and retains both halves.
    pub fn new(case: Arc<TestCase>, strategy: &DataStrategy) -> Self {
        let row = to_row(&case, strategy);
        Self { case, row }
    }

    pub fn case(&self) -> &Arc<TestCase> {
        &self.case
    }

    /// The row rendered when this holder was created.
    pub fn row(&self) -> &Row {
        &self.row
    }

    /// Re-renders the retained case under a different strategy.
    pub fn render(&self, strategy: &DataStrategy) -> Row {
        to_row(&self.case, strategy)
    }
}
