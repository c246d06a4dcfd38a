//! Dynamic accumulation of test data behind a data-source provider.
//!
//! A [`RowSource`] is the mutable front a test suite builds its data
//! through: it owns an active [`DataStrategy`] and lazily initializes a
//! shape-locked [`RowCollection`] on the first add. Convenience adders
//! cover the three case families — plain inputs, inputs with an expected
//! return value, and inputs with an expected error.

use std::sync::Arc;

use crate::case::{ErrorExpectation, SlotValue, TestCase};
use crate::collection::RowCollection;
use crate::convert::{ConversionMode, DataStrategy, Row};
use crate::diagnostics::TheoriaError;

/// A mutable accumulation front over a lazily-created [`RowCollection`].
///
/// # Examples
///
/// ```rust
/// use theoria::convert::{ConversionMode, DataStrategy};
/// use theoria::source::RowSource;
///
/// let mut source = RowSource::new(DataStrategy::by_property());
/// source.add_returns("add", vec![2.into(), 3.into()], 5).unwrap();
/// source.add_returns("add zero", vec![2.into(), 0.into()], 2).unwrap();
///
/// assert_eq!(source.rows().len(), 2);
/// assert_eq!(source.rows()[0].len(), 3);
///
/// // The accumulated collection can be taken out under another mode.
/// let by_reference = source.collection(Some(ConversionMode::ByReference)).unwrap();
/// assert_eq!(by_reference.rows()[0].len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RowSource {
    strategy: DataStrategy,
    holder: Option<RowCollection>,
}

impl RowSource {
    /// Creates a source with the given active strategy and no data yet.
    pub fn new(strategy: DataStrategy) -> Self {
        Self {
            strategy,
            holder: None,
        }
    }

    pub fn strategy(&self) -> &DataStrategy {
        &self.strategy
    }

    /// The accumulated collection, replayed under `mode` when it differs
    /// from the active one. `None` while no case has been added.
    pub fn collection(&self, mode: Option<ConversionMode>) -> Option<RowCollection> {
        let holder = self.holder.as_ref()?;
        match mode {
            None => Some(holder.clone()),
            Some(mode) => Some(holder.with_strategy(mode)),
        }
    }

    /// Adds one case, seeding the collection on first use.
    pub fn add(&mut self, case: Arc<TestCase>) -> Result<(), TheoriaError> {
        let strategy = self.strategy;
        self.add_rendered(case, &strategy)
    }

    /// Adds a case with no expected outcome.
    pub fn add_plain(
        &mut self,
        name: impl Into<String>,
        args: Vec<SlotValue>,
    ) -> Result<(), TheoriaError> {
        let case = TestCase::builder(name).args(args).build()?;
        self.add(case)
    }

    /// Adds a case expecting a return value.
    pub fn add_returns(
        &mut self,
        name: impl Into<String>,
        args: Vec<SlotValue>,
        expected: impl Into<SlotValue>,
    ) -> Result<(), TheoriaError> {
        let case = TestCase::builder(name).args(args).returns(expected).build()?;
        self.add(case)
    }

    /// Adds a case expecting an error.
    pub fn add_throws(
        &mut self,
        name: impl Into<String>,
        args: Vec<SlotValue>,
        error: impl Into<ErrorExpectation>,
    ) -> Result<(), TheoriaError> {
        let case = TestCase::builder(name).args(args).throws(error).build()?;
        self.add(case)
    }

    /// Adds one case rendered under a per-row mode override. The source's
    /// active strategy is unchanged afterwards; without an override this
    /// is a plain [`add`](Self::add).
    pub fn add_optional(
        &mut self,
        case: Arc<TestCase>,
        mode: Option<ConversionMode>,
    ) -> Result<(), TheoriaError> {
        let strategy = match mode {
            None => self.strategy,
            Some(mode) => self.strategy.with_mode(mode),
        };
        self.add_rendered(case, &strategy)
    }

    /// The accumulated rows in insertion order; empty while no case has
    /// been added.
    pub fn rows(&self) -> Vec<Row> {
        self.holder.as_ref().map(RowCollection::rows).unwrap_or_default()
    }

    /// The accumulated rows re-rendered under a mode override.
    pub fn rows_under(&self, mode: ConversionMode) -> Vec<Row> {
        self.holder
            .as_ref()
            .map(|holder| holder.rows_under(mode))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.holder.as_ref().map(RowCollection::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards the accumulated collection. The next add re-seeds it,
    /// which also releases the previous shape lock.
    pub fn reset(&mut self) {
        self.holder = None;
    }

    fn add_rendered(
        &mut self,
        case: Arc<TestCase>,
        strategy: &DataStrategy,
    ) -> Result<(), TheoriaError> {
        match &mut self.holder {
            Some(holder) => holder.add_rendered(case, strategy),
            None => {
                let mut holder = RowCollection::new(self.strategy);
                holder.add_rendered(case, strategy)?;
                self.holder = Some(holder);
                Ok(())
            }
        }
    }
}
