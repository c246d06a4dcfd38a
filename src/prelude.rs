//! Convenience re-exports of the types most call sites need.

pub use crate::case::{
    CaseBuilder, CaseShape, ErrorExpectation, Expectation, ExpectationShape, SlotKind, SlotValue,
    TestCase, MAX_ARITY,
};
pub use crate::collection::RowCollection;
pub use crate::convert::{to_row, CaseRow, ConversionMode, DataStrategy, Row};
pub use crate::diagnostics::{ErrorKind, ResolutionFailure, TheoriaError};
pub use crate::resolve::{
    suite_name, SourceResolver, StrategyHolder, StrategyRegistry, STRATEGY_MEMBER,
};
pub use crate::source::RowSource;
