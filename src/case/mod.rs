//! Test case model: immutable structured values carrying 0–9 typed
//! argument slots, an optional expected outcome, and a display name.
//!
//! A [`TestCase`] is constructed once through [`CaseBuilder`] and never
//! mutated afterwards. Arity-specific construction is deliberately sugar
//! over the one generic shape: the builder accepts any number of slots up
//! to [`MAX_ARITY`] and enforces the ceiling at build time, so no parallel
//! fixed-arity types exist anywhere in the engine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostics::TheoriaError;

pub mod expectation;
pub mod shape;
pub mod value;

pub use expectation::{ErrorExpectation, Expectation};
pub use shape::{CaseShape, ExpectationShape, SlotKind};
pub use value::SlotValue;

/// Maximum number of argument slots a test case may carry.
pub const MAX_ARITY: usize = 9;

/// An immutable, named test case: ordered argument slots plus an optional
/// expected outcome.
///
/// # Examples
///
/// ```rust
/// use theoria::case::TestCase;
///
/// let case = TestCase::builder("divides evenly")
///     .arg(6)
///     .arg(3)
///     .returns(2)
///     .build()
///     .unwrap();
/// assert_eq!(case.arity(), 2);
/// assert!(case.has_expected());
/// assert_eq!(case.display_name(), "divides evenly => returns 2");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    name: String,
    args: Vec<SlotValue>,
    expected: Option<Expectation>,
}

impl TestCase {
    /// Starts building a test case with the given name.
    pub fn builder(name: impl Into<String>) -> CaseBuilder {
        CaseBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[SlotValue] {
        &self.args
    }

    /// Returns the argument slot at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&SlotValue> {
        self.args.get(index)
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn expected(&self) -> Option<&Expectation> {
        self.expected.as_ref()
    }

    pub fn has_expected(&self) -> bool {
        self.expected.is_some()
    }

    /// Captures the concrete shape tag of this case.
    pub fn shape(&self) -> CaseShape {
        CaseShape::of(self)
    }

    /// Renders the human-readable case name, appending the expected
    /// outcome when the case carries one.
    pub fn display_name(&self) -> String {
        match &self.expected {
            None => self.name.clone(),
            Some(expectation) => format!("{} => {}", self.name, expectation),
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Builder for [`TestCase`]. Collects slots and an optional outcome, then
/// validates the arity ceiling at [`build`](CaseBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    name: String,
    args: Vec<SlotValue>,
    expected: Option<Expectation>,
}

impl CaseBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            expected: None,
        }
    }

    /// Appends one argument slot.
    pub fn arg(mut self, value: impl Into<SlotValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Appends every slot from the given sequence.
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SlotValue>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Declares that the test subject is expected to return this value.
    pub fn returns(mut self, value: impl Into<SlotValue>) -> Self {
        self.expected = Some(Expectation::returns(value));
        self
    }

    /// Declares that the test subject is expected to raise this error.
    pub fn throws(mut self, descriptor: impl Into<ErrorExpectation>) -> Self {
        self.expected = Some(Expectation::Throws(descriptor.into()));
        self
    }

    /// Finalizes the case. Fails when more than [`MAX_ARITY`] slots were
    /// collected.
    pub fn build(self) -> Result<Arc<TestCase>, TheoriaError> {
        if self.args.len() > MAX_ARITY {
            return Err(TheoriaError::InvalidCaseShape {
                expected: format!("at most {} argument slots", MAX_ARITY),
                found: format!("{} argument slots", self.args.len()),
            });
        }
        Ok(Arc::new(TestCase {
            name: self.name,
            args: self.args,
            expected: self.expected,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_slots_in_order() {
        let case = TestCase::builder("ordered")
            .arg(1)
            .arg("two")
            .arg(true)
            .build()
            .unwrap();
        assert_eq!(case.arity(), 3);
        assert_eq!(case.arg(0), Some(&SlotValue::Number(1.0)));
        assert_eq!(case.arg(1), Some(&SlotValue::String("two".to_string())));
        assert_eq!(case.arg(2), Some(&SlotValue::Bool(true)));
    }

    #[test]
    fn builder_rejects_more_than_nine_slots() {
        let err = TestCase::builder("too wide")
            .args((0..10).map(SlotValue::from).collect::<Vec<_>>())
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), crate::diagnostics::ErrorKind::InvalidCaseShape);
    }

    #[test]
    fn zero_arity_case_is_valid() {
        let case = TestCase::builder("no args").build().unwrap();
        assert_eq!(case.arity(), 0);
        assert!(case.args().is_empty());
    }

    #[test]
    fn display_name_carries_throws_outcome() {
        let case = TestCase::builder("divide by zero")
            .arg(1)
            .arg(0)
            .throws(ErrorExpectation::new("InvalidOperation").with_message("division by zero"))
            .build()
            .unwrap();
        assert_eq!(
            case.display_name(),
            "divide by zero => throws InvalidOperation: division by zero"
        );
    }
}
