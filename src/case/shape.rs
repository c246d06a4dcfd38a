//! Concrete shape tags for test cases.
//!
//! A collection of test cases is homogeneous: every case must share one
//! concrete shape, which is the combination of argument arity, per-slot
//! kinds, and the kind of expected outcome. The shape is captured as a
//! value tag when a collection is seeded and checked against every later
//! insertion, so a mismatch fails loudly instead of silently coercing.
//!
//! Nil slots are wildcards: a case whose slot is nil is compatible with
//! any kind in that position, since nothing can be learned from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::case::expectation::Expectation;
use crate::case::value::SlotValue;
use crate::case::TestCase;

/// The kind of a single argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Nil,
    Bool,
    Number,
    String,
    List,
    Map,
    Error,
    Case,
}

impl SlotKind {
    /// Returns the kind of the given slot value.
    pub fn of(value: &SlotValue) -> Self {
        match value {
            SlotValue::Nil => SlotKind::Nil,
            SlotValue::Bool(_) => SlotKind::Bool,
            SlotValue::Number(_) => SlotKind::Number,
            SlotValue::String(_) => SlotKind::String,
            SlotValue::List(_) => SlotKind::List,
            SlotValue::Map(_) => SlotKind::Map,
            SlotValue::Error(_) => SlotKind::Error,
            SlotValue::Case(_) => SlotKind::Case,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Nil => "Nil",
            SlotKind::Bool => "Bool",
            SlotKind::Number => "Number",
            SlotKind::String => "String",
            SlotKind::List => "List",
            SlotKind::Map => "Map",
            SlotKind::Error => "Error",
            SlotKind::Case => "Case",
        }
    }

    /// Returns true if a slot of this kind can stand where `other` stands.
    /// Nil is compatible in either direction.
    fn compatible(self, other: SlotKind) -> bool {
        self == other || self == SlotKind::Nil || other == SlotKind::Nil
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The expected-outcome component of a case shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectationShape {
    /// The case carries no expected outcome.
    Absent,
    /// The case expects a result value of the given kind.
    Returns(SlotKind),
    /// The case expects an error of the named type.
    Throws(String),
}

impl ExpectationShape {
    fn compatible(&self, other: &ExpectationShape) -> bool {
        match (self, other) {
            (ExpectationShape::Absent, ExpectationShape::Absent) => true,
            (ExpectationShape::Returns(a), ExpectationShape::Returns(b)) => a.compatible(*b),
            (ExpectationShape::Throws(a), ExpectationShape::Throws(b)) => a == b,
            _ => false,
        }
    }
}

/// The concrete shape of a test case: arity, slot kinds, and outcome kind.
///
/// # Examples
///
/// ```rust
/// use theoria::case::TestCase;
///
/// let case = TestCase::builder("add")
///     .arg(2)
///     .arg(3)
///     .returns(5)
///     .build()
///     .unwrap();
/// let shape = case.shape();
/// assert_eq!(shape.arity(), 2);
/// assert_eq!(shape.to_string(), "(Number, Number) -> Number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseShape {
    slots: Vec<SlotKind>,
    expectation: ExpectationShape,
}

impl CaseShape {
    /// Captures the shape of the given test case.
    pub fn of(case: &TestCase) -> Self {
        let slots = case.args().iter().map(SlotKind::of).collect();
        let expectation = match case.expected() {
            None => ExpectationShape::Absent,
            Some(Expectation::Returns(value)) => ExpectationShape::Returns(SlotKind::of(value)),
            Some(Expectation::Throws(descriptor)) => {
                ExpectationShape::Throws(descriptor.type_name().to_string())
            }
        };
        Self { slots, expectation }
    }

    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[SlotKind] {
        &self.slots
    }

    pub fn expectation(&self) -> &ExpectationShape {
        &self.expectation
    }

    /// Returns true if a case of shape `other` may join a collection
    /// locked to this shape. Arity and outcome kind must match exactly;
    /// slot kinds match pairwise with nil as a wildcard.
    pub fn accepts(&self, other: &CaseShape) -> bool {
        self.slots.len() == other.slots.len()
            && self.expectation.compatible(&other.expectation)
            && self
                .slots
                .iter()
                .zip(other.slots.iter())
                .all(|(a, b)| a.compatible(*b))
    }
}

impl fmt::Display for CaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, ")")?;
        match &self.expectation {
            ExpectationShape::Absent => Ok(()),
            ExpectationShape::Returns(kind) => write!(f, " -> {}", kind),
            ExpectationShape::Throws(type_name) => write!(f, " -> !{}", type_name),
        }
    }
}
