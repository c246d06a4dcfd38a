//! Expected-outcome model for test cases.
//!
//! A test case either carries no outcome, expects a value, or expects an
//! error. Error outcomes are described, not thrown: the descriptor names
//! the error type (and optionally a message fragment) that the system
//! under test is expected to produce.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::case::value::SlotValue;

/// Describes an error the system under test is expected to raise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExpectation {
    type_name: String,
    message: Option<String>,
}

impl ErrorExpectation {
    /// Creates a descriptor for the named error type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: None,
        }
    }

    /// Attaches an expected message fragment to the descriptor.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ErrorExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.type_name, message),
            None => write!(f, "{}", self.type_name),
        }
    }
}

impl From<&str> for ErrorExpectation {
    fn from(type_name: &str) -> Self {
        ErrorExpectation::new(type_name)
    }
}

impl From<String> for ErrorExpectation {
    fn from(type_name: String) -> Self {
        ErrorExpectation::new(type_name)
    }
}

/// Expected outcome of a test case: a result value or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expectation {
    /// The test subject is expected to return this value.
    Returns(SlotValue),
    /// The test subject is expected to raise this error.
    Throws(ErrorExpectation),
}

impl Expectation {
    /// Creates a value expectation.
    pub fn returns(value: impl Into<SlotValue>) -> Self {
        Self::Returns(value.into())
    }

    /// Creates an error expectation.
    pub fn throws(descriptor: impl Into<ErrorExpectation>) -> Self {
        Self::Throws(descriptor.into())
    }

    pub fn is_throws(&self) -> bool {
        matches!(self, Expectation::Throws(_))
    }

    /// Renders the outcome as the row slot it occupies under by-property
    /// conversion: the expected value itself, or the error descriptor.
    pub fn as_slot(&self) -> SlotValue {
        match self {
            Expectation::Returns(value) => value.clone(),
            Expectation::Throws(descriptor) => SlotValue::Error(descriptor.clone()),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Returns(value) => write!(f, "returns {}", value),
            Expectation::Throws(descriptor) => write!(f, "throws {}", descriptor),
        }
    }
}
