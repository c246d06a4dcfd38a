use std::fmt;
use std::sync::Arc;

use im::HashMap;
use serde::{Deserialize, Serialize};

use crate::case::expectation::ErrorExpectation;
use crate::case::TestCase;

/// Represents one untyped argument slot in a parameter row.
///
/// # Examples
///
/// ```rust
/// use theoria::case::value::SlotValue;
/// let n = SlotValue::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let s = SlotValue::String("hello".to_string());
/// assert_eq!(s.type_name(), "String");
/// let nil = SlotValue::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SlotValue {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<SlotValue>),
    Map(HashMap<String, SlotValue>),
    /// An expected-error descriptor occupying the expected slot of a row.
    Error(ErrorExpectation),
    /// A whole test case, as produced by by-reference conversion.
    Case(Arc<TestCase>),
}

impl SlotValue {
    /// Returns the type name of the slot value as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use theoria::case::value::SlotValue;
    /// let v = SlotValue::Bool(true);
    /// assert_eq!(v.type_name(), "Bool");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            SlotValue::Nil => "Nil",
            SlotValue::Bool(_) => "Bool",
            SlotValue::Number(_) => "Number",
            SlotValue::String(_) => "String",
            SlotValue::List(_) => "List",
            SlotValue::Map(_) => "Map",
            SlotValue::Error(_) => "Error",
            SlotValue::Case(_) => "Case",
        }
    }

    /// Returns true if the value is Nil.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use theoria::case::value::SlotValue;
    /// assert!(SlotValue::Nil.is_nil());
    /// assert!(!SlotValue::Number(1.0).is_nil());
    /// ```
    pub fn is_nil(&self) -> bool {
        matches!(self, SlotValue::Nil)
    }

    /// Returns the contained number if this is a Number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SlotValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SlotValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained string if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SlotValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained test case if this is a Case value.
    pub fn as_case(&self) -> Option<&Arc<TestCase>> {
        match self {
            SlotValue::Case(case) => Some(case),
            _ => None,
        }
    }

    /// Returns the contained error descriptor if this is an Error value.
    pub fn as_error(&self) -> Option<&ErrorExpectation> {
        match self {
            SlotValue::Error(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Nil => write!(f, "nil"),
            SlotValue::Bool(b) => write!(f, "{}", b),
            SlotValue::Number(n) => write!(f, "{}", n),
            SlotValue::String(s) => write!(f, "{:?}", s),
            SlotValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            SlotValue::Map(entries) => {
                // im::HashMap iteration order is unspecified; sort keys so
                // display output stays deterministic.
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, entries[*key])?;
                }
                write!(f, "}}")
            }
            SlotValue::Error(descriptor) => write!(f, "{}", descriptor),
            SlotValue::Case(case) => write!(f, "{}", case.name()),
        }
    }
}

impl From<bool> for SlotValue {
    fn from(value: bool) -> Self {
        SlotValue::Bool(value)
    }
}

impl From<f64> for SlotValue {
    fn from(value: f64) -> Self {
        SlotValue::Number(value)
    }
}

impl From<i32> for SlotValue {
    fn from(value: i32) -> Self {
        SlotValue::Number(f64::from(value))
    }
}

impl From<i64> for SlotValue {
    fn from(value: i64) -> Self {
        SlotValue::Number(value as f64)
    }
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        SlotValue::String(value.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(value: String) -> Self {
        SlotValue::String(value)
    }
}

impl From<Vec<SlotValue>> for SlotValue {
    fn from(value: Vec<SlotValue>) -> Self {
        SlotValue::List(value)
    }
}

impl From<ErrorExpectation> for SlotValue {
    fn from(value: ErrorExpectation) -> Self {
        SlotValue::Error(value)
    }
}

impl From<Arc<TestCase>> for SlotValue {
    fn from(value: Arc<TestCase>) -> Self {
        SlotValue::Case(value)
    }
}

impl<T: Into<SlotValue>> From<Option<T>> for SlotValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => SlotValue::Nil,
        }
    }
}
