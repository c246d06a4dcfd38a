//! Unified diagnostic system for the Theoria engine.
//!
//! All failures raised by any stage of the shaping pipeline are represented
//! by [`TheoriaError`]. Every failure is synchronous and terminal: each one
//! is a caller or configuration defect, so nothing here is retried or
//! swallowed, and no fallback strategy is silently substituted for a
//! missing one. Error messages always name the offending member and
//! declaring type where the boundary knows them.
//!
//! [`ErrorKind`] is the type-safe classification mirror of the error
//! variants. Match on it in test code instead of scraping display strings.

use miette::Diagnostic;
use thiserror::Error;

/// Boxed inner failure preserved as an error cause.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Type-safe error classification enum that corresponds to `TheoriaError`
/// variants. This replaces fragile string-based error matching in test code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required test case or yielded item was missing.
    NullCase,
    /// A test case's shape did not match a collection's locked shape.
    InvalidCaseShape,
    /// A batch insertion was attempted with zero elements.
    EmptyInput,
    /// A yielded item could not be classified at the resolver boundary.
    UnsupportedItemShape,
    /// The cooperating strategy member was missing, mistyped, or failed.
    StrategyResolutionFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NullCase => "NullCase",
            ErrorKind::InvalidCaseShape => "InvalidCaseShape",
            ErrorKind::EmptyInput => "EmptyInput",
            ErrorKind::UnsupportedItemShape => "UnsupportedItemShape",
            ErrorKind::StrategyResolutionFailed => "StrategyResolutionFailed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The sub-case of a failed strategy resolution.
///
/// `MemberNotFound` means the declaring type exposed no cooperating member
/// at all. `MemberLookup` means a member existed but could not supply a
/// strategy: it had the wrong declared type, or its probe returned an
/// error. The inner failure is preserved on the error as its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionFailure {
    MemberNotFound,
    MemberLookup,
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionFailure::MemberNotFound => write!(f, "was not found"),
            ResolutionFailure::MemberLookup => write!(f, "failed during lookup"),
        }
    }
}

/// Unified error type for all Theoria failure modes.
#[derive(Debug, Error, Diagnostic)]
pub enum TheoriaError {
    #[error("{member} member of {declaring_type} yielded no test case where one is required")]
    #[diagnostic(
        code(theoria::null_case),
        help("yield a constructed test case, or omit the row from the provider entirely")
    )]
    NullCase {
        member: String,
        declaring_type: String,
    },

    #[error("test case shape {found} does not match the locked shape {expected}")]
    #[diagnostic(
        code(theoria::invalid_case_shape),
        help("a collection holds cases of exactly one shape; build a second collection for the new shape")
    )]
    InvalidCaseShape { expected: String, found: String },

    #[error("an empty batch of test cases cannot be added")]
    #[diagnostic(code(theoria::empty_input))]
    EmptyInput,

    #[error("{member} member of {declaring_type} yielded an item that is not a test case, case row, or argument list")]
    #[diagnostic(
        code(theoria::unsupported_item_shape),
        help("providers must yield test cases, case rows, rows, or flat argument lists")
    )]
    UnsupportedItemShape {
        member: String,
        declaring_type: String,
    },

    #[error("conversion strategy member {member} of {declaring_type} {failure}")]
    #[diagnostic(
        code(theoria::strategy_resolution_failed),
        help("register the suite's strategy in the StrategyRegistry, or construct the resolver with a fixed strategy")
    )]
    StrategyResolutionFailed {
        member: String,
        declaring_type: String,
        failure: ResolutionFailure,
        #[source]
        cause: Option<BoxedCause>,
    },
}

impl TheoriaError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TheoriaError::NullCase { .. } => ErrorKind::NullCase,
            TheoriaError::InvalidCaseShape { .. } => ErrorKind::InvalidCaseShape,
            TheoriaError::EmptyInput => ErrorKind::EmptyInput,
            TheoriaError::UnsupportedItemShape { .. } => ErrorKind::UnsupportedItemShape,
            TheoriaError::StrategyResolutionFailed { .. } => ErrorKind::StrategyResolutionFailed,
        }
    }

    /// Returns the resolution sub-case when this is a strategy failure.
    pub fn resolution_failure(&self) -> Option<ResolutionFailure> {
        match self {
            TheoriaError::StrategyResolutionFailed { failure, .. } => Some(*failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = TheoriaError::EmptyInput;
        assert_eq!(err.kind(), ErrorKind::EmptyInput);

        let err = TheoriaError::InvalidCaseShape {
            expected: "(Number)".to_string(),
            found: "(String)".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidCaseShape);
    }

    #[test]
    fn messages_name_the_offending_member_and_type() {
        let err = TheoriaError::UnsupportedItemShape {
            member: "sample_cases".to_string(),
            declaring_type: "CalculatorSuite".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sample_cases"));
        assert!(msg.contains("CalculatorSuite"));
    }

    #[test]
    fn resolution_sub_cases_are_distinguishable() {
        let not_found = TheoriaError::StrategyResolutionFailed {
            member: "DATA_STRATEGY".to_string(),
            declaring_type: "CalculatorSuite".to_string(),
            failure: ResolutionFailure::MemberNotFound,
            cause: None,
        };
        assert_eq!(
            not_found.resolution_failure(),
            Some(ResolutionFailure::MemberNotFound)
        );
        assert!(not_found.to_string().contains("was not found"));

        let lookup = TheoriaError::StrategyResolutionFailed {
            member: "DATA_STRATEGY".to_string(),
            declaring_type: "CalculatorSuite".to_string(),
            failure: ResolutionFailure::MemberLookup,
            cause: Some("declared type mismatch".into()),
        };
        assert_eq!(
            lookup.resolution_failure(),
            Some(ResolutionFailure::MemberLookup)
        );
        assert!(std::error::Error::source(&lookup).is_some());
    }
}
