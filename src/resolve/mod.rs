//! Boundary adaptation between a data-source provider and the test runner.
//!
//! A provider yields opaque items: test cases, pre-built case rows, flat
//! argument lists, or nothing. [`SourceResolver`] classifies each item and
//! produces the row the runner consumes, resolving the conversion strategy
//! on demand when it was not fixed up front.
//!
//! Strategy discovery is explicit rather than ambient: a suite either
//! implements the [`StrategyHolder`] capability and is registered with
//! [`StrategyRegistry::expose`], or registers a value or probe under its
//! own name at setup time. There is no process-wide registry and no silent
//! default — a suite that never registered anything fails resolution
//! loudly, because masking misconfiguration with a fallback is worse than
//! failing.
//!
//! # Errors
//!
//! All errors in this module are reported via the unified `TheoriaError`
//! type. Classification failures name the provider member and declaring
//! type; resolution failures name the cooperating strategy member and
//! preserve the inner failure, when one exists, as the error source.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::case::{SlotValue, TestCase};
use crate::convert::{to_row, CaseRow, DataStrategy, Row};
use crate::diagnostics::{BoxedCause, ResolutionFailure, TheoriaError};

/// Conventional name of the cooperating strategy member on a suite.
pub const STRATEGY_MEMBER: &str = "DATA_STRATEGY";

/// Capability interface for suites that expose their own conversion
/// strategy. Registering the suite with [`StrategyRegistry::expose`] turns
/// the lookup into a compile-time-checkable dependency.
pub trait StrategyHolder {
    fn data_strategy() -> DataStrategy;
}

/// A registered probe: invoked at resolution time, it either supplies the
/// strategy or fails with a preserved cause.
pub type StrategyProbe = Box<dyn Fn() -> Result<DataStrategy, BoxedCause> + Send + Sync>;

/// Returns the registry key used for a suite type.
pub fn suite_name<S>() -> &'static str {
    type_name::<S>()
}

struct RegisteredMember {
    declared_type: String,
    value: Box<dyn Any + Send + Sync>,
}

/// Explicit registry mapping suite names to their strategy members.
///
/// The registry is a plain value handed to resolvers by reference; nothing
/// here is global or lazily initialized.
///
/// # Examples
///
/// ```rust
/// use theoria::convert::DataStrategy;
/// use theoria::resolve::{SourceResolver, StrategyRegistry};
///
/// let mut registry = StrategyRegistry::new();
/// registry.expose_value("CalculatorSuite", DataStrategy::by_property());
///
/// let resolver = SourceResolver::discovered("sample_cases", "CalculatorSuite", &registry);
/// assert!(resolver.resolve_strategy().is_ok());
/// ```
#[derive(Default)]
pub struct StrategyRegistry {
    members: HashMap<String, RegisteredMember>,
}

impl StrategyRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a suite through its [`StrategyHolder`] capability, keyed
    /// by the suite's type name.
    pub fn expose<S: StrategyHolder + 'static>(&mut self) {
        let probe: StrategyProbe = Box::new(|| Ok(S::data_strategy()));
        self.members.insert(
            suite_name::<S>().to_string(),
            RegisteredMember {
                declared_type: type_name::<DataStrategy>().to_string(),
                value: Box::new(probe),
            },
        );
    }

    /// Registers a plain strategy value under an explicit suite name.
    pub fn expose_value(&mut self, suite: impl Into<String>, strategy: DataStrategy) {
        self.members.insert(
            suite.into(),
            RegisteredMember {
                declared_type: type_name::<DataStrategy>().to_string(),
                value: Box::new(strategy),
            },
        );
    }

    /// Registers a probe invoked at resolution time. A probe that returns
    /// an error surfaces as a resolution failure with the cause preserved.
    pub fn expose_probe<F>(&mut self, suite: impl Into<String>, probe: F)
    where
        F: Fn() -> Result<DataStrategy, BoxedCause> + Send + Sync + 'static,
    {
        let probe: StrategyProbe = Box::new(probe);
        self.members.insert(
            suite.into(),
            RegisteredMember {
                declared_type: type_name::<DataStrategy>().to_string(),
                value: Box::new(probe),
            },
        );
    }

    /// Registers an arbitrary member value. A member whose declared type
    /// is neither a strategy nor a probe fails resolution; this exists so
    /// that misdeclared members surface as configuration errors instead of
    /// being unrepresentable.
    pub fn expose_raw<T: Any + Send + Sync>(&mut self, suite: impl Into<String>, value: T) {
        self.members.insert(
            suite.into(),
            RegisteredMember {
                declared_type: type_name::<T>().to_string(),
                value: Box::new(value),
            },
        );
    }

    pub fn contains(&self, suite: &str) -> bool {
        self.members.contains_key(suite)
    }

    fn member(&self, suite: &str) -> Option<&RegisteredMember> {
        self.members.get(suite)
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut suites: Vec<&String> = self.members.keys().collect();
        suites.sort();
        f.debug_struct("StrategyRegistry")
            .field("suites", &suites)
            .finish()
    }
}

/// Adapts raw items yielded by a provider member into runner rows.
///
/// The resolver is constructed per provider member. It performs one
/// strategy lookup per item that needs one and never memoizes across
/// calls; callers resolving at volume should cache the strategy themselves.
#[derive(Debug)]
pub struct SourceResolver<'r> {
    member: String,
    declaring_type: String,
    fixed: Option<DataStrategy>,
    registry: Option<&'r StrategyRegistry>,
}

impl SourceResolver<'static> {
    /// A resolver with a fixed strategy; no discovery is ever attempted.
    pub fn fixed(
        member: impl Into<String>,
        declaring_type: impl Into<String>,
        strategy: DataStrategy,
    ) -> Self {
        Self {
            member: member.into(),
            declaring_type: declaring_type.into(),
            fixed: Some(strategy),
            registry: None,
        }
    }
}

impl<'r> SourceResolver<'r> {
    /// A resolver that discovers the strategy from the registry under the
    /// declaring suite's name.
    pub fn discovered(
        member: impl Into<String>,
        declaring_type: impl Into<String>,
        registry: &'r StrategyRegistry,
    ) -> Self {
        Self {
            member: member.into(),
            declaring_type: declaring_type.into(),
            fixed: None,
            registry: Some(registry),
        }
    }

    /// Like [`discovered`](Self::discovered), with the declaring type
    /// taken from the suite type itself.
    pub fn discovered_for<S>(member: impl Into<String>, registry: &'r StrategyRegistry) -> Self {
        Self::discovered(member, suite_name::<S>(), registry)
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Resolves the conversion strategy for this provider: the fixed
    /// strategy when one was supplied, otherwise a lookup of the
    /// cooperating member on the declaring suite.
    pub fn resolve_strategy(&self) -> Result<DataStrategy, TheoriaError> {
        if let Some(strategy) = self.fixed {
            return Ok(strategy);
        }

        let Some(member) = self
            .registry
            .and_then(|registry| registry.member(&self.declaring_type))
        else {
            return Err(self.resolution_failed(ResolutionFailure::MemberNotFound, None));
        };

        if let Some(strategy) = member.value.downcast_ref::<DataStrategy>() {
            return Ok(*strategy);
        }

        if let Some(probe) = member.value.downcast_ref::<StrategyProbe>() {
            return probe().map_err(|cause| {
                self.resolution_failed(ResolutionFailure::MemberLookup, Some(cause))
            });
        }

        let cause: BoxedCause = format!(
            "member has declared type {}, expected {}",
            member.declared_type,
            type_name::<DataStrategy>()
        )
        .into();
        Err(self.resolution_failed(ResolutionFailure::MemberLookup, Some(cause)))
    }

    /// Adapts one yielded item into the row handed to the runner.
    ///
    /// Flat rows and argument lists pass through unchanged with no
    /// strategy resolution; an absent item yields an absent row; cases and
    /// case rows are converted under the resolved strategy, including the
    /// expected slot only when the item itself declares an outcome.
    pub fn resolve_item(&self, item: Option<&dyn Any>) -> Result<Option<Row>, TheoriaError> {
        let Some(item) = item else {
            return Ok(None);
        };

        if let Some(row) = item.downcast_ref::<Row>() {
            return Ok(Some(row.clone()));
        }

        if let Some(args) = item.downcast_ref::<Vec<SlotValue>>() {
            return Ok(Some(Row::from(args.clone())));
        }

        if let Some(case) = item.downcast_ref::<Arc<TestCase>>() {
            let strategy = self.resolve_strategy()?;
            return Ok(Some(to_row(case, &strategy)));
        }

        if let Some(case) = item.downcast_ref::<TestCase>() {
            let strategy = self.resolve_strategy()?;
            return Ok(Some(to_row(&Arc::new(case.clone()), &strategy)));
        }

        if let Some(maybe_case) = item.downcast_ref::<Option<Arc<TestCase>>>() {
            let Some(case) = maybe_case else {
                return Err(TheoriaError::NullCase {
                    member: self.member.clone(),
                    declaring_type: self.declaring_type.clone(),
                });
            };
            let strategy = self.resolve_strategy()?;
            return Ok(Some(to_row(case, &strategy)));
        }

        if let Some(case_row) = item.downcast_ref::<CaseRow>() {
            let strategy = self.resolve_strategy()?;
            return Ok(Some(case_row.render(&strategy)));
        }

        Err(TheoriaError::UnsupportedItemShape {
            member: self.member.clone(),
            declaring_type: self.declaring_type.clone(),
        })
    }

    /// Adapts a whole provider yield, skipping absent items. Terminal on
    /// the first classification or resolution failure.
    pub fn resolve_all<'a, I>(&self, items: I) -> Result<Vec<Row>, TheoriaError>
    where
        I: IntoIterator<Item = Option<&'a dyn Any>>,
    {
        let mut rows = Vec::new();
        for item in items {
            if let Some(row) = self.resolve_item(item)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn resolution_failed(
        &self,
        failure: ResolutionFailure,
        cause: Option<BoxedCause>,
    ) -> TheoriaError {
        TheoriaError::StrategyResolutionFailed {
            member: STRATEGY_MEMBER.to_string(),
            declaring_type: self.declaring_type.clone(),
            failure,
            cause,
        }
    }
}
