//! # Matcher Protocol and Combinators
//!
//! A matcher is a pure predicate-with-description: it can say what it expects
//! and classify a candidate [`Value`] as matching, not matching, or outside
//! the matcher's domain. Matchers are immutable once constructed and safe to
//! evaluate repeatedly against different candidates.
//!
//! The outcome is deliberately tri-state. `Undefined` means "this matcher
//! cannot decide for a candidate of this shape" (say, an ordering matcher fed
//! a string) and always carries an explanatory message; plain hits and misses
//! carry nothing.

use crate::value::Value;

mod any_of;
mod equals;
mod not;
mod relations;

pub use any_of::AnyOf;
pub use equals::{equals, EqualsMatcher};
pub use not::{not, NotMatcher};
pub use relations::{greater_than, less_than, GreaterThan, LessThan};

/// The tri-state result of evaluating a matcher against a candidate.
///
/// The explanatory message lives inside the `Undefined` variant only, so a
/// matcher cannot produce an undefined outcome without explaining itself, and
/// cannot attach a message to an ordinary hit or miss.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The candidate satisfies the matcher.
    Match,
    /// The candidate does not satisfy the matcher.
    NoMatch,
    /// The matcher cannot decide for this candidate; the message says why.
    Undefined(String),
}

impl MatchOutcome {
    /// Builds an `Undefined` outcome. The message must be non-empty.
    pub fn undefined(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "undefined outcomes must carry a message");
        MatchOutcome::Undefined(message)
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Match)
    }
}

/// The capability contract every matcher implements.
pub trait Matcher {
    /// A human-readable description of what the matcher expects, used to
    /// build generated failure messages.
    fn description(&self) -> String;

    /// Evaluates a candidate value.
    fn matches(&self, candidate: &Value) -> MatchOutcome;
}

impl Matcher for Box<dyn Matcher> {
    fn description(&self) -> String {
        (**self).description()
    }

    fn matches(&self, candidate: &Value) -> MatchOutcome {
        (**self).matches(candidate)
    }
}

/// Conversion into a boxed matcher, used by combinators that accept a
/// heterogeneous mix of matchers and raw values.
///
/// Raw values are wrapped with the equality matcher at construction time, so
/// `any_of![1, less_than(0)]` means "equals 1, or is negative".
pub trait IntoMatcher {
    fn into_matcher(self) -> Box<dyn Matcher>;
}

impl IntoMatcher for Box<dyn Matcher> {
    fn into_matcher(self) -> Box<dyn Matcher> {
        self
    }
}

macro_rules! impl_into_matcher_for_matchers {
    ($($matcher:ty),* $(,)?) => {$(
        impl IntoMatcher for $matcher {
            fn into_matcher(self) -> Box<dyn Matcher> {
                Box::new(self)
            }
        }
    )*};
}

impl_into_matcher_for_matchers!(EqualsMatcher, AnyOf, NotMatcher, LessThan, GreaterThan);

macro_rules! impl_into_matcher_for_values {
    ($($value:ty),* $(,)?) => {$(
        impl IntoMatcher for $value {
            fn into_matcher(self) -> Box<dyn Matcher> {
                Box::new(equals(self))
            }
        }
    )*};
}

impl_into_matcher_for_values!(Value, bool, f64, i64, i32, u32, usize, &str, String, Vec<Value>);

/// Builds an [`AnyOf`] combinator from a heterogeneous list of matchers and
/// raw values (raw values are wrapped with [`equals`]).
///
/// # Examples
///
/// ```rust
/// use attest::matchers::{less_than, Matcher};
/// use attest::{any_of, Value};
///
/// let m = any_of![17, less_than(0)];
/// assert!(m.matches(&Value::from(17)).is_match());
/// assert!(m.matches(&Value::from(-3)).is_match());
/// assert!(!m.matches(&Value::from(4)).is_match());
/// ```
#[macro_export]
macro_rules! any_of {
    ($($part:expr),* $(,)?) => {
        $crate::matchers::AnyOf::new(vec![
            $($crate::matchers::IntoMatcher::into_matcher($part)),*
        ])
    };
}
