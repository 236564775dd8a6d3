use crate::matchers::{IntoMatcher, MatchOutcome, Matcher};
use crate::value::Value;

/// Returns a matcher that inverts `inner`: hits become misses and misses
/// become hits. Undefined outcomes pass through unchanged, since a matcher
/// that cannot decide cannot be meaningfully negated either.
pub fn not(inner: impl IntoMatcher) -> NotMatcher {
    NotMatcher {
        inner: inner.into_matcher(),
    }
}

/// See [`not`].
pub struct NotMatcher {
    inner: Box<dyn Matcher>,
}

impl Matcher for NotMatcher {
    fn description(&self) -> String {
        format!("not({})", self.inner.description())
    }

    fn matches(&self, candidate: &Value) -> MatchOutcome {
        match self.inner.matches(candidate) {
            MatchOutcome::Match => MatchOutcome::NoMatch,
            MatchOutcome::NoMatch => MatchOutcome::Match,
            undefined @ MatchOutcome::Undefined(_) => undefined,
        }
    }
}
