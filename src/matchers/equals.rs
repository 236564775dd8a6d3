use crate::matchers::{MatchOutcome, Matcher};
use crate::value::Value;

/// Returns a matcher that matches candidates structurally equal to `expected`.
///
/// Equality is [`Value`]'s derived equality: deep for lists. This matcher
/// never returns an undefined outcome.
pub fn equals(expected: impl Into<Value>) -> EqualsMatcher {
    EqualsMatcher {
        expected: expected.into(),
    }
}

/// See [`equals`].
#[derive(Debug, Clone)]
pub struct EqualsMatcher {
    expected: Value,
}

impl Matcher for EqualsMatcher {
    fn description(&self) -> String {
        self.expected.to_string()
    }

    fn matches(&self, candidate: &Value) -> MatchOutcome {
        if *candidate == self.expected {
            MatchOutcome::Match
        } else {
            MatchOutcome::NoMatch
        }
    }
}
