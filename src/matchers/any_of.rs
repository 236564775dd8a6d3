use crate::matchers::{MatchOutcome, Matcher};
use crate::value::Value;

/// A logical-OR combinator over a list of matchers.
///
/// Evaluation walks the wrapped matchers in construction order and stops at
/// the first non-miss result: the first `Match` wins outright, and the first
/// `Undefined` wins with its message if no earlier matcher matched. This is a
/// designed ordering dependency; callers mixing undefined-prone matchers with
/// definitive ones should list the definitive ones first.
///
/// An `AnyOf` over zero matchers is legal: it describes itself as `or()` and
/// never matches anything.
pub struct AnyOf {
    wrapped: Vec<Box<dyn Matcher>>,
}

impl AnyOf {
    pub fn new(wrapped: Vec<Box<dyn Matcher>>) -> Self {
        Self { wrapped }
    }
}

impl Matcher for AnyOf {
    fn description(&self) -> String {
        let descriptions: Vec<String> = self.wrapped.iter().map(|m| m.description()).collect();
        format!("or({})", descriptions.join(", "))
    }

    fn matches(&self, candidate: &Value) -> MatchOutcome {
        for matcher in &self.wrapped {
            match matcher.matches(candidate) {
                MatchOutcome::Match => return MatchOutcome::Match,
                MatchOutcome::Undefined(message) => return MatchOutcome::Undefined(message),
                MatchOutcome::NoMatch => {}
            }
        }
        MatchOutcome::NoMatch
    }
}
