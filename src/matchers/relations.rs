//! Numeric ordering matchers. These are the in-tree producers of undefined
//! outcomes: comparing a non-number against a numeric bound is not a miss,
//! it is a question the matcher cannot answer.

use crate::matchers::{MatchOutcome, Matcher};
use crate::value::Value;

/// Returns a matcher for candidates strictly less than `bound`.
pub fn less_than(bound: impl Into<Value>) -> LessThan {
    LessThan {
        bound: bound.into(),
    }
}

/// Returns a matcher for candidates strictly greater than `bound`.
pub fn greater_than(bound: impl Into<Value>) -> GreaterThan {
    GreaterThan {
        bound: bound.into(),
    }
}

/// See [`less_than`].
#[derive(Debug, Clone)]
pub struct LessThan {
    bound: Value,
}

/// See [`greater_than`].
#[derive(Debug, Clone)]
pub struct GreaterThan {
    bound: Value,
}

fn compare_numeric(
    bound: &Value,
    candidate: &Value,
    satisfied: impl Fn(f64, f64) -> bool,
) -> MatchOutcome {
    let Some(bound) = bound.as_number() else {
        return MatchOutcome::undefined(format!(
            "which requires a numeric bound, not {}",
            bound.type_name()
        ));
    };
    match candidate.as_number() {
        Some(candidate) if satisfied(candidate, bound) => MatchOutcome::Match,
        Some(_) => MatchOutcome::NoMatch,
        None => MatchOutcome::undefined("which is not a number"),
    }
}

impl Matcher for LessThan {
    fn description(&self) -> String {
        format!("less than {}", self.bound)
    }

    fn matches(&self, candidate: &Value) -> MatchOutcome {
        compare_numeric(&self.bound, candidate, |c, b| c < b)
    }
}

impl Matcher for GreaterThan {
    fn description(&self) -> String {
        format!("greater than {}", self.bound)
    }

    fn matches(&self, candidate: &Value) -> MatchOutcome {
        compare_numeric(&self.bound, candidate, |c, b| c > b)
    }
}
