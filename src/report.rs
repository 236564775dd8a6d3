//! The failure reporting sink: how assertion call sites and the mock
//! collaborator turn mismatches into [`FailureRecord`]s on the current test.

use std::panic;

use crate::failure::FailureRecord;
use crate::matchers::{MatchOutcome, Matcher};
use crate::state;
use crate::value::Value;

/// Unwind payload for fatal assertion aborts. The per-test recovery boundary
/// recognizes it and does not synthesize a panic record, since the failure
/// was already appended before unwinding began.
pub(crate) struct FatalAssertion;

/// Appends a failure record to the currently running test.
///
/// Panics if no test is running; reporting a failure outside a test lifecycle
/// is a programming error in the caller, not a test failure.
pub fn report_error(file_name: &str, line_number: u32, message: &str) {
    append(FailureRecord::new(file_name, line_number, message));
}

/// Like [`report_error`], but additionally aborts the current test body by
/// unwinding to the per-test recovery boundary. Never returns to the caller.
/// The abort is contained: teardown still runs and sibling tests are
/// unaffected.
pub fn report_fatal_error(file_name: &str, line_number: u32, message: &str) -> ! {
    report_error(file_name, line_number, message);
    panic::panic_any(FatalAssertion);
}

fn append(record: FailureRecord) {
    let state = state::current_test()
        .unwrap_or_else(|| panic!("failure reported outside a running test: {:?}", record));
    state.append(record);
}

/// Assertion severity: whether a mismatch lets the test body keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Record the failure and continue (`expect_that!`).
    Expect,
    /// Record the failure and abort the test body (`assert_that!`).
    Assert,
}

/// Shared implementation behind [`expect_that!`] and [`assert_that!`].
///
/// Not part of the public contract; call the macros, which capture the call
/// site for the failure record.
///
/// [`expect_that!`]: crate::expect_that
/// [`assert_that!`]: crate::assert_that
#[doc(hidden)]
pub fn check_that(
    candidate: &Value,
    matcher: &dyn Matcher,
    user_message: String,
    severity: Severity,
    file_name: &str,
    line_number: u32,
) {
    // An undefined outcome surfaces exactly like a mismatch, with the
    // matcher's explanation folded into the generated message.
    let generated = match matcher.matches(candidate) {
        MatchOutcome::Match => return,
        MatchOutcome::NoMatch => format!(
            "Expected: {}\nActual:   {}",
            matcher.description(),
            candidate
        ),
        MatchOutcome::Undefined(reason) => format!(
            "Expected: {}\nActual:   {}, {}",
            matcher.description(),
            candidate,
            reason
        ),
    };

    append(FailureRecord::new(file_name, line_number, generated).with_user_message(user_message));

    if severity == Severity::Assert {
        panic::panic_any(FatalAssertion);
    }
}

/// Checks `actual` against `matcher`, recording a non-fatal failure on
/// mismatch; the test body continues executing. Optional trailing format
/// arguments become the record's user message.
///
/// ```rust,ignore
/// expect_that!(parsed.len(), equals(3));
/// expect_that!(code, any_of![200, 204], "response for {}", url);
/// ```
#[macro_export]
macro_rules! expect_that {
    ($actual:expr, $matcher:expr $(,)?) => {
        $crate::report::check_that(
            &$crate::value::Value::from($actual),
            &$matcher,
            String::new(),
            $crate::report::Severity::Expect,
            file!(),
            line!(),
        )
    };
    ($actual:expr, $matcher:expr, $($user:tt)+) => {
        $crate::report::check_that(
            &$crate::value::Value::from($actual),
            &$matcher,
            format!($($user)+),
            $crate::report::Severity::Expect,
            file!(),
            line!(),
        )
    };
}

/// Like [`expect_that!`], but a mismatch is fatal: the current test body is
/// aborted immediately (teardown still runs).
#[macro_export]
macro_rules! assert_that {
    ($actual:expr, $matcher:expr $(,)?) => {
        $crate::report::check_that(
            &$crate::value::Value::from($actual),
            &$matcher,
            String::new(),
            $crate::report::Severity::Assert,
            file!(),
            line!(),
        )
    };
    ($actual:expr, $matcher:expr, $($user:tt)+) => {
        $crate::report::check_that(
            &$crate::value::Value::from($actual),
            &$matcher,
            format!($($user)+),
            $crate::report::Severity::Assert,
            file!(),
            line!(),
        )
    };
}
