//! # Test Runner
//!
//! Orchestrates the registered suites: lifecycle hooks in order, one fresh
//! fixture and one fresh [`TestState`](crate::state::TestState) per test
//! method, panic recovery at the per-test boundary, and failure reporting
//! through the host bridge.
//!
//! Scheduling is strictly sequential. Suites run one at a time and methods
//! run one at a time; the process-wide current-test slot depends on that
//! guarantee. Fatal assertions abort one test body, never the run, and there
//! is no timeout: a hung test hangs the run.

use std::any::Any;
use std::cell::RefCell;
use std::env;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bridge::{ConsoleBridge, HostBridge};
use crate::errors::ConfigError;
use crate::failure::FailureRecord;
use crate::report::FatalAssertion;
use crate::state::{self, write_recovered, CurrentTestGuard, TestState};
use crate::suite::{self, SuiteHandle, SuiteSet, TestMethod, TestSuite, RESERVED_LIFECYCLE_NAMES};

/// Environment variable holding the test-name filter pattern.
pub const FILTER_ENV_VAR: &str = "ATTEST_FILTER";

// ============================================================================
// RUN CONFIGURATION
// ============================================================================

/// Options recognized by the runner.
#[derive(Debug, Default)]
pub struct RunConfig {
    /// Tests whose qualified `Suite.method` name does not match are skipped
    /// entirely, their per-test hooks included. `None` runs everything.
    pub filter: Option<Regex>,
}

impl RunConfig {
    /// Runs everything; no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config with a filter pattern.
    pub fn with_filter(pattern: &str) -> Result<Self, ConfigError> {
        let filter = Regex::new(pattern).map_err(|source| ConfigError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            filter: Some(filter),
        })
    }

    /// Reads the filter from [`FILTER_ENV_VAR`]; absent or empty means run
    /// everything.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(FILTER_ENV_VAR) {
            Ok(pattern) if !pattern.is_empty() => Self::with_filter(&pattern),
            _ => Ok(Self::new()),
        }
    }

    fn selects(&self, qualified_name: &str) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter.is_match(qualified_name))
    }
}

/// Aggregate outcome of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Test methods executed (after filtering).
    pub tests_run: usize,
    /// Test methods that contributed at least one failure record.
    pub tests_failed: usize,
    /// Total failure records reported.
    pub failures: usize,
}

impl RunSummary {
    /// True when any test contributed at least one failure record.
    pub fn run_failed(&self) -> bool {
        self.tests_failed > 0
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Runs every suite in the process-wide registry against `bridge`.
///
/// This is the host-bridge entry point; invoke it once from a single test
/// function of the host harness after all suites are registered.
pub fn run_tests(
    bridge: &mut dyn HostBridge,
    config: &RunConfig,
) -> Result<RunSummary, ConfigError> {
    run_suite_set(&suite::registry_snapshot(), bridge, config)
}

/// Convenience entry point: console bridge, filter from the environment.
/// Returns the summary so the caller can fail the host test on
/// [`RunSummary::run_failed`].
pub fn run() -> Result<RunSummary, ConfigError> {
    let mut bridge = ConsoleBridge::stdout();
    let config = RunConfig::from_env()?;
    run_tests(&mut bridge, &config)
}

/// Runs an explicit suite set. Validation happens up front: configuration
/// errors abort the run before any hook or test executes.
pub fn run_suite_set(
    set: &SuiteSet,
    bridge: &mut dyn HostBridge,
    config: &RunConfig,
) -> Result<RunSummary, ConfigError> {
    validate(set)?;

    let _hook_guard = PanicHookGuard::install();
    let mut summary = RunSummary::default();

    for suite in set.suites() {
        let method_names = suite.method_names();
        let selected: Vec<usize> = (0..method_names.len())
            .filter(|&i| config.selects(&format!("{}.{}", suite.name(), method_names[i])))
            .collect();

        // A suite with no selected tests is skipped wholesale, suite-level
        // hooks included.
        if selected.is_empty() {
            continue;
        }

        bridge.suite_started(suite.name());

        // Suite-level hooks are not isolated: they are infrastructure, not
        // test logic, and a panic in one aborts the run.
        suite.set_up_suite();

        for index in selected {
            let test_name = method_names[index];
            bridge.test_started(suite.name(), test_name);

            let failures = suite.run_method(index);

            summary.tests_run += 1;
            if !failures.is_empty() {
                summary.tests_failed += 1;
            }
            for record in &failures {
                summary.failures += 1;
                bridge.report_failure(suite.name(), test_name, record);
            }
        }

        suite.tear_down_suite();
    }

    Ok(summary)
}

fn validate(set: &SuiteSet) -> Result<(), ConfigError> {
    let mut seen_suites = Vec::new();
    for suite in set.suites() {
        let suite_name = suite.name().to_string();
        if seen_suites.contains(&suite_name) {
            return Err(ConfigError::DuplicateSuite { suite: suite_name });
        }

        let mut seen_methods = Vec::new();
        for method in suite.method_names() {
            if RESERVED_LIFECYCLE_NAMES.contains(&method) {
                return Err(ConfigError::ReservedMethodName {
                    suite: suite_name,
                    method: method.to_string(),
                });
            }
            if seen_methods.contains(&method) {
                return Err(ConfigError::DuplicateMethod {
                    suite: suite_name,
                    method: method.to_string(),
                });
            }
            seen_methods.push(method);
        }

        seen_suites.push(suite_name);
    }
    Ok(())
}

// ============================================================================
// PER-TEST EXECUTION
// ============================================================================

/// Runs one test method with full isolation.
///
/// The state machine: install fresh state, build a fresh fixture, run
/// `set_up` and the body behind an inner recovery boundary, then always run
/// `tear_down` and the mock controller's `finish`. A panic in setup or the
/// body becomes exactly one synthesized failure record and does not prevent
/// teardown. Teardown's own panic is not separately isolated; it unwinds to
/// the outer per-test boundary, where it also becomes a record.
pub(crate) fn run_case<S: TestSuite>(method: TestMethod<S>) -> Vec<FailureRecord> {
    let (test_state, _guard) = CurrentTestGuard::install();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let fixture = RefCell::new(S::new_fixture());

        let body = panic::catch_unwind(AssertUnwindSafe(|| {
            fixture.borrow_mut().set_up();
            method(&mut fixture.borrow_mut());
        }));
        if let Err(payload) = body {
            record_recovered_panic(&test_state, payload);
        }

        fixture.borrow_mut().tear_down();

        if let Some(controller) = test_state.mock_controller() {
            controller.finish();
        }
    }));
    if let Err(payload) = outcome {
        record_recovered_panic(&test_state, payload);
    }

    test_state.failure_records()
}

fn record_recovered_panic(test_state: &TestState, payload: Box<dyn Any + Send>) {
    let site = take_last_panic_site();

    // Fatal assertions already appended their record before unwinding.
    if payload.is::<FatalAssertion>() {
        return;
    }

    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };

    let (file_name, line_number) = site.unwrap_or_default();
    test_state.append(FailureRecord::new(
        file_name,
        line_number,
        format!("panic: {}", message),
    ));
}

// ============================================================================
// PANIC ATTRIBUTION
// ============================================================================

// The panic hook records the panic site itself, so recovered panics are
// attributed to the line that panicked rather than by counting stack frames
// from the recovery point.

static LAST_PANIC_SITE: Lazy<RwLock<Option<(String, u32)>>> = Lazy::new(|| RwLock::new(None));

fn take_last_panic_site() -> Option<(String, u32)> {
    write_recovered(&LAST_PANIC_SITE).take()
}

/// Scoped replacement of the process panic hook for the duration of a run.
///
/// While a test is current, the default hook's backtrace printout is
/// suppressed (the panic becomes a failure record instead); panics outside a
/// test, such as in a suite-level hook, are delegated to the previous hook
/// unchanged. Dropping restores the previous hook.
struct PanicHookGuard {
    previous: Arc<dyn Fn(&PanicHookInfo<'_>) + Send + Sync>,
}

impl PanicHookGuard {
    fn install() -> Self {
        let previous: Arc<dyn Fn(&PanicHookInfo<'_>) + Send + Sync> =
            Arc::from(panic::take_hook());
        let delegate = Arc::clone(&previous);
        panic::set_hook(Box::new(move |info| {
            if let Some(location) = info.location() {
                *write_recovered(&LAST_PANIC_SITE) =
                    Some((location.file().to_string(), location.line()));
            }
            if state::current_test().is_none() {
                (delegate.as_ref())(info);
            }
        }));
        Self { previous }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        let previous = Arc::clone(&self.previous);
        drop(panic::take_hook());
        panic::set_hook(Box::new(move |info| (previous.as_ref())(info)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_selects_on_qualified_names() {
        let config = RunConfig::with_filter("^Arithmetic\\.").expect("valid pattern");
        assert!(config.selects("Arithmetic.adds"));
        assert!(!config.selects("Strings.concatenates"));

        let unfiltered = RunConfig::new();
        assert!(unfiltered.selects("Anything.at_all"));
    }

    #[test]
    fn invalid_filter_is_a_config_error() {
        let err = RunConfig::with_filter("(unclosed").expect_err("pattern is invalid");
        assert!(matches!(err, ConfigError::InvalidFilter { .. }));
    }

    #[test]
    fn summary_reports_failure_only_with_failed_tests() {
        let mut summary = RunSummary::default();
        assert!(!summary.run_failed());
        summary.tests_run = 3;
        summary.tests_failed = 1;
        summary.failures = 2;
        assert!(summary.run_failed());
    }
}
