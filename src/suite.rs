//! # Suite Definition and Registration
//!
//! A suite is a fixture type implementing [`TestSuite`] plus an ordered list
//! of test methods. Registration is declarative: the [`register_suite!`]
//! macro (or [`SuiteSet::register`]) records `(name, fn(&mut S))` pairs, so
//! there is no runtime reflection and no method-signature surprises; the
//! type system guarantees every registered method takes `&mut S`.
//!
//! The process-wide registry is append-only: it is populated before
//! [`run_tests`](crate::runner::run_tests) is invoked and only read during
//! the run.
//!
//! [`register_suite!`]: crate::register_suite

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::failure::FailureRecord;
use crate::state::{read_recovered, write_recovered};

/// A user-defined grouping of test methods sharing lifecycle hooks.
///
/// `new_fixture` builds the receiver; the runner constructs one fresh
/// instance per test method so state cannot leak between tests of the same
/// suite. All four hooks are optional and default to no-ops.
pub trait TestSuite: 'static {
    /// Builds a fresh receiver instance for one test method.
    fn new_fixture() -> Self;

    /// Runs once before the first test of the suite. Not isolated: a panic
    /// here aborts the whole run.
    fn set_up_suite() {}

    /// Runs once after the last test of the suite. Not isolated.
    fn tear_down_suite() {}

    /// Runs before each test method, on the same fresh fixture.
    fn set_up(&mut self) {}

    /// Runs after each test method, even when the method or `set_up`
    /// panicked.
    fn tear_down(&mut self) {}
}

/// A registered test method: a plain function over the suite's fixture.
pub type TestMethod<S> = fn(&mut S);

/// Hook names that cannot double as test methods.
pub(crate) const RESERVED_LIFECYCLE_NAMES: [&str; 4] =
    ["set_up_suite", "tear_down_suite", "set_up", "tear_down"];

/// Type-erased view of one registered suite, as the runner consumes it.
pub(crate) trait SuiteHandle: Send + Sync {
    fn name(&self) -> &str;
    fn method_names(&self) -> Vec<&'static str>;
    fn set_up_suite(&self);
    fn tear_down_suite(&self);
    /// Runs the method at `index` with full per-test isolation, returning
    /// the failures it accumulated.
    fn run_method(&self, index: usize) -> Vec<FailureRecord>;
}

struct SuiteModel<S: TestSuite> {
    name: String,
    methods: Vec<(&'static str, TestMethod<S>)>,
}

impl<S: TestSuite> SuiteHandle for SuiteModel<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|(name, _)| *name).collect()
    }

    fn set_up_suite(&self) {
        S::set_up_suite();
    }

    fn tear_down_suite(&self) {
        S::tear_down_suite();
    }

    fn run_method(&self, index: usize) -> Vec<FailureRecord> {
        let (_, method) = self.methods[index];
        crate::runner::run_case::<S>(method)
    }
}

/// An explicit, ordered collection of suites.
///
/// [`run_tests`](crate::runner::run_tests) consumes the process-wide set
/// populated by [`register_suite!`](crate::register_suite); embedded runners
/// and this crate's own tests build local sets and hand them to
/// [`run_suite_set`](crate::runner::run_suite_set) instead.
#[derive(Default)]
pub struct SuiteSet {
    suites: Vec<Arc<dyn SuiteHandle>>,
}

impl SuiteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a suite with its test methods, in execution order.
    pub fn register<S: TestSuite>(&mut self, name: &str, methods: &[(&'static str, TestMethod<S>)]) {
        self.suites.push(Arc::new(SuiteModel::<S> {
            name: name.to_string(),
            methods: methods.to_vec(),
        }));
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub(crate) fn suites(&self) -> &[Arc<dyn SuiteHandle>] {
        &self.suites
    }
}

static REGISTRY: Lazy<RwLock<SuiteSet>> = Lazy::new(|| RwLock::new(SuiteSet::new()));

/// Registers a suite into the process-wide set. Prefer the
/// [`register_suite!`](crate::register_suite) macro, which captures method
/// names for you.
pub fn register<S: TestSuite>(name: &str, methods: &[(&'static str, TestMethod<S>)]) {
    write_recovered(&REGISTRY).register::<S>(name, methods);
}

/// Read-only snapshot of the process-wide set, taken at the start of a run.
pub(crate) fn registry_snapshot() -> SuiteSet {
    SuiteSet {
        suites: read_recovered(&REGISTRY).suites.clone(),
    }
}

/// Registers a suite type and its test methods into the process-wide
/// registry.
///
/// ```rust,ignore
/// struct Arithmetic { calculator: Calculator }
///
/// impl TestSuite for Arithmetic {
///     fn new_fixture() -> Self { Arithmetic { calculator: Calculator::new() } }
/// }
///
/// impl Arithmetic {
///     fn adds_small_numbers(&mut self) {
///         expect_that!(self.calculator.add(1, 2), equals(3));
///     }
/// }
///
/// register_suite!(Arithmetic { adds_small_numbers });
/// ```
#[macro_export]
macro_rules! register_suite {
    ($suite:ty { $($method:ident),* $(,)? }) => {
        $crate::suite::register::<$suite>(
            stringify!($suite),
            &[$((stringify!($method), <$suite>::$method as $crate::suite::TestMethod<$suite>)),*],
        )
    };
}
