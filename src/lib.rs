pub use crate::bridge::{ConsoleBridge, HostBridge};
pub use crate::errors::ConfigError;
pub use crate::failure::FailureRecord;
pub use crate::matchers::{MatchOutcome, Matcher};
pub use crate::report::{report_error, report_fatal_error};
pub use crate::runner::{run, run_suite_set, run_tests, RunConfig, RunSummary};
pub use crate::state::{current_test, MockController, TestState};
pub use crate::suite::{SuiteSet, TestSuite};
pub use crate::value::Value;

pub mod bridge;
pub mod errors;
pub mod failure;
pub mod matchers;
pub mod report;
pub mod runner;
pub mod state;
pub mod suite;
pub mod value;
