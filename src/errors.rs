//! Configuration errors: defects in how the run was set up, as opposed to
//! test failures. These are never isolated per-test; they abort the run
//! before any test executes.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid test filter pattern `{pattern}`")]
    #[diagnostic(
        code(attest::config::invalid_filter),
        help("the filter must be a valid regular expression (regex crate syntax); it is matched against qualified `Suite.method` names")
    )]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("suite `{suite}` registers lifecycle hook name `{method}` as a test method")]
    #[diagnostic(
        code(attest::config::reserved_method),
        help("set_up_suite, tear_down_suite, set_up and tear_down are lifecycle hooks; implement them on the TestSuite trait instead of listing them as tests")
    )]
    ReservedMethodName { suite: String, method: String },

    #[error("suite `{suite}` is registered more than once")]
    #[diagnostic(code(attest::config::duplicate_suite))]
    DuplicateSuite { suite: String },

    #[error("suite `{suite}` registers test method `{method}` more than once")]
    #[diagnostic(code(attest::config::duplicate_method))]
    DuplicateMethod { suite: String, method: String },
}
