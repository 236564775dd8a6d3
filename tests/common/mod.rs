//! Shared helpers for the integration tests.

use attest::{FailureRecord, HostBridge};

/// A bridge that records everything the runner tells it, for assertions on
/// ordering and failure attribution.
#[derive(Default)]
pub struct RecordingBridge {
    pub events: Vec<String>,
    pub failures: Vec<(String, FailureRecord)>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualified names of the tests that contributed failures, in report
    /// order.
    pub fn failed_tests(&self) -> Vec<&str> {
        self.failures.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl HostBridge for RecordingBridge {
    fn suite_started(&mut self, suite: &str) {
        self.events.push(format!("suite:{}", suite));
    }

    fn test_started(&mut self, suite: &str, test: &str) {
        self.events.push(format!("test:{}.{}", suite, test));
    }

    fn report_failure(&mut self, suite: &str, test: &str, record: &FailureRecord) {
        self.failures
            .push((format!("{}.{}", suite, test), record.clone()));
    }
}
