//! The bridge between the runner and whatever hosts it, plus the default
//! console implementation.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::failure::FailureRecord;

/// Handle the runner reports through.
///
/// `report_failure` is called once per discovered failure record; an
/// implementation should mark the overall run as failed on the first call.
/// The started notifications exist for progress output and may be ignored.
pub trait HostBridge {
    fn suite_started(&mut self, _suite: &str) {}

    fn test_started(&mut self, _suite: &str, _test: &str) {}

    fn report_failure(&mut self, suite: &str, test: &str, record: &FailureRecord);
}

/// Default bridge: colored progress and failure text on a terminal stream.
pub struct ConsoleBridge {
    stream: StandardStream,
    run_failed: bool,
}

impl ConsoleBridge {
    pub fn stdout() -> Self {
        Self {
            stream: StandardStream::stdout(ColorChoice::Auto),
            run_failed: false,
        }
    }

    /// True once any failure has been reported.
    pub fn run_failed(&self) -> bool {
        self.run_failed
    }

    // Console output is presentation only; write errors are swallowed rather
    // than turned into test-run failures.
    fn write_failure(&mut self, record: &FailureRecord) -> std::io::Result<()> {
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(self.stream, "{}:{}:", record.file_name, record.line_number)?;
        self.stream.reset()?;
        writeln!(self.stream, "{}", record.generated_message)?;
        if !record.user_message.is_empty() {
            writeln!(self.stream, "{}", record.user_message)?;
        }
        Ok(())
    }
}

impl HostBridge for ConsoleBridge {
    fn suite_started(&mut self, suite: &str) {
        let _ = writeln!(self.stream, "========= {}", suite);
    }

    fn test_started(&mut self, suite: &str, test: &str) {
        let _ = writeln!(self.stream, "==== {}.{}", suite, test);
    }

    fn report_failure(&mut self, _suite: &str, _test: &str, record: &FailureRecord) {
        self.run_failed = true;
        let _ = self.write_failure(record);
    }
}
