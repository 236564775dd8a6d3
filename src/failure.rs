/// One structured unit of test-failure evidence.
///
/// Records are immutable once created and owned by the [`TestState`] that
/// collects them; they are never shared across tests.
///
/// [`TestState`]: crate::state::TestState
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Source file of the assertion call site (or panic site).
    pub file_name: String,
    /// Source line of the assertion call site (or panic site).
    pub line_number: u32,
    /// Framework-produced description of what went wrong.
    pub generated_message: String,
    /// Caller-supplied context, empty when none was given.
    pub user_message: String,
}

impl FailureRecord {
    pub fn new(
        file_name: impl Into<String>,
        line_number: u32,
        generated_message: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            line_number,
            generated_message: generated_message.into(),
            user_message: String::new(),
        }
    }

    pub fn with_user_message(mut self, user_message: impl Into<String>) -> Self {
        self.user_message = user_message.into();
        self
    }
}
