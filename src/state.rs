//! Per-test mutable state and the process-wide current-test slot.
//!
//! The slot exists so assertion call sites and the mock collaborator can
//! report failures without the test body threading a context value through
//! every call. It is safe only because the runner executes tests strictly
//! sequentially; the locks below protect incidental appends (for example a
//! mock callback firing at an arbitrary point), not concurrent tests.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use crate::failure::FailureRecord;

/// The handle a mock subsystem uses to participate in the test lifecycle.
///
/// The runner only ever calls [`finish`](MockController::finish), once per
/// test, after the teardown hook and inside the per-test recovery boundary,
/// so failures the controller reports land in the same record sequence as
/// the test's own. Everything else about mocking is the collaborator's
/// business; it reports errors through [`crate::report::report_error`] and
/// [`crate::report::report_fatal_error`].
pub trait MockController: Send + Sync {
    /// Flush pending expectations, reporting unmet ones as failures.
    fn finish(&self);
}

/// The mutable container of one test execution's accumulated failures.
pub struct TestState {
    failures: RwLock<Vec<FailureRecord>>,
    mock_controller: RwLock<Option<Arc<dyn MockController>>>,
}

static CURRENT_TEST: Lazy<RwLock<Option<Arc<TestState>>>> = Lazy::new(|| RwLock::new(None));

// A panic while a lock is held must not discard the records appended before
// it, so poisoned locks are recovered rather than propagated.
pub(crate) fn read_recovered<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn write_recovered<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TestState {
    pub(crate) fn new() -> Self {
        Self {
            failures: RwLock::new(Vec::new()),
            mock_controller: RwLock::new(None),
        }
    }

    /// Appends one failure record, preserving append order.
    pub fn append(&self, record: FailureRecord) {
        write_recovered(&self.failures).push(record);
    }

    /// Snapshot of the records accumulated so far, in append order.
    pub fn failure_records(&self) -> Vec<FailureRecord> {
        read_recovered(&self.failures).clone()
    }

    pub fn has_failures(&self) -> bool {
        !read_recovered(&self.failures).is_empty()
    }

    /// Attaches a mock controller for the remainder of this test.
    pub fn set_mock_controller(&self, controller: Arc<dyn MockController>) {
        *write_recovered(&self.mock_controller) = Some(controller);
    }

    pub fn mock_controller(&self) -> Option<Arc<dyn MockController>> {
        read_recovered(&self.mock_controller).clone()
    }
}

/// The state of the currently running test, if any.
///
/// Present for exactly the duration of one test's lifecycle (setup through
/// teardown and panic handling); absent between tests and outside the runner.
pub fn current_test() -> Option<Arc<TestState>> {
    read_recovered(&CURRENT_TEST).clone()
}

/// Scoped ownership of the current-test slot.
///
/// Installing creates a fresh [`TestState`] and publishes it; dropping clears
/// the slot again. Clearing happens in `Drop` so it is guaranteed on every
/// exit path, including unwinding out of the per-test boundary.
pub(crate) struct CurrentTestGuard;

impl CurrentTestGuard {
    pub(crate) fn install() -> (Arc<TestState>, CurrentTestGuard) {
        let state = Arc::new(TestState::new());
        *write_recovered(&CURRENT_TEST) = Some(Arc::clone(&state));
        (state, CurrentTestGuard)
    }
}

impl Drop for CurrentTestGuard {
    fn drop(&mut self) {
        *write_recovered(&CURRENT_TEST) = None;
    }
}
