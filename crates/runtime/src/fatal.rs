// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detection is terminal (distilled spec §7): there is no recovery path,
//! so a diagnosed deadlock has to bring the whole program down, not just
//! return an error to the one process that happened to trigger it.

use pilot_core::PilotError;

/// Process exit code used for a diagnosed deadlock, matching the reference
/// library's `PI_DEADLOCK` error code.
pub const DEADLOCK_EXIT_CODE: i32 = 24;

/// What to do once the detector has diagnosed a deadlock.
pub trait FatalAbort: Clone + Send + Sync + 'static {
    fn abort(&self, error: &PilotError) -> !;
}

/// Prints the traceback to stderr and terminates the process, matching the
/// reference library's `PI_Abort`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExitAbort;

impl FatalAbort for ProcessExitAbort {
    fn abort(&self, error: &PilotError) -> ! {
        eprintln!("{error}");
        std::process::exit(DEADLOCK_EXIT_CODE);
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{FatalAbort, PilotError};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records the aborting error instead of exiting the process, for tests
    /// that need to observe a fatal abort without tearing down the test
    /// runner. Still diverges (the trait requires it): it panics with the
    /// recorded message so callers can assert via `catch_unwind`.
    #[derive(Clone, Default)]
    pub struct RecordingAbort {
        last: Arc<Mutex<Option<String>>>,
    }

    impl RecordingAbort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last_message(&self) -> Option<String> {
            self.last.lock().clone()
        }
    }

    impl FatalAbort for RecordingAbort {
        fn abort(&self, error: &PilotError) -> ! {
            let message = error.to_string();
            *self.last.lock() = Some(message.clone());
            panic!("pilot: fatal abort recorded (test-support): {message}");
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::RecordingAbort;

#[cfg(test)]
#[path = "fatal_tests.rs"]
mod tests;
