// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(any(test, feature = "test-support"), allow(clippy::panic))]
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::unwrap_used))]
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::expect_used))]

//! pilot-runtime: wires a declared process/channel/bundle graph to a live
//! [`pilot_detector::Detector`] and a [`pilot_transport::Transport`],
//! giving process bodies a blocking Write/Read/Select/Broadcast/Gather API
//! whose every call is logged through to the detector before it touches the
//! wire, and turning a diagnosed deadlock into a fatal abort.

pub mod clock;
pub mod config;
pub mod fatal;
pub mod process;
pub mod registry;
pub mod router;
pub mod system;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use fatal::{FatalAbort, ProcessExitAbort, DEADLOCK_EXIT_CODE};
pub use process::ProcessHandle;
pub use registry::{Registry, SystemBuilder};
pub use router::LogRouter;
pub use system::System;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
#[cfg(any(test, feature = "test-support"))]
pub use fatal::RecordingAbort;
