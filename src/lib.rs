// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(any(test, feature = "test-support"), allow(clippy::panic))]
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::unwrap_used))]
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::expect_used))]

//! Pilot: a small CSP-style concurrency library with an online deadlock
//! detector watching every channel and bundle operation as it happens.
//!
//! This crate is a thin facade over the workspace's component crates --
//! `pilot-core` (identifiers, descriptors, errors), `pilot-wire` (the event
//! wire format), `pilot-detector` (the wait-for graph and cycle search),
//! `pilot-transport` (the message-passing substrate), and `pilot-runtime`
//! (the registry, log router, and process API) -- re-exporting the pieces a
//! program actually needs to declare processes, wire channels and bundles,
//! and run.
//!
//! ```no_run
//! use pilot::{Config, SystemBuilder, System, InProcessTransport};
//!
//! let mut builder = SystemBuilder::new();
//! let producer = builder.add_process("producer", 0);
//! let consumer = builder.add_process("consumer", 0);
//! let channel = builder.add_channel(producer, consumer).unwrap();
//! let registry = builder.build();
//!
//! let mut system = System::new(registry, InProcessTransport::new(), Config::default());
//! system.spawn(producer, move |handle| handle.write(channel, &42u32));
//! system.spawn(consumer, move |handle| {
//!     let _value: u32 = handle.read(channel)?;
//!     Ok(())
//! });
//! system.launch().unwrap();
//! ```

pub use pilot_core::{
    BundleDescriptor, BundleId, BundleUsage, ChainEntry, ChannelDescriptor, ChannelId,
    DeadlockReason, DetectorEnv, PilotError, Rank,
};
pub use pilot_detector::Detector;
pub use pilot_runtime::{
    Clock, Config, FatalAbort, LogRouter, ProcessExitAbort, ProcessHandle, Registry, System,
    SystemBuilder, SystemClock, DEADLOCK_EXIT_CODE,
};
pub use pilot_transport::{InProcessTransport, Transport, TransportError};
pub use pilot_wire::{EventClass, EventRecord, FrameJoiner, Opcode};

#[cfg(any(test, feature = "test-support"))]
pub use pilot_runtime::{FakeClock, RecordingAbort};
#[cfg(any(test, feature = "test-support"))]
pub use pilot_transport::FakeTransport;
