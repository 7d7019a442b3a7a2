// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code and test-support builders
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::panic))]
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::unwrap_used))]
#![cfg_attr(any(test, feature = "test-support"), allow(clippy::expect_used))]

//! pilot-core: shared identifiers, descriptors, limits, and error types for
//! the Pilot CSP library.

pub mod descriptor;
pub mod env;
pub mod error;
pub mod ids;
pub mod limits;
pub mod macros;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use descriptor::{BundleDescriptor, BundleUsage, ChannelDescriptor};
pub use env::DetectorEnv;
pub use error::{ChainEntry, DeadlockReason, PilotError};
pub use ids::{BundleId, ChannelId, Rank};
pub use limits::{DEFAULT_FRAME_LEN, DEFAULT_SEPARATOR, FRAME_CONTINUATION, MAX_NAMELEN};
#[cfg(any(test, feature = "test-support"))]
pub use test_support::FakeEnv;
