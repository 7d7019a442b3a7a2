// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The read-only registry view the detector needs at `start`.
//!
//! This is the seam between the detector (which never mutates the channel
//! or bundle registry) and the configuration-time registry owned by
//! `pilot-runtime`'s `System`. Everything here is immutable for the life of
//! a run.

use crate::descriptor::{BundleDescriptor, ChannelDescriptor};
use crate::ids::{BundleId, ChannelId, Rank};

/// Read-only access to the process/channel/bundle registry.
///
/// `allocated_processes` is the number of Pilot-managed user processes
/// (ranks `0..allocated_processes`); `worldsize` may be larger when the
/// underlying transport reserves extra ranks that never call Pilot
/// operations but can still report exiting.
pub trait DetectorEnv {
    fn allocated_processes(&self) -> u32;
    fn worldsize(&self) -> u32;
    fn allocated_channels(&self) -> u32;
    fn allocated_bundles(&self) -> u32;

    /// `None` when `id` was never registered -- the detector turns this
    /// into a terminal system error rather than indexing blindly.
    fn channel(&self, id: ChannelId) -> Option<&ChannelDescriptor>;
    fn bundle(&self, id: BundleId) -> Option<&BundleDescriptor>;

    /// Friendly name for a process, for traceback and abort messages.
    fn process_name(&self, rank: Rank) -> &str;

    /// The integer argument a process was created with (mirrors the C
    /// library's `PI_CreateProcess` index/argument pair).
    fn process_argument(&self, rank: Rank) -> i64;

    /// True for ranks in `0..allocated_processes`; false for auxiliary
    /// transport ranks that only ever report exiting.
    fn is_user_process(&self, rank: Rank) -> bool {
        rank.0 < self.allocated_processes()
    }
}

impl<T: DetectorEnv + ?Sized> DetectorEnv for std::sync::Arc<T> {
    fn allocated_processes(&self) -> u32 {
        (**self).allocated_processes()
    }

    fn worldsize(&self) -> u32 {
        (**self).worldsize()
    }

    fn allocated_channels(&self) -> u32 {
        (**self).allocated_channels()
    }

    fn allocated_bundles(&self) -> u32 {
        (**self).allocated_bundles()
    }

    fn channel(&self, id: ChannelId) -> Option<&ChannelDescriptor> {
        (**self).channel(id)
    }

    fn bundle(&self, id: BundleId) -> Option<&BundleDescriptor> {
        (**self).bundle(id)
    }

    fn process_name(&self, rank: Rank) -> &str {
        (**self).process_name(rank)
    }

    fn process_argument(&self, rank: Rank) -> i64 {
        (**self).process_argument(rank)
    }
}
