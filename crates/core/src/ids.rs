// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small integer identifiers shared by every Pilot crate.
//!
//! Processes, channels, and bundles are identified by plain integers rather
//! than generated ids, mirroring the underlying message transport's rank
//! numbering: a process *is* its rank for the lifetime of the run.

use std::fmt;

/// A user process's rank, in `0..worldsize`.
///
/// Ranks `0..allocated_processes` are Pilot-managed user processes; any
/// higher rank (up to `worldsize`) is an auxiliary transport rank the
/// detector tracks for liveness only (see [`crate::env::DetectorEnv`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(pub u32);

impl Rank {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Rank {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifier for a point-to-point channel, assigned at configuration time.
///
/// Channel ids are 1-based (id 0 is never allocated), matching the C
/// library's convention of reserving 0 as "no channel."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(pub u32);

impl ChannelId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

impl From<u32> for ChannelId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifier for a bundle (a named group of channels sharing one endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BundleId(pub u32);

impl BundleId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

impl From<u32> for BundleId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
