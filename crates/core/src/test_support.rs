// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`DetectorEnv`] for tests: a fixed registry with no launching
//! or transport behind it, just the data the detector reads.

use crate::descriptor::{BundleDescriptor, BundleUsage, ChannelDescriptor};
use crate::env::DetectorEnv;
use crate::ids::{BundleId, ChannelId, Rank};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct ProcessMeta {
    name: String,
    argument: i64,
}

/// Builder for a fake registry, used by detector and runtime unit tests to
/// stand up a small process/channel/bundle graph without a real transport.
#[derive(Debug, Default)]
pub struct FakeEnv {
    processes: Vec<ProcessMeta>,
    worldsize: u32,
    channels: HashMap<ChannelId, ChannelDescriptor>,
    bundles: HashMap<BundleId, BundleDescriptor>,
}

impl FakeEnv {
    pub fn new(process_names: &[&str]) -> Self {
        let processes: Vec<_> = process_names
            .iter()
            .enumerate()
            .map(|(i, name)| ProcessMeta {
                name: name.to_string(),
                argument: i as i64,
            })
            .collect();
        let worldsize = processes.len() as u32;
        Self {
            processes,
            worldsize,
            channels: HashMap::new(),
            bundles: HashMap::new(),
        }
    }

    /// Reserve additional auxiliary (non-user) transport ranks beyond the
    /// user processes, which only ever report exiting.
    pub fn with_extra_ranks(mut self, extra: u32) -> Self {
        self.worldsize += extra;
        self
    }

    pub fn channel(mut self, id: u32, producer: u32, consumer: u32) -> Self {
        let id = ChannelId(id);
        self.channels.insert(
            id,
            ChannelDescriptor {
                id,
                producer: Rank(producer),
                consumer: Rank(consumer),
            },
        );
        self
    }

    pub fn bundle(mut self, id: u32, usage: BundleUsage, endpoint: u32, channels: &[u32]) -> Self {
        let id = BundleId(id);
        self.bundles.insert(
            id,
            BundleDescriptor {
                id,
                usage,
                endpoint: Rank(endpoint),
                channels: channels.iter().copied().map(ChannelId).collect(),
            },
        );
        self
    }
}

impl DetectorEnv for FakeEnv {
    fn allocated_processes(&self) -> u32 {
        self.processes.len() as u32
    }

    fn worldsize(&self) -> u32 {
        self.worldsize
    }

    fn allocated_channels(&self) -> u32 {
        self.channels.len() as u32
    }

    fn allocated_bundles(&self) -> u32 {
        self.bundles.len() as u32
    }

    fn channel(&self, id: ChannelId) -> Option<&ChannelDescriptor> {
        self.channels.get(&id)
    }

    fn bundle(&self, id: BundleId) -> Option<&BundleDescriptor> {
        self.bundles.get(&id)
    }

    fn process_name(&self, rank: Rank) -> &str {
        &self.processes[rank.as_usize()].name
    }

    fn process_argument(&self, rank: Rank) -> i64 {
        self.processes[rank.as_usize()].argument
    }
}
