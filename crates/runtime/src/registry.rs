// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration-time registry: declare processes, channels, and bundles,
//! then [`SystemBuilder::build`] freezes them into a [`Registry`] the
//! detector reads through [`DetectorEnv`]. Grounded in the reference
//! library's `PI_CreateProcess` / `PI_CreateChannel` / `PI_CreateBundle`.

use pilot_core::{
    BundleDescriptor, BundleId, BundleUsage, ChannelDescriptor, ChannelId, DetectorEnv,
    PilotError, Rank,
};
use std::collections::HashMap;

struct ProcessSpec {
    name: String,
    argument: i64,
}

/// Accumulates process/channel/bundle declarations before a run starts.
#[derive(Default)]
pub struct SystemBuilder {
    processes: Vec<ProcessSpec>,
    channels: HashMap<ChannelId, ChannelDescriptor>,
    bundles: HashMap<BundleId, BundleDescriptor>,
    next_channel: u32,
    next_bundle: u32,
}

impl SystemBuilder {
    pub fn new() -> Self {
        Self {
            next_channel: 1,
            next_bundle: 1,
            ..Default::default()
        }
    }

    /// Declare a worker process, returning the rank it was assigned.
    /// Ranks are handed out in declaration order, starting at 0.
    pub fn add_process(&mut self, name: impl Into<String>, argument: i64) -> Rank {
        let rank = Rank(self.processes.len() as u32);
        self.processes.push(ProcessSpec {
            name: name.into(),
            argument,
        });
        rank
    }

    /// Declare a unidirectional channel from `producer` to `consumer`.
    pub fn add_channel(&mut self, producer: Rank, consumer: Rank) -> Result<ChannelId, PilotError> {
        if producer == consumer {
            return Err(PilotError::SystemError(format!(
                "channel cannot connect rank {producer} to itself"
            )));
        }
        self.ensure_declared(producer)?;
        self.ensure_declared(consumer)?;

        let id = ChannelId(self.next_channel);
        self.next_channel += 1;
        self.channels
            .insert(id, ChannelDescriptor { id, producer, consumer });
        Ok(id)
    }

    /// Declare a bundle grouping `channels` under one common `endpoint`
    /// rank, used together per `usage` (select/broadcast/gather).
    pub fn add_bundle(
        &mut self,
        usage: BundleUsage,
        endpoint: Rank,
        channels: &[ChannelId],
    ) -> Result<BundleId, PilotError> {
        if channels.is_empty() {
            return Err(PilotError::SystemError(
                "a bundle needs at least one member channel".to_string(),
            ));
        }
        for &member in channels {
            let desc = self.channels.get(&member).ok_or_else(|| {
                PilotError::ObjectIdOutOfRange {
                    object: member.0,
                    detail: "channel not declared with add_channel".to_string(),
                }
            })?;
            let fixed_end = match usage {
                BundleUsage::Select | BundleUsage::Gather => desc.consumer,
                BundleUsage::Broadcast => desc.producer,
            };
            if fixed_end != endpoint {
                return Err(PilotError::SystemError(format!(
                    "channel {member} does not share bundle endpoint rank {endpoint}"
                )));
            }
        }

        let id = BundleId(self.next_bundle);
        self.next_bundle += 1;
        self.bundles.insert(
            id,
            BundleDescriptor {
                id,
                usage,
                endpoint,
                channels: channels.to_vec(),
            },
        );
        Ok(id)
    }

    fn ensure_declared(&self, rank: Rank) -> Result<(), PilotError> {
        if rank.as_usize() >= self.processes.len() {
            return Err(PilotError::ObjectIdOutOfRange {
                object: rank.0,
                detail: "rank not declared with add_process".to_string(),
            });
        }
        Ok(())
    }

    /// Freeze the declared processes, channels, and bundles. After this,
    /// nothing about the registry can change for the life of the run.
    pub fn build(self) -> Registry {
        Registry {
            processes: self.processes,
            channels: self.channels,
            bundles: self.bundles,
        }
    }
}

/// The frozen, read-only process/channel/bundle graph for one run.
pub struct Registry {
    processes: Vec<ProcessSpec>,
    channels: HashMap<ChannelId, ChannelDescriptor>,
    bundles: HashMap<BundleId, BundleDescriptor>,
}

impl Registry {
    pub fn channel_descriptor(&self, id: ChannelId) -> Option<&ChannelDescriptor> {
        self.channels.get(&id)
    }

    pub fn bundle_descriptor(&self, id: BundleId) -> Option<&BundleDescriptor> {
        self.bundles.get(&id)
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}

impl DetectorEnv for Registry {
    fn allocated_processes(&self) -> u32 {
        self.processes.len() as u32
    }

    fn worldsize(&self) -> u32 {
        self.processes.len() as u32
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

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
