// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process handle: the blocking `Write`/`Read`/`Select`/`Broadcast`/
//! `Gather`/`ChannelHasData`/`TrySelect` operations a process body calls,
//! each logging its entry to the shared [`LogRouter`] before touching the
//! transport (distilled spec §4.1: the detector only ever sees the logged
//! event, never the payload).
//!
//! Every channel is modeled as a rendezvous: a data mailbox producer to
//! consumer, and an ack mailbox consumer back to producer, so `write`
//! blocks until the matching `read` has actually taken the value --
//! mirroring the reference library's symmetric blocking semantics, not
//! merely a buffered queue.

use crate::clock::Clock;
use crate::fatal::FatalAbort;
use crate::registry::Registry;
use crate::router::LogRouter;
use pilot_core::{BundleDescriptor, BundleId, BundleUsage, ChannelDescriptor, ChannelId, PilotError, Rank};
use pilot_transport::{Transport, TransportError};
use pilot_wire::{EventClass, EventRecord, Opcode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// How often a blocking select/gather poll sweeps its member channels.
/// The transport has no combined wait primitive, so this is a deliberate
/// busy-poll; real deadlocks are still caught instantly since the *logged*
/// wait is what the detector reasons about, not this loop.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

fn data_tag(channel: ChannelId) -> u32 {
    channel.0 * 2
}

fn ack_tag(channel: ChannelId) -> u32 {
    channel.0 * 2 + 1
}

fn transport_err(e: TransportError) -> PilotError {
    PilotError::SystemError(e.to_string())
}

fn encode<P: Serialize>(value: &P) -> Result<Vec<u8>, PilotError> {
    serde_json::to_vec(value).map_err(|e| PilotError::SystemError(e.to_string()))
}

fn decode<P: DeserializeOwned>(bytes: &[u8]) -> Result<P, PilotError> {
    serde_json::from_slice(bytes).map_err(|e| PilotError::SystemError(e.to_string()))
}

/// A live process's handle onto the channels and bundles it was wired up
/// with, shared log router, and transport. Cheap to clone: everything it
/// holds is an `Arc` or itself `Clone` (the transport, in particular, is
/// required to be cheaply shareable across threads).
#[derive(Clone)]
pub struct ProcessHandle<T: Transport, C: Clock, A: FatalAbort> {
    rank: Rank,
    registry: Arc<Registry>,
    router: Arc<LogRouter<C, A>>,
    transport: T,
    sep: char,
}

impl<T: Transport, C: Clock, A: FatalAbort> ProcessHandle<T, C, A> {
    pub(crate) fn new(
        rank: Rank,
        registry: Arc<Registry>,
        router: Arc<LogRouter<C, A>>,
        transport: T,
        sep: char,
    ) -> Self {
        Self { rank, registry, router, transport, sep }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    fn channel(&self, id: ChannelId) -> Result<&ChannelDescriptor, PilotError> {
        self.registry.channel_descriptor(id).ok_or_else(|| PilotError::ObjectIdOutOfRange {
            object: id.0,
            detail: "channel was never registered".to_string(),
        })
    }

    fn bundle(&self, id: BundleId) -> Result<&BundleDescriptor, PilotError> {
        self.registry.bundle_descriptor(id).ok_or_else(|| PilotError::ObjectIdOutOfRange {
            object: id.0,
            detail: "bundle was never registered".to_string(),
        })
    }

    /// Log entry into an operation. Returns only once the detector has
    /// decided this wait is not yet a proven deadlock -- if it is, the
    /// router's fatal-abort hook has already torn down the process.
    fn log(&self, opcode: Opcode, object: Option<u32>) {
        let record = EventRecord::call(EventClass::Call, self.rank, opcode, object, self.sep);
        self.router.record(&record);
    }

    pub fn write<P: Serialize>(&self, channel: ChannelId, value: &P) -> Result<(), PilotError> {
        let desc = *self.channel(channel)?;
        self.log(Opcode::Write, Some(channel.0));
        let bytes = encode(value)?;
        self.transport.send(self.rank, desc.consumer, data_tag(channel), bytes).map_err(transport_err)?;
        self.transport
            .recv_blocking(desc.consumer, self.rank, ack_tag(channel))
            .map_err(transport_err)?;
        Ok(())
    }

    pub fn read<P: DeserializeOwned>(&self, channel: ChannelId) -> Result<P, PilotError> {
        let desc = *self.channel(channel)?;
        self.log(Opcode::Read, Some(channel.0));
        let bytes = self
            .transport
            .recv_blocking(desc.producer, self.rank, data_tag(channel))
            .map_err(transport_err)?;
        self.transport
            .send(self.rank, desc.producer, ack_tag(channel), Vec::new())
            .map_err(transport_err)?;
        decode(&bytes)
    }

    /// Block until any one member channel's producer has written, then
    /// return which channel it was and the decoded value.
    pub fn select<P: DeserializeOwned>(&self, bundle: BundleId) -> Result<(ChannelId, P), PilotError> {
        let desc = self.bundle(bundle)?.clone();
        self.log(Opcode::Select, Some(bundle.0));
        loop {
            if let Some((member, bytes)) = self.poll_members(&desc.channels)? {
                return Ok((member, decode(&bytes)?));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Non-blocking: if any member channel already has data, consume and
    /// return it immediately; otherwise return `None` without waiting.
    pub fn try_select<P: DeserializeOwned>(&self, bundle: BundleId) -> Result<Option<(ChannelId, P)>, PilotError> {
        let desc = self.bundle(bundle)?.clone();
        self.log(Opcode::TrySelect, Some(bundle.0));
        match self.poll_members(&desc.channels)? {
            Some((member, bytes)) => Ok(Some((member, decode(&bytes)?))),
            None => Ok(None),
        }
    }

    fn poll_members(&self, channels: &[ChannelId]) -> Result<Option<(ChannelId, Vec<u8>)>, PilotError> {
        for &member in channels {
            let chan = *self.channel(member)?;
            if self.transport.probe(chan.producer, self.rank, data_tag(member)).map_err(transport_err)? {
                let bytes = self
                    .transport
                    .recv_blocking(chan.producer, self.rank, data_tag(member))
                    .map_err(transport_err)?;
                self.transport
                    .send(self.rank, chan.producer, ack_tag(member), Vec::new())
                    .map_err(transport_err)?;
                return Ok(Some((member, bytes)));
            }
        }
        Ok(None)
    }

    /// Write the same value to every member channel's consumer, waiting
    /// for every one of them to read it.
    pub fn broadcast<P: Serialize>(&self, bundle: BundleId, value: &P) -> Result<(), PilotError> {
        let desc = self.bundle(bundle)?.clone();
        debug_assert_eq!(desc.usage, BundleUsage::Broadcast);
        self.log(Opcode::Broadcast, Some(bundle.0));
        let bytes = encode(value)?;
        for &member in &desc.channels {
            let chan = *self.channel(member)?;
            self.transport
                .send(self.rank, chan.consumer, data_tag(member), bytes.clone())
                .map_err(transport_err)?;
        }
        for &member in &desc.channels {
            let chan = *self.channel(member)?;
            self.transport
                .recv_blocking(chan.consumer, self.rank, ack_tag(member))
                .map_err(transport_err)?;
        }
        Ok(())
    }

    /// Read one value from every member channel's producer, in member
    /// declaration order.
    pub fn gather<P: DeserializeOwned>(&self, bundle: BundleId) -> Result<Vec<P>, PilotError> {
        let desc = self.bundle(bundle)?.clone();
        debug_assert_eq!(desc.usage, BundleUsage::Gather);
        self.log(Opcode::Gather, Some(bundle.0));
        let mut values = Vec::with_capacity(desc.channels.len());
        for &member in &desc.channels {
            let chan = *self.channel(member)?;
            let bytes = self
                .transport
                .recv_blocking(chan.producer, self.rank, data_tag(member))
                .map_err(transport_err)?;
            self.transport
                .send(self.rank, chan.producer, ack_tag(member), Vec::new())
                .map_err(transport_err)?;
            values.push(decode(&bytes)?);
        }
        Ok(values)
    }

    /// Non-blocking probe: does `channel` already have a value waiting?
    pub fn channel_has_data(&self, channel: ChannelId) -> Result<bool, PilotError> {
        let desc = *self.channel(channel)?;
        self.log(Opcode::HasData, Some(channel.0));
        self.transport.probe(desc.producer, self.rank, data_tag(channel)).map_err(transport_err)
    }

    /// Report this process as finished. Called automatically by
    /// [`crate::system::System::launch`] once the process body returns, but
    /// exposed for bodies that want to exit early.
    pub fn finish(&self) {
        let record = EventRecord::call(EventClass::Pilot, self.rank, Opcode::Finish, None, self.sep);
        self.router.record(&record);
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
