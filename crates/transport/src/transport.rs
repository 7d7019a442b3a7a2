// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::TransportError;
use pilot_core::Rank;

/// The message-passing substrate Pilot channels are built over.
///
/// Guarantees required of any implementation (distilled spec §1/§5): each
/// process has a stable integer rank, delivery between a given
/// `(from, to, tag)` triple is FIFO, and `probe` never blocks.
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(&self, from: Rank, to: Rank, tag: u32, bytes: Vec<u8>) -> Result<(), TransportError>;

    /// Block the calling thread until a message addressed to `(from, to, tag)`
    /// is available, then return it.
    fn recv_blocking(&self, from: Rank, to: Rank, tag: u32) -> Result<Vec<u8>, TransportError>;

    /// Non-blocking: does a message already await delivery on this triple?
    fn probe(&self, from: Rank, to: Rank, tag: u32) -> Result<bool, TransportError>;
}
