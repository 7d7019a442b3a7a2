// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::TransportError;
use crate::transport::Transport;
use parking_lot::{Condvar, Mutex};
use pilot_core::Rank;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// One ordered mailbox for a `(from, to, tag)` triple.
struct Mailbox {
    queue: Mutex<VecDeque<Vec<u8>>>,
    arrived: Condvar,
}

impl Mailbox {
    fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            arrived: Condvar::new(),
        }
    }

    fn send(&self, bytes: Vec<u8>) {
        self.queue.lock().push_back(bytes);
        self.arrived.notify_one();
    }

    fn recv_blocking(&self) -> Vec<u8> {
        let mut guard = self.queue.lock();
        loop {
            if let Some(bytes) = guard.pop_front() {
                return bytes;
            }
            self.arrived.wait(&mut guard);
        }
    }

    fn probe(&self) -> bool {
        !self.queue.lock().is_empty()
    }
}

/// Thread-and-mutex-backed [`Transport`] for running a whole Pilot program
/// inside a single OS process, one thread per declared process. Mailboxes
/// are created lazily on first use and keyed by `(from, to, tag)`, giving
/// exact per-pair FIFO delivery regardless of which pair sends first.
#[derive(Clone, Default)]
pub struct InProcessTransport {
    mailboxes: Arc<Mutex<HashMap<(u32, u32, u32), Arc<Mailbox>>>>,
}

impl InProcessTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn mailbox(&self, from: Rank, to: Rank, tag: u32) -> Arc<Mailbox> {
        let key = (from.0, to.0, tag);
        self.mailboxes
            .lock()
            .entry(key)
            .or_insert_with(|| Arc::new(Mailbox::new()))
            .clone()
    }
}

impl Transport for InProcessTransport {
    fn send(&self, from: Rank, to: Rank, tag: u32, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.mailbox(from, to, tag).send(bytes);
        Ok(())
    }

    fn recv_blocking(&self, from: Rank, to: Rank, tag: u32) -> Result<Vec<u8>, TransportError> {
        Ok(self.mailbox(from, to, tag).recv_blocking())
    }

    fn probe(&self, from: Rank, to: Rank, tag: u32) -> Result<bool, TransportError> {
        Ok(self.mailbox(from, to, tag).probe())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{Transport, TransportError};
    use parking_lot::Mutex;
    use pilot_core::Rank;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// A send recorded by [`FakeTransport`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentMessage {
        pub from: Rank,
        pub to: Rank,
        pub tag: u32,
        pub bytes: Vec<u8>,
    }

    struct FakeState {
        sent: Vec<SentMessage>,
        inbox: VecDeque<Vec<u8>>,
    }

    /// Records every [`Transport::send`] call and serves pre-seeded or
    /// round-robin inbox contents for `recv_blocking`, for tests that want
    /// to drive the runtime's public API without real worker threads.
    #[derive(Clone)]
    pub struct FakeTransport {
        inner: Arc<Mutex<FakeState>>,
    }

    impl Default for FakeTransport {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeState {
                    sent: Vec::new(),
                    inbox: VecDeque::new(),
                })),
            }
        }
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue bytes to be returned by the next `recv_blocking` call.
        pub fn push_inbox(&self, bytes: Vec<u8>) {
            self.inner.lock().inbox.push_back(bytes);
        }

        pub fn sent(&self) -> Vec<SentMessage> {
            self.inner.lock().sent.clone()
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, from: Rank, to: Rank, tag: u32, bytes: Vec<u8>) -> Result<(), TransportError> {
            self.inner.lock().sent.push(SentMessage { from, to, tag, bytes });
            Ok(())
        }

        fn recv_blocking(&self, _from: Rank, _to: Rank, _tag: u32) -> Result<Vec<u8>, TransportError> {
            self.inner
                .lock()
                .inbox
                .pop_front()
                .ok_or(TransportError::Closed)
        }

        fn probe(&self, _from: Rank, _to: Rank, _tag: u32) -> Result<bool, TransportError> {
            Ok(!self.inner.lock().inbox.is_empty())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, SentMessage};

#[cfg(test)]
#[path = "in_process_tests.rs"]
mod tests;
