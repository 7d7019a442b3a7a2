// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The detector's only caller: every process thread funnels its operation
//! events through one shared [`LogRouter`], which timestamps them for the
//! offline `tracing` sink, hands them to the live [`Detector`], and -- the
//! moment a deadlock is diagnosed -- invokes the configured [`FatalAbort`]
//! hook. There is no path back to the caller once that happens (distilled
//! spec §7: detection is terminal).

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::fatal::{FatalAbort, ProcessExitAbort};
use crate::registry::Registry;
use parking_lot::Mutex;
use pilot_core::PilotError;
use pilot_detector::Detector;
use pilot_wire::{split_frames, EventRecord, FrameJoiner};
use std::sync::Arc;

pub struct LogRouter<C: Clock = SystemClock, A: FatalAbort = ProcessExitAbort> {
    detector: Mutex<Detector<Arc<Registry>>>,
    joiner: Mutex<FrameJoiner>,
    config: Config,
    clock: C,
    abort: A,
}

impl<C: Clock, A: FatalAbort> LogRouter<C, A> {
    pub fn new(registry: Arc<Registry>, config: Config, clock: C, abort: A) -> Self {
        Self {
            detector: Mutex::new(Detector::start_with_separator(registry, config.separator)),
            joiner: Mutex::new(FrameJoiner::new()),
            config,
            clock,
            abort,
        }
    }

    /// Called by a [`crate::process::ProcessHandle`] at the entry point of
    /// every Pilot operation, before the blocking transport call.
    pub fn record(&self, record: &EventRecord) {
        self.dispatch_raw(&record.format(self.config.separator));
    }

    /// Feed one already-framed physical line from an external source
    /// (log-tailing, offline replay), joining `+`-continued lines first.
    pub fn ingest_line(&self, raw_line: &str) {
        if let Some(complete) = self.joiner.lock().feed(raw_line) {
            self.dispatch_raw(&complete);
        }
    }

    pub fn pending_events(&self) -> usize {
        self.detector.lock().pending_events()
    }

    pub fn end(&self) -> Result<(), PilotError> {
        self.detector.lock().end()
    }

    fn dispatch_raw(&self, raw: &str) {
        let mut detector = self.detector.lock();
        let before = detector.pending_events();
        let outcome = detector.event(raw);
        let after = detector.pending_events();
        drop(detector);

        match outcome {
            Ok(()) => {
                if self.config.offline_log {
                    let epoch_ms = self.clock.epoch_ms();
                    for line in split_frames(raw, self.config.frame_len) {
                        tracing::info!(epoch_ms, event = line, "pilot event");
                    }
                }
                if after >= self.config.queue_warn_threshold && after > before {
                    tracing::warn!(pending = after, "pilot detector event queue is growing");
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "pilot: deadlock detected");
                self.abort.abort(&err);
            }
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
