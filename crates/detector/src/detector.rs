// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The detector's three-phase lifecycle (`start` → `event*` → `end`) and
//! the algorithmic heart of the library: `make_depend`, `remove_depends`,
//! and event dispatch (distilled spec §4.2, §4.4, §4.5).

use crate::channels::ChannelTable;
use crate::cycle::is_cycle;
use crate::matrix::{DependencyKind, Matrix};
use crate::processes::ProcessTable;
use crate::queue::EventQueue;
use pilot_core::{BundleId, ChainEntry, ChannelId, DeadlockReason, DetectorEnv, PilotError, Rank};
use pilot_wire::{EventRecord, Opcode};

/// Result of attempting to install a dependency via [`Detector::make_depend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MakeDependOutcome {
    /// The dependency was created; the subject is now waiting on it.
    Installed,
    /// Not created — the target has exited, or is doing something
    /// inconsistent that another bundle member may still resolve.
    Dropped,
    /// A matching select/write pair was found and both sides cleared.
    Matched,
}

/// The online deadlock detector.
///
/// Owns the dependency matrix, process table, channel usage table, and
/// event queue exclusively — nothing else in the process ever mutates
/// them, matching distilled spec §5's "no shared memory between user
/// processes and the detector."
pub struct Detector<E: DetectorEnv> {
    env: E,
    matrix: Matrix,
    processes: ProcessTable,
    channels: ChannelTable,
    queue: EventQueue,
    sep: char,
}

impl<E: DetectorEnv> Detector<E> {
    /// Start the detector over the given registry, using the default
    /// (tab) field separator.
    pub fn start(env: E) -> Self {
        Self::start_with_separator(env, pilot_core::DEFAULT_SEPARATOR)
    }

    pub fn start_with_separator(env: E, sep: char) -> Self {
        let allocated_processes = env.allocated_processes() as usize;
        let worldsize = env.worldsize() as usize;
        let allocated_channels = env.allocated_channels() as usize;
        Self {
            matrix: Matrix::new(allocated_processes),
            processes: ProcessTable::new(worldsize),
            channels: ChannelTable::new(allocated_channels),
            queue: EventQueue::new(),
            env,
            sep,
        }
    }

    /// Consume one event string: parse it, enqueue it, then repeatedly
    /// scan the queue for the earliest event whose subject is running,
    /// restarting the scan after every successful dispatch (distilled
    /// spec §4.5's restart-on-progress discipline).
    pub fn event(&mut self, text: &str) -> Result<(), PilotError> {
        let record = EventRecord::parse(text, self.sep)?;
        if record.subject.as_usize() >= self.processes.len() {
            return Err(PilotError::ObjectIdOutOfRange {
                object: record.subject.0,
                detail: "event subject rank exceeds the declared world size".to_string(),
            });
        }
        self.queue.push(record);

        loop {
            let Some(idx) = self
                .queue
                .find_ready(|r| self.processes.state(r.subject.as_usize()).is_run())
            else {
                break;
            };
            let record = self.queue.record_at(idx).clone();
            self.dispatch(&record)?;
            self.queue.mark_handled(idx);
            if self.queue.compact() == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Number of events retained (unhandled, subject still blocked). Used by
    /// `pilot-runtime`'s log router to warn when the queue is growing
    /// unboundedly instead of draining.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Flush the queue; every process must have finished for it to be
    /// empty, otherwise something is structurally wrong.
    pub fn end(&mut self) -> Result<(), PilotError> {
        if self.queue.compact() != 0 {
            return Err(PilotError::SystemError(
                "event queue not empty at end of run".to_string(),
            ));
        }
        Ok(())
    }

    fn abort(
        &self,
        offender: Rank,
        operation: impl Into<String>,
        reason: DeadlockReason,
        chain: Vec<ChainEntry>,
    ) -> PilotError {
        PilotError::Deadlock {
            reason,
            offender,
            offender_name: self.env.process_name(offender).to_string(),
            offender_argument: self.env.process_argument(offender),
            operation: operation.into(),
            chain,
        }
    }

    /// Look up a channel by the object id parsed from event text, turning
    /// an out-of-range id into the terminal system error distilled spec §7
    /// class 2 calls for, rather than indexing blindly.
    fn channel_or_err(&self, id: u32) -> Result<pilot_core::ChannelDescriptor, PilotError> {
        self.env
            .channel(ChannelId(id))
            .copied()
            .ok_or_else(|| PilotError::ObjectIdOutOfRange {
                object: id,
                detail: "channel id in event text was never registered".to_string(),
            })
    }

    fn bundle_or_err(&self, id: u32) -> Result<pilot_core::BundleDescriptor, PilotError> {
        self.env
            .bundle(BundleId(id))
            .cloned()
            .ok_or_else(|| PilotError::ObjectIdOutOfRange {
                object: id,
                detail: "bundle id in event text was never registered".to_string(),
            })
    }

    fn dispatch(&mut self, ev: &EventRecord) -> Result<(), PilotError> {
        let p = ev.subject.as_usize();
        let object = || {
            ev.object
                .ok_or_else(|| PilotError::MalformedEvent(ev.raw.clone()))
        };

        match ev.opcode {
            Opcode::Write => {
                let chan = self.channel_or_err(object()?)?;
                let (consumer, id) = (chan.consumer, chan.id.0);
                self.make_depend(p, consumer.as_usize(), id, DependencyKind::AwaitingRead, &ev.raw)?;
            }
            Opcode::Read => {
                let chan = self.channel_or_err(object()?)?;
                let (producer, id) = (chan.producer, chan.id.0);
                self.make_depend(p, producer.as_usize(), id, DependencyKind::AwaitingWrite, &ev.raw)?;
            }
            Opcode::Select => {
                let bundle = self.bundle_or_err(object()?)?;
                let mut countdeps = 0u32;
                for chan_id in &bundle.channels {
                    let chan = self.channel_or_err(chan_id.0)?;
                    let outcome = self.make_depend(
                        p,
                        chan.producer.as_usize(),
                        chan.id.0,
                        DependencyKind::AwaitingAnyProducer,
                        &ev.raw,
                    )?;
                    match outcome {
                        MakeDependOutcome::Matched => {
                            countdeps = 1;
                            break;
                        }
                        MakeDependOutcome::Installed => countdeps += 1,
                        MakeDependOutcome::Dropped => {}
                    }
                }
                if countdeps == 0 {
                    return Err(self.abort(
                        ev.subject,
                        ev.raw.clone(),
                        DeadlockReason::SelectUnfulfillable,
                        Vec::new(),
                    ));
                }
            }
            Opcode::Broadcast => {
                let bundle = self.bundle_or_err(object()?)?;
                for chan_id in &bundle.channels {
                    let chan = self.channel_or_err(chan_id.0)?;
                    self.make_depend(
                        p,
                        chan.consumer.as_usize(),
                        chan.id.0,
                        DependencyKind::AwaitingRead,
                        &ev.raw,
                    )?;
                }
            }
            Opcode::Gather => {
                let bundle = self.bundle_or_err(object()?)?;
                for chan_id in &bundle.channels {
                    let chan = self.channel_or_err(chan_id.0)?;
                    self.make_depend(
                        p,
                        chan.producer.as_usize(),
                        chan.id.0,
                        DependencyKind::AwaitingWrite,
                        &ev.raw,
                    )?;
                }
            }
            Opcode::HasData | Opcode::TrySelect => {
                // Non-blocking probes have no deadlock implications.
            }
            Opcode::Finish => {
                self.remove_depends(p)?;
            }
        }
        Ok(())
    }

    /// The algorithmic heart of the detector: install a dependency from
    /// `p` onto `q` over channel `c`, reacting to whatever `q` is already
    /// waiting on. `trigger_text` is the verbatim event text that caused
    /// this call, used for traceback if `p` transitions from running to
    /// blocked.
    fn make_depend(
        &mut self,
        p: usize,
        q: usize,
        c: u32,
        kind: DependencyKind,
        trigger_text: &str,
    ) -> Result<MakeDependOutcome, PilotError> {
        // 1. Dead target.
        if self.processes.state(q).is_dead() {
            if kind == DependencyKind::AwaitingAnyProducer {
                return Ok(MakeDependOutcome::Dropped);
            }
            return Err(self.abort(
                Rank(p as u32),
                trigger_text.to_string(),
                DeadlockReason::PeerExited,
                Vec::new(),
            ));
        }

        // 2. No symmetric wait exists yet: install fresh and search for a cycle.
        if self.matrix.get(q, p).is_none() {
            self.matrix.set(p, q, kind);
            self.channels.set(c, Rank(p as u32));
            self.processes.block(p, || trigger_text.to_string());

            if kind == DependencyKind::AwaitingAnyProducer {
                let found = is_cycle(&mut self.matrix, &self.processes, &self.env, q, p, None);
                return Ok(if found {
                    MakeDependOutcome::Dropped
                } else {
                    MakeDependOutcome::Installed
                });
            }

            let mut chain = Vec::new();
            let found = is_cycle(
                &mut self.matrix,
                &self.processes,
                &self.env,
                q,
                p,
                Some(&mut chain),
            );
            if found {
                let cause = self
                    .processes
                    .cause(p)
                    .unwrap_or(trigger_text)
                    .to_string();
                return Err(self.abort(Rank(p as u32), cause, DeadlockReason::CircularWait, chain));
            }
            return Ok(MakeDependOutcome::Installed);
        }

        // 3. Symmetric wait exists on the same channel.
        if self.channels.holder(c) == Some(Rank(q as u32)) {
            let Some(existing) = self.matrix.get(q, p) else {
                return Err(PilotError::SystemError(format!(
                    "channel {c} held by process {q} but no symmetric wait on process {p}"
                )));
            };
            let sum = existing.code() + kind.code();
            match sum {
                0 => {
                    self.matrix.clear(q, p);
                    self.channels.clear(c);
                    self.processes.unblock_one(q);
                    return Ok(MakeDependOutcome::Matched);
                }
                -1 => {
                    let selector = if kind == DependencyKind::AwaitingAnyProducer { p } else { q };
                    self.matrix.clear_row(selector);
                    self.channels.clear_all_held_by(Rank(selector as u32));

                    if selector == p {
                        self.processes.force_run(p);
                        return Ok(MakeDependOutcome::Matched);
                    }
                    self.processes.force_run(q);
                    return self.make_depend(p, q, c, kind, trigger_text);
                }
                _ => {
                    return Err(PilotError::SystemError(format!(
                        "impossible dependency sum {sum} between processes {p} and {q}"
                    )));
                }
            }
        }

        // 4. Symmetric wait exists on a different channel: only legitimate
        // if one side is a select, since another bundle member could still
        // satisfy it.
        if kind == DependencyKind::AwaitingAnyProducer {
            return Ok(MakeDependOutcome::Dropped);
        }

        if self.matrix.get(q, p) == Some(DependencyKind::AwaitingAnyProducer) {
            self.matrix.clear(q, p);
            let became_run = self.processes.unblock_one(q);
            if became_run {
                return Err(self.abort(
                    Rank(p as u32),
                    trigger_text.to_string(),
                    DeadlockReason::EarlierSelectUnfulfillable,
                    Vec::new(),
                ));
            }
            return self.make_depend(p, q, c, kind, trigger_text);
        }

        Err(self.abort(
            Rank(p as u32),
            trigger_text.to_string(),
            DeadlockReason::DeadlyEmbrace,
            Vec::new(),
        ))
    }

    /// Remove all dependencies a now-exited process `q` was participating
    /// in (distilled spec §4.4).
    fn remove_depends(&mut self, q: usize) -> Result<(), PilotError> {
        self.processes.mark_dead(q);

        if q >= self.env.allocated_processes() as usize {
            // Auxiliary transport rank; never appears in the matrix.
            return Ok(());
        }

        for p in 0..self.env.allocated_processes() as usize {
            let Some(kind) = self.matrix.get(p, q) else {
                continue;
            };
            match kind {
                DependencyKind::AwaitingAnyProducer => {
                    self.matrix.clear(p, q);
                    let still_selectable = self
                        .matrix
                        .row(p)
                        .any(|(_, k)| k == DependencyKind::AwaitingAnyProducer);
                    if !still_selectable {
                        let cause = self.processes.cause(p).unwrap_or_default().to_string();
                        return Err(self.abort(
                            Rank(q as u32),
                            cause,
                            DeadlockReason::PeerExitedWithHungWait,
                            Vec::new(),
                        ));
                    }
                }
                DependencyKind::AwaitingRead | DependencyKind::AwaitingWrite => {
                    let cause = self.processes.cause(p).unwrap_or_default().to_string();
                    return Err(self.abort(
                        Rank(q as u32),
                        cause,
                        DeadlockReason::PeerExitedWithHungWait,
                        Vec::new(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
