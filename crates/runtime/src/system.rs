// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-program assembly: declare processes and channels with a
//! [`SystemBuilder`], attach a body to each process, then [`System::launch`]
//! spawns one OS thread per process and blocks until every one of them has
//! returned (or a deadlock has aborted the run).

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::fatal::{FatalAbort, ProcessExitAbort};
use crate::process::ProcessHandle;
use crate::registry::Registry;
use crate::router::LogRouter;
use pilot_core::{PilotError, Rank};
use pilot_transport::Transport;
use std::sync::Arc;

type Body<T, C, A> = Box<dyn FnOnce(ProcessHandle<T, C, A>) -> Result<(), PilotError> + Send>;

/// A fully wired Pilot program, ready to run.
///
/// `launch` hands every process `Err` propagation only for non-deadlock
/// failures (malformed input, transport errors): with the default
/// [`ProcessExitAbort`] hook, a diagnosed deadlock terminates the process
/// directly and `launch` never returns at all. Swap in
/// [`crate::fatal::RecordingAbort`] (via a custom `System::with_abort`) to
/// observe a deadlock as an unwind instead, as the test suite does.
pub struct System<T: Transport, C: Clock = SystemClock, A: FatalAbort = ProcessExitAbort> {
    registry: Arc<Registry>,
    router: Arc<LogRouter<C, A>>,
    transport: T,
    sep: char,
    bodies: Vec<(Rank, Body<T, C, A>)>,
}

impl<T: Transport> System<T, SystemClock, ProcessExitAbort> {
    pub fn new(registry: Registry, transport: T, config: Config) -> Self {
        Self::with_clock_and_abort(registry, transport, config, SystemClock, ProcessExitAbort)
    }
}

impl<T: Transport, C: Clock, A: FatalAbort> System<T, C, A> {
    pub fn with_clock_and_abort(registry: Registry, transport: T, config: Config, clock: C, abort: A) -> Self {
        let sep = config.separator;
        let registry = Arc::new(registry);
        let router = Arc::new(LogRouter::new(registry.clone(), config, clock, abort));
        Self { registry, router, transport, sep, bodies: Vec::new() }
    }

    /// Attach a process body to the rank `SystemBuilder::add_process`
    /// returned for it. Every declared rank needs exactly one body before
    /// `launch`.
    pub fn spawn(
        &mut self,
        rank: Rank,
        body: impl FnOnce(ProcessHandle<T, C, A>) -> Result<(), PilotError> + Send + 'static,
    ) {
        self.bodies.push((rank, Box::new(body)));
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run every attached body on its own OS thread, each automatically
    /// reporting `Finish` once its body returns -- regardless of whether it
    /// returned `Ok` or `Err` -- so a body that bails out early never leaves
    /// a dependent peer waiting on a process the detector still thinks is
    /// alive.
    pub fn launch(self) -> Result<(), PilotError>
    where
        T: 'static,
        C: 'static,
        A: 'static,
    {
        let declared = self.registry.process_count();
        if self.bodies.len() != declared {
            return Err(PilotError::SystemError(format!(
                "{} of {declared} declared processes have an attached body",
                self.bodies.len()
            )));
        }

        let mut workers = Vec::with_capacity(self.bodies.len());
        for (rank, body) in self.bodies {
            let handle = ProcessHandle::new(rank, self.registry.clone(), self.router.clone(), self.transport.clone(), self.sep);
            let finisher = handle.clone();
            workers.push(std::thread::spawn(move || {
                let outcome = body(handle);
                finisher.finish();
                outcome
            }));
        }

        let mut first_err = None;
        for worker in workers {
            match worker.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_err.get_or_insert(err);
                }
                Err(_) => {
                    first_err.get_or_insert(PilotError::SystemError(
                        "a process thread panicked".to_string(),
                    ));
                }
            };
        }

        match first_err {
            Some(err) => Err(err),
            None => self.router.end(),
        }
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
