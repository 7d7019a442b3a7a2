// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the end-to-end deadlock scenarios (distilled spec
//! §8), driven through the public API rather than `Detector::event`
//! directly: a real `System` wired over `InProcessTransport`, with a
//! `RecordingAbort` standing in for the default process-exit hook so the
//! diagnosis can be observed instead of tearing down the test binary.

#![allow(dead_code)]

pub use pilot::{
    BundleUsage, Config, FakeClock, InProcessTransport, RecordingAbort, Registry, System,
    SystemBuilder,
};
use std::time::{Duration, Instant};

/// Build a `System` over the real in-process transport, with a fresh
/// `RecordingAbort` wired in place of the process-exit hook.
pub fn harness(registry: Registry) -> (System<InProcessTransport, FakeClock, RecordingAbort>, RecordingAbort) {
    let abort = RecordingAbort::new();
    let system = System::with_clock_and_abort(
        registry,
        InProcessTransport::new(),
        Config::default(),
        FakeClock::new(),
        abort.clone(),
    );
    (system, abort)
}

/// Launch `system` on its own thread and poll `abort` until it records a
/// diagnosis. A genuinely deadlocked scenario leaves at least one worker
/// parked forever in a blocking transport call -- exactly as it would in
/// production, right up until the process-wide abort tears everything
/// down at once -- so `launch()` is never joined here: joining it would
/// hang the test on precisely the thread the detector correctly left
/// blocked.
pub fn diagnose(system: System<InProcessTransport, FakeClock, RecordingAbort>, abort: RecordingAbort) -> String {
    std::thread::spawn(move || {
        let _ = system.launch();
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(message) = abort.last_message() {
            return message;
        }
        assert!(Instant::now() < deadline, "no deadlock was diagnosed within 5s");
        std::thread::sleep(Duration::from_millis(5));
    }
}
