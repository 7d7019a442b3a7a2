// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain, programmatically-constructed runtime configuration. No flag
//! parser or config file format is provided -- embedding applications own
//! their own CLI layer (distilled spec §1 Non-goal).

use pilot_core::{DEFAULT_FRAME_LEN, DEFAULT_SEPARATOR};

/// Tunables for one [`crate::System`] run.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Field separator for the wire format (distilled spec §4.1/§6).
    pub separator: char,
    /// Line length past which a logged event is continuation-joined
    /// (distilled spec §6).
    pub frame_len: usize,
    /// Log a warning once the detector's retained event queue grows past
    /// this many entries, as a sign processes are blocking faster than
    /// they're being matched.
    pub queue_warn_threshold: usize,
    /// Also forward every logged event to the `tracing` offline sink, for
    /// post-mortem analysis independent of the live detector.
    pub offline_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            frame_len: DEFAULT_FRAME_LEN,
            queue_warn_threshold: 256,
            offline_log: true,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
