// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Re-joins physical log lines that were split at the configured frame
//! length back into one logical event string.
//!
//! Distilled spec §6: "Lines exceeding a fixed frame length ... use a `+`
//! continuation marker in the final byte and are re-joined by the log
//! router before delivery to the detector." The log router owns this, not
//! the detector — `pilot-runtime` wires a `FrameJoiner` in front of
//! `Detector::event`.

use pilot_core::FRAME_CONTINUATION;

/// Split one logical event string into the physical lines a log writer
/// would persist: chunks of at most `frame_len` bytes, every chunk but the
/// last ending in the continuation marker (distilled spec §6). The inverse
/// of [`FrameJoiner::feed`].
///
/// `frame_len` must be at least 2 (one byte of payload plus the
/// continuation marker); smaller values fall back to 2 rather than looping
/// forever on a single byte of progress per chunk.
pub fn split_frames(event: &str, frame_len: usize) -> Vec<String> {
    let frame_len = frame_len.max(2);
    if event.len() <= frame_len {
        return vec![event.to_string()];
    }

    let bytes = event.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let remaining = bytes.len() - start;
        if remaining <= frame_len {
            lines.push(event[start..].to_string());
            break;
        }
        let chunk_len = frame_len - 1;
        let mut line = String::with_capacity(frame_len);
        line.push_str(&event[start..start + chunk_len]);
        line.push(FRAME_CONTINUATION as char);
        lines.push(line);
        start += chunk_len;
    }
    lines
}

/// Accumulates physical lines until a non-continued one completes a
/// logical event.
#[derive(Debug, Default)]
pub struct FrameJoiner {
    pending: String,
}

impl FrameJoiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one physical line (without its trailing newline). Returns
    /// `Some(logical_event)` once a non-continued line completes the
    /// accumulation, or `None` if more continuation lines are expected.
    pub fn feed(&mut self, line: &str) -> Option<String> {
        let continued = line.as_bytes().last() == Some(&FRAME_CONTINUATION);
        let body = if continued { &line[..line.len() - 1] } else { line };
        self.pending.push_str(body);

        if continued {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
