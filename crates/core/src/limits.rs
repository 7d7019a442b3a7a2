// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled-in limits and wire-format defaults.
//!
//! Exposed publicly in case callers trip an error tied to one of these; they
//! are configuration, not hard-coded into the algorithms.

/// Default field separator used by the event wire format.
pub const DEFAULT_SEPARATOR: char = '\t';

/// Default maximum length, in bytes, of a single physical event line before
/// the log router must split it across a continuation.
pub const DEFAULT_FRAME_LEN: usize = 80;

/// Final byte of a physical line that marks "more to come" for a logical
/// event spanning multiple physical lines.
pub const FRAME_CONTINUATION: u8 = b'+';

/// Maximum length for process/channel/bundle display names.
pub const MAX_NAMELEN: usize = 100;
