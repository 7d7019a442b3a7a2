// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level integration tests: the end-to-end deadlock scenarios
//! from distilled spec §8, driven entirely through the public API
//! (`SystemBuilder`, `System`, real worker threads over
//! `InProcessTransport`) rather than by feeding text straight into
//! `Detector::event` as the detector crate's own unit tests do.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/deadlock/two_process_deadly_embrace.rs"]
mod two_process_deadly_embrace;
#[path = "specs/deadlock/three_process_read_cycle.rs"]
mod three_process_read_cycle;
#[path = "specs/deadlock/four_process_read_cycle.rs"]
mod four_process_read_cycle;
#[path = "specs/deadlock/dead_end_read.rs"]
mod dead_end_read;
#[path = "specs/deadlock/unsatisfiable_select.rs"]
mod unsatisfiable_select;
#[path = "specs/deadlock/select_participates_in_cycle.rs"]
mod select_participates_in_cycle;
