// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distilled spec §8 scenario 1: two processes each reading from the
//! channel the other one produces. Neither side ever writes, so both
//! reads are symmetric waits on two distinct channels -- a conflict the
//! detector can only describe as a deadly embrace, not a simple cycle.

use crate::prelude::*;

#[test]
fn two_reads_on_opposite_direction_channels_is_a_deadly_embrace() {
    let mut builder = SystemBuilder::new();
    let a = builder.add_process("A", 0);
    let b = builder.add_process("B", 0);
    let a_to_b = builder.add_channel(a, b).unwrap();
    let b_to_a = builder.add_channel(b, a).unwrap();
    let registry = builder.build();

    let (mut system, abort) = harness(registry);
    system.spawn(a, move |handle| {
        let _: i32 = handle.read(b_to_a)?;
        Ok(())
    });
    system.spawn(b, move |handle| {
        let _: i32 = handle.read(a_to_b)?;
        Ok(())
    });

    let message = diagnose(system, abort);
    assert!(
        message.to_lowercase().contains("conflicting channels create deadly embrace"),
        "expected a deadly embrace, got: {message}"
    );
}
