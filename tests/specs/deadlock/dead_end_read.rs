// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distilled spec §8 scenario 4: A exits having never touched its one
//! channel; B reads from it regardless. Depending on which of the two
//! racing events -- A's `Finish` or B's `Read` -- the detector happens to
//! see first, the diagnosis is either "the peer had already exited" or "B
//! is now waiting on a peer that just exited out from under it". Both are
//! correct descriptions of the same dead end, and the distilled spec
//! explicitly accepts either.

use crate::prelude::*;

#[test]
fn reading_from_a_peer_that_never_writes_and_exits_is_a_dead_end() {
    let mut builder = SystemBuilder::new();
    let a = builder.add_process("A", 0);
    let b = builder.add_process("B", 0);
    let a_to_b = builder.add_channel(a, b).unwrap();
    let registry = builder.build();

    let (mut system, abort) = harness(registry);
    system.spawn(a, |_handle| Ok(()));
    system.spawn(b, move |handle| {
        let _: i32 = handle.read(a_to_b)?;
        Ok(())
    });

    let message = diagnose(system, abort);
    let lower = message.to_lowercase();
    assert!(
        lower.contains("process at other end of channel has exited")
            || lower.contains("process exiting leaves earlier operation hung"),
        "expected one of the two dead-end reasons, got: {message}"
    );
}
