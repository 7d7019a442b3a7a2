// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distilled spec §8 scenario 2: a three-process ring M -> Q -> R -> M
//! where every process reads from its predecessor and nobody ever
//! writes. Whichever read closes the ring last, the dependency matrix
//! describes a pure cycle, so the outcome is always a circular-wait
//! abort regardless of the order the three worker threads happen to run
//! in.

use crate::prelude::*;

#[test]
fn three_process_ring_of_reads_closes_a_circular_wait() {
    let mut builder = SystemBuilder::new();
    let m = builder.add_process("M", 0);
    let q = builder.add_process("Q", 0);
    let r = builder.add_process("R", 0);
    let m_to_q = builder.add_channel(m, q).unwrap();
    let q_to_r = builder.add_channel(q, r).unwrap();
    let r_to_m = builder.add_channel(r, m).unwrap();
    let registry = builder.build();

    let (mut system, abort) = harness(registry);
    system.spawn(m, move |handle| {
        let _: i32 = handle.read(r_to_m)?;
        Ok(())
    });
    system.spawn(q, move |handle| {
        let _: i32 = handle.read(m_to_q)?;
        Ok(())
    });
    system.spawn(r, move |handle| {
        let _: i32 = handle.read(q_to_r)?;
        Ok(())
    });

    let message = diagnose(system, abort);
    assert!(
        message.to_lowercase().contains("circular wait"),
        "expected a circular wait, got: {message}"
    );
}
