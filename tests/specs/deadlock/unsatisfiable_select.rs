// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distilled spec §8 scenario 5: M hands each of three peers one value
//! over a dedicated write channel; each peer reads it and exits without
//! ever touching the select bundle M is about to wait on. By the time M
//! selects, every bundle producer is either already dead or dies an
//! instant later -- so the diagnosis is either "nothing could ever have
//! satisfied this select" or "the producer that could still have
//! satisfied it just exited", depending on exactly when M's select call
//! and the last peer's exit interleave. The distilled spec accepts
//! either.

use crate::prelude::*;

#[test]
fn select_on_peers_that_exit_without_writing_is_unfulfillable() {
    let mut builder = SystemBuilder::new();
    let m = builder.add_process("M", 0);
    let p = builder.add_process("P", 0);
    let q = builder.add_process("Q", 0);
    let r = builder.add_process("R", 0);

    let m_to_p = builder.add_channel(m, p).unwrap();
    let m_to_q = builder.add_channel(m, q).unwrap();
    let m_to_r = builder.add_channel(m, r).unwrap();
    let p_to_m = builder.add_channel(p, m).unwrap();
    let q_to_m = builder.add_channel(q, m).unwrap();
    let r_to_m = builder.add_channel(r, m).unwrap();
    let bundle = builder
        .add_bundle(BundleUsage::Select, m, &[p_to_m, q_to_m, r_to_m])
        .unwrap();
    let registry = builder.build();

    let (mut system, abort) = harness(registry);
    system.spawn(m, move |handle| {
        handle.write(m_to_p, &1i32)?;
        handle.write(m_to_q, &1i32)?;
        handle.write(m_to_r, &1i32)?;
        let _: (pilot::ChannelId, i32) = handle.select(bundle)?;
        Ok(())
    });
    system.spawn(p, move |handle| {
        let _: i32 = handle.read(m_to_p)?;
        Ok(())
    });
    system.spawn(q, move |handle| {
        let _: i32 = handle.read(m_to_q)?;
        Ok(())
    });
    system.spawn(r, move |handle| {
        let _: i32 = handle.read(m_to_r)?;
        Ok(())
    });

    let message = diagnose(system, abort);
    assert!(
        message.to_lowercase().contains("select cannot be fulfilled"),
        "expected an unfulfillable select (either flavor), got: {message}"
    );
}
