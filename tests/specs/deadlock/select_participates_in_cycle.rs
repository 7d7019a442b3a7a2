// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distilled spec §8 scenario 6: Q, R, and S read around a ring the same
//! way as the pure read-cycle scenarios, except the ring's closing edge
//! isn't a plain read -- it's M selecting over a bundle whose members are
//! Q's and R's outgoing channels. Depending on which bundle member the
//! cycle search reaches first, the detector either walks the select edge
//! straight into the ring (a circular wait) or finds the whole bundle
//! cycle-implicated and drops it as unfulfillable. The distilled spec
//! accepts either.

use crate::prelude::*;

#[test]
fn select_closing_a_ring_is_either_a_cycle_or_unfulfillable() {
    let mut builder = SystemBuilder::new();
    let q = builder.add_process("Q", 0);
    let r = builder.add_process("R", 0);
    let s = builder.add_process("S", 0);
    let m = builder.add_process("M", 0);

    let s_to_q = builder.add_channel(s, q).unwrap();
    let q_to_r = builder.add_channel(q, r).unwrap();
    let m_to_s = builder.add_channel(m, s).unwrap();
    let q_to_m = builder.add_channel(q, m).unwrap();
    let r_to_m = builder.add_channel(r, m).unwrap();
    let bundle = builder
        .add_bundle(BundleUsage::Select, m, &[q_to_m, r_to_m])
        .unwrap();
    let registry = builder.build();

    let (mut system, abort) = harness(registry);
    system.spawn(q, move |handle| {
        let _: i32 = handle.read(s_to_q)?;
        Ok(())
    });
    system.spawn(r, move |handle| {
        let _: i32 = handle.read(q_to_r)?;
        Ok(())
    });
    system.spawn(s, move |handle| {
        let _: i32 = handle.read(m_to_s)?;
        Ok(())
    });
    system.spawn(m, move |handle| {
        let _: (pilot::ChannelId, i32) = handle.select(bundle)?;
        Ok(())
    });

    let message = diagnose(system, abort);
    let lower = message.to_lowercase();
    assert!(
        lower.contains("circular wait") || lower.contains("select cannot be fulfilled"),
        "expected either a circular wait or an unfulfillable select, got: {message}"
    );
}
