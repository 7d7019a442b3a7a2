// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::fatal::RecordingAbort;
use crate::registry::SystemBuilder;
use pilot_transport::InProcessTransport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct Ping(u32);

#[test]
fn two_process_handshake_completes_without_error() {
    let mut b = SystemBuilder::new();
    let producer = b.add_process("Producer", 0);
    let consumer = b.add_process("Consumer", 0);
    let channel = b.add_channel(producer, consumer).unwrap();
    let registry = b.build();

    let mut system = System::new(registry, InProcessTransport::new(), Config::default());
    system.spawn(producer, move |handle| handle.write(channel, &Ping(42)));
    system.spawn(consumer, move |handle| {
        let value: Ping = handle.read(channel)?;
        assert_eq!(value, Ping(42));
        Ok(())
    });

    system.launch().unwrap();
}

#[test]
fn a_read_from_an_already_finished_producer_aborts_the_run() {
    let mut b = SystemBuilder::new();
    let producer = b.add_process("Producer", 0);
    let consumer = b.add_process("Consumer", 0);
    let channel = b.add_channel(producer, consumer).unwrap();
    let registry = b.build();

    let abort = RecordingAbort::new();
    let mut system = System::with_clock_and_abort(
        registry,
        InProcessTransport::new(),
        Config::default(),
        FakeClock::new(),
        abort.clone(),
    );
    system.spawn(producer, |_handle| Ok(()));
    system.spawn(consumer, move |handle| {
        std::thread::sleep(Duration::from_millis(50));
        let _: Ping = handle.read(channel)?;
        Ok(())
    });

    let result = system.launch();
    assert!(result.is_err());
    assert!(abort
        .last_message()
        .expect("the stalled read should have triggered the fatal abort hook")
        .contains("Process at other end of channel has exited"));
}
