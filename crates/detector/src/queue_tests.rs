// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pilot_core::Rank;

fn ev(text: &str) -> EventRecord {
    EventRecord::parse(text, '\t').unwrap()
}

#[test]
fn fresh_queue_is_empty() {
    let q = EventQueue::new();
    assert!(q.is_empty());
    assert_eq!(q.len(), 0);
}

#[test]
fn find_ready_returns_first_matching_in_insertion_order() {
    let mut q = EventQueue::new();
    q.push(ev("C\t0\tWri\t1"));
    q.push(ev("C\t1\tRea\t1"));
    let idx = q.find_ready(|r| r.subject == Rank(1));
    assert_eq!(idx, Some(1));
}

#[test]
fn handled_events_are_skipped_by_find_ready() {
    let mut q = EventQueue::new();
    q.push(ev("C\t0\tWri\t1"));
    q.mark_handled(0);
    assert_eq!(q.find_ready(|_| true), None);
}

#[test]
fn compact_removes_handled_and_preserves_order() {
    let mut q = EventQueue::new();
    q.push(ev("C\t0\tWri\t1"));
    q.push(ev("C\t1\tRea\t1"));
    q.push(ev("C\t0\tWri\t2"));
    q.mark_handled(1);
    let remaining = q.compact();
    assert_eq!(remaining, 2);
    assert_eq!(q.record_at(0).raw, "C\t0\tWri\t1");
    assert_eq!(q.record_at(1).raw, "C\t0\tWri\t2");
}

#[test]
fn duplicate_event_for_blocked_subject_both_queue_one_handles() {
    let mut q = EventQueue::new();
    q.push(ev("C\t0\tRea\t1"));
    q.push(ev("C\t0\tRea\t1"));
    assert_eq!(q.len(), 2);
    let idx = q.find_ready(|_| true).unwrap();
    q.mark_handled(idx);
    assert_eq!(q.compact(), 1);
}
