// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fresh_table_is_all_idle() {
    let t = ChannelTable::new(3);
    for c in 1..=3 {
        assert!(t.holder(c).is_none());
    }
}

#[test]
fn set_and_clear_round_trip() {
    let mut t = ChannelTable::new(2);
    t.set(1, Rank(5));
    assert_eq!(t.holder(1), Some(Rank(5)));
    t.clear(1);
    assert!(t.holder(1).is_none());
}

#[test]
fn clear_all_held_by_only_touches_matching_channels() {
    let mut t = ChannelTable::new(3);
    t.set(1, Rank(0));
    t.set(2, Rank(1));
    t.set(3, Rank(0));
    t.clear_all_held_by(Rank(0));
    assert!(t.holder(1).is_none());
    assert_eq!(t.holder(2), Some(Rank(1)));
    assert!(t.holder(3).is_none());
}
