// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn bundle_len_matches_channel_count() {
    let b = BundleDescriptor {
        id: BundleId(1),
        usage: BundleUsage::Select,
        endpoint: Rank(0),
        channels: vec![ChannelId(1), ChannelId(2), ChannelId(3)],
    };
    assert_eq!(b.len(), 3);
    assert!(!b.is_empty());
}

#[test]
fn empty_bundle_reports_empty() {
    let b = BundleDescriptor {
        id: BundleId(1),
        usage: BundleUsage::Gather,
        endpoint: Rank(0),
        channels: vec![],
    };
    assert!(b.is_empty());
}
