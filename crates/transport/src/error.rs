// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no route registered from rank {from} to rank {to} on tag {tag}")]
    NoRoute { from: u32, to: u32, tag: u32 },

    #[error("transport is shutting down")]
    Closed,
}
