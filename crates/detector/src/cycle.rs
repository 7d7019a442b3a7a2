// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cycle search over the dependency matrix, with select-node semantics and
//! path reporting (distilled spec §4.3).

use crate::matrix::{DependencyKind, Matrix};
use crate::processes::ProcessTable;
use pilot_core::{ChainEntry, DetectorEnv, Rank};

/// Test whether a directed wait-path exists from `p` back to `q` through
/// non-zero matrix entries.
///
/// Called from the *target* of a newly installed dependency back to the
/// *subject* that installed it. When `collect_chain` is `Some`, a
/// [`ChainEntry`] is appended for every process on a discovered cycle as
/// the recursion unwinds (nearest to the closing edge first), matching the
/// reference detector's traceback order.
pub fn is_cycle<E: DetectorEnv>(
    matrix: &mut Matrix,
    processes: &ProcessTable,
    env: &E,
    p: usize,
    q: usize,
    mut collect_chain: Option<&mut Vec<ChainEntry>>,
) -> bool {
    if p == q {
        return true;
    }

    // First pass: find where to start checking cycles. A select row (-2
    // entries) short-circuits to "no cycle, yet" the moment any producer is
    // still running — that producer might still satisfy the select.
    let mut first_dep: Option<usize> = None;
    for (r, kind) in matrix.row(p) {
        match kind {
            DependencyKind::AwaitingRead | DependencyKind::AwaitingWrite => {
                first_dep = Some(r);
                break;
            }
            DependencyKind::AwaitingAnyProducer => {
                if processes.state(r).is_run() {
                    return false;
                }
                if first_dep.is_none() {
                    first_dep = Some(r);
                }
            }
        }
    }

    let Some(first_dep) = first_dep else {
        return false;
    };

    // Second pass: walk the row again from first_dep, recursing through
    // each dependency and zeroing it first to guard against infinite
    // recursion (restored after the recursive call returns).
    for r in first_dep..matrix.len() {
        let Some(kind) = matrix.get(p, r) else {
            continue;
        };
        matrix.clear(p, r);
        let found = is_cycle(matrix, processes, env, r, q, collect_chain.as_deref_mut());
        matrix.set(p, r, kind);
        if found {
            if let Some(chain) = collect_chain.as_deref_mut() {
                chain.push(ChainEntry {
                    rank: Rank(p as u32),
                    name: env.process_name(Rank(p as u32)).to_string(),
                    argument: env.process_argument(Rank(p as u32)),
                    cause: processes.cause(p).unwrap_or("").to_string(),
                });
            }
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "cycle_tests.rs"]
mod tests;
