//! Complete enumeration of partitions for small rosters.
//!
//! The first remaining participant is fixed and paired with every other
//! remaining participant in turn. For an odd roster, each level also tries
//! every trio containing that participant until the single trio is placed,
//! so every partition into pairs plus at most one trio is visited exactly
//! once.

use std::ops::ControlFlow;

use tracing::debug;

use crate::arena::{IndexGroup, RosterArena};
use crate::budget::Meter;

/// Largest roster the enumeration may be asked to cover. An 11-person
/// roster already has 17,325 partitions and 13 has almost three million.
pub const MAX_EXHAUSTIVE_THRESHOLD: usize = 12;

/// Visit every partition of `0..n`. Stops when `visit` breaks or the meter
/// runs out; the return value says which happened.
pub(crate) fn for_each_partition<F>(n: usize, meter: &mut Meter<'_>, mut visit: F) -> ControlFlow<()>
where
    F: FnMut(&[IndexGroup]) -> ControlFlow<()>,
{
    let remaining: Vec<usize> = (0..n).collect();
    let mut acc = Vec::with_capacity(n / 2);
    enumerate(&remaining, n % 2 == 1, &mut acc, meter, &mut visit)
}

fn enumerate<F>(
    remaining: &[usize],
    trio_pending: bool,
    acc: &mut Vec<IndexGroup>,
    meter: &mut Meter<'_>,
    visit: &mut F,
) -> ControlFlow<()>
where
    F: FnMut(&[IndexGroup]) -> ControlFlow<()>,
{
    if !meter.tick() {
        return ControlFlow::Break(());
    }

    let Some((&first, rest)) = remaining.split_first() else {
        return visit(acc);
    };

    // With the trio still owed, three people left must become that trio.
    let pairs_allowed = !(trio_pending && rest.len() == 2);
    if pairs_allowed {
        for i in 0..rest.len() {
            let tail = without(rest, &[i]);
            acc.push(vec![first, rest[i]]);
            let flow = enumerate(&tail, trio_pending, acc, meter, visit);
            acc.pop();
            if flow.is_break() {
                return flow;
            }
        }
    }

    if trio_pending {
        for i in 0..rest.len() {
            for j in i + 1..rest.len() {
                let tail = without(rest, &[i, j]);
                acc.push(vec![first, rest[i], rest[j]]);
                let flow = enumerate(&tail, false, acc, meter, visit);
                acc.pop();
                if flow.is_break() {
                    return flow;
                }
            }
        }
    }

    ControlFlow::Continue(())
}

fn without(items: &[usize], skip: &[usize]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| !skip.contains(i))
        .map(|(_, &v)| v)
        .collect()
}

/// Best partition found by enumeration, with its repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scored {
    pub groups: Vec<IndexGroup>,
    pub repeats: usize,
}

/// Enumerate partitions of the arena and keep the one with the fewest
/// repeats, stopping at the first zero-repeat partition.
pub(crate) fn exhaustive_partition(arena: &RosterArena, meter: &mut Meter<'_>) -> Option<Scored> {
    let mut best: Option<Scored> = None;
    let mut visited = 0usize;

    let flow = for_each_partition(arena.len(), meter, |groups| {
        visited += 1;
        let repeats = arena.count_repeats(groups);
        if best.as_ref().map_or(true, |b| repeats < b.repeats) {
            best = Some(Scored {
                groups: groups.to_vec(),
                repeats,
            });
        }
        if repeats == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    debug!(
        visited,
        stopped_early = flow.is_break(),
        best = best.as_ref().map(|b| b.repeats),
        "exhaustive search finished"
    );
    best
}
