//! Random sampling of naive partitions for rosters too large to enumerate.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::arena::{IndexGroup, RosterArena};
use crate::budget::Meter;
use crate::search::exhaustive::Scored;

/// Slice `order` into consecutive pairs; an odd leftover joins the last pair.
pub(crate) fn slice_into_groups(order: &[usize]) -> Vec<IndexGroup> {
    let n = order.len();
    if n < 2 {
        return Vec::new();
    }

    let pairs = n / 2;
    let mut groups: Vec<IndexGroup> = (0..pairs - 1)
        .map(|i| sorted(&order[2 * i..2 * i + 2]))
        .collect();
    groups.push(sorted(&order[2 * (pairs - 1)..]));
    groups
}

fn sorted(members: &[usize]) -> IndexGroup {
    let mut group = members.to_vec();
    group.sort_unstable();
    group
}

/// Draw shuffled partitions and keep the one with the fewest repeats.
///
/// At least one sample is always drawn, even when the meter is already
/// exhausted, so any roster of two or more gets a plan.
pub(crate) fn heuristic_partition<R: Rng>(
    arena: &RosterArena,
    attempts: usize,
    rng: &mut R,
    meter: &mut Meter<'_>,
) -> Option<Scored> {
    if arena.len() < 2 {
        return None;
    }

    let mut order: Vec<usize> = (0..arena.len()).collect();
    let mut best: Option<Scored> = None;
    let mut drawn = 0usize;

    while drawn < attempts.max(1) {
        if drawn > 0 && !meter.tick() {
            break;
        }
        drawn += 1;

        order.shuffle(rng);
        let groups = slice_into_groups(&order);
        let repeats = arena.count_repeats(&groups);
        if best.as_ref().map_or(true, |b| repeats < b.repeats) {
            best = Some(Scored { groups, repeats });
        }
        if repeats == 0 {
            break;
        }
    }

    debug!(drawn, best = best.as_ref().map(|b| b.repeats), "heuristic search finished");
    best
}
