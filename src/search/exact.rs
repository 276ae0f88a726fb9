//! Randomized backtracking that only ever accepts groups with no history.
//!
//! This is the fast path, not a complete solver: at each level it draws at
//! most `max_local_attempts` random pairs, and the whole search restarts
//! from a fresh shuffle at most `max_restarts` times.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::arena::{IndexGroup, RosterArena};
use crate::budget::Meter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactLimits {
    pub max_restarts: usize,
    pub max_local_attempts: usize,
    /// Total recursion nodes allowed across all restarts.
    pub node_limit: usize,
}

struct ExactSearch<'a, 'b, R> {
    arena: &'a RosterArena,
    limits: ExactLimits,
    rng: &'a mut R,
    meter: &'a mut Meter<'b>,
    nodes: usize,
}

impl<R: Rng> ExactSearch<'_, '_, R> {
    fn out_of_budget(&self) -> bool {
        self.nodes >= self.limits.node_limit || self.meter.exhausted()
    }

    /// Extend `acc` with a zero-repeat partition of `remaining`. On failure
    /// `acc` is left as it was found.
    fn solve(&mut self, remaining: &[usize], acc: &mut Vec<IndexGroup>) -> bool {
        if self.out_of_budget() || !self.meter.tick() {
            return false;
        }
        self.nodes += 1;

        match remaining.len() {
            0 => true,
            1 => false,
            2 | 3 => {
                let mut group = remaining.to_vec();
                group.sort_unstable();
                if self.arena.is_valid(&group) {
                    acc.push(group);
                    true
                } else {
                    false
                }
            }
            _ => {
                let mut pool = remaining.to_vec();
                for _ in 0..self.limits.max_local_attempts {
                    pool.shuffle(&mut *self.rng);
                    let pair = if pool[0] < pool[1] {
                        vec![pool[0], pool[1]]
                    } else {
                        vec![pool[1], pool[0]]
                    };
                    if !self.arena.is_valid(&pair) {
                        continue;
                    }

                    acc.push(pair);
                    if self.solve(&pool[2..], acc) {
                        return true;
                    }
                    acc.pop();

                    if self.out_of_budget() {
                        break;
                    }
                }
                false
            }
        }
    }
}

/// Try to build a partition of the whole arena with no repeated pairing.
pub(crate) fn exact_partition<R: Rng>(
    arena: &RosterArena,
    limits: ExactLimits,
    rng: &mut R,
    meter: &mut Meter<'_>,
) -> Option<Vec<IndexGroup>> {
    let mut order: Vec<usize> = (0..arena.len()).collect();
    let mut search = ExactSearch {
        arena,
        limits,
        rng,
        meter,
        nodes: 0,
    };

    for restart in 0..limits.max_restarts {
        order.shuffle(&mut *search.rng);
        let mut acc = Vec::with_capacity(order.len() / 2);
        if search.solve(&order, &mut acc) {
            debug!(restart, nodes = search.nodes, "exact search found a zero-repeat plan");
            return Some(acc);
        }
        if search.out_of_budget() {
            debug!(restart, nodes = search.nodes, "exact search ran out of budget");
            break;
        }
    }

    debug!(nodes = search.nodes, "exact search gave up");
    None
}
