//! The three partitioning strategies.
//!
//! Each strategy works on a [`RosterArena`] in index space. The functions in
//! this module are the participant-level entry points for callers that want
//! one strategy on its own; [`crate::engine::Matcher`] chains them.

pub mod exact;
pub mod exhaustive;
pub mod heuristic;

use std::ops::ControlFlow;

use rand::Rng;

use crate::arena::RosterArena;
use crate::budget::Budget;
use crate::group::MatchingPlan;
use crate::history::History;
use crate::participant::Participant;
use crate::repeats::{find_repeats, RepeatReport};

pub use exact::ExactLimits;
pub use exhaustive::MAX_EXHAUSTIVE_THRESHOLD;

/// Randomized backtracking for a zero-repeat plan. `roster` must be
/// deduplicated.
pub fn try_exact<R: Rng>(
    roster: &[Participant],
    history: &History,
    max_restarts: usize,
    max_local_attempts: usize,
    rng: &mut R,
) -> Option<MatchingPlan> {
    let arena = RosterArena::new(roster, history);
    let limits = ExactLimits {
        max_restarts,
        max_local_attempts,
        node_limit: usize::MAX,
    };
    let budget = Budget::unlimited();
    exact::exact_partition(&arena, limits, rng, &mut budget.meter()).map(|groups| arena.materialize(&groups))
}

/// Every partition of `roster` into pairs plus at most one trio.
///
/// The count grows factorially; keep `roster` at or below
/// [`MAX_EXHAUSTIVE_THRESHOLD`].
pub fn find_all_partitions(roster: &[Participant]) -> Vec<MatchingPlan> {
    let arena = RosterArena::new(roster, &History::new());
    let budget = Budget::unlimited();
    let mut plans = Vec::new();
    let _ = exhaustive::for_each_partition(arena.len(), &mut budget.meter(), |groups| {
        plans.push(arena.materialize(groups));
        ControlFlow::Continue(())
    });
    plans
}

/// The enumerated plan with the fewest repeats, or `None` when the roster
/// cannot be partitioned at all.
pub fn exhaustive_best(roster: &[Participant], history: &History) -> Option<(MatchingPlan, RepeatReport)> {
    let arena = RosterArena::new(roster, history);
    let budget = Budget::unlimited();
    exhaustive::exhaustive_partition(&arena, &mut budget.meter()).map(|best| {
        let plan = arena.materialize(&best.groups);
        let report = find_repeats(&plan, history);
        (plan, report)
    })
}

/// Best of `attempts` shuffled pairings, or `None` for fewer than two people.
pub fn heuristic_best<R: Rng>(
    roster: &[Participant],
    history: &History,
    attempts: usize,
    rng: &mut R,
) -> Option<(MatchingPlan, RepeatReport)> {
    let arena = RosterArena::new(roster, history);
    let budget = Budget::unlimited();
    heuristic::heuristic_partition(&arena, attempts, rng, &mut budget.meter()).map(|best| {
        let plan = arena.materialize(&best.groups);
        let report = find_repeats(&plan, history);
        (plan, report)
    })
}
