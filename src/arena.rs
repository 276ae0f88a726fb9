//! The roster frozen into an index-addressed array, with history projected
//! onto those indices so the searches never touch strings.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::group::{Group, MatchingPlan};
use crate::history::History;
use crate::participant::Participant;

/// A group expressed as roster indices, sorted ascending.
pub(crate) type IndexGroup = Vec<usize>;

#[derive(Debug)]
pub struct RosterArena {
    participants: Vec<Participant>,
    /// Row-major `n * n` matrix of pairs recorded in history.
    forbidden: Vec<bool>,
    triples: HashSet<[usize; 3]>,
}

impl RosterArena {
    /// `roster` must already be deduplicated.
    pub fn new(roster: &[Participant], history: &History) -> Self {
        let n = roster.len();
        let index: HashMap<&str, usize> = roster.iter().enumerate().map(|(i, p)| (p.key(), i)).collect();

        let mut forbidden = vec![false; n * n];
        for pair in history.pairs() {
            if let (Some(&a), Some(&b)) = (index.get(pair.first().key()), index.get(pair.second().key())) {
                forbidden[a * n + b] = true;
                forbidden[b * n + a] = true;
            }
        }

        let mut triples = HashSet::new();
        for triple in history.triples() {
            let [a, b, c] = triple.members();
            if let (Some(&a), Some(&b), Some(&c)) = (index.get(a.key()), index.get(b.key()), index.get(c.key())) {
                triples.insert(sorted3(a, b, c));
            }
        }

        Self {
            participants: roster.to_vec(),
            forbidden,
            triples,
        }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub(crate) fn pair_seen(&self, a: usize, b: usize) -> bool {
        self.forbidden[a * self.participants.len() + b]
    }

    pub(crate) fn triple_seen(&self, a: usize, b: usize, c: usize) -> bool {
        self.triples.contains(&sorted3(a, b, c))
    }

    /// Index-space twin of [`crate::oracle::is_valid`].
    pub(crate) fn is_valid(&self, group: &[usize]) -> bool {
        match *group {
            [a, b] => !self.pair_seen(a, b),
            [a, b, c] => {
                !self.pair_seen(a, b)
                    && !self.pair_seen(a, c)
                    && !self.pair_seen(b, c)
                    && !self.triple_seen(a, b, c)
            }
            _ => false,
        }
    }

    /// Index-space twin of [`crate::repeats::count_repeats`].
    ///
    /// Groups of a partition are disjoint, so no pair can be counted twice.
    pub(crate) fn count_repeats(&self, groups: &[IndexGroup]) -> usize {
        groups
            .iter()
            .map(|g| match *g.as_slice() {
                [a, b] => usize::from(self.pair_seen(a, b)),
                [a, b, c] => {
                    usize::from(self.pair_seen(a, b))
                        + usize::from(self.pair_seen(a, c))
                        + usize::from(self.pair_seen(b, c))
                        + usize::from(self.triple_seen(a, b, c))
                }
                _ => 0,
            })
            .sum()
    }

    /// Turn index groups back into a plan of real groups.
    pub(crate) fn materialize(&self, groups: &[IndexGroup]) -> MatchingPlan {
        let groups = groups
            .iter()
            .map(|g| Group::from_distinct(g.iter().map(|&i| self.participants[i].clone()).collect()))
            .collect();
        MatchingPlan::new(groups)
    }
}

fn sorted3(a: usize, b: usize, c: usize) -> [usize; 3] {
    let mut t = [a, b, c];
    t.sort_unstable();
    t
}
